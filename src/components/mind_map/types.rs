//! Snapshot data structures and logical-space geometry.

use serde::{Deserialize, Serialize};

/// A point in either screen or logical space, depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Width and height in logical units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Size {
	/// Size of `width` by `height`.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Whether either dimension is zero or negative.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

/// Axis-aligned rectangle, stored as its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Rect {
	/// Rectangle of `size` centered on `center`.
	pub fn centered(center: Point, size: Size) -> Self {
		Self {
			x: center.x - size.width / 2.0,
			y: center.y - size.height / 2.0,
			width: size.width,
			height: size.height,
		}
	}

	/// Right edge.
	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	/// Bottom edge.
	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	/// Midpoint.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Edge-inclusive containment test.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect {
			x,
			y,
			width: self.right().max(other.right()) - x,
			height: self.bottom().max(other.bottom()) - y,
		}
	}
}

/// A note as supplied by the storage layer.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteRecord {
	/// Unique identifier, referenced by links.
	pub id: String,
	/// Display title, used as the node label.
	pub title: String,
	/// Opaque grouping path (e.g. "projects/rust"). Only used for pre-filtering.
	#[serde(default)]
	pub group: Option<String>,
}

/// A directed link between two notes.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteLink {
	/// Source note ID.
	pub source: String,
	/// Target note ID.
	pub target: String,
}

/// Complete input for one map update: notes, links and an optional focus.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GraphSnapshot {
	/// Every note to show.
	pub notes: Vec<NoteRecord>,
	/// Links between notes; dangling ones are ignored.
	pub links: Vec<NoteLink>,
	/// Note to treat as the layout root and to highlight.
	#[serde(default)]
	pub focus: Option<String>,
}

/// Supplies the full note and link lists on demand.
pub trait SnapshotProvider {
	/// All notes.
	fn notes(&self) -> Vec<NoteRecord>;
	/// All links.
	fn links(&self) -> Vec<NoteLink>;
}

impl GraphSnapshot {
	/// Builds a snapshot from a provider, optionally keeping only notes whose
	/// group starts with `group_prefix`.
	pub fn from_provider(
		provider: &impl SnapshotProvider,
		group_prefix: Option<&str>,
		focus: Option<String>,
	) -> Self {
		let snapshot = Self {
			notes: provider.notes(),
			links: provider.links(),
			focus,
		};
		match group_prefix {
			Some(prefix) => snapshot.filter_group(prefix),
			None => snapshot,
		}
	}

	/// Keeps notes in the given group (or any subgroup of it) and the links
	/// between them.
	pub fn filter_group(mut self, prefix: &str) -> Self {
		self.notes.retain(|note| {
			note.group.as_deref().is_some_and(|group| {
				group == prefix
					|| group
						.strip_prefix(prefix)
						.is_some_and(|rest| rest.starts_with('/'))
			})
		});
		let kept: std::collections::HashSet<&str> =
			self.notes.iter().map(|n| n.id.as_str()).collect();
		self.links
			.retain(|l| kept.contains(l.source.as_str()) && kept.contains(l.target.as_str()));
		if self
			.focus
			.as_deref()
			.is_some_and(|focus| !kept.contains(focus))
		{
			self.focus = None;
		}
		self
	}

	/// `(id, label)` pairs in snapshot order.
	pub fn node_pairs(&self) -> Vec<(String, String)> {
		self.notes
			.iter()
			.map(|n| (n.id.clone(), n.title.clone()))
			.collect()
	}

	/// `(source, target)` pairs in snapshot order.
	pub fn edge_pairs(&self) -> Vec<(String, String)> {
		self.links
			.iter()
			.map(|l| (l.source.clone(), l.target.clone()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn note(id: &str, group: Option<&str>) -> NoteRecord {
		NoteRecord {
			id: id.into(),
			title: id.to_uppercase(),
			group: group.map(Into::into),
		}
	}

	struct Store;

	impl SnapshotProvider for Store {
		fn notes(&self) -> Vec<NoteRecord> {
			vec![
				note("a", Some("work")),
				note("b", Some("work/rust")),
				note("c", Some("workshop")),
				note("d", None),
			]
		}

		fn links(&self) -> Vec<NoteLink> {
			vec![
				NoteLink {
					source: "a".into(),
					target: "b".into(),
				},
				NoteLink {
					source: "b".into(),
					target: "c".into(),
				},
			]
		}
	}

	#[test]
	fn group_filter_keeps_subgroups_and_internal_links() {
		let snapshot = GraphSnapshot::from_provider(&Store, Some("work"), Some("c".into()));
		let ids: Vec<&str> = snapshot.notes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(snapshot.links.len(), 1);
		assert_eq!(snapshot.focus, None);
	}

	#[test]
	fn snapshot_parses_from_json() {
		let json = r#"{
			"notes": [{"id": "1", "title": "Note A"}, {"id": "2", "title": "Note B", "group": "x"}],
			"links": [{"source": "1", "target": "2"}],
			"focus": "1"
		}"#;
		let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(snapshot.node_pairs()[1], ("2".to_string(), "Note B".to_string()));
		assert_eq!(snapshot.edge_pairs(), vec![("1".to_string(), "2".to_string())]);
		assert_eq!(snapshot.focus.as_deref(), Some("1"));
	}

	#[test]
	fn rect_contains_is_edge_inclusive() {
		let rect = Rect::centered(Point::new(10.0, 10.0), Size::new(4.0, 2.0));
		assert!(rect.contains(Point::new(8.0, 9.0)));
		assert!(rect.contains(Point::new(12.0, 11.0)));
		assert!(!rect.contains(Point::new(12.1, 10.0)));
	}
}
