//! The graph being displayed: nodes, directed edges and the focused node.

use std::collections::HashMap;

/// A node as supplied by the host, before layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelNode {
	/// Unique id.
	pub id: String,
	/// Display label; `\n` separates lines.
	pub label: String,
}

/// Node and edge collections, replaced wholesale on every update.
///
/// Nodes keep their first-seen order so iteration (layout ties, hit-testing,
/// paint order) is deterministic.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<ModelNode>,
	index: HashMap<String, usize>,
	edges: Vec<(String, String)>,
	focus: Option<String>,
}

impl GraphModel {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces all nodes and edges. A repeated node id keeps its first
	/// position but takes the later label. Edges are stored unchecked.
	pub fn update_graph<I, S>(
		&mut self,
		nodes: I,
		edges: &[(String, String)],
		focus: Option<&str>,
	) where
		I: IntoIterator<Item = (S, S)>,
		S: Into<String>,
	{
		self.nodes.clear();
		self.index.clear();
		for (id, label) in nodes {
			let (id, label) = (id.into(), label.into());
			match self.index.get(&id) {
				Some(&i) => self.nodes[i].label = label,
				None => {
					self.index.insert(id.clone(), self.nodes.len());
					self.nodes.push(ModelNode { id, label });
				}
			}
		}
		self.edges = edges.to_vec();
		self.focus = focus.map(str::to_string);
	}

	/// Nodes in first-seen order.
	pub fn nodes(&self) -> &[ModelNode] {
		&self.nodes
	}

	/// Edges as given, including dangling ones.
	pub fn edges(&self) -> &[(String, String)] {
		&self.edges
	}

	/// Number of distinct nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Position of `id` in [`Self::nodes`].
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// The stored focus id, only if it names a node in the model.
	pub fn focus(&self) -> Option<&str> {
		self.focus
			.as_deref()
			.filter(|id| self.index.contains_key(*id))
	}

	/// Replaces the focus without touching the graph.
	pub fn set_focus(&mut self, id: Option<String>) {
		self.focus = id;
	}

	/// Edges whose endpoints both exist, as index pairs.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.edges
			.iter()
			.filter_map(|(s, t)| Some((self.index_of(s)?, self.index_of(t)?)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(s, t)| (s.to_string(), t.to_string()))
			.collect()
	}

	#[test]
	fn duplicate_ids_keep_last_label() {
		let mut model = GraphModel::new();
		model.update_graph(
			[("a", "first"), ("b", "B"), ("a", "second")],
			&[],
			None,
		);
		assert_eq!(model.len(), 2);
		assert_eq!(model.nodes()[0].label, "second");
		assert_eq!(model.nodes()[1].id, "b");
	}

	#[test]
	fn update_replaces_everything() {
		let mut model = GraphModel::new();
		model.update_graph([("a", "A"), ("b", "B")], &edges(&[("a", "b")]), Some("a"));
		model.update_graph([("c", "C")], &[], None);
		assert_eq!(model.len(), 1);
		assert!(model.edges().is_empty());
		assert_eq!(model.focus(), None);
		assert_eq!(model.index_of("a"), None);
	}

	#[test]
	fn dangling_edges_and_unknown_focus_are_ignored() {
		let mut model = GraphModel::new();
		model.update_graph(
			[("a", "A"), ("b", "B")],
			&edges(&[("a", "b"), ("a", "ghost"), ("ghost", "b")]),
			Some("ghost"),
		);
		assert_eq!(model.edges().len(), 3);
		assert_eq!(model.resolved_edges().collect::<Vec<_>>(), vec![(0, 1)]);
		assert_eq!(model.focus(), None);
	}
}
