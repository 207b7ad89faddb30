//! Layered layout of the note graph.
//!
//! Nodes are banded into horizontal rows by their BFS distance from a set of
//! roots, ordered within each row by the barycenter of their already-placed
//! parents, then packed left to right and centered in the canvas. Nodes that
//! no root reaches are gathered into a square-ish grid of synthetic rows below
//! the connected part, with wider spacing to mark them as isolated.
//!
//! The layout is a pure function of the model, the text metrics, the canvas
//! size and the config, and is recomputed wholesale on every call.

use std::collections::{BTreeMap, HashMap, VecDeque};

use super::config::LayoutConfig;
use super::metrics::TextMeasure;
use super::model::GraphModel;
use super::types::{Point, Rect, Size};

/// A node with its computed geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutNode {
	/// Node id.
	pub id: String,
	/// Label, possibly multi-line.
	pub label: String,
	/// Box size in logical units.
	pub size: Size,
	/// Box center in logical space.
	pub center: Point,
	/// BFS distance from the nearest root, or a synthetic row for unreached nodes.
	pub level: usize,
	/// Placed on a synthetic row because no root reaches it.
	pub isolated: bool,
}

impl LaidOutNode {
	/// Box in logical space.
	pub fn rect(&self) -> Rect {
		Rect::centered(self.center, self.size)
	}
}

/// Result of a layout run, in model node order.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	nodes: Vec<LaidOutNode>,
	index: HashMap<String, usize>,
}

impl Layout {
	fn from_nodes(nodes: Vec<LaidOutNode>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		Self { nodes, index }
	}

	/// Every node, in model order.
	pub fn nodes(&self) -> &[LaidOutNode] {
		&self.nodes
	}

	/// Node by id.
	pub fn get(&self, id: &str) -> Option<&LaidOutNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Whether there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Bounding box of every node box, `None` for an empty layout.
	pub fn bounds(&self) -> Option<Rect> {
		self.nodes
			.iter()
			.map(LaidOutNode::rect)
			.reduce(|acc, r| acc.union(&r))
	}

	/// First node, in model order, whose box contains the logical point.
	pub fn node_at(&self, logical: Point) -> Option<&LaidOutNode> {
		self.nodes.iter().find(|n| n.rect().contains(logical))
	}
}

/// Box size for a label: measured text plus padding, floored at the base diameter.
pub fn node_size(
	measure: &(impl TextMeasure + ?Sized),
	label: &str,
	config: &LayoutConfig,
) -> Size {
	let text = measure.measure(label);
	let min = config.base_radius * 2.0;
	Size::new(
		(text.width + config.padding * 2.0).max(min),
		(text.height + config.padding * 2.0).max(min),
	)
}

/// Computes sizes, levels and centers for every node in `model`.
pub fn compute_layout(
	model: &GraphModel,
	measure: &(impl TextMeasure + ?Sized),
	canvas: Size,
	config: &LayoutConfig,
) -> Layout {
	let n = model.len();
	let sizes: Vec<Size> = model
		.nodes()
		.iter()
		.map(|node| node_size(measure, &node.label, config))
		.collect();

	if n == 0 {
		return Layout::default();
	}
	if n == 1 {
		let node = &model.nodes()[0];
		return Layout::from_nodes(vec![LaidOutNode {
			id: node.id.clone(),
			label: node.label.clone(),
			size: sizes[0],
			center: Point::new(canvas.width / 2.0, canvas.height / 2.0),
			level: 0,
			isolated: false,
		}]);
	}

	let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
	let mut in_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
	for (source, target) in model.resolved_edges() {
		out_edges[source].push(target);
		in_edges[target].push(source);
	}

	let roots = select_roots(model, &in_edges);
	let mut levels = assign_levels(&roots, &out_edges);

	// Unreached nodes fill a grid of synthetic rows two below the deepest level.
	let mut unreached: Vec<usize> = (0..n).filter(|&i| levels[i].is_none()).collect();
	let isolated_from = if unreached.is_empty() {
		None
	} else {
		let start = levels.iter().flatten().max().map_or(0, |max| max + 2);
		unreached.sort_by(|&a, &b| model.nodes()[a].id.cmp(&model.nodes()[b].id));
		let per_row = ((unreached.len() as f64).sqrt().ceil() as usize).max(1);
		for (i, &node) in unreached.iter().enumerate() {
			levels[node] = Some(start + i / per_row);
		}
		Some(start)
	};

	let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
	for (node, level) in levels.iter().enumerate() {
		rows.entry(level.unwrap_or_default()).or_default().push(node);
	}

	let mut centers: Vec<Option<Point>> = vec![None; n];
	let mut row_top = config.node_margin;
	for (&level, members) in rows.iter_mut() {
		order_by_barycenter(members, model, &in_edges, &centers);

		let margin = match isolated_from {
			Some(start) if level >= start => config.isolated_margin,
			_ => config.node_margin,
		};
		let total_width = members.iter().map(|&m| sizes[m].width).sum::<f64>()
			+ margin * members.len().saturating_sub(1) as f64;
		let row_height = members
			.iter()
			.map(|&m| sizes[m].height)
			.fold(0.0, f64::max);

		let y = row_top + row_height / 2.0;
		let mut x = ((canvas.width - total_width) / 2.0).max(margin);
		for &m in members.iter() {
			centers[m] = Some(Point::new(x + sizes[m].width / 2.0, y));
			x += sizes[m].width + margin;
		}
		row_top += row_height + config.node_margin;
	}

	log::debug!(
		"mind-map: laid out {} nodes on {} rows ({} roots, {} unreached)",
		n,
		rows.len(),
		roots.len(),
		unreached.len()
	);

	let nodes = model
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let level = levels[i].unwrap_or_default();
			LaidOutNode {
				id: node.id.clone(),
				label: node.label.clone(),
				size: sizes[i],
				center: centers[i].unwrap_or_default(),
				level,
				isolated: isolated_from.is_some_and(|start| level >= start),
			}
		})
		.collect();
	Layout::from_nodes(nodes)
}

/// The focus alone if it exists, else every node without incoming edges,
/// else the node with the smallest id.
fn select_roots(model: &GraphModel, in_edges: &[Vec<usize>]) -> Vec<usize> {
	if let Some(focus) = model.focus().and_then(|id| model.index_of(id)) {
		return vec![focus];
	}
	let roots: Vec<usize> = (0..model.len())
		.filter(|&i| in_edges[i].is_empty())
		.collect();
	if !roots.is_empty() {
		return roots;
	}
	model
		.nodes()
		.iter()
		.enumerate()
		.min_by(|(_, a), (_, b)| a.id.cmp(&b.id))
		.map(|(i, _)| vec![i])
		.unwrap_or_default()
}

/// BFS from `roots` at level 0. A node already visited is lowered and
/// requeued only when a strictly shorter path turns up, at most `n` times,
/// so cycles cannot keep the queue alive.
fn assign_levels(roots: &[usize], out_edges: &[Vec<usize>]) -> Vec<Option<usize>> {
	let n = out_edges.len();
	let mut levels: Vec<Option<usize>> = vec![None; n];
	let mut relaxations = vec![0usize; n];
	let mut queue = VecDeque::with_capacity(n);

	for &root in roots {
		levels[root] = Some(0);
		queue.push_back((root, 0));
	}

	while let Some((node, level)) = queue.pop_front() {
		if levels[node] != Some(level) {
			// superseded by a shorter path
			continue;
		}
		let candidate = level + 1;
		for &next in &out_edges[node] {
			match levels[next] {
				None => {
					levels[next] = Some(candidate);
					queue.push_back((next, candidate));
				}
				Some(assigned) if candidate < assigned && relaxations[next] < n => {
					relaxations[next] += 1;
					levels[next] = Some(candidate);
					queue.push_back((next, candidate));
				}
				Some(_) => {}
			}
		}
	}
	levels
}

/// Sorts a row by the mean x of parents placed on earlier rows. Nodes with
/// no placed parent go last; ties fall back to id.
fn order_by_barycenter(
	members: &mut [usize],
	model: &GraphModel,
	in_edges: &[Vec<usize>],
	centers: &[Option<Point>],
) {
	let key = |node: usize| -> f64 {
		let xs: Vec<f64> = in_edges[node]
			.iter()
			.filter_map(|&parent| centers[parent].map(|c| c.x))
			.collect();
		if xs.is_empty() {
			f64::INFINITY
		} else {
			xs.iter().sum::<f64>() / xs.len() as f64
		}
	};
	let mut keyed: Vec<(f64, usize)> = members.iter().map(|&m| (key(m), m)).collect();
	keyed.sort_by(|(ka, a), (kb, b)| {
		ka.total_cmp(kb)
			.then_with(|| model.nodes()[*a].id.cmp(&model.nodes()[*b].id))
	});
	for (slot, (_, node)) in members.iter_mut().zip(keyed) {
		*slot = node;
	}
}
