//! Mind map state and interaction handling.
//!
//! [`MindMapEngine`] owns the graph model, the last layout, the viewport and
//! the pointer/resize bookkeeping. Hosts feed it snapshots and input events
//! and call [`MindMapEngine::paint`] whenever a handler reports that the view
//! changed; the engine itself never schedules a redraw.

use super::config::MindMapConfig;
use super::debounce::{Debounce, Ticket};
use super::layout::{Layout, compute_layout};
use super::metrics::TextMeasure;
use super::model::GraphModel;
use super::render::{Painter, render};
use super::theme::Theme;
use super::types::{GraphSnapshot, Point, Size};
use super::viewport::{Viewport, ZoomDirection};

/// Mouse button, as far as the map cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	/// Selects nodes.
	Primary,
	/// Drags the view.
	Secondary,
	/// Ignored.
	Other,
}

impl PointerButton {
	/// Maps a DOM `MouseEvent.button` value.
	pub fn from_dom(button: i16) -> Self {
		match button {
			0 => Self::Primary,
			2 => Self::Secondary,
			_ => Self::Other,
		}
	}
}

/// Receives node selections.
pub trait SelectionObserver {
	/// Called with the id of the node the user clicked.
	fn note_selected(&mut self, id: &str);
}

impl<F: FnMut(&str)> SelectionObserver for F {
	fn note_selected(&mut self, id: &str) {
		self(id)
	}
}

/// Tracks an in-progress view drag.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Last pointer position seen during the drag, in screen space.
	pub anchor: Option<Point>,
}

/// Complete map state: model, layout, view and interaction tracking.
pub struct MindMapEngine {
	model: GraphModel,
	layout: Layout,
	viewport: Viewport,
	canvas: Size,
	pan: PanState,
	resize: Debounce<Size>,
	config: MindMapConfig,
	theme: Theme,
	measure: Box<dyn TextMeasure>,
	observers: Vec<Box<dyn SelectionObserver>>,
}

impl MindMapEngine {
	/// Empty map sized to `canvas`.
	pub fn new(
		config: MindMapConfig,
		theme: Theme,
		measure: Box<dyn TextMeasure>,
		canvas: Size,
	) -> Self {
		Self {
			model: GraphModel::new(),
			layout: Layout::default(),
			viewport: Viewport::new(config.viewport.clone()),
			canvas,
			pan: PanState::default(),
			resize: Debounce::new(std::time::Duration::from_millis(
				config.resize_debounce_ms.into(),
			)),
			config,
			theme,
			measure,
			observers: Vec::new(),
		}
	}

	/// Current graph.
	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	/// Last computed layout.
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	/// Current zoom and pan.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Canvas size in screen pixels.
	pub fn canvas(&self) -> Size {
		self.canvas
	}

	/// Active theme.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Focused node id, if it exists.
	pub fn focus(&self) -> Option<&str> {
		self.model.focus()
	}

	/// How long the host should wait before calling [`Self::flush_resize`].
	pub fn resize_delay(&self) -> std::time::Duration {
		self.resize.delay()
	}

	/// Registers a listener for node selections.
	pub fn subscribe(&mut self, observer: impl SelectionObserver + 'static) {
		self.observers.push(Box::new(observer));
	}

	/// Replaces the whole graph and lays it out again.
	pub fn update_graph(
		&mut self,
		nodes: &[(String, String)],
		edges: &[(String, String)],
		focus: Option<&str>,
	) {
		// The new layout already uses the latest canvas size.
		self.resize.cancel();
		self.model.update_graph(
			nodes.iter().map(|(id, label)| (id.as_str(), label.as_str())),
			edges,
			focus,
		);
		self.relayout();
	}

	/// [`Self::update_graph`] from a host snapshot.
	pub fn update_snapshot(&mut self, snapshot: &GraphSnapshot) {
		self.update_graph(
			&snapshot.node_pairs(),
			&snapshot.edge_pairs(),
			snapshot.focus.as_deref(),
		);
	}

	fn relayout(&mut self) {
		self.layout = compute_layout(
			&self.model,
			self.measure.as_ref(),
			self.canvas,
			&self.config.layout,
		);
		if self.config.auto_fit {
			self.fit_to_content();
		}
	}

	/// Zooms and pans so every node is visible.
	pub fn fit_to_content(&mut self) {
		self.viewport
			.fit_to_content(self.layout.bounds(), self.canvas);
	}

	/// Back to zoom 1 with no pan.
	pub fn reset_view(&mut self) {
		self.viewport.reset();
	}

	/// Draws the current layout through `painter`.
	pub fn paint(&self, painter: &mut impl Painter) {
		render(
			painter,
			&self.model,
			&self.layout,
			&self.viewport,
			self.canvas,
			&self.theme,
		);
	}

	/// Node id under a screen point, if any.
	pub fn node_at(&self, screen: Point) -> Option<&str> {
		let logical = self.viewport.screen_to_logical(screen);
		self.layout.node_at(logical).map(|n| n.id.as_str())
	}

	/// Primary selects the node under the pointer; secondary starts a drag.
	/// Returns whether the view needs repainting.
	pub fn pointer_down(&mut self, button: PointerButton, screen: Point) -> bool {
		match button {
			PointerButton::Primary => {
				let Some(id) = self.node_at(screen).map(str::to_string) else {
					return false;
				};
				log::debug!("mind-map: selected {id}");
				for observer in &mut self.observers {
					observer.note_selected(&id);
				}
				self.model.set_focus(Some(id));
				true
			}
			PointerButton::Secondary => {
				self.pan.anchor = Some(screen);
				false
			}
			PointerButton::Other => false,
		}
	}

	/// Pans while the secondary button is held and a drag is in progress.
	pub fn pointer_move(&mut self, screen: Point, secondary_held: bool) -> bool {
		let Some(anchor) = self.pan.anchor.filter(|_| secondary_held) else {
			return false;
		};
		self.viewport
			.pan_by(Point::new(screen.x - anchor.x, screen.y - anchor.y));
		self.pan.anchor = Some(screen);
		true
	}

	/// Ends a drag when the secondary button is released.
	pub fn pointer_up(&mut self, button: PointerButton) {
		if button == PointerButton::Secondary {
			self.pan.anchor = None;
		}
	}

	/// Ends any drag.
	pub fn pointer_leave(&mut self) {
		self.pan.anchor = None;
	}

	/// Whether a secondary-button drag is in progress.
	pub fn is_panning(&self) -> bool {
		self.pan.anchor.is_some()
	}

	/// Zooms one step around the pointer. Always repaints.
	pub fn wheel(&mut self, screen: Point, direction: ZoomDirection) -> bool {
		self.viewport.zoom_at(screen, direction);
		true
	}

	/// Records the new canvas size right away and defers the re-layout.
	/// The host schedules [`Self::flush_resize`] with the returned ticket after
	/// [`Self::resize_delay`], cancelling any timer it scheduled before.
	/// Returns `None` when the size did not change.
	pub fn resize(&mut self, size: Size) -> Option<Ticket> {
		if size == self.canvas {
			return None;
		}
		self.canvas = size;
		Some(self.resize.request(size))
	}

	/// Re-lays out if `ticket` belongs to the latest resize. Returns whether it did.
	pub fn flush_resize(&mut self, ticket: Ticket) -> bool {
		if self.resize.fire(ticket).is_none() {
			return false;
		}
		log::debug!(
			"mind-map: re-layout after resize to {}x{}",
			self.canvas.width,
			self.canvas.height
		);
		self.relayout();
		true
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::mind_map::metrics::ApproxTextMetrics;
	use crate::components::mind_map::render::tests::{Call, Recorder};

	fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
		items
			.iter()
			.map(|(a, b)| (a.to_string(), b.to_string()))
			.collect()
	}

	fn engine(config: MindMapConfig) -> MindMapEngine {
		let mut engine = MindMapEngine::new(
			config,
			Theme::default(),
			Box::new(ApproxTextMetrics::default()),
			Size::new(800.0, 600.0),
		);
		engine.update_graph(
			&pairs(&[("1", "Note A"), ("2", "Note B"), ("3", "Note C")]),
			&pairs(&[("1", "2"), ("1", "3")]),
			None,
		);
		engine
	}

	fn center_on_screen(engine: &MindMapEngine, id: &str) -> Point {
		let node = engine.layout().get(id).unwrap();
		engine.viewport().logical_to_screen(node.center)
	}

	#[test]
	fn click_on_projected_center_selects_node() {
		let mut e = engine(MindMapConfig::default());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		e.subscribe(move |id: &str| sink.borrow_mut().push(id.to_string()));

		e.wheel(Point::new(200.0, 150.0), ZoomDirection::In);
		e.viewport.pan_by(Point::new(-35.0, 12.0));

		for id in ["1", "2", "3"] {
			let at = center_on_screen(&e, id);
			assert!(e.pointer_down(PointerButton::Primary, at));
			assert_eq!(e.focus(), Some(id));
		}
		assert_eq!(*seen.borrow(), ["1", "2", "3"]);
	}

	#[test]
	fn click_on_empty_space_keeps_focus() {
		let mut e = engine(MindMapConfig::default());
		let at = center_on_screen(&e, "2");
		e.pointer_down(PointerButton::Primary, at);
		assert!(!e.pointer_down(PointerButton::Primary, Point::new(1.0, 1.0)));
		assert_eq!(e.focus(), Some("2"));
	}

	#[test]
	fn selection_does_not_relayout() {
		let mut e = engine(MindMapConfig::default());
		let before = e.layout().get("2").unwrap().clone();
		let at = center_on_screen(&e, "2");
		e.pointer_down(PointerButton::Primary, at);
		assert_eq!(e.layout().get("2").unwrap(), &before);
	}

	#[test]
	fn secondary_drag_pans_view() {
		let mut e = engine(MindMapConfig::default());
		assert!(!e.pointer_move(Point::new(10.0, 10.0), true));

		e.pointer_down(PointerButton::Secondary, Point::new(100.0, 100.0));
		assert!(e.is_panning());
		assert!(e.pointer_move(Point::new(130.0, 90.0), true));
		assert!(e.pointer_move(Point::new(140.0, 95.0), true));
		assert_eq!(e.viewport().pan, Point::new(40.0, -5.0));

		// Moving without the button held does nothing.
		assert!(!e.pointer_move(Point::new(500.0, 500.0), false));
		e.pointer_up(PointerButton::Secondary);
		assert!(!e.is_panning());
		assert!(!e.pointer_move(Point::new(600.0, 600.0), true));
		assert_eq!(e.viewport().pan, Point::new(40.0, -5.0));
	}

	#[test]
	fn wheel_zoom_is_anchor_stable() {
		let mut e = engine(MindMapConfig::default());
		let p = Point::new(321.0, 123.0);
		let before = e.viewport().screen_to_logical(p);
		e.wheel(p, ZoomDirection::In);
		e.wheel(p, ZoomDirection::Out);
		let after = e.viewport().screen_to_logical(p);
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}

	#[test]
	fn resize_relayouts_only_on_latest_ticket() {
		let mut e = engine(MindMapConfig::default());
		let root_x = e.layout().get("1").unwrap().center.x;

		let stale = e.resize(Size::new(1000.0, 600.0)).unwrap();
		let latest = e.resize(Size::new(1200.0, 600.0)).unwrap();
		assert_eq!(e.canvas(), Size::new(1200.0, 600.0));
		// Layout still reflects the old width until the timer fires.
		assert_eq!(e.layout().get("1").unwrap().center.x, root_x);

		assert!(!e.flush_resize(stale));
		assert!(e.flush_resize(latest));
		assert_eq!(e.layout().get("1").unwrap().center.x, root_x + 200.0);
		assert!(!e.flush_resize(latest));
	}

	#[test]
	fn graph_update_supersedes_pending_resize() {
		let mut e = engine(MindMapConfig::default());
		let root_x = e.layout().get("1").unwrap().center.x;

		let ticket = e.resize(Size::new(1000.0, 600.0)).unwrap();
		e.update_graph(
			&pairs(&[("1", "Note A"), ("2", "Note B")]),
			&pairs(&[("1", "2")]),
			None,
		);
		assert_eq!(e.layout().get("1").unwrap().center.x, root_x + 100.0);
		assert!(!e.flush_resize(ticket));
	}

	#[test]
	fn unchanged_container_size_schedules_nothing() {
		let mut e = engine(MindMapConfig::default());
		assert_eq!(e.resize(Size::new(800.0, 600.0)), None);

		let ticket = e.resize(Size::new(640.0, 480.0)).unwrap();
		// A repeat notification for the same size keeps the pending ticket live.
		assert_eq!(e.resize(Size::new(640.0, 480.0)), None);
		assert!(e.flush_resize(ticket));
		assert_eq!(e.canvas(), Size::new(640.0, 480.0));
	}

	#[test]
	fn resize_back_to_original_lays_out_at_current_size() {
		let mut e = engine(MindMapConfig::default());
		let root_x = e.layout().get("1").unwrap().center.x;

		let ticket = e.resize(Size::new(1000.0, 600.0)).unwrap();
		assert_eq!(e.resize(Size::new(800.0, 600.0)), None);
		assert!(e.flush_resize(ticket));
		assert_eq!(e.canvas(), Size::new(800.0, 600.0));
		assert_eq!(e.layout().get("1").unwrap().center.x, root_x);
	}

	#[test]
	fn reset_view_restores_identity() {
		let mut e = engine(MindMapConfig::default());
		e.wheel(Point::new(250.0, 80.0), ZoomDirection::In);
		e.pointer_down(PointerButton::Secondary, Point::new(0.0, 0.0));
		e.pointer_move(Point::new(30.0, -20.0), true);
		assert_ne!(e.viewport().zoom, 1.0);

		e.reset_view();
		assert_eq!(e.viewport().zoom, 1.0);
		assert_eq!(e.viewport().pan, Point::new(0.0, 0.0));
	}

	#[test]
	fn auto_fit_frames_all_nodes() {
		let e = engine(MindMapConfig {
			auto_fit: true,
			..MindMapConfig::default()
		});
		let bounds = e.layout().bounds().unwrap();
		let vp = e.viewport();
		let top_left = vp.logical_to_screen(Point::new(bounds.x, bounds.y));
		let bottom_right = vp.logical_to_screen(Point::new(bounds.right(), bounds.bottom()));
		assert!(top_left.x >= 0.0 && top_left.y >= 0.0);
		assert!(bottom_right.x <= 800.0 && bottom_right.y <= 600.0);
	}

	#[test]
	fn snapshot_focus_becomes_root() {
		let mut e = engine(MindMapConfig::default());
		let snapshot: GraphSnapshot = serde_json::from_str(
			r#"{"notes": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}],
			    "links": [{"source": "a", "target": "b"}],
			    "focus": "b"}"#,
		)
		.unwrap();
		e.update_snapshot(&snapshot);
		assert_eq!(e.layout().get("b").unwrap().level, 0);
		assert_eq!(e.focus(), Some("b"));
	}

	#[test]
	fn paint_uses_current_view() {
		let mut e = engine(MindMapConfig::default());
		e.wheel(Point::new(0.0, 0.0), ZoomDirection::In);
		let mut rec = Recorder::default();
		e.paint(&mut rec);
		assert_eq!(rec.calls[2], Call::Scale(e.viewport().zoom));
	}

	#[test]
	fn dom_buttons() {
		assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
		assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
		assert_eq!(PointerButton::from_dom(1), PointerButton::Other);
	}
}
