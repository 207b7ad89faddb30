//! Leptos component wrapping the mind map canvas.
//!
//! The component creates an HTML canvas element, builds a [`MindMapEngine`]
//! once the canvas is mounted and wires mouse, wheel and window-resize events
//! to it. Painting happens only after an event changed the view. Container
//! resizes (the window when fullscreen, otherwise the parent element through a
//! `ResizeObserver`) are debounced with a single browser timeout that is
//! cleared and re-armed on every resize event.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, ResizeObserver, WheelEvent, Window,
};

use super::config::MindMapConfig;
use super::debounce::Ticket;
use super::engine::{MindMapEngine, PointerButton};
use super::metrics::CanvasTextMetrics;
use super::theme::Theme;
use super::types::{GraphSnapshot, Point, Size};
use super::viewport::ZoomDirection;
use crate::error::{LoadError, Result};

/// Bundles the engine with the canvas context it paints on and the pending
/// resize timer.
struct MapContext {
	engine: MindMapEngine,
	ctx: CanvasRenderingContext2d,
	pending_resize: Option<Ticket>,
	resize_timer: Option<i32>,
}

impl MapContext {
	fn paint(&mut self) {
		self.engine.paint(&mut self.ctx);
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or(LoadError::NoCanvasContext)
}

fn window_size(window: &Window) -> Size {
	let dim = |v: std::result::Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
	Size::new(
		dim(window.inner_width()).unwrap_or(800.0),
		dim(window.inner_height()).unwrap_or(600.0),
	)
}

/// Size the canvas should take: the window when fullscreen, otherwise the
/// explicit `width`/`height` falling back to the parent's client box.
fn container_size(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Size {
	if fullscreen {
		return web_sys::window()
			.map(|w| window_size(&w))
			.unwrap_or(Size::new(800.0, 600.0));
	}
	let parent = canvas.parent_element();
	Size::new(
		width.unwrap_or_else(|| {
			parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
		}),
	)
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive mind map of linked notes on a canvas element.
///
/// Pass the snapshot via the reactive `data` signal; every change re-runs the
/// layout. The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Left-click selects a note (reported through `on_select`), right-drag pans
/// and the wheel zooms around the pointer. Double-click fits the map into
/// view; Shift+double-click resets zoom and pan.
#[component]
pub fn MindMapCanvas(
	#[prop(into)] data: Signal<GraphSnapshot>,
	#[prop(optional)] config: Option<MindMapConfig>,
	#[prop(optional)] theme: Option<Theme>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] on_select: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MapContext>>> = Rc::new(RefCell::new(None));
	let selections: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
	let flush_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let theme = theme.unwrap_or_default();

	let (context_init, selections_init) = (context.clone(), selections.clone());
	let (flush_cb_init, resize_cb_init) = (flush_cb.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let snapshot = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if context_init.borrow().is_none() {
			let canvas: HtmlCanvasElement = canvas.into();
			let Some(window) = web_sys::window() else {
				log::warn!("mind-map: {}", LoadError::NoDocument);
				return;
			};

			let size = container_size(&canvas, fullscreen, width, height);
			canvas.set_width(size.width as u32);
			canvas.set_height(size.height as u32);

			let ctx = match context_2d(&canvas) {
				Ok(ctx) => ctx,
				Err(e) => {
					log::warn!("mind-map: {e}");
					return;
				}
			};
			let metrics = CanvasTextMetrics::new(
				ctx.clone(),
				theme.node.font.clone(),
				theme.node.line_height,
			);
			let mut engine =
				MindMapEngine::new(config.clone(), theme.clone(), Box::new(metrics), size);
			let outbox = selections_init.clone();
			engine.subscribe(move |id: &str| outbox.borrow_mut().push(id.to_string()));

			*context_init.borrow_mut() = Some(MapContext {
				engine,
				ctx,
				pending_resize: None,
				resize_timer: None,
			});

			let context_flush = context_init.clone();
			*flush_cb_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref mut c) = *context_flush.borrow_mut() {
					c.resize_timer = None;
					if let Some(ticket) = c.pending_resize.take() {
						if c.engine.flush_resize(ticket) {
							c.paint();
						}
					}
				}
			}));

			let (context_resize, flush_resize) = (context_init.clone(), flush_cb_init.clone());
			let canvas_resize = canvas.clone();
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let size = container_size(&canvas_resize, fullscreen, width, height);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					if canvas_resize.width() != size.width as u32
						|| canvas_resize.height() != size.height as u32
					{
						canvas_resize.set_width(size.width as u32);
						canvas_resize.set_height(size.height as u32);
						c.paint();
					}
					let Some(ticket) = c.engine.resize(size) else {
						return;
					};
					c.pending_resize = Some(ticket);
					if let Some(handle) = c.resize_timer.take() {
						win.clear_timeout_with_handle(handle);
					}
					if let Some(ref cb) = *flush_resize.borrow() {
						c.resize_timer = win
							.set_timeout_with_callback_and_timeout_and_arguments_0(
								cb.as_ref().unchecked_ref(),
								c.engine.resize_delay().as_millis() as i32,
							)
							.ok();
					}
					c.paint();
				}
			}));

			if let Some(ref cb) = *resize_cb_init.borrow() {
				let callback = cb.as_ref().unchecked_ref();
				if fullscreen {
					let _ = window.add_event_listener_with_callback("resize", callback);
				} else if let Some(parent) = canvas.parent_element() {
					match ResizeObserver::new(callback) {
						Ok(observer) => observer.observe(&parent),
						Err(_) => log::warn!("mind-map: ResizeObserver unavailable"),
					}
				}
			}
		}

		if let Some(ref mut c) = *context_init.borrow_mut() {
			c.engine.update_snapshot(&snapshot);
			c.paint();
		}
	});

	// Runs selection callbacks once the engine borrow is released, so a
	// callback that pushes a new snapshot does not re-enter the RefCell.
	let notify = move |selections: &Rc<RefCell<Vec<String>>>| {
		let selected: Vec<String> = selections.borrow_mut().drain(..).collect();
		if let Some(cb) = on_select {
			for id in selected {
				cb.run(id);
			}
		}
	};

	let (context_md, selections_md) = (context.clone(), selections.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(point) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			if c.engine.pointer_down(PointerButton::from_dom(ev.button()), point) {
				c.paint();
			}
		}
		notify(&selections_md);
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(point) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let secondary_held = ev.buttons() & 2 != 0;
			if c.engine.pointer_move(point, secondary_held) {
				c.paint();
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.engine.pointer_up(PointerButton::from_dom(ev.button()));
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.engine.pointer_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(point) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			if c.engine.wheel(point, ZoomDirection::from_wheel_delta(ev.delta_y())) {
				c.paint();
			}
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_dc.borrow_mut() {
			if ev.shift_key() {
				c.engine.reset_view();
			} else {
				c.engine.fit_to_content();
			}
			c.paint();
		}
	};

	// Right-drag pans, so the browser menu must stay closed.
	let on_contextmenu = move |ev: MouseEvent| ev.prevent_default();

	view! {
		<canvas
			node_ref=canvas_ref
			class="mind-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			on:contextmenu=on_contextmenu
			style="display: block; cursor: default;"
		/>
	}
}
