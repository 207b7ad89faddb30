//! Hierarchical mind map of linked notes.
//!
//! Renders notes as boxes on an HTML canvas with:
//! - Layered layout: BFS levels from a root, barycenter ordering per level
//! - Label-driven node sizing and per-level coloring
//! - Cursor-anchored zoom, right-drag panning and fit-to-content
//! - Click selection reported through an observer or a Leptos callback
//!
//! The engine ([`MindMapEngine`]) is host-agnostic: it paints through the
//! [`Painter`] trait and measures labels through [`TextMeasure`], so it runs
//! natively as well as on a canvas.
//!
//! # Example
//!
//! ```ignore
//! use mind_map::{GraphSnapshot, MindMapCanvas, NoteLink, NoteRecord};
//!
//! let data = GraphSnapshot {
//!     notes: vec![
//!         NoteRecord { id: "a".into(), title: "Note A".into(), group: None },
//!         NoteRecord { id: "b".into(), title: "Note B".into(), group: None },
//!     ],
//!     links: vec![NoteLink { source: "a".into(), target: "b".into() }],
//!     focus: None,
//! };
//!
//! view! { <MindMapCanvas data=data.into() fullscreen=true /> }
//! ```

mod canvas;
mod component;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod render;
pub mod theme;
mod types;
pub mod viewport;

pub use component::MindMapCanvas;
pub use config::{LayoutConfig, MindMapConfig, ViewportConfig};
pub use engine::{MindMapEngine, PointerButton, SelectionObserver};
pub use layout::{LaidOutNode, Layout, compute_layout};
pub use metrics::{ApproxTextMetrics, CanvasTextMetrics, TextMeasure};
pub use model::GraphModel;
pub use render::Painter;
pub use theme::Theme;
pub use types::{GraphSnapshot, NoteLink, NoteRecord, Point, Rect, Size, SnapshotProvider};
pub use viewport::{Viewport, ZoomDirection};
