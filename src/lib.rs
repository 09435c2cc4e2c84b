//! gridcanvas - virtualized spreadsheet grid for Canvas 2D
//!
//! Draws a fixed-size table of cells onto three surfaces (body, column header,
//! row header) and handles the interaction a spreadsheet user expects:
//! - Cell, range, whole-row and whole-column selection with drag auto-scroll
//! - Column and row resizing with a live guide line
//! - Inline cell editing through an input overlay
//! - Linear undo/redo of every edit and resize
//! - Keyboard navigation, wheel scrolling and a scrollbar model
//! - Count/min/max/sum/avg statistics over the selection
//!
//! The core is host-agnostic and renders through the [`render::Surface`]
//! trait; the WebAssembly build adds a Canvas 2D surface and a `GridView`
//! that wires DOM events to the grid.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView, init_logging } from 'gridcanvas';
//! await init();
//! init_logging('info');
//! const grid = new GridView(body, colHeader, rowHeader, 10000, 500, devicePixelRatio);
//! grid.load_data(records);
//! console.log(grid.status_text());
//! ```

pub mod cell_ref;
pub mod command;
pub mod editor;
pub mod error;
pub mod layout;
pub mod render;
pub mod stats;
pub mod types;
pub mod viewer;
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use command::{Command, History};
pub use editor::{EditSession, EditorOverlay};
pub use error::{GridError, Result};
pub use stats::{compute_selection_stats, SelectionStats};
pub use viewer::{CursorStyle, Grid, HitTarget, Key, KeyInput, ScrollAxis, SurfaceKind};
#[cfg(target_arch = "wasm32")]
pub use web::GridView;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
