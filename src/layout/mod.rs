//! The layout engine: turns plan Markdown into drawing calls on a [Surface].
//!
//! Input flows through four stages, all driven by [render]:
//!
//! - [blocks] classifies lines into [Block]s, lazily
//! - [split_runs] and [wrap_runs] place inline `**bold**` text word by word
//! - [Cursor] tracks the vertical position and starts new pages
//! - [TableLayout] measures and draws buffered table rows
//!
//! # Example
//!
//! ```
//! use plan_pdf::layout::render;
//! use plan_pdf::{LayoutOptions, Recorder, Surface};
//!
//! let mut surface = Recorder::default();
//! let summary = render("# Launch plan\n\nShip it.", &mut surface, &LayoutOptions::default());
//! assert_eq!(summary.page_count, 1);
//!
//! let recording = surface.finalize().unwrap();
//! assert!(recording.find_text("Launch plan").is_some());
//! ```
//!
//! [Surface]: crate::Surface

mod blocks;
mod cursor;
mod inline;
mod renderer;
mod table;

pub use blocks::*;
pub use cursor::*;
pub use inline::*;
pub use renderer::*;
pub use table::*;
