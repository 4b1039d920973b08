//! `snipview_core` is the display engine behind [snipview](https://github.com/ifiokjr/snipview). Given a block of source code and the line numbers an author wants to highlight, it works out which lines stay visible, collapses everything else into gap placeholders, and keeps the real source line numbers on every row whether the block is collapsed or expanded.
//!
//! ## Processing Pipeline
//!
//! ```text
//! code + DisplayOptions
//!   → SourceText (splits the code into 1-indexed lines)
//!   → select_visible (dedupes, clamps, and merges requested lines into VisibleRanges)
//!   → compute_gaps (the hidden runs between and around the visible ranges)
//!   → render (rows for the current ViewState, one gap row per hidden run when collapsed)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `snipview.toml`, including display defaults and named code blocks.
//!
//! ## Key Types
//!
//! - [`DisplaySession`]: Owns one block's source, derived ranges, and collapsed/expanded state.
//! - [`DisplayOptions`]: The requested lines plus the `collapsible` and `showLineNumbers` switches.
//! - [`DisplayRow`]: A rendered row: either a code line with its true line number or a gap placeholder.
//! - [`VisibleRange`] / [`HiddenGap`]: Closed line intervals that are shown or hidden.
//! - [`SnipviewConfig`]: Configuration loaded from `snipview.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use snipview_core::DisplayOptions;
//! use snipview_core::DisplaySession;
//! use snipview_core::ViewState;
//!
//! let code = (1..=13).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
//! let options = DisplayOptions::new()
//! 	.with_lines([1, 2, 3, 8, 9, 12, 13])
//! 	.collapsible(true);
//! let mut session = DisplaySession::new(code, options);
//!
//! assert_eq!(session.state(), ViewState::Collapsed);
//! assert_eq!(session.rows().len(), 9);
//!
//! session.toggle();
//! assert_eq!(session.rows().len(), 13);
//! ```

pub use config::*;
pub use error::*;
pub use gaps::*;
pub use line_spec::*;
pub use meta::*;
pub use selection::*;
pub use session::*;
pub use source::*;
pub use view::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod gaps;
mod line_spec;
mod meta;
mod selection;
mod session;
mod source;
mod view;

#[cfg(test)]
mod __fixtures;
