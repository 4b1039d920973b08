use serde::Deserialize;
use serde::Serialize;

use crate::gaps::HiddenGap;
use crate::gaps::compute_gaps;
use crate::selection::VisibleRanges;
use crate::selection::select_visible_with_tolerance;
use crate::source::SourceText;
use crate::view::DisplayRow;
use crate::view::ViewState;
use crate::view::render;

/// Options controlling which lines of a code block are shown.
///
/// Options are fixed for the lifetime of a [`DisplaySession`]. Changing them
/// means building a new session (or calling [`DisplaySession::recompute`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
	/// 1-indexed line numbers to show while collapsed. Out-of-range and
	/// duplicate entries are ignored.
	pub show_lines_only: Vec<i64>,
	/// Enables the collapsed state and the toggle action.
	pub collapsible: bool,
	/// Whether the renderer draws a line-number gutter. Has no effect on
	/// selection or state.
	pub show_line_numbers: bool,
	/// Number of hidden lines a request may bridge when merging ranges.
	pub merge_tolerance: usize,
}

impl DisplayOptions {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_lines(mut self, lines: impl IntoIterator<Item = i64>) -> Self {
		self.show_lines_only = lines.into_iter().collect();
		self
	}

	#[must_use]
	pub fn collapsible(mut self, collapsible: bool) -> Self {
		self.collapsible = collapsible;
		self
	}

	#[must_use]
	pub fn show_line_numbers(mut self, show_line_numbers: bool) -> Self {
		self.show_line_numbers = show_line_numbers;
		self
	}

	#[must_use]
	pub fn merge_tolerance(mut self, merge_tolerance: usize) -> Self {
		self.merge_tolerance = merge_tolerance;
		self
	}
}

/// Display state for one code block: its source, the visible ranges and gaps
/// derived from the options, and the current [`ViewState`].
///
/// The derived rows are never stored. Call [`rows`](Self::rows) to render the
/// current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySession {
	source: SourceText,
	options: DisplayOptions,
	visible: VisibleRanges,
	gaps: Vec<HiddenGap>,
	state: ViewState,
}

impl DisplaySession {
	pub fn new(code: impl Into<String>, options: DisplayOptions) -> Self {
		let source = SourceText::new(code);
		let line_count = source.line_count();

		// A non-collapsible block never hides anything, whatever it requested.
		let requested: &[i64] = if options.collapsible {
			&options.show_lines_only
		} else {
			&[]
		};
		let visible = select_visible_with_tolerance(line_count, requested, options.merge_tolerance);
		let gaps = compute_gaps(line_count, &visible);
		let state = if options.collapsible && !gaps.is_empty() {
			ViewState::Collapsed
		} else {
			ViewState::Expanded
		};

		tracing::debug!(
			line_count,
			visible_ranges = visible.len(),
			gaps = gaps.len(),
			%state,
			"computed display session"
		);

		Self {
			source,
			options,
			visible,
			gaps,
			state,
		}
	}

	/// Replace the code and options, recomputing everything and resetting the
	/// view state.
	pub fn recompute(&mut self, code: impl Into<String>, options: DisplayOptions) {
		*self = Self::new(code, options);
	}

	/// Returns true when the block has hidden content to reveal, which is the
	/// only case where [`toggle`](Self::toggle) changes anything.
	pub fn can_toggle(&self) -> bool {
		self.options.collapsible && !self.gaps.is_empty()
	}

	/// Flip between collapsed and expanded and return the new state. A no-op
	/// for blocks that cannot collapse.
	pub fn toggle(&mut self) -> ViewState {
		if self.can_toggle() {
			self.state = self.state.toggled();
			tracing::debug!(state = %self.state, "toggled display session");
		}

		self.state
	}

	pub fn state(&self) -> ViewState {
		self.state
	}

	/// Rows for the current state.
	pub fn rows(&self) -> Vec<DisplayRow<'_>> {
		self.rows_for(self.state)
	}

	/// Rows for an arbitrary `state`, without changing the session.
	pub fn rows_for(&self, state: ViewState) -> Vec<DisplayRow<'_>> {
		render(state, &self.source, &self.visible, &self.gaps)
	}

	pub fn source(&self) -> &SourceText {
		&self.source
	}

	/// The unmodified code, regardless of the view state. Copy and download
	/// actions operate on this.
	pub fn full_code(&self) -> &str {
		self.source.as_str()
	}

	pub fn line_count(&self) -> usize {
		self.source.line_count()
	}

	pub fn options(&self) -> &DisplayOptions {
		&self.options
	}

	pub fn visible_ranges(&self) -> &VisibleRanges {
		&self.visible
	}

	pub fn gaps(&self) -> &[HiddenGap] {
		&self.gaps
	}

	/// Total number of lines hidden while collapsed.
	pub fn hidden_line_count(&self) -> usize {
		self.gaps.iter().map(|gap| gap.hidden_count).sum()
	}
}
