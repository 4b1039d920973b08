use std::fmt::Display;

use serde::Serialize;

use crate::gaps::HiddenGap;
use crate::selection::VisibleRange;
use crate::source::SourceText;

/// The two display states of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
	/// Only the visible ranges are shown; hidden runs become gap rows.
	Collapsed,
	/// Every source line is shown.
	Expanded,
}

impl ViewState {
	/// The opposite state.
	#[must_use]
	pub const fn toggled(self) -> Self {
		match self {
			Self::Collapsed => Self::Expanded,
			Self::Expanded => Self::Collapsed,
		}
	}

	/// Label for a control that switches away from this state.
	pub const fn toggle_label(self) -> &'static str {
		match self {
			Self::Collapsed => "Show Full Code",
			Self::Expanded => "Collapse",
		}
	}
}

impl Display for ViewState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Collapsed => f.write_str("collapsed"),
			Self::Expanded => f.write_str("expanded"),
		}
	}
}

/// One unit of rendered output. Code rows borrow their text from the
/// [`SourceText`] they were rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(
	tag = "kind",
	rename_all = "camelCase",
	rename_all_fields = "camelCase"
)]
pub enum DisplayRow<'a> {
	/// A real source line with its true 1-indexed line number.
	Code { line_number: usize, text: &'a str },
	/// A placeholder standing in for `hidden_count` hidden lines.
	Gap {
		first_hidden: usize,
		last_hidden: usize,
		hidden_count: usize,
	},
}

impl DisplayRow<'_> {
	/// The source line number for gutter rendering. Gap rows have none.
	pub const fn line_number(&self) -> Option<usize> {
		match self {
			Self::Code { line_number, .. } => Some(*line_number),
			Self::Gap { .. } => None,
		}
	}

	/// The `(first, last)` hidden line numbers of a gap row.
	pub const fn hidden_span(&self) -> Option<(usize, usize)> {
		match self {
			Self::Code { .. } => None,
			Self::Gap {
				first_hidden,
				last_hidden,
				..
			} => Some((*first_hidden, *last_hidden)),
		}
	}

	/// Number of source lines this row stands for.
	pub const fn line_span(&self) -> usize {
		match self {
			Self::Code { .. } => 1,
			Self::Gap { hidden_count, .. } => *hidden_count,
		}
	}

	pub const fn is_gap(&self) -> bool {
		matches!(self, Self::Gap { .. })
	}

	/// Placeholder text for a gap row, e.g. `(lines 4-7 hidden)`.
	pub fn gap_label(&self) -> Option<String> {
		let (first, last) = self.hidden_span()?;
		if first == last {
			Some(format!("(line {first} hidden)"))
		} else {
			Some(format!("(lines {first}-{last} hidden)"))
		}
	}
}

impl From<&HiddenGap> for DisplayRow<'_> {
	fn from(gap: &HiddenGap) -> Self {
		Self::Gap {
			first_hidden: gap.start,
			last_hidden: gap.end,
			hidden_count: gap.hidden_count,
		}
	}
}

/// Map a rendered row back to its source line number.
///
/// The number is carried by the row itself, so it never depends on how many
/// rows precede it and is identical in both view states.
pub const fn line_number_of(row: &DisplayRow<'_>) -> Option<usize> {
	row.line_number()
}

/// Produce the rows to display for `state`.
///
/// `Expanded` ignores the ranges and emits every line. `Collapsed` emits the
/// visible lines with one gap row in place of each hidden run, in ascending
/// line order.
pub fn render<'a>(
	state: ViewState,
	source: &'a SourceText,
	visible: &[VisibleRange],
	gaps: &[HiddenGap],
) -> Vec<DisplayRow<'a>> {
	match state {
		ViewState::Expanded => source.lines().map(code_row).collect(),
		ViewState::Collapsed => {
			let visible_total: usize = visible.iter().map(VisibleRange::len).sum();
			let mut rows = Vec::with_capacity(visible_total + gaps.len());
			let mut pending_gaps = gaps.iter().peekable();

			for range in visible {
				while let Some(gap) = pending_gaps.next_if(|gap| gap.start < range.start) {
					rows.push(DisplayRow::from(gap));
				}

				rows.extend((range.start..=range.end).filter_map(|line_number| {
					source
						.line(line_number)
						.map(|text| code_row((line_number, text)))
				}));
			}

			rows.extend(pending_gaps.map(DisplayRow::from));
			rows
		}
	}
}

fn code_row((line_number, text): (usize, &str)) -> DisplayRow<'_> {
	DisplayRow::Code { line_number, text }
}
