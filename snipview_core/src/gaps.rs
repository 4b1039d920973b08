use std::fmt::Display;

use serde::Serialize;

use crate::selection::VisibleRange;

/// A run of hidden lines between visible ranges, or before the first / after
/// the last. `hidden_count` is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenGap {
	pub start: usize,
	pub end: usize,
	pub hidden_count: usize,
}

impl HiddenGap {
	fn between(start: usize, end: usize) -> Self {
		Self {
			start,
			end,
			hidden_count: end - start + 1,
		}
	}
}

impl Display for HiddenGap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-{} ({})", self.start, self.end, self.hidden_count)
	}
}

/// Compute the hidden gaps left over by `visible` within `[1, line_count]`.
///
/// `visible` must be sorted and non-overlapping, as produced by
/// [`select_visible`](crate::select_visible). An empty `visible` hides the
/// whole source as a single gap.
pub fn compute_gaps(line_count: usize, visible: &[VisibleRange]) -> Vec<HiddenGap> {
	let mut gaps = Vec::new();
	// First line not yet accounted for.
	let mut next = 1;

	for range in visible {
		if range.start > next {
			gaps.push(HiddenGap::between(next, range.start - 1));
		}
		next = range.end + 1;
	}

	if next <= line_count {
		gaps.push(HiddenGap::between(next, line_count));
	}

	gaps
}
