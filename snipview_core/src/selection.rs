use std::fmt::Display;

use derive_more::Deref;
use serde::Serialize;

/// A closed interval `[start, end]` of 1-indexed line numbers shown without
/// collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VisibleRange {
	pub start: usize,
	pub end: usize,
}

impl VisibleRange {
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// Number of lines in the range.
	pub const fn len(&self) -> usize {
		self.end - self.start + 1
	}

	pub const fn is_empty(&self) -> bool {
		false
	}

	pub const fn contains(&self, line_number: usize) -> bool {
		self.start <= line_number && line_number <= self.end
	}
}

impl Display for VisibleRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}

/// Sorted, non-overlapping visible ranges separated by at least one hidden
/// line. Only constructed by the selection functions in this module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref, Serialize)]
#[serde(transparent)]
pub struct VisibleRanges(Vec<VisibleRange>);

impl VisibleRanges {
	/// The single range `[1, line_count]`, or nothing for an empty source.
	pub fn full(line_count: usize) -> Self {
		if line_count == 0 {
			return Self::default();
		}

		Self(vec![VisibleRange::new(1, line_count)])
	}

	/// Total number of visible lines across all ranges.
	pub fn line_total(&self) -> usize {
		self.0.iter().map(VisibleRange::len).sum()
	}

	/// Returns true when `line_number` falls inside any range.
	pub fn covers(&self, line_number: usize) -> bool {
		self.0
			.binary_search_by(|range| {
				if range.end < line_number {
					std::cmp::Ordering::Less
				} else if range.start > line_number {
					std::cmp::Ordering::Greater
				} else {
					std::cmp::Ordering::Equal
				}
			})
			.is_ok()
	}

	/// Returns true when the ranges cover every line of a `line_count` line
	/// source.
	pub fn covers_all(&self, line_count: usize) -> bool {
		self.line_total() == line_count
	}
}

/// Select the visible ranges for a request of `show_lines_only` line numbers
/// over a source with `line_count` lines.
///
/// An empty request shows everything. Otherwise out-of-range numbers are
/// dropped, the rest are sorted and deduplicated, and consecutive numbers are
/// merged into one range: `1,2,3,8,9,12,13` yields `1-3`, `8-9`, `12-13`.
pub fn select_visible(line_count: usize, show_lines_only: &[i64]) -> VisibleRanges {
	select_visible_with_tolerance(line_count, show_lines_only, 0)
}

/// Like [`select_visible`], but numbers separated by up to `tolerance` hidden
/// lines are merged into the same range. The bridged lines become visible.
/// A tolerance of `0` merges only contiguous numbers.
pub fn select_visible_with_tolerance(
	line_count: usize,
	show_lines_only: &[i64],
	tolerance: usize,
) -> VisibleRanges {
	if show_lines_only.is_empty() {
		return VisibleRanges::full(line_count);
	}

	let mut lines: Vec<usize> = show_lines_only
		.iter()
		.filter_map(|&requested| to_line_number(requested, line_count))
		.collect();

	let dropped = show_lines_only.len() - lines.len();
	if dropped > 0 {
		tracing::trace!(dropped, line_count, "dropping out-of-range line requests");
	}

	lines.sort_unstable();
	lines.dedup();

	let max_step = tolerance.saturating_add(1);
	let mut ranges: Vec<VisibleRange> = Vec::new();
	for line in lines {
		match ranges.last_mut() {
			Some(last) if line - last.end <= max_step => last.end = line,
			_ => ranges.push(VisibleRange::new(line, line)),
		}
	}

	VisibleRanges(ranges)
}

/// The requested line numbers that [`select_visible`] would drop because they
/// fall outside `1..=line_count`. Sorted and deduplicated.
pub fn out_of_range_lines(line_count: usize, show_lines_only: &[i64]) -> Vec<i64> {
	let mut dropped: Vec<i64> = show_lines_only
		.iter()
		.copied()
		.filter(|&requested| to_line_number(requested, line_count).is_none())
		.collect();
	dropped.sort_unstable();
	dropped.dedup();

	dropped
}

fn to_line_number(requested: i64, line_count: usize) -> Option<usize> {
	let line = usize::try_from(requested).ok()?;
	(1..=line_count).contains(&line).then_some(line)
}
