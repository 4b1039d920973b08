use crate::DisplayOptions;
use crate::DisplayRow;
use crate::DisplaySession;

/// `count` lines of the form `line N`, joined without a trailing newline.
pub fn numbered_code(count: usize) -> String {
	(1..=count)
		.map(|n| format!("line {n}"))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Line request used throughout the docs: three spans over a 13-line file.
pub fn merge_example_lines() -> Vec<i64> {
	vec![1, 2, 3, 8, 9, 12, 13]
}

pub fn merge_example_session() -> DisplaySession {
	DisplaySession::new(
		numbered_code(13),
		DisplayOptions::new()
			.with_lines(merge_example_lines())
			.collapsible(true),
	)
}

pub fn code(line_number: usize, text: &str) -> DisplayRow<'_> {
	DisplayRow::Code { line_number, text }
}

pub fn gap(first_hidden: usize, last_hidden: usize) -> DisplayRow<'static> {
	DisplayRow::Gap {
		first_hidden,
		last_hidden,
		hidden_count: last_hidden - first_hidden + 1,
	}
}

/// Plain-text rendering with a left-aligned gutter, used for snapshots.
pub fn rows_to_text(rows: &[DisplayRow<'_>]) -> String {
	rows.iter()
		.map(|row| {
			match row {
				DisplayRow::Code { line_number, text } => format!("{line_number:<2} | {text}"),
				DisplayRow::Gap { .. } => format!(".. | {}", row.gap_label().unwrap_or_default()),
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// Lines accounted for by `rows`: one per code row plus every gap's hidden
/// count.
pub fn covered_lines(rows: &[DisplayRow<'_>]) -> usize {
	rows.iter().map(DisplayRow::line_span).sum()
}
