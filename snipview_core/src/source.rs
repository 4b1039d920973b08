use std::ops::Range;

/// Immutable source text split into 1-indexed lines.
///
/// Lines are stored as byte spans into the owned text, so every view over
/// the source borrows from this value instead of copying line content.
/// Splitting happens on `\n` only: trailing empty lines are kept as lines and
/// line content is never trimmed (a `\r` before the newline stays part of the
/// line). Empty text has zero lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceText {
	text: String,
	/// Byte span of each line, excluding its `\n` terminator.
	lines: Vec<Range<usize>>,
}

impl SourceText {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let lines = line_spans(&text);
		Self { text, lines }
	}

	/// Number of lines in the source.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Text of the 1-indexed `line_number`, or `None` when out of range.
	pub fn line(&self, line_number: usize) -> Option<&str> {
		let span = self.lines.get(line_number.checked_sub(1)?)?;
		Some(&self.text[span.clone()])
	}

	/// Iterate over `(line_number, text)` pairs in source order.
	pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
		self.lines
			.iter()
			.enumerate()
			.map(|(index, span)| (index + 1, &self.text[span.clone()]))
	}

	/// The full, unmodified text this source was built from.
	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl From<&str> for SourceText {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for SourceText {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

fn line_spans(text: &str) -> Vec<Range<usize>> {
	if text.is_empty() {
		return Vec::new();
	}

	let mut spans = Vec::new();
	let mut start = 0;
	for (i, byte) in text.bytes().enumerate() {
		if byte == b'\n' {
			spans.push(start..i);
			start = i + 1;
		}
	}
	spans.push(start..text.len());

	spans
}
