use crate::SnipError;
use crate::SnipResult;

/// Longest range a single spec item may expand to.
pub const MAX_SPEC_RANGE: i64 = 1_000_000;

/// Parse a comma-separated list of line numbers and inclusive ranges, e.g.
/// `1-3,8,12-13`, into individual line numbers.
///
/// Whitespace around items is ignored and empty items are skipped, so `""`
/// parses to an empty list. Numbers are not checked against any source; that
/// happens during selection, which drops anything out of range.
pub fn parse_line_spec(spec: &str) -> SnipResult<Vec<i64>> {
	let mut lines = Vec::new();

	for item in spec.split(',').map(str::trim).filter(|item| !item.is_empty()) {
		match item.split_once('-') {
			Some((start, end)) => {
				let start = parse_number(spec, start.trim())?;
				let end = parse_number(spec, end.trim())?;
				if start > end {
					return Err(invalid(spec, format!("range `{item}` ends before it starts")));
				}
				if end - start >= MAX_SPEC_RANGE {
					return Err(invalid(
						spec,
						format!("range `{item}` spans more than {MAX_SPEC_RANGE} lines"),
					));
				}
				lines.extend(start..=end);
			}
			None => lines.push(parse_number(spec, item)?),
		}
	}

	Ok(lines)
}

fn parse_number(spec: &str, value: &str) -> SnipResult<i64> {
	if value.is_empty() {
		return Err(invalid(spec, "missing number in range".to_string()));
	}

	value
		.parse::<u32>()
		.map(i64::from)
		.map_err(|e| invalid(spec, format!("`{value}` is not a line number ({e})")))
}

fn invalid(spec: &str, reason: String) -> SnipError {
	SnipError::InvalidLineSpec {
		spec: spec.to_string(),
		reason,
	}
}
