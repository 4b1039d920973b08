use serde::Deserialize;
use serde::Serialize;

/// Display metadata that travels alongside a code block. None of it affects
/// line selection or view state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMeta {
	pub title: Option<String>,
	pub filename: Option<String>,
	pub language: Option<String>,
	pub framework: Option<String>,
	pub difficulty: Option<String>,
	pub description: Option<String>,
}

impl BlockMeta {
	/// File name used when the block is downloaded.
	///
	/// Prefers the configured `filename`, then `snippet.<ext>` derived from
	/// `language`, then `snippet.txt`.
	pub fn download_name(&self) -> String {
		if let Some(filename) = self.filename.as_deref().filter(|name| !name.trim().is_empty()) {
			return filename.trim().to_string();
		}

		let extension = self
			.language
			.as_deref()
			.map(language_extension)
			.filter(|extension| !extension.is_empty())
			.unwrap_or_else(|| "txt".to_string());

		format!("snippet.{extension}")
	}
}

/// Map a language name to a file extension. Unknown languages are lowercased
/// and reduced to ASCII letters and digits so the result is always a plain
/// file extension.
fn language_extension(language: &str) -> String {
	let language = language.trim().to_ascii_lowercase();
	let known = match language.as_str() {
		"typescript" | "ts" => "ts",
		"javascript" | "js" => "js",
		"tsx" => "tsx",
		"jsx" => "jsx",
		"rust" | "rs" => "rs",
		"python" | "py" => "py",
		"shell" | "bash" | "sh" | "zsh" => "sh",
		"yaml" | "yml" => "yml",
		"markdown" | "md" => "md",
		"plaintext" | "text" | "txt" => "txt",
		"c++" | "cpp" => "cpp",
		"c#" | "csharp" => "cs",
		_ => "",
	};

	if known.is_empty() {
		language
			.chars()
			.filter(char::is_ascii_alphanumeric)
			.collect()
	} else {
		known.to_string()
	}
}
