use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BlockMeta;
use crate::DisplayOptions;
use crate::DisplaySession;
use crate::SnipError;
use crate::SnipResult;
use crate::line_spec::parse_line_spec;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"snipview.toml",
	".snipview.toml",
	".config/snipview.toml",
];

/// Configuration loaded from a `snipview.toml` file.
///
/// ```toml
/// [display]
/// collapsible = true
/// show_line_numbers = true
///
/// [[blocks]]
/// name = "quickstart"
/// path = "snippets/quickstart.ts"
/// show_lines_only = [1, 2, 3, 8, 9]
/// title = "Quick start"
/// language = "typescript"
///
/// [[blocks]]
/// name = "server"
/// path = "snippets/server.rs"
/// show_lines_only = "1-4,10-12"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnipviewConfig {
	/// Defaults applied to every block unless the block overrides them.
	#[serde(default)]
	pub display: DisplayDefaults,
	/// Code blocks known to the project.
	#[serde(default)]
	pub blocks: Vec<BlockConfig>,
}

/// Display settings shared by all blocks. Keys may be written in snake_case
/// or camelCase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayDefaults {
	#[serde(default)]
	pub collapsible: bool,
	#[serde(default, alias = "showLineNumbers")]
	pub show_line_numbers: bool,
	/// Hidden lines a line request may bridge when merging ranges. `0` only
	/// merges contiguous lines.
	#[serde(default, alias = "mergeTolerance")]
	pub merge_tolerance: usize,
}

/// The lines a block requests, either as an array of numbers or as a line
/// spec string.
///
/// ```toml
/// show_lines_only = [1, 2, 3, 8]
/// show_lines_only = "1-3,8"
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
#[non_exhaustive]
pub enum LineList {
	Numbers(Vec<i64>),
	Spec(String),
}

impl Default for LineList {
	fn default() -> Self {
		Self::Numbers(Vec::new())
	}
}

impl LineList {
	/// Resolve to individual line numbers. Only spec strings can fail.
	pub fn to_lines(&self) -> SnipResult<Vec<i64>> {
		match self {
			Self::Numbers(numbers) => Ok(numbers.clone()),
			Self::Spec(spec) => parse_line_spec(spec),
		}
	}
}

/// A `[[blocks]]` entry. Option keys may be written in snake_case or
/// camelCase. Any other key is rejected when the config is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockConfig {
	/// Name used to select the block from the command line.
	pub name: String,
	/// Source file, relative to the project root.
	pub path: PathBuf,
	#[serde(default, alias = "showLinesOnly")]
	pub show_lines_only: LineList,
	pub collapsible: Option<bool>,
	#[serde(alias = "showLineNumbers")]
	pub show_line_numbers: Option<bool>,
	#[serde(alias = "mergeTolerance")]
	pub merge_tolerance: Option<usize>,
	#[serde(flatten)]
	pub meta: BlockMeta,
	/// Keys left over once the options and metadata have taken theirs.
	#[serde(flatten)]
	unknown: BTreeMap<String, toml::Value>,
}

impl BlockConfig {
	/// Build the display options for this block, falling back to `defaults`
	/// for anything the block leaves unset.
	pub fn display_options(&self, defaults: &DisplayDefaults) -> SnipResult<DisplayOptions> {
		Ok(DisplayOptions {
			show_lines_only: self.show_lines_only.to_lines()?,
			collapsible: self.collapsible.unwrap_or(defaults.collapsible),
			show_line_numbers: self.show_line_numbers.unwrap_or(defaults.show_line_numbers),
			merge_tolerance: self.merge_tolerance.unwrap_or(defaults.merge_tolerance),
		})
	}

	/// Read the block's source file relative to `root`.
	pub fn read_source(&self, root: &Path) -> SnipResult<String> {
		read_source_file(root, &self.path)
	}

	/// Read the source and build a display session for it.
	pub fn session(&self, root: &Path, defaults: &DisplayDefaults) -> SnipResult<DisplaySession> {
		let options = self.display_options(defaults)?;
		let code = self.read_source(root)?;
		Ok(DisplaySession::new(code, options))
	}
}

impl SnipviewConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SnipResult<Option<SnipviewConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(
			path = %config_path.display(),
			blocks = config.blocks.len(),
			"loaded config"
		);

		Ok(Some(config))
	}

	/// Parse config from TOML text.
	pub fn from_toml(content: &str) -> SnipResult<SnipviewConfig> {
		let config: SnipviewConfig =
			toml::from_str(content).map_err(|e| SnipError::ConfigParse(e.to_string()))?;

		// `deny_unknown_fields` cannot be combined with the flattened metadata.
		for block in &config.blocks {
			if let Some(key) = block.unknown.keys().next() {
				return Err(SnipError::ConfigParse(format!(
					"unknown field `{key}` in block `{}`",
					block.name
				)));
			}
		}

		Ok(config)
	}

	/// Find a block by name.
	pub fn block(&self, name: &str) -> SnipResult<&BlockConfig> {
		self.blocks
			.iter()
			.find(|block| block.name == name)
			.ok_or_else(|| SnipError::UnknownBlock(name.to_string()))
	}
}

/// Read a source file, resolving relative paths against `root`.
pub fn read_source_file(root: &Path, path: &Path) -> SnipResult<String> {
	let abs_path = root.join(path);
	std::fs::read_to_string(&abs_path).map_err(|e| SnipError::SourceFile {
		path: path.display().to_string(),
		reason: e.to_string(),
	})
}
