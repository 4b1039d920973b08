use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Show only the lines of a code block that matter, and collapse the rest.",
	long_about = "snipview renders documentation code blocks with a selected set of visible \
	              lines.\n\nLines outside the selection collapse into placeholders that keep \
	              the real line numbers of the surrounding code, and a block can be expanded \
	              to its full source at any time.\n\nQuick start:\n  snipview render \
	              main.rs --lines 1-3,8 --collapsible\n  snipview ranges main.rs --lines \
	              1-3,8\n  snipview list       List blocks from snipview.toml\n  snipview \
	              check      Verify configured blocks are valid"
)]
pub struct SnipviewCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

/// Where a command reads its code block from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BlockSource {
	/// Source file to display, relative to the project root.
	pub file: Option<PathBuf>,

	/// Name of a block configured in `snipview.toml`. Flags given on the
	/// command line override the block's configured options.
	#[arg(long, short, conflicts_with = "file")]
	pub block: Option<String>,

	/// Lines to show while collapsed, e.g. `1-3,8,12-13`. Numbers outside
	/// the file are ignored.
	#[arg(long, short)]
	pub lines: Option<String>,

	/// Merge requested lines separated by up to this many hidden lines.
	#[arg(long)]
	pub merge_tolerance: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a code block for the terminal or as JSON.
	///
	/// Collapsible blocks with a line selection start collapsed: the
	/// selected lines are printed with their real line numbers and every
	/// hidden run becomes a single placeholder row.
	Render {
		#[command(flatten)]
		source: BlockSource,

		/// Allow the block to collapse to the selected lines.
		#[arg(long, default_value_t = false)]
		collapsible: bool,

		/// Draw a line-number gutter.
		#[arg(long, default_value_t = false)]
		line_numbers: bool,

		/// Show the full code even when the block starts collapsed.
		#[arg(long, default_value_t = false)]
		expanded: bool,

		/// Output format. Use `text` for the terminal or `json` for a
		/// rendering collaborator.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the visible ranges and hidden gaps for a line selection.
	///
	/// Uses the same rules as `render`: a block that is not collapsible
	/// shows every line, whatever it requests.
	Ranges {
		#[command(flatten)]
		source: BlockSource,

		/// Allow the block to collapse to the selected lines.
		#[arg(long, default_value_t = false)]
		collapsible: bool,
	},
	/// List all blocks configured in `snipview.toml`.
	List,
	/// Check that every configured block can be displayed as requested.
	///
	/// Reports blocks whose source file cannot be read, whose line list
	/// cannot be parsed, or which request lines the file no longer has.
	/// Exits with a non-zero status code when any problem is found.
	Check {
		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
