use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use snipview_cli::BlockSource;
use snipview_cli::Commands;
use snipview_cli::OutputFormat;
use snipview_cli::SnipviewCli;
use snipview_core::BlockMeta;
use snipview_core::DisplayOptions;
use snipview_core::DisplayRow;
use snipview_core::DisplaySession;
use snipview_core::HiddenGap;
use snipview_core::SnipviewConfig;
use snipview_core::SourceText;
use snipview_core::ViewState;
use snipview_core::VisibleRanges;
use snipview_core::out_of_range_lines;
use snipview_core::parse_line_spec;
use snipview_core::read_source_file;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SnipviewCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			source,
			collapsible,
			line_numbers,
			expanded,
			format,
		}) => {
			let flags = RenderFlags {
				collapsible: *collapsible,
				line_numbers: *line_numbers,
				expanded: *expanded,
			};
			run_render(&args, source, flags, *format)
		}
		Some(Commands::Ranges {
			source,
			collapsible,
		}) => run_ranges(&args, source, *collapsible),
		Some(Commands::List) => run_list(&args),
		Some(Commands::Check { format }) => run_check(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `snipview --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<snipview_core::SnipError>() {
			Ok(snip_err) => {
				let report: miette::Report = (*snip_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &SnipviewCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(root: &Path) -> Result<SnipviewConfig, Box<dyn std::error::Error>> {
	Ok(SnipviewConfig::load(root)?.unwrap_or_default())
}

/// A code block resolved from either a file argument or a configured block,
/// with command-line overrides applied.
struct ResolvedBlock {
	name: Option<String>,
	code: String,
	options: DisplayOptions,
	meta: BlockMeta,
}

fn resolve_block(
	args: &SnipviewCli,
	source: &BlockSource,
) -> Result<ResolvedBlock, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;

	let mut resolved = match (&source.block, &source.file) {
		(Some(name), _) => {
			let block = config.block(name)?;
			ResolvedBlock {
				name: Some(name.clone()),
				code: block.read_source(&root)?,
				options: block.display_options(&config.display)?,
				meta: block.meta.clone(),
			}
		}
		(None, Some(file)) => {
			ResolvedBlock {
				name: None,
				code: read_source_file(&root, file)?,
				options: DisplayOptions::new()
					.collapsible(config.display.collapsible)
					.show_line_numbers(config.display.show_line_numbers)
					.merge_tolerance(config.display.merge_tolerance),
				meta: BlockMeta {
					filename: file
						.file_name()
						.map(|name| name.to_string_lossy().to_string()),
					..BlockMeta::default()
				},
			}
		}
		(None, None) => {
			return Err("no code block given: pass a FILE or `--block <NAME>`".into());
		}
	};

	if let Some(spec) = &source.lines {
		resolved.options.show_lines_only = parse_line_spec(spec)?;
	}
	if let Some(tolerance) = source.merge_tolerance {
		resolved.options.merge_tolerance = tolerance;
	}

	tracing::debug!(
		block = resolved.name.as_deref().unwrap_or("<file>"),
		requested = resolved.options.show_lines_only.len(),
		collapsible = resolved.options.collapsible,
		"resolved code block"
	);

	Ok(resolved)
}

fn warn_out_of_range(line_count: usize, requested: &[i64]) {
	let dropped = out_of_range_lines(line_count, requested);
	if dropped.is_empty() {
		return;
	}

	eprintln!(
		"{} ignoring line(s) outside the {line_count}-line file: {}",
		colored!("warning:", yellow),
		join_numbers(&dropped)
	);
}

fn join_numbers(numbers: &[i64]) -> String {
	numbers
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

#[derive(Debug, Clone, Copy)]
struct RenderFlags {
	collapsible: bool,
	line_numbers: bool,
	expanded: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderOutput<'a> {
	block: Option<&'a str>,
	meta: &'a BlockMeta,
	download_name: String,
	state: ViewState,
	toggle_label: Option<&'static str>,
	line_count: usize,
	show_line_numbers: bool,
	visible: &'a VisibleRanges,
	gaps: &'a [HiddenGap],
	rows: Vec<DisplayRow<'a>>,
}

fn run_render(
	args: &SnipviewCli,
	source: &BlockSource,
	flags: RenderFlags,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut resolved = resolve_block(args, source)?;
	if flags.collapsible {
		resolved.options.collapsible = true;
	}
	if flags.line_numbers {
		resolved.options.show_line_numbers = true;
	}

	let ResolvedBlock {
		name,
		code,
		options,
		meta,
	} = resolved;
	let mut session = DisplaySession::new(code, options);
	if session.options().collapsible {
		warn_out_of_range(session.line_count(), &session.options().show_lines_only);
	}
	if flags.expanded && session.state() == ViewState::Collapsed {
		session.toggle();
	}

	match format {
		OutputFormat::Json => {
			let output = RenderOutput {
				block: name.as_deref(),
				meta: &meta,
				download_name: meta.download_name(),
				state: session.state(),
				toggle_label: session
					.can_toggle()
					.then_some(session.state().toggle_label()),
				line_count: session.line_count(),
				show_line_numbers: session.options().show_line_numbers,
				visible: session.visible_ranges(),
				gaps: session.gaps(),
				rows: session.rows(),
			};
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if let Some(title) = &meta.title {
				println!("{}", colored!(title, bold));
				if let Some(description) = &meta.description {
					println!("{}", colored!(description, dimmed));
				}
				println!();
			}

			let gutter = session
				.options()
				.show_line_numbers
				.then(|| session.line_count().to_string().len());
			for row in session.rows() {
				println!("{}", format_row(&row, gutter));
			}

			if session.can_toggle() {
				let shown = session.visible_ranges().line_total();
				let message = match session.state() {
					ViewState::Collapsed => {
						format!(
							"{shown} of {} lines shown. {} with --expanded.",
							session.line_count(),
							ViewState::Collapsed.toggle_label()
						)
					}
					ViewState::Expanded => {
						format!(
							"All {} lines shown. {} to the {shown} selected line(s) by \
							 dropping --expanded.",
							session.line_count(),
							ViewState::Expanded.toggle_label()
						)
					}
				};
				eprintln!("{}", colored!(message, dimmed));
			}
		}
	}

	Ok(())
}

/// Format one row for the terminal. `gutter` is the width of the line
/// number column, or `None` to omit it.
fn format_row(row: &DisplayRow<'_>, gutter: Option<usize>) -> String {
	match (row, gutter) {
		(DisplayRow::Code { line_number, text }, Some(width)) => {
			format!("{} {text}", colored!(format!("{line_number:>width$} |"), dimmed))
		}
		(DisplayRow::Code { text, .. }, None) => (*text).to_string(),
		(DisplayRow::Gap { .. }, gutter) => {
			let label = format!("⋯ {}", row.gap_label().unwrap_or_default());
			match gutter {
				Some(width) => {
					format!(
						"{} {}",
						colored!(format!("{:>width$} |", ""), dimmed),
						colored!(label, dimmed)
					)
				}
				None => colored!(label, dimmed),
			}
		}
	}
}

fn run_ranges(
	args: &SnipviewCli,
	source: &BlockSource,
	collapsible: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut resolved = resolve_block(args, source)?;
	if collapsible {
		resolved.options.collapsible = true;
	}

	let session = DisplaySession::new(resolved.code, resolved.options);
	let line_count = session.line_count();
	let options = session.options();
	if options.collapsible {
		warn_out_of_range(line_count, &options.show_lines_only);
	} else if !options.show_lines_only.is_empty() {
		eprintln!(
			"{} block is not collapsible, so every line stays visible. Pass --collapsible to \
			 hide the rest.",
			colored!("note:", yellow)
		);
	}

	let visible = session.visible_ranges();
	let gaps = session.gaps();

	let visible_list = if visible.is_empty() {
		"(none)".to_string()
	} else {
		visible
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ")
	};
	let gap_list = if gaps.is_empty() {
		"(none)".to_string()
	} else {
		gaps.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ")
	};

	println!("{:<10}{line_count}", colored!("lines:", bold));
	println!("{:<10}{visible_list}", colored!("visible:", bold));
	println!("{:<10}{gap_list}", colored!("gaps:", bold));

	Ok(())
}

fn run_list(args: &SnipviewCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;

	if config.blocks.is_empty() {
		println!("No blocks configured.");
		return Ok(());
	}

	println!("{}", colored!("Blocks:", bold));
	for block in &config.blocks {
		let path = block.path.display();
		match block.session(&root, &config.display) {
			Ok(session) => {
				let hidden = session.hidden_line_count();
				let state = if session.can_toggle() {
					"collapsible"
				} else {
					"static"
				};
				println!(
					"  {} {path} ({} lines, {} visible, {hidden} hidden, {state})",
					block.name,
					session.line_count(),
					session.line_count() - hidden,
				);
			}
			Err(e) => {
				println!("  {} {path} ({})", block.name, colored!(e.to_string(), red));
			}
		}
	}

	Ok(())
}

#[derive(Debug, Serialize)]
struct CheckProblem {
	block: String,
	file: String,
	message: String,
}

fn check_blocks(root: &Path, config: &SnipviewConfig) -> Vec<CheckProblem> {
	let mut problems = Vec::new();

	for block in &config.blocks {
		let problem = |message: String| {
			CheckProblem {
				block: block.name.clone(),
				file: block.path.display().to_string(),
				message,
			}
		};

		let options = match block.display_options(&config.display) {
			Ok(options) => options,
			Err(e) => {
				problems.push(problem(e.to_string()));
				continue;
			}
		};

		let code = match block.read_source(root) {
			Ok(code) => code,
			Err(e) => {
				problems.push(problem(e.to_string()));
				continue;
			}
		};

		let line_count = SourceText::new(code).line_count();
		let dropped = out_of_range_lines(line_count, &options.show_lines_only);
		if !dropped.is_empty() {
			problems.push(problem(format!(
				"requests line(s) {} but the file has {line_count} line(s)",
				join_numbers(&dropped)
			)));
		}
	}

	problems
}

fn run_check(args: &SnipviewCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let problems = check_blocks(&root, &config);

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"ok": problems.is_empty(),
				"blocks": config.blocks.len(),
				"problems": problems,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if problems.is_empty() {
				println!(
					"{} all {} block(s) are valid.",
					colored!("Check passed:", green),
					config.blocks.len()
				);
			} else {
				for problem in &problems {
					eprintln!(
						"{} block `{}` ({}): {}",
						colored!("error:", red),
						problem.block,
						problem.file,
						problem.message
					);
				}
				println!("{} problem(s) found.", problems.len());
			}
		}
	}

	if !problems.is_empty() {
		process::exit(1);
	}

	Ok(())
}
