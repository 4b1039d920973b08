use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SnipError {
	#[error(transparent)]
	#[diagnostic(code(snipview::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(snipview::config_parse),
		help("check that snipview.toml is valid TOML with [display] and/or [[blocks]] sections")
	)]
	ConfigParse(String),

	#[error("invalid line list `{spec}`: {reason}")]
	#[diagnostic(
		code(snipview::invalid_line_spec),
		help("use comma-separated line numbers and ranges, e.g. `1-3,8,12-13`")
	)]
	InvalidLineSpec { spec: String, reason: String },

	#[error("no block named `{0}` in config")]
	#[diagnostic(
		code(snipview::unknown_block),
		help("add a `[[blocks]]` entry with `name = \"{0}\"` to snipview.toml")
	)]
	UnknownBlock(String),

	#[error("failed to read source file `{path}`: {reason}")]
	#[diagnostic(code(snipview::source_file))]
	SourceFile { path: String, reason: String },
}

pub type SnipResult<T> = Result<T, SnipError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
