use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ListifyError {
	#[error("invalid name pattern `{pattern}` for key `{key}`: {reason}")]
	#[diagnostic(
		code(listify::invalid_pattern),
		help("patterns use Rust regex syntax and must match the whole name, e.g. `{key}=t[0-9]+`")
	)]
	InvalidPattern {
		key: String,
		pattern: String,
		reason: String,
	},

	#[error("failed to parse listify config: {0}")]
	#[diagnostic(
		code(listify::config_parse),
		help("check that the config is valid TOML with an optional [filters] table")
	)]
	ConfigParse(String),

	#[error("failed to parse {format} inventory: {reason}")]
	#[diagnostic(code(listify::inventory))]
	Inventory { format: String, reason: String },

	#[error("unsupported inventory format: `{0}`")]
	#[diagnostic(
		code(listify::unsupported_format),
		help("supported formats: json, yaml, yml, toml")
	)]
	UnsupportedFormat(String),

	#[error("unconvertible float value in {format} inventory: {value}")]
	#[diagnostic(
		code(listify::unconvertible_float),
		help("NaN and Infinity are not valid JSON numbers")
	)]
	UnconvertibleFloat { format: String, value: String },
}

pub type ListifyResult<T> = Result<T, ListifyError>;
