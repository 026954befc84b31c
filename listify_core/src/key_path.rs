use std::fmt;

use derive_more::Deref;
use regex::Regex;

use crate::ListifyError;
use crate::ListifyResult;

/// Separator between a key name and its name pattern in a filter argument,
/// e.g. `interface_policy_profile=.+998`.
pub const PATTERN_SEPARATOR: char = '=';

/// A regular expression that must match the whole name of a record.
///
/// The source pattern is wrapped as `\A(?:…)\z` so that `t1` does not match
/// `t10`, whatever flags the pattern itself sets.
#[derive(Debug, Clone)]
pub struct NamePattern {
	source: String,
	regex: Regex,
}

impl NamePattern {
	/// Compile `pattern` for full-string matching.
	pub fn new(key: &str, pattern: &str) -> ListifyResult<Self> {
		let regex = Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|e| {
			ListifyError::InvalidPattern {
				key: key.to_string(),
				pattern: pattern.to_string(),
				reason: e.to_string(),
			}
		})?;

		Ok(Self {
			source: pattern.to_string(),
			regex,
		})
	}

	/// The pattern as written by the caller, without anchors.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	pub fn is_match(&self, name: &str) -> bool {
		self.regex.is_match(name)
	}
}

impl PartialEq for NamePattern {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

impl Eq for NamePattern {}

/// One segment of a key path: the attribute to descend into and an optional
/// constraint on the name of each record found there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
	pub name: String,
	pub pattern: Option<NamePattern>,
}

impl KeySpec {
	/// A segment without a name constraint.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			pattern: None,
		}
	}

	/// A segment whose records must have a name fully matching `pattern`.
	pub fn with_pattern(name: impl Into<String>, pattern: &str) -> ListifyResult<Self> {
		let name = name.into();
		let pattern = NamePattern::new(&name, pattern)?;

		Ok(Self {
			name,
			pattern: Some(pattern),
		})
	}

	/// Parse a filter argument of the form `name` or `name=regex`.
	///
	/// Both sides of the separator must be non-empty, otherwise the whole
	/// argument is taken as the key name. Only the first `=` separates, so the
	/// pattern itself may contain `=`.
	pub fn parse(raw: &str) -> ListifyResult<Self> {
		match raw.split_once(PATTERN_SEPARATOR) {
			Some((name, pattern)) if !name.is_empty() && !pattern.is_empty() => {
				Self::with_pattern(name, pattern)
			}
			_ => Ok(Self::new(raw)),
		}
	}
}

impl fmt::Display for KeySpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.pattern {
			Some(pattern) => write!(f, "{}{PATTERN_SEPARATOR}{}", self.name, pattern.as_str()),
			None => f.write_str(&self.name),
		}
	}
}

/// The ordered list of key specs leading from the root of a tree to the
/// records that become output rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct KeyPath(Vec<KeySpec>);

impl KeyPath {
	pub fn new(specs: Vec<KeySpec>) -> Self {
		Self(specs)
	}

	/// Parse raw filter arguments. Every pattern is compiled before the path is
	/// returned, so a malformed regex fails the whole call up front.
	///
	/// With `match_patterns` disabled each argument is used verbatim as a key
	/// name, `=` included.
	pub fn parse<I, S>(keys: I, match_patterns: bool) -> ListifyResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let specs = keys
			.into_iter()
			.map(|raw| {
				let raw = raw.as_ref();
				if match_patterns {
					KeySpec::parse(raw)
				} else {
					Ok(KeySpec::new(raw))
				}
			})
			.collect::<ListifyResult<Vec<_>>>()?;

		Ok(Self(specs))
	}

	/// Prefix contributed by the first `depth` segments, e.g. `tenant_app_` for
	/// a depth of two.
	pub fn prefix(&self, depth: usize) -> String {
		self.0
			.iter()
			.take(depth)
			.fold(String::new(), |mut prefix, spec| {
				prefix.push_str(&spec.name);
				prefix.push('_');
				prefix
			})
	}
}

impl From<Vec<KeySpec>> for KeyPath {
	fn from(specs: Vec<KeySpec>) -> Self {
		Self(specs)
	}
}

impl fmt::Display for KeyPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, spec) in self.0.iter().enumerate() {
			if index > 0 {
				f.write_str(" > ")?;
			}
			write!(f, "{spec}")?;
		}
		Ok(())
	}
}
