use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::KeyPath;
use crate::KeySpec;
use crate::ListifyResult;

/// Default attribute holding the display name of a record. Upper case so it
/// sorts first in key-sorted YAML and JSON inventories.
pub const DEFAULT_NAME_ATTRIBUTE: &str = "Name";

/// String form of a null name attribute.
pub const NULL_NAME: &str = "None";

/// One flat output row: qualified attribute name to scalar (or list of
/// scalars).
pub type Record = Map<String, Value>;

/// Which values below a path key are walked as collections of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionShape {
	/// Sequences of records only. Mappings and nested sequences are pruned.
	Sequence,
	/// Sequences, mappings of records (walked by value), nested collections and
	/// a single record stored directly under the key.
	#[default]
	Lenient,
}

/// Policies applied while flattening a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
	/// Attribute matched against a key's name pattern.
	pub name_attribute: String,
	/// Parse `name=regex` arguments. When disabled the argument is a plain key
	/// name.
	pub match_patterns: bool,
	/// Keep sequences made only of scalars (including empty ones) as
	/// attributes.
	pub scalar_lists: bool,
	/// Shapes accepted as collections below a path key.
	pub collections: CollectionShape,
	/// Collect the scalar attributes of the root record (without a prefix).
	pub root_attributes: bool,
}

impl Default for FlattenOptions {
	fn default() -> Self {
		Self {
			name_attribute: DEFAULT_NAME_ATTRIBUTE.to_string(),
			match_patterns: true,
			scalar_lists: true,
			collections: CollectionShape::Lenient,
			root_attributes: true,
		}
	}
}

impl FlattenOptions {
	/// The behaviour of the first `aci_listify` filter: strictly alternating
	/// records and sequences, scalar attributes only, keys taken verbatim and
	/// nothing collected from the root.
	pub fn classic() -> Self {
		Self {
			match_patterns: false,
			scalar_lists: false,
			collections: CollectionShape::Sequence,
			root_attributes: false,
			..Self::default()
		}
	}
}

/// Why a branch of the tree contributed no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
	/// The record has no attribute named by the next key.
	MissingKey,
	/// The attribute named by the next key is not a collection.
	NotACollection,
	/// A collection member is not a record.
	NotARecord,
	/// The member's name does not match the key's pattern.
	NameMismatch,
}

impl fmt::Display for PruneReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let reason = match self {
			Self::MissingKey => "missing key",
			Self::NotACollection => "not a collection",
			Self::NotARecord => "not a record",
			Self::NameMismatch => "name does not match pattern",
		};
		f.write_str(reason)
	}
}

/// Parse `keys` and flatten `tree` along them.
///
/// Fails only when a key carries a malformed pattern. Structural mismatches
/// prune the affected branch and yield fewer rows.
pub fn listify<S: AsRef<str>>(
	tree: &Value,
	keys: &[S],
	options: &FlattenOptions,
) -> ListifyResult<Vec<Record>> {
	let path = KeyPath::parse(keys, options.match_patterns)?;
	Ok(flatten(tree, &path, options))
}

/// Walk `tree` along `path` and return one row per record reached at the end
/// of the path, in depth-first order.
///
/// Each row holds the scalar attributes of every record on its way down. A
/// record's attributes are keyed by the names of all keys traversed to reach
/// it joined with `_`, so `bd` three levels down becomes `tenant_app_epg_bd`:
///
/// ```rust
/// use listify_core::FlattenOptions;
/// use listify_core::KeyPath;
/// use listify_core::flatten;
/// use serde_json::json;
///
/// let tree = json!({
///   "tenant": [{ "Name": "t1", "app": [{ "Name": "a1", "epg": [{ "Name": "e1", "bd": "bd1" }] }] }]
/// });
/// let path = KeyPath::parse(["tenant", "app", "epg"], true).unwrap();
/// let rows = flatten(&tree, &path, &FlattenOptions::default());
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["tenant_Name"], "t1");
/// assert_eq!(rows[0]["tenant_app_Name"], "a1");
/// assert_eq!(rows[0]["tenant_app_epg_bd"], "bd1");
/// ```
pub fn flatten(tree: &Value, path: &KeyPath, options: &FlattenOptions) -> Vec<Record> {
	let mut walker = Walker {
		path,
		options,
		rows: Vec::new(),
	};
	walker.visit_root(tree);

	tracing::debug!(
		path = %path,
		rows = walker.rows.len(),
		"flattened tree"
	);

	walker.rows
}

/// String form of a record's name used for pattern matching, or `None` when
/// the record has no name attribute.
pub fn record_name<'a>(record: &'a Record, name_attribute: &str) -> Option<Cow<'a, str>> {
	let name = match record.get(name_attribute)? {
		Value::Null => Cow::Borrowed(NULL_NAME),
		Value::String(name) => Cow::Borrowed(name.as_str()),
		Value::Bool(true) => Cow::Borrowed("True"),
		Value::Bool(false) => Cow::Borrowed("False"),
		Value::Number(number) => Cow::Owned(number.to_string()),
		other => Cow::Owned(other.to_string()),
	};

	Some(name)
}

struct Walker<'a> {
	path: &'a KeyPath,
	options: &'a FlattenOptions,
	rows: Vec<Record>,
}

impl<'a> Walker<'a> {
	fn visit_root(&mut self, tree: &Value) {
		let empty = Record::new();
		match tree {
			Value::Object(record) => self.visit_record(record, 0, &empty),
			Value::Array(_) if self.options.collections == CollectionShape::Lenient => {
				self.visit_collection(tree, 0, &empty);
			}
			_ => prune(PruneReason::NotARecord, 0, None),
		}
	}

	/// Walk the members of a collection reached through `depth` keys.
	fn visit_collection(&mut self, collection: &Value, depth: usize, inherited: &Record) {
		match (collection, self.options.collections) {
			(Value::Array(members), _) => {
				for member in members {
					self.visit_member(member, depth, inherited);
				}
			}
			(Value::Object(record), CollectionShape::Lenient) if self.is_single_record(record) => {
				self.visit_named(record, depth, inherited);
			}
			(Value::Object(members), CollectionShape::Lenient) => {
				for member in members.values() {
					self.visit_member(member, depth, inherited);
				}
			}
			_ => prune(PruneReason::NotACollection, depth, self.key(depth)),
		}
	}

	fn visit_member(&mut self, member: &Value, depth: usize, inherited: &Record) {
		let lenient = self.options.collections == CollectionShape::Lenient;
		match member {
			// Members of a root sequence are root records.
			Value::Object(record)
				if depth == 0 || !lenient || self.is_single_record(record) =>
			{
				self.visit_named(record, depth, inherited);
			}
			Value::Object(_) | Value::Array(_) if lenient => {
				self.visit_collection(member, depth, inherited);
			}
			_ => prune(PruneReason::NotARecord, depth, self.key(depth)),
		}
	}

	/// Visit `record` if its name satisfies the pattern of the key that led
	/// here.
	fn visit_named(&mut self, record: &Record, depth: usize, inherited: &Record) {
		if let Some(spec) = self.key(depth) {
			if let Some(pattern) = &spec.pattern {
				let name = record_name(record, &self.options.name_attribute);
				// Unnamed records never satisfy a pattern.
				if !name.as_deref().is_some_and(|name| pattern.is_match(name)) {
					tracing::trace!(
						key = %spec.name,
						name = ?name,
						pattern = pattern.as_str(),
						"pruned branch: {}",
						PruneReason::NameMismatch
					);
					return;
				}
			}
		}
		self.visit_record(record, depth, inherited);
	}

	fn visit_record(&mut self, record: &Record, depth: usize, inherited: &Record) {
		let mut row = inherited.clone();
		if depth > 0 || self.options.root_attributes {
			row.extend(self.attributes(record, &self.path.prefix(depth)));
		}
		self.descend(record, depth, row);
	}

	/// Emit `row` when the path is exhausted, otherwise follow the next key.
	fn descend(&mut self, record: &Record, depth: usize, row: Record) {
		let path = self.path;
		let Some(next) = path.get(depth) else {
			self.rows.push(row);
			return;
		};

		match record.get(&next.name) {
			Some(child @ (Value::Array(_) | Value::Object(_))) => {
				self.visit_collection(child, depth + 1, &row);
			}
			Some(_) => prune(PruneReason::NotACollection, depth + 1, Some(next)),
			None => prune(PruneReason::MissingKey, depth + 1, Some(next)),
		}
	}

	/// Key spec that led to records at `depth`. The root has none.
	fn key(&self, depth: usize) -> Option<&'a KeySpec> {
		let path = self.path;
		depth.checked_sub(1).and_then(|index| path.get(index))
	}

	fn attributes(&self, record: &Record, prefix: &str) -> Record {
		record
			.iter()
			.filter(|(_, value)| self.is_attribute(value))
			.map(|(name, value)| (format!("{prefix}{name}"), value.clone()))
			.collect()
	}

	fn is_attribute(&self, value: &Value) -> bool {
		match value {
			Value::Object(_) => false,
			Value::Array(items) => self.options.scalar_lists && items.iter().all(is_scalar),
			_ => true,
		}
	}

	/// A mapping reached as a collection is one record rather than a bag of
	/// records when it carries a name or a non-null scalar of its own. Nulls
	/// are ignored so that a stray empty entry does not turn a bag into a
	/// record.
	fn is_single_record(&self, mapping: &Record) -> bool {
		mapping.contains_key(&self.options.name_attribute)
			|| mapping
				.values()
				.any(|value| !value.is_null() && is_scalar(value))
	}
}

fn is_scalar(value: &Value) -> bool {
	!matches!(value, Value::Array(_) | Value::Object(_))
}

fn prune(reason: PruneReason, depth: usize, key: Option<&KeySpec>) {
	let key = key.map_or("", |spec| spec.name.as_str());
	tracing::trace!(key, depth, "pruned branch: {reason}");
}
