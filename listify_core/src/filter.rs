use std::collections::BTreeMap;

use minijinja::Environment;
use minijinja::Error;
use minijinja::ErrorKind;
use minijinja::Value;
use minijinja::value::Rest;

use crate::FlattenOptions;
use crate::listify;

/// Name of the first filter: strictly alternating records and sequences.
pub const CLASSIC_FILTER: &str = "aci_listify";

/// Name of the pattern-aware filter that accepts any nesting of collections.
pub const LISTIFY_FILTER: &str = "aci_listify2";

/// Registration table mapping filter names to the policies they flatten with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRegistry {
	filters: BTreeMap<String, FlattenOptions>,
}

impl Default for FilterRegistry {
	/// Registers [`CLASSIC_FILTER`] and [`LISTIFY_FILTER`].
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.insert(CLASSIC_FILTER, FlattenOptions::classic());
		registry.insert(LISTIFY_FILTER, FlattenOptions::default());
		registry
	}
}

impl FilterRegistry {
	/// A table without any filters.
	pub fn empty() -> Self {
		Self {
			filters: BTreeMap::new(),
		}
	}

	/// Add or replace the filter `name`. Returns the options it replaced.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		options: FlattenOptions,
	) -> Option<FlattenOptions> {
		self.filters.insert(name.into(), options)
	}

	/// Use `name_attribute` for every filter currently in the table.
	pub fn set_name_attribute(&mut self, name_attribute: &str) {
		for options in self.filters.values_mut() {
			options.name_attribute = name_attribute.to_string();
		}
	}

	pub fn get(&self, name: &str) -> Option<&FlattenOptions> {
		self.filters.get(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.filters.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.filters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Install every filter of the table on `env`.
	pub fn register(&self, env: &mut Environment<'_>) {
		for (name, options) in &self.filters {
			tracing::debug!(filter = %name, "registering listify filter");
			env.add_filter(name.clone(), make_filter(options.clone()));
		}
	}

	/// A fresh environment with this table installed.
	pub fn environment(&self) -> Environment<'static> {
		let mut env = Environment::new();
		self.register(&mut env);
		env
	}
}

/// Build a filter callable as `tree|name('key1', 'key2=regex', …)`.
///
/// The tree is converted to JSON before walking, so any value the template
/// can hold is accepted. A malformed pattern is reported as an
/// [`ErrorKind::InvalidOperation`] error carrying the underlying
/// [`ListifyError`](crate::ListifyError).
pub fn make_filter(
	options: FlattenOptions,
) -> impl Fn(Value, Rest<String>) -> Result<Value, Error> + Send + Sync + 'static {
	move |tree: Value, keys: Rest<String>| {
		let tree = serde_json::to_value(&tree).map_err(|e| {
			Error::new(
				ErrorKind::InvalidOperation,
				format!("cannot listify value: {e}"),
			)
		})?;
		let rows = listify(&tree, keys.as_slice(), &options).map_err(|e| {
			Error::new(ErrorKind::InvalidOperation, e.to_string()).with_source(e)
		})?;

		Ok(Value::from_serialize(&rows))
	}
}

/// Register the default filters on `env`.
pub fn add_filters(env: &mut Environment<'_>) {
	FilterRegistry::default().register(env);
}

/// Render `source` with the default filters available.
pub fn render_template<S: serde::Serialize>(source: &str, context: S) -> Result<String, Error> {
	let mut env = Environment::new();
	env.set_keep_trailing_newline(true);
	add_filters(&mut env);
	env.render_str(source, context)
}
