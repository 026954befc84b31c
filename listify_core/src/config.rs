use std::collections::BTreeMap;

use serde::Deserialize;

use crate::CollectionShape;
use crate::FilterRegistry;
use crate::FlattenOptions;
use crate::ListifyError;
use crate::ListifyResult;

/// Filter configuration, usually embedded in the host's own config file.
///
/// ```toml
/// # Applies to every filter whose entry does not set its own.
/// name_attribute = "name"
///
/// [filters.aci_listify3]
/// collections = "sequence"
/// scalar_lists = false
///
/// [filters.aci_listify2]
/// root_attributes = false
/// ```
///
/// Entries under `[filters]` adjust the default filter of the same name or add
/// a new filter. Fields left out of an entry keep the value of the filter being
/// adjusted, or [`FlattenOptions::default`] for a new one.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListifyConfig {
	/// Name attribute for every filter, including the defaults.
	#[serde(default)]
	pub name_attribute: Option<String>,
	/// Additional or replacement filters keyed by filter name.
	#[serde(default)]
	pub filters: BTreeMap<String, FilterConfig>,
}

/// One `[filters.<name>]` entry. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
	#[serde(default)]
	pub name_attribute: Option<String>,
	#[serde(default)]
	pub match_patterns: Option<bool>,
	#[serde(default)]
	pub scalar_lists: Option<bool>,
	#[serde(default)]
	pub collections: Option<CollectionShape>,
	#[serde(default)]
	pub root_attributes: Option<bool>,
}

impl FilterConfig {
	/// Resolve the entry against `base`.
	pub fn apply(&self, base: FlattenOptions) -> FlattenOptions {
		FlattenOptions {
			name_attribute: self.name_attribute.clone().unwrap_or(base.name_attribute),
			match_patterns: self.match_patterns.unwrap_or(base.match_patterns),
			scalar_lists: self.scalar_lists.unwrap_or(base.scalar_lists),
			collections: self.collections.unwrap_or(base.collections),
			root_attributes: self.root_attributes.unwrap_or(base.root_attributes),
		}
	}
}

impl ListifyConfig {
	/// Parse the config from TOML text.
	pub fn from_toml_str(content: &str) -> ListifyResult<Self> {
		toml::from_str(content).map_err(|e| ListifyError::ConfigParse(e.to_string()))
	}

	/// The default registry with this config applied.
	pub fn registry(&self) -> FilterRegistry {
		let mut registry = FilterRegistry::default();

		if let Some(name_attribute) = &self.name_attribute {
			registry.set_name_attribute(name_attribute);
		}

		for (name, entry) in &self.filters {
			let base = registry.get(name).cloned().unwrap_or_else(|| {
				let mut options = FlattenOptions::default();
				if let Some(name_attribute) = &self.name_attribute {
					options.name_attribute.clone_from(name_attribute);
				}
				options
			});
			tracing::debug!(filter = %name, "configured listify filter");
			registry.insert(name.clone(), entry.apply(base));
		}

		registry
	}
}
