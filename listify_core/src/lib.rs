//! `listify_core` provides template filters that flatten a nested inventory
//! tree into a flat list of key/value rows. The tree describes objects as
//! "object kind → list of instances → object kind → …" and the filters walk
//! it along a path of key names, folding every scalar attribute met on the way
//! into one row per leaf.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template call  tree|aci_listify2('tenant=t1', 'app', 'epg')
//!   → Key path (parses `name` / `name=regex` arguments, compiles patterns)
//!   → Flatten (depth-first walk, one row per record at the end of the path)
//!   → minijinja value (a sequence of flat maps for the template loop)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration of the filter table and name attribute.
//! - [`inventory`]: Parsing of JSON, YAML and TOML inventories into a tree.
//!
//! ## Key Types
//!
//! - [`KeyPath`] / [`KeySpec`]: The path to follow, with optional name
//!   patterns.
//! - [`FlattenOptions`]: Policies for scalar lists, collection shapes and root
//!   attributes.
//! - [`FilterRegistry`]: Table of filter names installed on a minijinja
//!   environment.
//! - [`ListifyError`]: Errors with `miette` diagnostics.
//!
//! ## Naming
//!
//! Row keys join every key name traversed to reach a record with `_` and
//! append the attribute name. Walking `tenant`, `app`, `epg` yields
//! `tenant_Name`, `tenant_app_Name`, `tenant_app_epg_Name`,
//! `tenant_app_epg_bd` and so on. Attributes of the root record keep their
//! bare name.
//!
//! ## Quick Start
//!
//! ```rust
//! use listify_core::render_template;
//! use serde_json::json;
//!
//! let tree = json!({
//!   "tenant": [{
//!     "Name": "t1",
//!     "app": [{ "Name": "a1", "epg": [{ "Name": "e1" }, { "Name": "e2" }] }]
//!   }]
//! });
//! let output = render_template(
//!   "{% for row in tree|aci_listify2('tenant', 'app', 'epg=e2') %}{{ row.tenant_app_epg_Name }}{% endfor %}",
//!   json!({ "tree": tree }),
//! )
//! .unwrap();
//!
//! assert_eq!(output, "e2");
//! ```

pub use error::*;
pub use filter::*;
pub use flatten::*;
pub use key_path::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod filter;
mod flatten;
pub mod inventory;
mod key_path;

#[cfg(test)]
mod __fixtures;
