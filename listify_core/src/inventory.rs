//! Parse inventory text into the tree value walked by the filters.
//!
//! Optional helper for hosts that keep inventories as text. The library never
//! reads files itself; hosts read the inventory and hand the content over
//! together with its format name. Key order is kept for every format.

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

use crate::ListifyError;
use crate::ListifyResult;

/// Parse `content` according to `format` (`json`, `yaml`, `yml` or `toml`,
/// case-insensitive).
pub fn parse_inventory(content: &str, format: &str) -> ListifyResult<Value> {
	let format = format.trim().to_ascii_lowercase();
	let value: Value = match format.as_str() {
		"json" => serde_json::from_str(content).map_err(|e| inventory_error(&format, &e))?,
		"yaml" | "yml" => {
			serde_yaml_ng::from_str(content).map_err(|e| inventory_error(&format, &e))?
		}
		"toml" => {
			let table: toml::Value =
				toml::from_str(content).map_err(|e| inventory_error(&format, &e))?;
			toml_to_json(table, &format)?
		}
		_ => return Err(ListifyError::UnsupportedFormat(format)),
	};

	tracing::debug!(format = %format, "parsed inventory");
	Ok(value)
}

fn inventory_error(format: &str, error: &impl std::fmt::Display) -> ListifyError {
	ListifyError::Inventory {
		format: format.to_string(),
		reason: error.to_string(),
	}
}

/// Rebuild a TOML document as a tree. Integers stay integers so that names
/// such as `101` keep their string form, datetimes become strings and tables
/// keep their document order.
fn toml_to_json(value: toml::Value, format: &str) -> ListifyResult<Value> {
	let tree = match value {
		toml::Value::Table(table) => {
			let record = table
				.into_iter()
				.map(|(key, item)| toml_to_json(item, format).map(|value| (key, value)))
				.collect::<ListifyResult<Map<String, Value>>>()?;
			Value::Object(record)
		}
		toml::Value::Array(items) => {
			let members = items
				.into_iter()
				.map(|item| toml_to_json(item, format))
				.collect::<ListifyResult<Vec<Value>>>()?;
			Value::Array(members)
		}
		toml::Value::Float(f) => {
			let number =
				Number::from_f64(f).ok_or_else(|| ListifyError::UnconvertibleFloat {
					format: format.to_string(),
					value: f.to_string(),
				})?;
			Value::Number(number)
		}
		toml::Value::Integer(i) => i.into(),
		toml::Value::Boolean(b) => b.into(),
		toml::Value::String(s) => s.into(),
		toml::Value::Datetime(dt) => dt.to_string().into(),
	};

	Ok(tree)
}
