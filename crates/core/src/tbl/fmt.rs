//! Converts evaluated values into output cell strings.

use crate::fnc::json;
use crate::val::Value;
use crate::vault::Vault;

/// Format a value for a table cell.
pub fn format(value: &Value, vault: &Vault) -> String {
	match value {
		Value::Undefined | Value::Null => String::new(),
		Value::String(v) => v.clone(),
		Value::Number(v) => v.to_string(),
		Value::Bool(v) => v.to_string(),
		Value::Datetime(v) => v.to_iso_string(),
		Value::Duration(v) => v.to_string(),
		Value::Array(items) => {
			let parts: Vec<String> = items.iter().map(|v| format(v, vault)).collect();
			parts.join(", ")
		}
		// Anything carrying a path renders as its display text or path
		Value::Link(v) => match &v.display {
			Some(display) if !display.is_empty() => display.clone(),
			_ => v.path.clone(),
		},
		Value::File(id) => vault.get(*id).relative_path.clone(),
		Value::Object(map) => {
			if let Some(Value::String(path)) = map.get("path") {
				return match map.get("display") {
					Some(Value::String(display)) if !display.is_empty() => display.clone(),
					_ => path.clone(),
				};
			}
			match json::to_json(value) {
				Ok(Some(json)) => json.to_string(),
				// Fall back to generic string coercion
				_ => value.to_text(),
			}
		}
		v => match json::to_json(v) {
			Ok(Some(json)) => json.to_string(),
			_ => v.to_text(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::val::{Datetime, Link, Object};

	fn empty_vault() -> Vault {
		Vault::new(Vec::new())
	}

	#[test]
	fn nullish_is_empty() {
		assert_eq!(format(&Value::Undefined, &empty_vault()), "");
		assert_eq!(format(&Value::Null, &empty_vault()), "");
	}

	#[test]
	fn strings_pass_through() {
		assert_eq!(format(&Value::from("a|b"), &empty_vault()), "a|b");
	}

	#[test]
	fn arrays_join_recursively() {
		let arr = Value::Array(
			vec![Value::from(1i64), Value::from("b"), Value::Bool(true)].into(),
		);
		assert_eq!(format(&arr, &empty_vault()), "1, b, true");
	}

	#[test]
	fn dates_are_iso() {
		let v = Value::Datetime(Datetime::parse("2024-01-01").unwrap());
		assert_eq!(format(&v, &empty_vault()), "2024-01-01T00:00:00.000Z");
	}

	#[test]
	fn links_prefer_display() {
		let with = Value::Link(Link::new("a.md").with_display(Some("Alpha".to_string())));
		assert_eq!(format(&with, &empty_vault()), "Alpha");
		let without = Value::Link(Link::new("a.md"));
		assert_eq!(format(&without, &empty_vault()), "a.md");
	}

	#[test]
	fn plain_objects_stringify() {
		let object: Object =
			vec![("a".to_string(), Value::from(1i64))].into_iter().collect();
		assert_eq!(format(&Value::Object(object), &empty_vault()), "{\"a\":1}");
	}

	#[test]
	fn objects_with_path_render_as_links() {
		let object: Object = vec![
			("path".to_string(), Value::from("x.md")),
			("display".to_string(), Value::from("X")),
		]
		.into_iter()
		.collect();
		assert_eq!(format(&Value::Object(object), &empty_vault()), "X");
	}
}
