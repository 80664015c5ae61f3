//! The base definition: the YAML document describing filters, formulas,
//! properties, and views.

pub(crate) mod filter;

use indexmap::IndexMap;

use crate::err::Error;

pub use self::filter::{matches, Filter};

/// Per-property presentation settings.
#[derive(Clone, Debug, Default)]
pub struct PropertySpec {
	pub display_name: Option<String>,
}

/// One view within a base.
#[derive(Clone, Debug, Default)]
pub struct View {
	pub view_type: String,
	pub name: Option<String>,
	pub limit: Option<f64>,
	pub filters: Option<Filter>,
	pub order: Option<Vec<String>>,
}

/// A parsed base definition.
#[derive(Debug, Default)]
pub struct BaseDef {
	pub filters: Option<Filter>,
	pub formulas: IndexMap<String, String>,
	pub properties: IndexMap<String, PropertySpec>,
	pub views: Vec<View>,
}

impl BaseDef {
	/// Parse a base file. The document root must be a mapping and a
	/// `views` sequence must be present.
	pub fn parse(source: &str) -> Result<Self, Error> {
		let doc: serde_yaml::Value =
			serde_yaml::from_str(source).map_err(|e| Error::Yaml(e.to_string()))?;
		let serde_yaml::Value::Mapping(root) = doc else {
			return Err(Error::Yaml("base file root must be a mapping".to_string()));
		};

		let mut base = BaseDef::default();
		let mut views = None;
		for (key, value) in &root {
			match key.as_str() {
				Some("filters") => base.filters = Some(Filter::decode(value)?),
				Some("formulas") => base.formulas = decode_formulas(value)?,
				Some("properties") => base.properties = decode_properties(value)?,
				Some("views") => views = Some(decode_views(value)?),
				Some(other) => {
					tracing::debug!(key = other, "ignoring unrecognized base key");
				}
				None => {
					return Err(Error::Shape("base keys must be strings".to_string()));
				}
			}
		}

		base.views = views.ok_or_else(|| Error::Shape("base defines no views".to_string()))?;
		Ok(base)
	}

	/// The view a materialization should use: the named view when
	/// requested, otherwise the first.
	pub fn select_view(&self, name: Option<&str>) -> Result<Option<&View>, Error> {
		match name {
			Some(name) => match self.views.iter().find(|v| v.name.as_deref() == Some(name)) {
				Some(view) => Ok(Some(view)),
				None => Err(Error::Shape(format!("base has no view named \"{name}\""))),
			},
			None => Ok(self.views.first()),
		}
	}
}

fn decode_formulas(yaml: &serde_yaml::Value) -> Result<IndexMap<String, String>, Error> {
	let serde_yaml::Value::Mapping(map) = yaml else {
		return Err(Error::Shape("\"formulas\" must be a mapping".to_string()));
	};
	let mut out = IndexMap::new();
	for (key, value) in map {
		let (Some(key), Some(value)) = (key.as_str(), value.as_str()) else {
			return Err(Error::Shape(
				"formulas must map names to expression strings".to_string(),
			));
		};
		out.insert(key.to_string(), value.to_string());
	}
	Ok(out)
}

fn decode_properties(yaml: &serde_yaml::Value) -> Result<IndexMap<String, PropertySpec>, Error> {
	let serde_yaml::Value::Mapping(map) = yaml else {
		return Err(Error::Shape("\"properties\" must be a mapping".to_string()));
	};
	let mut out = IndexMap::new();
	for (key, value) in map {
		let Some(key) = key.as_str() else {
			return Err(Error::Shape("property keys must be strings".to_string()));
		};
		let mut spec = PropertySpec::default();
		if let serde_yaml::Value::Mapping(settings) = value {
			let key = serde_yaml::Value::String("displayName".to_string());
			if let Some(display_name) = settings.get(&key).and_then(|v| v.as_str()) {
				spec.display_name = Some(display_name.to_string());
			}
		}
		out.insert(key.to_string(), spec);
	}
	Ok(out)
}

fn decode_views(yaml: &serde_yaml::Value) -> Result<Vec<View>, Error> {
	let serde_yaml::Value::Sequence(items) = yaml else {
		return Err(Error::Shape("\"views\" must be a sequence".to_string()));
	};
	let mut out = Vec::with_capacity(items.len());
	for item in items {
		let serde_yaml::Value::Mapping(map) = item else {
			return Err(Error::Shape("each view must be a mapping".to_string()));
		};
		let mut view = View {
			view_type: "table".to_string(),
			..Default::default()
		};
		for (key, value) in map {
			match key.as_str() {
				Some("type") => {
					if let Some(v) = value.as_str() {
						view.view_type = v.to_string();
					}
				}
				Some("name") => view.name = value.as_str().map(String::from),
				// Non-numeric limits are ignored rather than rejected
				Some("limit") => view.limit = value.as_f64(),
				Some("filters") => view.filters = Some(Filter::decode(value)?),
				Some("order") => view.order = Some(decode_order(value)?),
				_ => {}
			}
		}
		out.push(view);
	}
	Ok(out)
}

fn decode_order(yaml: &serde_yaml::Value) -> Result<Vec<String>, Error> {
	let serde_yaml::Value::Sequence(items) = yaml else {
		return Err(Error::Shape("a view \"order\" must be a sequence".to_string()));
	};
	let mut out = Vec::with_capacity(items.len());
	for item in items {
		match item.as_str() {
			Some(v) => out.push(v.to_string()),
			None => {
				return Err(Error::Shape(
					"a view \"order\" must contain only strings".to_string(),
				))
			}
		}
	}
	Ok(out)
}
