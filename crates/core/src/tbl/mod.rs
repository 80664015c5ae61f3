//! The materializer: turns a base definition and a loaded vault into a
//! matrix of cell strings.

pub(crate) mod fmt;
pub(crate) mod markdown;

use crate::base::{filter, BaseDef, View};
use crate::err::Error;
use crate::eval;
use crate::exp::ExprCache;
use crate::scope::Scope;
use crate::vault::Vault;

pub use self::fmt::format;
pub use self::markdown::render;

/// The result of materializing one view.
#[derive(Debug)]
pub struct Materialized {
	pub view_name: String,
	/// Header row first, then one row per matching file
	pub rows: Vec<Vec<String>>,
}

/// Derive the column keys for a view, per the fallback chain: explicit
/// order, then base properties, then formula names.
fn column_keys(base: &BaseDef, view: &View) -> Vec<String> {
	if let Some(order) = &view.order {
		if !order.is_empty() {
			return order.clone();
		}
	}
	if !base.properties.is_empty() {
		return base.properties.keys().cloned().collect();
	}
	base.formulas.keys().map(|name| format!("formula.{name}")).collect()
}

fn display_name(base: &BaseDef, key: &str) -> String {
	match base.properties.get(key).and_then(|spec| spec.display_name.as_deref()) {
		Some(display) if !display.is_empty() => display.to_string(),
		_ => key.to_string(),
	}
}

/// Materialize a view of a base over a vault.
pub fn materialize(
	base: &BaseDef,
	view_name: Option<&str>,
	vault: &Vault,
) -> Result<Materialized, Error> {
	let cache = ExprCache::new();
	let Some(view) = base.select_view(view_name)? else {
		return Ok(Materialized {
			view_name: String::new(),
			rows: Vec::new(),
		});
	};
	let title = view.name.clone().unwrap_or_else(|| view.view_type.clone());

	let columns = column_keys(base, view);
	if columns.is_empty() {
		return Ok(Materialized {
			view_name: title,
			rows: Vec::new(),
		});
	}

	let limit = view.limit.filter(|v| v.is_finite() && *v > 0.0).map(|v| v.floor() as usize);

	let mut rows = Vec::new();
	rows.push(columns.iter().map(|key| display_name(base, key)).collect::<Vec<String>>());

	let view_context = format!("view \"{title}\" filters");
	let mut matched = 0usize;
	for (id, note) in vault.files() {
		if let Some(limit) = limit {
			if matched >= limit {
				break;
			}
		}
		// One scope per file, shared between filtering and column
		// evaluation so each formula runs at most once
		let scope = Scope::new(vault, id, &base.formulas, &cache);
		if !filter::matches(base.filters.as_ref(), &scope, &cache, "base filters")? {
			continue;
		}
		if !filter::matches(view.filters.as_ref(), &scope, &cache, &view_context)? {
			continue;
		}
		matched += 1;

		let mut row = Vec::with_capacity(columns.len());
		for key in &columns {
			let value = cache
				.parse(key)
				.and_then(|expr| eval::evaluate(&expr, &scope))
				.map_err(|e| {
					e.context(format!(
						"property \"{key}\" for file \"{}\"",
						note.relative_path
					))
				})?;
			row.push(fmt::format(&value, vault));
		}
		rows.push(row);
	}

	tracing::debug!(view = %title, rows = rows.len() - 1, "materialized view");
	Ok(Materialized {
		view_name: title,
		rows,
	})
}
