//! The per-file object: field access and methods. These all go through
//! the note arena held by the scope, which is what makes the `file.file`
//! self-reference cycle-safe.

use crate::err::Error;
use crate::scope::Scope;
use crate::val::{Array, FileId, Function, Link, Object, Value};
use crate::vault::LinkRef;

fn receiver(name: &str, value: &Value) -> Result<FileId, Error> {
	match value {
		Value::File(id) => Ok(*id),
		v => Err(Error::Type(format!("{name}() called on a {}", v.kind()))),
	}
}

fn link_ref_value(link: &LinkRef) -> Value {
	let mut map = Object::default();
	map.insert("raw".to_string(), Value::from(link.raw.clone()));
	map.insert("target".to_string(), Value::from(link.target.clone()));
	if let Some(display) = &link.display {
		map.insert("display".to_string(), Value::from(display.clone()));
	}
	map.insert("isEmbed".to_string(), Value::Bool(link.embed));
	if let Some(resolved) = &link.resolved_path {
		map.insert("resolvedPath".to_string(), Value::from(resolved.clone()));
	}
	Value::Object(map)
}

/// Look up a field of the file object. Returns `None` for unknown names
/// so the caller can fall through to undefined.
pub fn member(scope: &Scope, id: FileId, name: &str) -> Option<Value> {
	let note = scope.vault().get(id);
	let out = match name {
		"backlinks" => Value::Array(Array::from(note.backlinks.clone())),
		"ctime" => Value::from(note.stat.birthtime.or(note.stat.ctime)),
		"embeds" => Value::Array(note.embeds.iter().map(link_ref_value).collect()),
		"ext" => Value::from(note.ext.clone()),
		"folder" => Value::from(note.folder.clone()),
		"links" => Value::Array(note.links.iter().map(link_ref_value).collect()),
		"mtime" => Value::from(note.stat.mtime),
		"name" => Value::from(note.name.clone()),
		"path" => Value::from(note.relative_path.clone()),
		"properties" => Value::Object(note.properties.clone()),
		"size" => Value::from(note.stat.size),
		"tags" => Value::Array(Array::from(note.tags.clone())),
		// The file object is reachable from itself
		"file" => Value::File(id),
		"asLink" => Value::Function(Function("file::as_link")),
		"hasLink" => Value::Function(Function("file::has_link")),
		"hasProperty" => Value::Function(Function("file::has_property")),
		"hasTag" => Value::Function(Function("file::has_tag")),
		"inFolder" => Value::Function(Function("file::in_folder")),
		_ => return None,
	};
	Some(out)
}

pub fn as_link(scope: &Scope, (file, display): (Value, Option<Value>)) -> Result<Value, Error> {
	let id = receiver("asLink", &file)?;
	let note = scope.vault().get(id);
	let display = display.filter(|v| !v.is_nullish()).map(|v| v.to_text());
	Ok(Value::Link(Link::new(note.relative_path.clone()).with_display(display)))
}

/// Normalize a value into a comparable path, via
/// `x.path ?? x.target ?? x.relativePath ?? x.name ?? x`.
fn comparable(scope: &Scope, value: &Value) -> Option<String> {
	let out = match value {
		Value::String(v) => v.clone(),
		Value::Link(v) => v.path.clone(),
		Value::File(id) => scope.vault().get(*id).relative_path.clone(),
		Value::Object(map) => ["path", "target", "relativePath", "name"]
			.iter()
			.find_map(|k| match map.get(*k) {
				Some(Value::String(v)) => Some(v.clone()),
				_ => None,
			})?,
		_ => return None,
	};
	Some(out.trim().to_lowercase())
}

pub fn has_link(scope: &Scope, (file, target): (Value, Value)) -> Result<Value, Error> {
	let id = receiver("hasLink", &file)?;
	let Some(wanted) = comparable(scope, &target) else {
		return Ok(Value::Bool(false));
	};
	let note = scope.vault().get(id);
	let matched = note.links.iter().any(|link| {
		link.target.trim().to_lowercase() == wanted
			|| link
				.resolved_path
				.as_ref()
				.map(|p| p.trim().to_lowercase() == wanted)
				.unwrap_or(false)
	});
	Ok(Value::Bool(matched))
}

pub fn has_property(scope: &Scope, (file, name): (Value, Value)) -> Result<Value, Error> {
	let id = receiver("hasProperty", &file)?;
	let note = scope.vault().get(id);
	Ok(Value::Bool(note.properties.contains_key(&name.to_text())))
}

pub fn has_tag(scope: &Scope, args: Vec<Value>) -> Result<Value, Error> {
	let mut args = args.into_iter();
	let id = receiver("hasTag", &args.next().unwrap_or(Value::Undefined))?;
	let note = scope.vault().get(id);
	// With no names to check, nothing matches
	let matched = args.any(|name| {
		let name = name.to_text();
		let name = name.strip_prefix('#').unwrap_or(&name);
		note.tags.iter().any(|tag| tag.eq_ignore_ascii_case(name))
	});
	Ok(Value::Bool(matched))
}

pub fn in_folder(scope: &Scope, (file, prefix): (Value, Value)) -> Result<Value, Error> {
	let id = receiver("inFolder", &file)?;
	let note = scope.vault().get(id);
	let prefix = prefix.to_text();
	Ok(Value::Bool(note.folder == prefix || note.folder.starts_with(&format!("{prefix}/"))))
}
