//! Loads note records from a vault directory on disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::err::Error;
use crate::val::{Datetime, Number, Object, Value};
use crate::vault::{LinkRef, Note, Stat, Vault};

/// Walk a vault root and load every file into the arena. Dot-directories
/// such as `.obsidian` and `.git` are skipped.
pub fn load(root: &Path) -> Result<Vault, Error> {
	let mut notes = Vec::new();
	let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|entry| {
		entry.depth() == 0
			|| !entry.file_name().to_str().map(|n| n.starts_with('.')).unwrap_or(false)
	});
	for entry in walker {
		let entry = entry.map_err(|e| Error::Read {
			path: root.display().to_string(),
			message: e.to_string(),
		})?;
		if !entry.file_type().is_file() {
			continue;
		}
		notes.push(load_note(root, entry.path())?);
	}
	tracing::debug!(count = notes.len(), "loaded vault files");
	Ok(Vault::new(notes))
}

fn load_note(root: &Path, path: &Path) -> Result<Note, Error> {
	let relative_path = path
		.strip_prefix(root)
		.unwrap_or(path)
		.components()
		.map(|c| c.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/");
	let (folder, file_name) = match relative_path.rsplit_once('/') {
		Some((folder, name)) => (folder.to_string(), name.to_string()),
		None => (".".to_string(), relative_path.clone()),
	};
	let (name, ext) = match file_name.rsplit_once('.') {
		Some((name, ext)) => (name.to_string(), ext.to_string()),
		None => (file_name.clone(), String::new()),
	};

	let mut note = Note {
		path: path.display().to_string(),
		relative_path,
		name,
		ext,
		folder,
		stat: read_stat(path),
		..Default::default()
	};

	if note.ext.eq_ignore_ascii_case("md") {
		let text = std::fs::read_to_string(path).map_err(|e| Error::Read {
			path: path.display().to_string(),
			message: e.to_string(),
		})?;
		let (frontmatter, body) = split_frontmatter(&text);
		note.frontmatter = parse_frontmatter(frontmatter);
		note.properties = note.frontmatter.clone();
		let body = strip_code(body);
		note.tags = collect_tags(&note.frontmatter, &body);
		(note.links, note.embeds) = collect_links(&body);
	}

	Ok(note)
}

fn read_stat(path: &Path) -> Stat {
	let Ok(metadata) = std::fs::metadata(path) else {
		return Stat::default();
	};
	let system_time = |t: std::io::Result<std::time::SystemTime>| -> Option<Datetime> {
		let t = t.ok()?;
		Some(Datetime(DateTime::<Utc>::from(t)))
	};
	#[cfg(unix)]
	let ctime = {
		use std::os::unix::fs::MetadataExt;
		DateTime::<Utc>::from_timestamp(metadata.ctime(), metadata.ctime_nsec() as u32)
			.map(Datetime)
	};
	#[cfg(not(unix))]
	let ctime = None;
	Stat {
		size: metadata.len() as i64,
		birthtime: system_time(metadata.created()),
		mtime: system_time(metadata.modified()),
		ctime,
	}
}

/// Split a note into its frontmatter block and body. The frontmatter is
/// the YAML between `---` lines at the very start of the file.
fn split_frontmatter(text: &str) -> (&str, &str) {
	let Some(rest) = text.strip_prefix("---").and_then(|t| t.strip_prefix('\n').or_else(|| t.strip_prefix("\r\n"))) else {
		return ("", text);
	};
	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if matches!(line.trim_end(), "---" | "...") {
			return (&rest[..offset], &rest[offset + line.len()..]);
		}
		offset += line.len();
	}
	("", text)
}

fn parse_frontmatter(source: &str) -> Object {
	if source.trim().is_empty() {
		return Object::default();
	}
	match serde_yaml::from_str::<serde_yaml::Value>(source) {
		Ok(serde_yaml::Value::Mapping(map)) => {
			map.into_iter()
				.map(|(k, v)| {
					let key = match k.as_str() {
						Some(k) => k.to_string(),
						None => yaml_scalar_text(&k),
					};
					(key, yaml_to_value(v))
				})
				.collect()
		}
		Ok(_) => Object::default(),
		Err(e) => {
			tracing::debug!(error = %e, "skipping unparseable frontmatter");
			Object::default()
		}
	}
}

fn yaml_scalar_text(yaml: &serde_yaml::Value) -> String {
	match yaml {
		serde_yaml::Value::String(v) => v.clone(),
		serde_yaml::Value::Bool(v) => v.to_string(),
		serde_yaml::Value::Number(v) => v.to_string(),
		_ => String::new(),
	}
}

/// Convert parsed YAML into the evaluator's value domain.
pub(crate) fn yaml_to_value(yaml: serde_yaml::Value) -> Value {
	match yaml {
		serde_yaml::Value::Null => Value::Null,
		serde_yaml::Value::Bool(v) => Value::Bool(v),
		serde_yaml::Value::Number(v) => {
			if let Some(v) = v.as_i64() {
				Value::Number(Number::Int(v))
			} else {
				Value::Number(Number::Float(v.as_f64().unwrap_or(f64::NAN)))
			}
		}
		serde_yaml::Value::String(v) => Value::String(v),
		serde_yaml::Value::Sequence(items) => {
			Value::Array(items.into_iter().map(yaml_to_value).collect())
		}
		serde_yaml::Value::Mapping(map) => Value::Object(
			map.into_iter()
				.map(|(k, v)| {
					let key = match k.as_str() {
						Some(k) => k.to_string(),
						None => yaml_scalar_text(&k),
					};
					(key, yaml_to_value(v))
				})
				.collect::<Object>(),
		),
		serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
	}
}

/// Blank out fenced code blocks and inline code spans so their contents
/// are not scanned for tags or links.
fn strip_code(body: &str) -> String {
	let mut out = String::with_capacity(body.len());
	let mut in_fence = false;
	for line in body.split_inclusive('\n') {
		let trimmed = line.trim_start();
		if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
			in_fence = !in_fence;
			out.push('\n');
			continue;
		}
		if in_fence {
			out.push('\n');
			continue;
		}
		// Inline code spans
		let mut in_span = false;
		for c in line.chars() {
			match c {
				'`' => {
					in_span = !in_span;
					out.push(' ');
				}
				c if in_span => out.push(if c == '\n' {
					'\n'
				} else {
					' '
				}),
				c => out.push(c),
			}
		}
	}
	out
}

fn collect_tags(frontmatter: &Object, body: &str) -> Vec<String> {
	let mut tags: Vec<String> = Vec::new();
	let mut push = |tag: &str| {
		let tag = tag.trim().trim_start_matches('#');
		if tag.is_empty() {
			return;
		}
		if !tags.iter().any(|t| t == tag) {
			tags.push(tag.to_string());
		}
	};
	match frontmatter.get("tags") {
		Some(Value::String(v)) => {
			for tag in v.split(',') {
				push(tag);
			}
		}
		Some(Value::Array(items)) => {
			for item in items.iter() {
				if let Value::String(v) = item {
					push(v);
				}
			}
		}
		_ => {}
	}
	// Inline `#tag` tokens
	let mut prev: Option<char> = None;
	let mut chars = body.char_indices().peekable();
	while let Some((_, c)) = chars.next() {
		if c == '#' && !prev.map(|p| p.is_alphanumeric() || p == '#').unwrap_or(false) {
			let mut tag = String::new();
			while let Some(&(_, n)) = chars.peek() {
				if n.is_alphanumeric() || matches!(n, '_' | '-' | '/') {
					tag.push(n);
					chars.next();
				} else {
					break;
				}
			}
			// A tag needs at least one non-numeric character
			if !tag.is_empty() && !tag.chars().all(|c| c.is_ascii_digit()) {
				push(&tag);
			}
			prev = Some(c);
			continue;
		}
		prev = Some(c);
	}
	tags
}

/// Extract `[[wikilinks]]` and `![[embeds]]` from a note body.
fn collect_links(body: &str) -> (Vec<LinkRef>, Vec<LinkRef>) {
	let mut links = Vec::new();
	let mut embeds = Vec::new();
	let bytes = body.as_bytes();
	let mut i = 0;
	while i + 1 < bytes.len() {
		if bytes[i] == b'[' && bytes[i + 1] == b'[' {
			let embed = i > 0 && bytes[i - 1] == b'!';
			if let Some(end) = body[i + 2..].find("]]") {
				let raw = &body[i + 2..i + 2 + end];
				if !raw.trim().is_empty() && !raw.contains('\n') {
					let (target, display) = match raw.split_once('|') {
						Some((target, display)) => (target, Some(display.trim().to_string())),
						None => (raw, None),
					};
					// Strip `#anchor` and `#^block` suffixes
					let target = target.split('#').next().unwrap_or(target).trim().to_string();
					let link = LinkRef {
						raw: raw.to_string(),
						target,
						display,
						embed,
						resolved_path: None,
					};
					if embed {
						embeds.push(link);
					} else {
						links.push(link);
					}
				}
				i += 2 + end + 2;
				continue;
			}
		}
		i += 1;
	}
	(links, embeds)
}
