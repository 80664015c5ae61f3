//! The vault: an arena of loaded note records.

pub(crate) mod loader;

use crate::val::{Datetime, FileId, Object};

pub use self::loader::load;

/// Filesystem metadata captured for a note.
#[derive(Clone, Debug, Default)]
pub struct Stat {
	pub size: i64,
	pub birthtime: Option<Datetime>,
	pub mtime: Option<Datetime>,
	pub ctime: Option<Datetime>,
}

/// A wiki-style link or embed found in a note body.
#[derive(Clone, Debug, Default)]
pub struct LinkRef {
	/// The raw text between the brackets, e.g. `target|display`
	pub raw: String,
	/// The link target with any `#anchor` or `^block` suffix stripped
	pub target: String,
	pub display: Option<String>,
	pub embed: bool,
	/// The relative path of the note this link resolves to, if any
	pub resolved_path: Option<String>,
}

/// One file in the vault, as supplied by the loader.
#[derive(Clone, Debug, Default)]
pub struct Note {
	/// Absolute path on disk
	pub path: String,
	/// Vault-relative path with forward slashes
	pub relative_path: String,
	/// Basename without extension
	pub name: String,
	pub ext: String,
	/// Vault-relative directory; `"."` for vault-root files
	pub folder: String,
	pub stat: Stat,
	pub frontmatter: Object,
	/// Frontmatter tags plus inline `#tag` tokens from the body
	pub tags: Vec<String>,
	pub links: Vec<LinkRef>,
	pub embeds: Vec<LinkRef>,
	/// Relative paths of files whose links or embeds resolve here
	pub backlinks: Vec<String>,
	/// Effective merged property map; initially equals the frontmatter
	pub properties: Object,
}

/// The arena of loaded notes.
///
/// Notes are referenced by [`FileId`] index, which is what lets the
/// `file.file` self-reference resolve without a cyclic structure.
#[derive(Debug, Default)]
pub struct Vault {
	notes: Vec<Note>,
}

impl Vault {
	pub fn new(mut notes: Vec<Note>) -> Self {
		// Deterministic iteration order, so `limit` is stable
		notes.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
		let mut vault = Self {
			notes,
		};
		vault.resolve_backlinks();
		vault
	}

	pub fn get(&self, id: FileId) -> &Note {
		&self.notes[id.0]
	}

	pub fn len(&self) -> usize {
		self.notes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.notes.is_empty()
	}

	pub fn files(&self) -> impl Iterator<Item = (FileId, &Note)> {
		self.notes.iter().enumerate().map(|(i, n)| (FileId(i), n))
	}

	/// Resolve a link target against a source folder, returning the
	/// relative path of the matching note.
	///
	/// Targets containing `/` resolve against the vault root, otherwise
	/// against the source folder, then by bare file name; an `.md`
	/// extension is optional in all three steps and the first hit wins.
	pub fn resolve_target(&self, target: &str, source_folder: &str) -> Option<String> {
		let target = target.trim();
		if target.is_empty() {
			return None;
		}
		let with_md = |t: &str| {
			if t.to_ascii_lowercase().ends_with(".md") {
				t.to_string()
			} else {
				format!("{t}.md")
			}
		};
		let find = |candidate: &str| {
			let lowered = candidate.to_ascii_lowercase();
			self.notes
				.iter()
				.find(|n| n.relative_path.to_ascii_lowercase() == lowered)
				.map(|n| n.relative_path.clone())
		};
		if target.contains('/') {
			if let Some(hit) = find(target).or_else(|| find(&with_md(target))) {
				return Some(hit);
			}
		} else {
			let joined = if source_folder == "." {
				target.to_string()
			} else {
				format!("{source_folder}/{target}")
			};
			if let Some(hit) = find(&joined).or_else(|| find(&with_md(&joined))) {
				return Some(hit);
			}
		}
		// Fall back to a lookup by bare file name
		let base = target.rsplit('/').next().unwrap_or(target);
		let base = base.strip_suffix(".md").unwrap_or(base).to_ascii_lowercase();
		self.notes
			.iter()
			.find(|n| n.name.to_ascii_lowercase() == base)
			.map(|n| n.relative_path.clone())
	}

	fn resolve_backlinks(&mut self) {
		// Resolve every link and embed target first
		for i in 0..self.notes.len() {
			let folder = self.notes[i].folder.clone();
			let mut links = std::mem::take(&mut self.notes[i].links);
			let mut embeds = std::mem::take(&mut self.notes[i].embeds);
			for link in links.iter_mut().chain(embeds.iter_mut()) {
				link.resolved_path = self.resolve_target(&link.target, &folder);
			}
			self.notes[i].links = links;
			self.notes[i].embeds = embeds;
		}
		// Then invert the edges
		let mut backlinks: Vec<Vec<String>> = vec![Vec::new(); self.notes.len()];
		for note in &self.notes {
			for link in note.links.iter().chain(note.embeds.iter()) {
				let Some(resolved) = &link.resolved_path else {
					continue;
				};
				if let Some(target) =
					self.notes.iter().position(|n| &n.relative_path == resolved)
				{
					if !backlinks[target].contains(&note.relative_path) {
						backlinks[target].push(note.relative_path.clone());
					}
				}
			}
		}
		for (note, backlinks) in self.notes.iter_mut().zip(backlinks) {
			note.backlinks = backlinks;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn note(relative_path: &str) -> Note {
		let name = relative_path
			.rsplit('/')
			.next()
			.unwrap()
			.strip_suffix(".md")
			.unwrap_or(relative_path)
			.to_string();
		let folder = match relative_path.rsplit_once('/') {
			Some((folder, _)) => folder.to_string(),
			None => ".".to_string(),
		};
		Note {
			relative_path: relative_path.to_string(),
			name,
			folder,
			ext: "md".to_string(),
			..Default::default()
		}
	}

	#[test]
	fn notes_are_sorted_by_relative_path() {
		let vault = Vault::new(vec![note("b.md"), note("a.md")]);
		let order: Vec<&str> =
			vault.files().map(|(_, n)| n.relative_path.as_str()).collect();
		assert_eq!(order, vec!["a.md", "b.md"]);
	}

	#[test]
	fn resolves_by_folder_then_name() {
		let vault = Vault::new(vec![note("a.md"), note("sub/b.md")]);
		assert_eq!(vault.resolve_target("b", "sub").unwrap(), "sub/b.md");
		assert_eq!(vault.resolve_target("b", ".").unwrap(), "sub/b.md");
		assert_eq!(vault.resolve_target("sub/b", ".").unwrap(), "sub/b.md");
		assert_eq!(vault.resolve_target("a.md", "sub").unwrap(), "a.md");
		assert!(vault.resolve_target("missing", ".").is_none());
	}

	#[test]
	fn backlinks_are_inverted_edges() {
		let mut a = note("a.md");
		a.links.push(LinkRef {
			raw: "b".to_string(),
			target: "b".to_string(),
			..Default::default()
		});
		let vault = Vault::new(vec![a, note("b.md")]);
		let (_, b) = vault.files().find(|(_, n)| n.relative_path == "b.md").unwrap();
		assert_eq!(b.backlinks, vec!["a.md".to_string()]);
	}
}
