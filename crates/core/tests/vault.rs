//! Loader behavior against a real directory tree.

use std::fs;

use materialize_base_core::val::Value;
use materialize_base_core::vault;

#[test]
fn loads_notes_with_frontmatter_links_and_backlinks() {
	let tmp = tempfile::tempdir().unwrap();
	fs::create_dir_all(tmp.path().join(".obsidian")).unwrap();
	fs::create_dir_all(tmp.path().join("sub")).unwrap();
	fs::write(
		tmp.path().join("alpha.md"),
		"---\ntitle: Alpha\ncount: 2\n---\nSee [[beta]] and #inline-tag\n",
	)
	.unwrap();
	fs::write(tmp.path().join("sub/beta.md"), "No frontmatter, links to [[alpha]]\n").unwrap();
	fs::write(tmp.path().join("attachment.png"), [0u8, 1, 2]).unwrap();
	fs::write(tmp.path().join(".obsidian/app.json"), "{}").unwrap();

	let vault = vault::load(tmp.path()).unwrap();
	// The dot-directory is skipped, the attachment is kept
	assert_eq!(vault.len(), 3);

	let (_, alpha) = vault.files().find(|(_, n)| n.relative_path == "alpha.md").unwrap();
	assert_eq!(alpha.folder, ".");
	assert_eq!(alpha.name, "alpha");
	assert!(alpha
		.frontmatter
		.get("title")
		.unwrap()
		.strict_equal(&Value::from("Alpha")));
	assert!(alpha.frontmatter.get("count").unwrap().strict_equal(&Value::from(2i64)));
	assert_eq!(alpha.tags, vec!["inline-tag"]);
	assert_eq!(alpha.links.len(), 1);
	assert_eq!(alpha.links[0].resolved_path.as_deref(), Some("sub/beta.md"));
	assert!(alpha.stat.size > 0);
	assert!(alpha.stat.mtime.is_some());
	// beta links back to alpha, so alpha has a backlink
	assert_eq!(alpha.backlinks, vec!["sub/beta.md".to_string()]);

	let (_, beta) = vault.files().find(|(_, n)| n.relative_path == "sub/beta.md").unwrap();
	assert_eq!(beta.folder, "sub");
	assert!(beta.frontmatter.is_empty());
	assert_eq!(beta.backlinks, vec!["alpha.md".to_string()]);

	let (_, png) = vault.files().find(|(_, n)| n.relative_path == "attachment.png").unwrap();
	assert_eq!(png.ext, "png");
	assert!(png.frontmatter.is_empty());
}
