use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

/// Materialize an Obsidian Base into a Markdown table on stdout.
#[derive(Parser, Debug)]
#[command(name = "materialize-base", version, about)]
pub struct Cli {
	/// Path to the base file to materialize
	pub base: PathBuf,

	/// Name of the view to materialize; defaults to the first view
	#[arg(long)]
	pub view: Option<String>,

	/// Vault root; defaults to the nearest ancestor of the base file
	/// containing a `.obsidian` directory
	#[arg(long)]
	pub vault: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<String> {
	let base_path = absolute(&cli.base)?;
	let vault_root = match &cli.vault {
		Some(vault) => vault.clone(),
		None => discover_vault(&base_path)?,
	};
	tracing::debug!(base = %base_path.display(), vault = %vault_root.display(), "materializing");
	let output =
		materialize_base_core::materialize_path(&base_path, &vault_root, cli.view.as_deref())?;
	Ok(output)
}

fn absolute(path: &Path) -> Result<PathBuf> {
	if path.is_absolute() {
		return Ok(path.to_path_buf());
	}
	let cwd = std::env::current_dir().context("unable to determine the working directory")?;
	Ok(cwd.join(path))
}

/// Walk ancestor directories of the base path until one contains a
/// `.obsidian` directory.
fn discover_vault(base_path: &Path) -> Result<PathBuf> {
	let start = if base_path.is_dir() {
		base_path
	} else {
		base_path.parent().unwrap_or(base_path)
	};
	let mut dir = Some(start);
	while let Some(current) = dir {
		if current.join(".obsidian").is_dir() {
			return Ok(current.to_path_buf());
		}
		dir = current.parent();
	}
	bail!(
		"no ancestor of '{}' contains a .obsidian directory; pass --vault to name the vault root",
		base_path.display()
	)
}
