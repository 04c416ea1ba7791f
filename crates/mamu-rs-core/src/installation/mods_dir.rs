//! The mods directory itself.

use std::path::{Path, PathBuf};

/// What was found when looking for the mods directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModsDirState {
	Exists,
	/// The directory doesn't exist but can be created.
	Missing,
	/// The game directory the mods directory belongs in doesn't exist, the game likely isn't installed.
	GameDirMissing,
}

/// Checks for the mods directory and, when `require_game_dir` is set, its parent directory.
pub fn inspect(mods_dir: impl AsRef<Path>, require_game_dir: bool) -> ModsDirState {
	let mods_dir = mods_dir.as_ref();
	if mods_dir.is_dir() {
		return ModsDirState::Exists
	}
	if require_game_dir && !mods_dir.parent().map(Path::is_dir).unwrap_or(false) {
		return ModsDirState::GameDirMissing
	}
	ModsDirState::Missing
}

pub fn create(mods_dir: impl AsRef<Path>) -> std::io::Result<()> {
	let mods_dir = mods_dir.as_ref();
	log::info!("Creating mods directory at {}", mods_dir.display());
	std::fs::create_dir_all(mods_dir)
}

/// Lists the installed mods, regular files ending in `.jar` directly inside `mods_dir`.
pub fn list_existing_mods(mods_dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
	let mut mods = Vec::new();
	for entry in mods_dir.as_ref().read_dir()? {
		let path = entry?.path();
		let is_jar = path.extension().map(|e| e == "jar").unwrap_or(false);
		if is_jar && path.is_file() {
			mods.push(path);
		}
	}
	mods.sort();
	Ok(mods)
}

/// Deletes every installed mod, see [`list_existing_mods()`].
///
/// # Returns
/// The number of files deleted.
pub fn clear_existing_mods(mods_dir: impl AsRef<Path>) -> std::io::Result<usize> {
	let mut deleted = 0;
	for path in list_existing_mods(mods_dir)? {
		log::debug!("Deleting {}", path.display());
		std::fs::remove_file(&path)?;
		deleted += 1;
	}
	log::info!("Deleted {} mods", deleted);
	Ok(deleted)
}
