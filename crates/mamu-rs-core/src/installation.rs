//! Turns a [`ResolutionSet`] into files in the mods directory.

use std::path::{Path, PathBuf};

use crate::registry::Registry;
use crate::relationship_resolver::ResolutionSet;

pub mod download;
pub mod mods_dir;

/// Downloads every version and direct url in `resolved` into `mods_dir`.
///
/// # Returns
/// One entry per version id or url, in a stable order, with the files written for it.
pub async fn materialize<R>(registry: &R, resolved: &ResolutionSet, mods_dir: impl AsRef<Path>, verify_checksums: bool)
-> Vec<(String, Result<Vec<PathBuf>, download::DownloadError>)>
where R: Registry + ?Sized,
{
	let mods_dir = mods_dir.as_ref();
	let mut results = download::download_versions(registry, resolved.sorted_version_ids(), mods_dir, verify_checksums).await;

	for (url, result) in download::download_direct_urls(registry, resolved.sorted_direct_urls(), mods_dir).await {
		results.push((url, result.map(|p| vec![p])));
	}

	results
}
