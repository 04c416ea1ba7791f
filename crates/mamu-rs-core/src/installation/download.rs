//! Downloads version files and direct urls into the mods directory.

use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::registry::*;

/// Errors that can occur during the download process.
#[derive(Debug, Error)]
pub enum DownloadError {
	#[error("registry error: {0}")]
	Registry(#[from] RegistryError),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	/// The downloaded content hash does not match the hash the registry lists for the file.
	#[error("downloaded content hash of {filename} does not match hash in version. expected {expected}, got {actual}")]
	DifferentHashes { filename: String, expected: String, actual: String },
	/// No usable file name in the file entry or url.
	#[error("no file name could be derived from `{0}`")]
	MissingFileName(String),
	/// The registry lists no files for the version.
	#[error("version {0} has no files")]
	NoFiles(String),
}

/// Strips any directories from a file name given by the registry.
fn sanitize_file_name(name: &str) -> Option<&str> {
	Path::new(name)
		.file_name()
		.and_then(|n| n.to_str())
		.filter(|n| !n.is_empty())
}

/// The file name a direct url is saved under, its last path segment.
pub fn direct_file_name(url: &str) -> Result<String, DownloadError> {
	let parsed = reqwest::Url::parse(url).map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", url, e)))?;
	parsed.path_segments()
		.and_then(|mut s| s.next_back())
		.and_then(sanitize_file_name)
		.map(str::to_string)
		.ok_or_else(|| DownloadError::MissingFileName(url.to_string()))
}

fn verify_sha1(file: &VersionFile, content: &[u8]) -> Result<(), DownloadError> {
	if let Some(expected) = &file.hashes.sha1 {
		let actual = hex::encode(Sha1::digest(content));
		if !actual.eq_ignore_ascii_case(expected) {
			return Err(DownloadError::DifferentHashes {
				filename: file.filename.clone(),
				expected: expected.clone(),
				actual,
			});
		}
	}
	Ok(())
}

/// Downloads every file of a version.
///
/// # Errors
/// Fails on the first file that can't be downloaded, verified or written. A failed version lookup
/// or a version without files is an error rather than zero files.
pub async fn download_version<R>(registry: &R, version_id: &str, mods_dir: &Path, verify_checksums: bool) -> Result<Vec<PathBuf>, DownloadError>
where R: Registry + ?Sized,
{
	log::debug!("Downloading id {}", version_id);
	let version = registry.version(version_id).await?;
	if version.files.is_empty() {
		return Err(DownloadError::NoFiles(version_id.to_string()));
	}

	let mut written = Vec::with_capacity(version.files.len());
	for file in &version.files {
		let name = sanitize_file_name(&file.filename).ok_or_else(|| DownloadError::MissingFileName(file.filename.clone()))?;

		log::info!("Downloading file {}", name);
		let content = registry.download(&file.url).await?;
		if verify_checksums {
			verify_sha1(file, &content)?;
		}

		let path = mods_dir.join(name);
		tokio::fs::write(&path, &content).await?;
		written.push(path);
	}

	Ok(written)
}

/// Downloads multiple versions.
///
/// # Returns
/// A vector of tuples containing the version id and the files written for it.
pub async fn download_versions<'a, R>(registry: &R, version_ids: impl IntoIterator<Item = &'a str>, mods_dir: &Path, verify_checksums: bool)
-> Vec<(String, Result<Vec<PathBuf>, DownloadError>)>
where R: Registry + ?Sized,
{
	let mut results = Vec::new();
	for id in version_ids {
		let result = download_version(registry, id, mods_dir, verify_checksums).await;
		if let Err(e) = &result {
			log::error!("Failed to download version {}: {}", id, e);
		}
		results.push((id.to_string(), result));
	}
	results
}

/// Fetches a url verbatim and saves it under its last path segment.
pub async fn download_direct<R>(registry: &R, url: &str, mods_dir: &Path) -> Result<PathBuf, DownloadError>
where R: Registry + ?Sized,
{
	let name = direct_file_name(url)?;
	log::info!("Downloading {} from {}", name, url);
	let content = registry.download(url).await?;
	let path = mods_dir.join(name);
	tokio::fs::write(&path, &content).await?;
	Ok(path)
}

pub async fn download_direct_urls<'a, R>(registry: &R, urls: impl IntoIterator<Item = &'a str>, mods_dir: &Path)
-> Vec<(String, Result<PathBuf, DownloadError>)>
where R: Registry + ?Sized,
{
	let mut results = Vec::new();
	for url in urls {
		let result = download_direct(registry, url, mods_dir).await;
		if let Err(e) = &result {
			log::error!("Failed to download {}: {}", url, e);
		}
		results.push((url.to_string(), result));
	}
	results
}
