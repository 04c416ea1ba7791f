//! Various helpers for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use std::collections::HashMap;
use std::sync::Mutex;

use mamu_rs_core::registry::*;

/// What the mock answers for a project.
#[derive(Debug, Clone)]
enum ProjectEntry {
	Versions(Vec<VersionInfo>),
	Rejected(String),
}

/// An in-memory [`Registry`].
///
/// Projects that were never added are answered with [`RegistryError::UnknownIdentifier`],
/// like the real registry does. Every query is counted so tests can check what was asked.
#[derive(Debug, Default)]
pub struct MockRegistry {
	projects: HashMap<String, ProjectEntry>,
	versions: HashMap<String, VersionInfo>,
	downloads: HashMap<String, Vec<u8>>,
	project_queries: Mutex<HashMap<String, usize>>,
	version_queries: Mutex<HashMap<String, usize>>,
	download_queries: Mutex<HashMap<String, usize>>,
}

impl MockRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the candidate versions of a project, most preferred first.
	///
	/// The versions are also made available through [`Registry::version()`].
	/// `aliases` are extra identifiers (slugs) answering with the same list.
	pub fn with_project(mut self, project_id: &str, aliases: &[&str], versions: Vec<VersionInfo>) -> Self {
		for v in &versions {
			self.versions.insert(v.id.clone(), v.clone());
		}
		for alias in aliases {
			self.projects.insert(alias.to_string(), ProjectEntry::Versions(versions.clone()));
		}
		self.projects.insert(project_id.to_string(), ProjectEntry::Versions(versions));
		self
	}

	/// A project with no version for any game version or loader.
	pub fn with_empty_project(self, project_id: &str) -> Self {
		self.with_project(project_id, &[], vec![])
	}

	/// A project the registry answers with an error body.
	pub fn with_rejected_project(mut self, project_id: &str, reason: &str) -> Self {
		self.projects.insert(project_id.to_string(), ProjectEntry::Rejected(reason.to_string()));
		self
	}

	/// A version only reachable by id, for dependencies pinned to a version.
	pub fn with_version(mut self, version: VersionInfo) -> Self {
		self.versions.insert(version.id.clone(), version);
		self
	}

	pub fn with_download(mut self, url: &str, content: &[u8]) -> Self {
		self.downloads.insert(url.to_string(), content.to_vec());
		self
	}

	fn count(queries: &Mutex<HashMap<String, usize>>, key: &str) {
		if let Ok(mut q) = queries.lock() {
			*q.entry(key.to_string()).or_default() += 1;
		}
	}

	fn get_count(queries: &Mutex<HashMap<String, usize>>, key: &str) -> usize {
		queries.lock().map(|q| q.get(key).copied().unwrap_or(0)).unwrap_or(0)
	}

	fn get_total(queries: &Mutex<HashMap<String, usize>>) -> usize {
		queries.lock().map(|q| q.values().sum()).unwrap_or(0)
	}

	/// How often the versions of `project_id` were requested.
	pub fn project_queries(&self, project_id: &str) -> usize {
		Self::get_count(&self.project_queries, project_id)
	}

	pub fn total_project_queries(&self) -> usize {
		Self::get_total(&self.project_queries)
	}

	pub fn version_queries(&self, version_id: &str) -> usize {
		Self::get_count(&self.version_queries, version_id)
	}

	pub fn total_version_queries(&self) -> usize {
		Self::get_total(&self.version_queries)
	}

	pub fn download_queries(&self, url: &str) -> usize {
		Self::get_count(&self.download_queries, url)
	}
}

fn unknown(identifier: &str) -> RegistryError {
	RegistryError::UnknownIdentifier { identifier: identifier.to_string(), reason: "404 Not Found".to_string() }
}

#[async_trait::async_trait]
impl Registry for MockRegistry {
	async fn project_versions(&self, project_id: &str, _game_version: &str, _loader: &str) -> Result<Vec<VersionInfo>, RegistryError> {
		Self::count(&self.project_queries, project_id);
		match self.projects.get(project_id) {
			Some(ProjectEntry::Versions(v)) => Ok(v.clone()),
			Some(ProjectEntry::Rejected(reason)) => Err(RegistryError::UnknownIdentifier { identifier: project_id.to_string(), reason: reason.clone() }),
			None => Err(unknown(project_id)),
		}
	}

	async fn version(&self, version_id: &str) -> Result<VersionInfo, RegistryError> {
		Self::count(&self.version_queries, version_id);
		self.versions.get(version_id).cloned().ok_or_else(|| unknown(version_id))
	}

	async fn download(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
		Self::count(&self.download_queries, url);
		self.downloads.get(url).cloned().ok_or_else(|| unknown(url))
	}
}

/* Builders */

/// A version with one file named after the version id, downloadable from [`file_url()`].
pub fn version(id: &str, project_id: &str, dependencies: Vec<DependencyDecl>) -> VersionInfo {
	VersionInfo {
		id: id.to_string(),
		project_id: project_id.to_string(),
		version_number: format!("{}-1.0.0", project_id),
		files: vec![VersionFile {
			url: file_url(id),
			filename: format!("{}.jar", id),
			hashes: FileHashes::default(),
			primary: true,
		}],
		dependencies,
	}
}

pub fn file_url(version_id: &str) -> String {
	format!("https://cdn.example.com/data/{}/{}.jar", version_id, version_id)
}

pub fn required_project(project_id: &str) -> DependencyDecl {
	DependencyDecl::on_project(DependencyType::Required, project_id)
}

pub fn required_version(version_id: &str) -> DependencyDecl {
	DependencyDecl::on_version(DependencyType::Required, version_id, None)
}

pub fn optional_project(project_id: &str) -> DependencyDecl {
	DependencyDecl::on_project(DependencyType::Optional, project_id)
}

pub fn incompatible_project(project_id: &str) -> DependencyDecl {
	DependencyDecl::on_project(DependencyType::Incompatible, project_id)
}

/// A temporary directory standing in for the mods directory, removed when dropped.
pub fn temp_mods_dir() -> std::io::Result<tempfile::TempDir> {
	tempfile::Builder::new().prefix("mamu-rs-mods").tempdir()
}
