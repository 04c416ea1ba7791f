use std::collections::HashSet;

/// Everything that has to exist in the mods directory after a run.
///
/// Versions come from the registry, direct urls are references the registry couldn't resolve
/// and are fetched verbatim. Both are sets, inserting a value twice has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSet {
	version_ids: HashSet<String>,
	direct_urls: HashSet<String>,
}

impl ResolutionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `false` if the version was already present.
	pub fn insert_version(&mut self, version_id: impl Into<String>) -> bool {
		self.version_ids.insert(version_id.into())
	}

	/// Returns `false` if the url was already present.
	pub fn insert_direct_url(&mut self, url: impl Into<String>) -> bool {
		self.direct_urls.insert(url.into())
	}

	pub fn contains_version(&self, version_id: &str) -> bool {
		self.version_ids.contains(version_id)
	}

	pub fn contains_direct_url(&self, url: &str) -> bool {
		self.direct_urls.contains(url)
	}

	pub fn version_ids(&self) -> &HashSet<String> {
		&self.version_ids
	}

	pub fn direct_urls(&self) -> &HashSet<String> {
		&self.direct_urls
	}

	/// Version ids in a stable order, for logging and downloading.
	pub fn sorted_version_ids(&self) -> Vec<&str> {
		let mut v: Vec<&str> = self.version_ids.iter().map(String::as_str).collect();
		v.sort_unstable();
		v
	}

	/// Direct urls in a stable order.
	pub fn sorted_direct_urls(&self) -> Vec<&str> {
		let mut v: Vec<&str> = self.direct_urls.iter().map(String::as_str).collect();
		v.sort_unstable();
		v
	}

	pub fn is_empty(&self) -> bool {
		self.version_ids.is_empty() && self.direct_urls.is_empty()
	}
}
