//! Seed references as written by the user.
//!
//! A reference is either a bare project slug/id (`sodium`, `AANobbMI`) or a link to
//! the project's page on Modrinth (`https://modrinth.com/mod/sodium`). Pages are
//! reduced to the identifier they point at so both forms query the same project.

use std::sync::OnceLock;
use regex::Regex;

fn project_url_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^https?://(?:www\.)?modrinth\.com/mod/([A-Za-z0-9-]+)/?(?:[?#].*)?$")
			.expect("project url pattern should compile")
	})
}

/// Extracts the project identifier from a project page URL.
///
/// Anything that isn't a project page is returned unchanged, every string is a valid candidate.
pub fn normalize(raw: &str) -> &str {
	match project_url_regex().captures(raw).and_then(|c| c.get(1)) {
		Some(m) => m.as_str(),
		None => raw,
	}
}

/// A seed reference paired with the identifier it normalizes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectReference {
	raw: String,
	project_id: String,
}

impl ProjectReference {
	pub fn parse(raw: impl Into<String>) -> Self {
		let raw = raw.into();
		let project_id = normalize(&raw).to_string();
		Self { raw, project_id }
	}

	/// The reference exactly as the user wrote it.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// The identifier to query the registry with.
	pub fn project_id(&self) -> &str {
		&self.project_id
	}

	pub fn is_url(&self) -> bool {
		self.raw != self.project_id
	}
}

impl std::fmt::Display for ProjectReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}
