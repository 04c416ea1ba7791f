//! Access to the mod registry.
//!
//! The resolver only ever talks to a [`Registry`], [`ModrinthClient`] is the implementation
//! used outside of tests.

use thiserror::Error;

pub mod version;
pub use version::VersionInfo;
pub use version::VersionFile;
pub use version::FileHashes;
pub use version::DependencyDecl;
pub use version::DependencyTarget;
pub use version::DependencyType;

mod modrinth;
pub use modrinth::ModrinthClient;

/// Errors returned by registry queries.
///
/// The resolver treats every one of these as [`Unresolvable`](crate::relationship_resolver::ResolutionOutcome::Unresolvable),
/// they are kept apart so they can be reported accurately.
#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	/// The registry doesn't know the identifier or refused it.
	#[error("registry rejected `{identifier}`: {reason}")]
	UnknownIdentifier { identifier: String, reason: String },
	#[error("unexpected HTTP status {status} from {url}")]
	Status { status: u16, url: String },
	#[error("malformed response: {0}")]
	Malformed(#[from] serde_json::Error),
	#[error("invalid URL: {0}")]
	InvalidUrl(String),
}

/// The queries the resolver and materializer need from a registry.
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
	/// Versions of `project_id` compatible with `game_version` and `loader`.
	///
	/// The list is in registry order, the most preferred version first. An empty list means
	/// the project exists but has nothing compatible.
	async fn project_versions(&self, project_id: &str, game_version: &str, loader: &str) -> Result<Vec<VersionInfo>, RegistryError>;

	/// A single version, used to get the files to download.
	async fn version(&self, version_id: &str) -> Result<VersionInfo, RegistryError>;

	/// Fetches the content at `url` verbatim.
	async fn download(&self, url: &str) -> Result<Vec<u8>, RegistryError>;
}
