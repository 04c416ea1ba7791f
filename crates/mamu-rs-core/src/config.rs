//! Run configuration, read from a `config.json` file.
//!
//! # Format
//! ```json
//! {
//! 	"version": "1.20.1",
//! 	"loader": "fabric",
//! 	"mods": ["fabric-api", "https://modrinth.com/mod/sodium"]
//! }
//! ```
//! Every other key is optional, see the getters on [`Config`] for their defaults.

use std::path::{Path, PathBuf};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.modrinth.com/v2/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(rename = "version")]
	game_version: String,
	loader: String,
	mods: Vec<String>,
	#[serde(default)]
	mods_dir: Option<PathBuf>,
	#[serde(default = "default_api_url")]
	api_url: String,
	#[serde(default = "default_user_agent")]
	user_agent: String,
	#[serde(default = "default_timeout_secs")]
	timeout_secs: u64,
	#[serde(default)]
	recursive_dependencies: bool,
	#[serde(default = "default_true")]
	verify_checksums: bool,
	#[serde(default = "default_true")]
	https_only: bool,
}

fn default_api_url() -> String { DEFAULT_API_URL.to_string() }
fn default_user_agent() -> String { format!("mamu-rs/{}", env!("CARGO_PKG_VERSION")) }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_true() -> bool { true }

impl Config {
	/// Creates a config with every optional setting at its default.
	pub fn new(game_version: impl Into<String>, loader: impl Into<String>, mods: Vec<String>) -> Self {
		Self {
			game_version: game_version.into(),
			loader: loader.into(),
			mods,
			mods_dir: None,
			api_url: default_api_url(),
			user_agent: default_user_agent(),
			timeout_secs: default_timeout_secs(),
			recursive_dependencies: false,
			verify_checksums: true,
			https_only: true,
		}
	}

	/// Reads and validates a config file.
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file can't be read.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't valid JSON or is missing a required key.
	/// - [`Validation`](crate::Error::Validation) when `version` or `loader` are empty.
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		log::debug!("Reading config from {}", path.display());
		let s = std::fs::read_to_string(path)?;
		Self::from_json_str(&s)
	}

	pub fn from_json_str(s: &str) -> crate::Result<Self> {
		let config: Config = serde_json::from_str(s)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> crate::Result<()> {
		if self.game_version.trim().is_empty() {
			return Err(crate::Error::Validation("`version` must not be empty".to_string()))
		}
		if self.loader.trim().is_empty() {
			return Err(crate::Error::Validation("`loader` must not be empty".to_string()))
		}
		if self.timeout_secs == 0 {
			return Err(crate::Error::Validation("`timeout_secs` must be greater than zero".to_string()))
		}
		Ok(())
	}

	/* Fields */

	pub fn game_version(&self) -> &str {
		&self.game_version
	}

	pub fn loader(&self) -> &str {
		&self.loader
	}

	/// Seed references in the order they were written.
	pub fn mods(&self) -> &[String] {
		&self.mods
	}

	pub fn api_url(&self) -> &str {
		&self.api_url
	}
	pub fn set_api_url(&mut self, api_url: impl Into<String>) {
		self.api_url = api_url.into();
	}

	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	pub fn timeout(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.timeout_secs)
	}

	/// When set, dependencies of dependencies are expanded as well.
	pub fn recursive_dependencies(&self) -> bool {
		self.recursive_dependencies
	}
	pub fn set_recursive_dependencies(&mut self, recursive_dependencies: bool) {
		self.recursive_dependencies = recursive_dependencies;
	}

	pub fn verify_checksums(&self) -> bool {
		self.verify_checksums
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}

	/// `true` when the mods directory was given in the config rather than derived from the platform.
	pub fn has_explicit_mods_dir(&self) -> bool {
		self.mods_dir.is_some()
	}

	/// The directory mods are synchronized into.
	///
	/// # Errors
	/// [`Validation`](crate::Error::Validation) when no directory is configured and
	/// the platform's home directory variable is not set.
	pub fn mods_dir(&self) -> crate::Result<PathBuf> {
		match &self.mods_dir {
			Some(p) => Ok(p.clone()),
			None => Ok(default_game_dir()?.join("mods")),
		}
	}
}

/// The default Minecraft directory for the current platform.
pub fn default_game_dir() -> crate::Result<PathBuf> {
	#[cfg(target_os = "windows")]
	let path = std::env::var("APPDATA")
		.map(|p| PathBuf::from(p).join(".minecraft"))
		.map_err(|_| crate::Error::Validation("APPDATA environment variable not set".to_string()));

	#[cfg(target_os = "macos")]
	let path = std::env::var("HOME")
		.map(|p| PathBuf::from(p).join("Library").join("Application Support").join("minecraft"))
		.map_err(|_| crate::Error::Validation("HOME environment variable not set".to_string()));

	#[cfg(not(any(target_os = "windows", target_os = "macos")))]
	let path = std::env::var("HOME")
		.map(|p| PathBuf::from(p).join(".minecraft"))
		.map_err(|_| crate::Error::Validation("HOME environment variable not set".to_string()));

	path
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_minimal() {
		let config = Config::from_json_str(r#"{"version": "1.20.1", "loader": "fabric", "mods": ["sodium", "lithium"]}"#)
			.expect("failed to parse config");
		assert_eq!(config.game_version(), "1.20.1");
		assert_eq!(config.loader(), "fabric");
		assert_eq!(config.mods(), &["sodium".to_string(), "lithium".to_string()]);
		assert_eq!(config.api_url(), DEFAULT_API_URL);
		assert_eq!(config.timeout(), std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS));
		assert!(config.user_agent().starts_with("mamu-rs/"));
		assert!(!config.recursive_dependencies());
		assert!(config.verify_checksums());
		assert!(config.https_only());
		assert!(!config.has_explicit_mods_dir());
	}

	#[test]
	fn config_optional_keys() {
		let config = Config::from_json_str(r#"{
			"version": "1.19.2",
			"loader": "quilt",
			"mods": [],
			"mods_dir": "/tmp/mods",
			"api_url": "http://localhost:8080/v2/",
			"timeout_secs": 5,
			"recursive_dependencies": true,
			"verify_checksums": false,
			"https_only": false
		}"#).expect("failed to parse config");
		assert_eq!(config.mods_dir().expect("mods dir"), PathBuf::from("/tmp/mods"));
		assert!(config.has_explicit_mods_dir());
		assert_eq!(config.api_url(), "http://localhost:8080/v2/");
		assert_eq!(config.timeout(), std::time::Duration::from_secs(5));
		assert!(config.recursive_dependencies());
		assert!(!config.verify_checksums());
		assert!(!config.https_only());
	}

	#[test]
	fn config_missing_mods_is_an_error() {
		let res = Config::from_json_str(r#"{"version": "1.20.1", "loader": "fabric"}"#);
		assert!(matches!(res, Err(crate::Error::SerdeJSON(_))));
	}

	#[test]
	fn config_empty_loader_is_invalid() {
		let res = Config::from_json_str(r#"{"version": "1.20.1", "loader": " ", "mods": []}"#);
		assert!(matches!(res, Err(crate::Error::Validation(_))));
	}

	#[test]
	fn config_missing_file() {
		let res = Config::load_from_file("this/file/does/not/exist.json");
		assert!(matches!(res, Err(crate::Error::IO(_))));
	}
}
