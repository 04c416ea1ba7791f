//! Version objects as returned by the registry.

use serde::Deserialize;

/// A specific release of a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
	/// Unique id of this version.
	pub id: String,
	/// The project this version belongs to.
	pub project_id: String,
	/// Human readable version label, only used for logging.
	pub version_number: String,
	#[serde(default)]
	pub files: Vec<VersionFile>,
	#[serde(default)]
	pub dependencies: Vec<DependencyDecl>,
}

impl VersionInfo {
	/// Declared dependencies of type [`DependencyType::Required`].
	pub fn required_dependencies(&self) -> impl Iterator<Item = &DependencyDecl> {
		self.dependencies.iter().filter(|d| d.dependency_type() == DependencyType::Required)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionFile {
	pub url: String,
	pub filename: String,
	#[serde(default)]
	pub hashes: FileHashes,
	#[serde(default)]
	pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileHashes {
	pub sha1: Option<String>,
	pub sha512: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
	Required,
	Optional,
	Incompatible,
	Embedded,
}

/// What a dependency points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyTarget<'a> {
	/// A concrete version, no further lookup needed.
	Version(&'a str),
	/// A project whose best version still has to be resolved.
	Project(&'a str),
}

/// A dependency entry of a version.
///
/// Always has at least one of `version_id` or `project_id`, entries with neither fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDependency")]
pub struct DependencyDecl {
	project_id: Option<String>,
	version_id: Option<String>,
	dependency_type: DependencyType,
}

#[derive(Deserialize)]
struct RawDependency {
	#[serde(default)]
	project_id: Option<String>,
	#[serde(default)]
	version_id: Option<String>,
	dependency_type: DependencyType,
}

impl TryFrom<RawDependency> for DependencyDecl {
	type Error = String;
	fn try_from(value: RawDependency) -> Result<Self, Self::Error> {
		if value.project_id.is_none() && value.version_id.is_none() {
			return Err("dependency has neither `project_id` nor `version_id`".to_string())
		}
		Ok(Self {
			project_id: value.project_id,
			version_id: value.version_id,
			dependency_type: value.dependency_type,
		})
	}
}

impl DependencyDecl {
	/// A dependency on a concrete version.
	pub fn on_version(dependency_type: DependencyType, version_id: impl Into<String>, project_id: Option<String>) -> Self {
		Self { project_id, version_id: Some(version_id.into()), dependency_type }
	}

	/// A dependency on whichever version of a project is compatible.
	pub fn on_project(dependency_type: DependencyType, project_id: impl Into<String>) -> Self {
		Self { project_id: Some(project_id.into()), version_id: None, dependency_type }
	}

	pub fn dependency_type(&self) -> DependencyType {
		self.dependency_type
	}

	pub fn project_id(&self) -> Option<&str> {
		self.project_id.as_deref()
	}

	pub fn version_id(&self) -> Option<&str> {
		self.version_id.as_deref()
	}

	/// A concrete version id takes precedence over the project.
	pub fn target(&self) -> DependencyTarget<'_> {
		match (&self.version_id, &self.project_id) {
			(Some(v), _) => DependencyTarget::Version(v),
			(None, Some(p)) => DependencyTarget::Project(p),
			(None, None) => unreachable!("dependency without a target should have been rejected when decoding"),
		}
	}
}

impl std::fmt::Display for DependencyDecl {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match (&self.project_id, &self.version_id) {
			(Some(p), Some(v)) => write!(f, "{} (id {})", p, v),
			(Some(p), None) => write!(f, "{}", p),
			(None, Some(v)) => write!(f, "version {}", v),
			(None, None) => write!(f, "<unknown>"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SODIUM_VERSION: &str = r#"{
		"id": "OihdIimA",
		"project_id": "AANobbMI",
		"name": "Sodium 0.5.3",
		"version_number": "mc1.20.1-0.5.3",
		"game_versions": ["1.20.1"],
		"loaders": ["fabric"],
		"files": [{
			"hashes": {"sha1": "0d4f7c1d4bd6f1e2d0f2ab1d3bb3d6fbd2e0e4c1", "sha512": "abcd"},
			"url": "https://cdn.modrinth.com/data/AANobbMI/versions/OihdIimA/sodium-fabric-mc1.20.1-0.5.3.jar",
			"filename": "sodium-fabric-mc1.20.1-0.5.3.jar",
			"primary": true,
			"size": 912345
		}],
		"dependencies": [
			{"version_id": null, "project_id": "P7dR8mSH", "file_name": null, "dependency_type": "required"},
			{"version_id": "abc123", "project_id": null, "file_name": null, "dependency_type": "required"},
			{"version_id": null, "project_id": "YL57xq9U", "file_name": null, "dependency_type": "optional"},
			{"version_id": null, "project_id": "GBeCx05I", "file_name": null, "dependency_type": "incompatible"}
		]
	}"#;

	#[test]
	fn version_decode() {
		let v: VersionInfo = serde_json::from_str(SODIUM_VERSION).expect("failed to decode version");
		assert_eq!(v.id, "OihdIimA");
		assert_eq!(v.project_id, "AANobbMI");
		assert_eq!(v.files.len(), 1);
		assert!(v.files[0].primary);
		assert_eq!(v.files[0].hashes.sha1.as_deref(), Some("0d4f7c1d4bd6f1e2d0f2ab1d3bb3d6fbd2e0e4c1"));
		assert_eq!(v.dependencies.len(), 4);

		let required: Vec<_> = v.required_dependencies().map(|d| d.target()).collect();
		assert_eq!(required, vec![DependencyTarget::Project("P7dR8mSH"), DependencyTarget::Version("abc123")]);
	}

	#[test]
	fn dependency_without_target_is_rejected() {
		let res = serde_json::from_str::<DependencyDecl>(r#"{"version_id": null, "project_id": null, "dependency_type": "required"}"#);
		assert!(res.is_err());
	}

	#[test]
	fn dependency_unknown_type_is_rejected() {
		let res = serde_json::from_str::<DependencyDecl>(r#"{"project_id": "P7dR8mSH", "dependency_type": "recommended"}"#);
		assert!(res.is_err());
	}

	#[test]
	fn dependency_version_takes_precedence() {
		let d = DependencyDecl::on_version(DependencyType::Required, "abc123", Some("P7dR8mSH".to_string()));
		assert_eq!(d.target(), DependencyTarget::Version("abc123"));
		assert_eq!(d.to_string(), "P7dR8mSH (id abc123)");
	}
}
