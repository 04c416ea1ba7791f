use std::collections::{HashMap, HashSet, VecDeque};

use super::*;

/// Why a required dependency was left out.
#[derive(Debug, thiserror::Error)]
pub enum DependencyFailureReason {
	/// The dependency's project has no version for the game version and loader.
	#[error("no compatible version found.")]
	NoMatchingVersion,
	/// The dependency's project could not be resolved.
	#[error("unresolvable: {0}")]
	Unresolvable(RegistryError),
	/// The dependency was added but its own dependencies could not be looked up.
	#[error("failed to look up version for further expansion: {0}")]
	VersionLookup(RegistryError),
}

/// A dependency edge that could not be followed.
#[derive(Debug)]
pub struct DependencyFailure {
	/// Version id of the version declaring the dependency.
	pub dependent: String,
	pub dependency: DependencyDecl,
	pub reason: DependencyFailureReason,
}

/// What a single call to [`DependencyExpander::expand()`] found.
#[derive(Debug, Default)]
pub struct ExpansionReport {
	/// Required dependencies successfully resolved to a version id, including ones already in the set.
	pub required: usize,
	/// Version ids that were not in the set before.
	pub added: usize,
	pub failures: Vec<DependencyFailure>,
}

/// Adds the required dependencies of resolved versions to a [`ResolutionSet`].
///
/// By default only the direct dependencies of each root are added. With
/// [`recursive`](DependencyExpander::recursive) set the dependencies of dependencies are
/// followed as well, each version id is expanded at most once so circular requirements terminate.
///
/// Projects resolved during a run are remembered, a dependency on a project that already
/// resolved to a version reuses that version instead of querying the registry again.
/// Versions pinned by a dependency are not remembered for their project.
pub struct DependencyExpander<'r, R: Registry + ?Sized> {
	registry: &'r R,
	game_version: String,
	loader: String,
	recursive: bool,
	/// Version ids whose dependencies have been expanded.
	expanded: HashSet<String>,
	/// project id -> version id, first resolution wins.
	resolved_projects: HashMap<String, String>,
}

impl<'r, R: Registry + ?Sized> DependencyExpander<'r, R> {
	pub fn new(registry: &'r R, game_version: impl Into<String>, loader: impl Into<String>) -> Self {
		Self {
			registry,
			game_version: game_version.into(),
			loader: loader.into(),
			recursive: false,
			expanded: HashSet::new(),
			resolved_projects: HashMap::new(),
		}
	}

	pub fn recursive(mut self, recursive: bool) -> Self {
		self.recursive = recursive;
		self
	}

	pub fn is_expanded(&self, version_id: &str) -> bool {
		self.expanded.contains(version_id)
	}

	/// Records that `project_id` resolved to `version_id` unless it already resolved to something.
	pub fn remember_project(&mut self, project_id: &str, version_id: &str) {
		self.resolved_projects
			.entry(project_id.to_string())
			.or_insert_with(|| version_id.to_string());
	}

	/// Adds the required dependencies of `root` to `resolved`.
	///
	/// `root` itself is not added. Does nothing when `root` was already expanded.
	/// Failed dependencies are returned in the report and don't stop the expansion of their siblings.
	pub async fn expand(&mut self, root: &VersionInfo, resolved: &mut ResolutionSet) -> ExpansionReport {
		let mut report = ExpansionReport::default();

		if !self.expanded.insert(root.id.clone()) {
			log::debug!("Version {} already expanded, skipping.", root.id);
			return report;
		}
		self.remember_project(&root.project_id, &root.id);

		let mut queue = VecDeque::<VersionInfo>::new();
		self.expand_version(root, resolved, &mut report, &mut queue).await;
		while let Some(next) = queue.pop_front() {
			self.expand_version(&next, resolved, &mut report, &mut queue).await;
		}

		report
	}

	/// Handles the required dependencies of one version, queueing the ones that need expanding in recursive mode.
	async fn expand_version(&mut self, version: &VersionInfo, resolved: &mut ResolutionSet, report: &mut ExpansionReport, queue: &mut VecDeque<VersionInfo>) {
		for dependency in version.required_dependencies() {
			let (version_id, info) = match dependency.target() {
				DependencyTarget::Version(id) => (id.to_string(), None),
				DependencyTarget::Project(project_id) => {
					if let Some(id) = self.resolved_projects.get(project_id) {
						log::debug!("Dependency {} already resolved to {}", project_id, id);
						(id.clone(), None)
					} else {
						match resolve_project(self.registry, project_id, &self.game_version, &self.loader).await {
							ResolutionOutcome::Resolved(v) => {
								self.remember_project(project_id, &v.id);
								self.remember_project(&v.project_id, &v.id);
								(v.id.clone(), Some(v))
							},
							ResolutionOutcome::NoMatchingVersion => {
								log::error!("Could not find any versions for dependency {} of {} that satisfy your requirements", dependency, version.id);
								report.failures.push(DependencyFailure {
									dependent: version.id.clone(),
									dependency: dependency.clone(),
									reason: DependencyFailureReason::NoMatchingVersion,
								});
								continue;
							},
							ResolutionOutcome::Unresolvable(e) => {
								log::error!("Failed to resolve dependency {} of {}: {}", dependency, version.id, e);
								report.failures.push(DependencyFailure {
									dependent: version.id.clone(),
									dependency: dependency.clone(),
									reason: DependencyFailureReason::Unresolvable(e),
								});
								continue;
							},
						}
					}
				},
			};

			log::debug!("Found required dependency {} (id {})", dependency, version_id);
			report.required += 1;
			if resolved.insert_version(version_id.clone()) {
				report.added += 1;
			}

			if !self.recursive || self.expanded.contains(&version_id) {
				continue;
			}

			let info = match info {
				Some(v) => v,
				None => match self.registry.version(&version_id).await {
					Ok(v) => v,
					Err(e) => {
						log::warn!("Failed to look up version {} to expand its dependencies: {}", version_id, e);
						report.failures.push(DependencyFailure {
							dependent: version.id.clone(),
							dependency: dependency.clone(),
							reason: DependencyFailureReason::VersionLookup(e),
						});
						continue;
					},
				},
			};

			if self.expanded.insert(version_id) {
				queue.push_back(info);
			}
		}
	}
}
