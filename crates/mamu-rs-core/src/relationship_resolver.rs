//! Utilities for turning a list of seed references into the set of versions and files to install.
//!
//! # Usage
//! 1. Create a [`ResolverBuilder`], usually with [`ResolverBuilder::from_config()`].
//! 1. [`ResolverBuilder::build()`] to get a [`ModResolver`].
//! 1. [`ModResolver::run()`] with the seed references to get a [`ResolutionReport`].
//! 1. Pass [`ResolutionReport::resolved`] to [`installation::materialize()`](crate::installation::materialize()).
//!
//! # Registry ordering
//! The registry decides which version is best. [`resolve_project()`] takes the first version the
//! registry lists for the game version and loader and does not rank candidates itself, so the
//! result is only as good as the registry's ordering.

use crate::registry::*;

mod resolution_set;
pub use resolution_set::ResolutionSet;

mod dependency_expander;
pub use dependency_expander::DependencyExpander;
pub use dependency_expander::ExpansionReport;
pub use dependency_expander::DependencyFailure;
pub use dependency_expander::DependencyFailureReason;

mod mod_resolver;
pub use mod_resolver::ModResolver;
pub use mod_resolver::ResolverBuilder;
pub use mod_resolver::ResolutionReport;

/// The result of resolving one project.
#[derive(Debug)]
pub enum ResolutionOutcome {
	/// The best version compatible with the game version and loader.
	Resolved(VersionInfo),
	/// The project exists but has no compatible version.
	NoMatchingVersion,
	/// The registry rejected the identifier or could not be reached.
	Unresolvable(RegistryError),
}

/// Finds the best version of `project_id` for the game version and loader.
///
/// Any error from the registry, including timeouts, becomes [`ResolutionOutcome::Unresolvable`].
pub async fn resolve_project<R>(registry: &R, project_id: &str, game_version: &str, loader: &str) -> ResolutionOutcome
where R: Registry + ?Sized,
{
	match registry.project_versions(project_id, game_version, loader).await {
		Ok(versions) => match versions.into_iter().next() {
			Some(v) => ResolutionOutcome::Resolved(v),
			None => ResolutionOutcome::NoMatchingVersion,
		},
		Err(e) => ResolutionOutcome::Unresolvable(e),
	}
}
