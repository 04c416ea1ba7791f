use std::collections::HashSet;

use crate::reference::ProjectReference;
use super::*;

/// Configures a [`ModResolver`].
pub struct ResolverBuilder<'r, R: Registry + ?Sized> {
	registry: &'r R,
	game_version: String,
	loader: String,
	recursive_dependencies: bool,
}

impl<'r, R: Registry + ?Sized> ResolverBuilder<'r, R> {
	pub fn new(registry: &'r R) -> Self {
		Self {
			registry,
			game_version: String::new(),
			loader: String::new(),
			recursive_dependencies: false,
		}
	}

	/// Takes the game version, loader and dependency policy from `config`.
	pub fn from_config(registry: &'r R, config: &crate::Config) -> Self {
		Self::new(registry)
			.game_version(config.game_version())
			.loader(config.loader())
			.recursive_dependencies(config.recursive_dependencies())
	}

	pub fn game_version(mut self, game_version: impl Into<String>) -> Self {
		self.game_version = game_version.into();
		self
	}

	pub fn loader(mut self, loader: impl Into<String>) -> Self {
		self.loader = loader.into();
		self
	}

	pub fn recursive_dependencies(mut self, recursive: bool) -> Self {
		self.recursive_dependencies = recursive;
		self
	}

	pub fn build(self) -> ModResolver<'r, R> {
		ModResolver {
			registry: self.registry,
			game_version: self.game_version,
			loader: self.loader,
			recursive_dependencies: self.recursive_dependencies,
		}
	}
}

/// Everything a [`ModResolver::run()`] produced.
#[derive(Debug, Default)]
pub struct ResolutionReport {
	/// The versions and direct urls to materialize.
	pub resolved: ResolutionSet,
	/// References whose project has no compatible version. These contribute nothing.
	pub no_matching_version: Vec<ProjectReference>,
	/// References the registry couldn't resolve, their raw form is in [`ResolutionSet::direct_urls()`].
	pub unresolvable: Vec<(ProjectReference, RegistryError)>,
	/// Required dependencies that were left out.
	pub dependency_failures: Vec<DependencyFailure>,
}

impl ResolutionReport {
	pub fn has_failures(&self) -> bool {
		!self.no_matching_version.is_empty() || !self.dependency_failures.is_empty()
	}
}

/// Resolves seed references into a [`ResolutionSet`].
///
/// Seeds are handled one after the other in a single pass, each is resolved and has its
/// dependencies expanded before the next one starts.
pub struct ModResolver<'r, R: Registry + ?Sized> {
	registry: &'r R,
	game_version: String,
	loader: String,
	recursive_dependencies: bool,
}

impl<'r, R: Registry + ?Sized> ModResolver<'r, R> {
	pub fn game_version(&self) -> &str {
		&self.game_version
	}

	pub fn loader(&self) -> &str {
		&self.loader
	}

	/// Resolves every seed and its required dependencies.
	///
	/// Duplicate seeds are only resolved once. A seed the registry rejects is added to the
	/// direct urls exactly as written, a seed with no compatible version is reported and skipped.
	pub async fn run<I, S>(&self, seeds: I) -> ResolutionReport
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut report = ResolutionReport::default();
		let mut expander = DependencyExpander::new(self.registry, self.game_version.as_str(), self.loader.as_str())
			.recursive(self.recursive_dependencies);

		let mut seen = HashSet::<String>::new();
		for raw in seeds {
			let raw = raw.as_ref();
			if !seen.insert(raw.to_string()) {
				log::debug!("Skipping duplicate reference {}", raw);
				continue;
			}

			let reference = ProjectReference::parse(raw);
			if reference.is_url() {
				log::debug!("Normalized {} to {}", reference.raw(), reference.project_id());
			}

			match resolve_project(self.registry, reference.project_id(), &self.game_version, &self.loader).await {
				ResolutionOutcome::Resolved(version) => {
					log::info!("Using version {} for {} (id {})", version.version_number, reference, version.id);
					report.resolved.insert_version(version.id.clone());
					expander.remember_project(reference.project_id(), &version.id);

					let expansion = expander.expand(&version, &mut report.resolved).await;
					if expansion.required > 0 {
						log::info!("Found {} required dependencies", expansion.required);
					}
					report.dependency_failures.extend(expansion.failures);
				},
				ResolutionOutcome::NoMatchingVersion => {
					log::error!("Could not find any versions for {} that satisfy your requirements", reference);
					report.no_matching_version.push(reference);
				},
				ResolutionOutcome::Unresolvable(e) => {
					log::warn!("Could not resolve {} through the registry ({}), it will be downloaded directly", reference, e);
					report.resolved.insert_direct_url(reference.raw());
					report.unresolvable.push((reference, e));
				},
			}
		}

		log::info!("Compiled {} total mods to download", report.resolved.version_ids().len());
		if !report.resolved.direct_urls().is_empty() {
			log::info!("{} references will be downloaded directly", report.resolved.direct_urls().len());
		}
		log::debug!("{:?}", report.resolved.sorted_version_ids());

		report
	}
}
