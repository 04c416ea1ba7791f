use mamu_rs_core::relationship_resolver::*;
use mamu_rs_test_utils::*;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn registry() -> MockRegistry {
	MockRegistry::new()
		.with_project("P7dR8mSH", &["fabric-api"], vec![
			version("fabric-api-new", "P7dR8mSH", vec![]),
			version("fabric-api-old", "P7dR8mSH", vec![]),
		])
		.with_project("AANobbMI", &["sodium"], vec![
			version("sodium-v", "AANobbMI", vec![required_project("P7dR8mSH")]),
		])
		.with_project("gvQqBUqZ", &["lithium"], vec![
			version("lithium-v", "gvQqBUqZ", vec![]),
		])
		.with_empty_project("old-mod")
}

#[tokio::test]
async fn resolve_example_seeds() {
	init_logging();
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry)
		.game_version("1.20.1")
		.loader("fabric")
		.build();

	let report = resolver.run(["fabric-api", "https://modrinth.com/mod/sodium", "not-a-real-id-xyz"]).await;

	assert_eq!(report.resolved.sorted_version_ids(), vec!["fabric-api-new", "sodium-v"]);
	assert_eq!(report.resolved.sorted_direct_urls(), vec!["not-a-real-id-xyz"]);

	assert_eq!(registry.project_queries("sodium"), 1);
	assert_eq!(registry.project_queries("https://modrinth.com/mod/sodium"), 0);
	assert_eq!(report.unresolvable.len(), 1);
	assert_eq!(report.unresolvable[0].0.raw(), "not-a-real-id-xyz");
	assert!(report.no_matching_version.is_empty());
	assert!(report.dependency_failures.is_empty());
}

#[tokio::test]
async fn head_of_registry_list_is_used() {
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let report = resolver.run(["fabric-api"]).await;
	assert!(report.resolved.contains_version("fabric-api-new"));
	assert!(!report.resolved.contains_version("fabric-api-old"));
}

#[tokio::test]
async fn no_matching_version_contributes_nothing() {
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let report = resolver.run(["old-mod"]).await;
	assert!(report.resolved.is_empty());
	assert_eq!(report.no_matching_version.len(), 1);
	assert_eq!(report.no_matching_version[0].project_id(), "old-mod");
	assert!(report.has_failures());
}

#[tokio::test]
async fn unresolvable_seed_is_kept_verbatim() {
	let registry = registry().with_rejected_project("bad id", "invalid_input: bad id");
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let url = "https://cdn.example.com/files/custom-mod-1.0.jar";
	let report = resolver.run([url, "bad id"]).await;

	assert!(report.resolved.version_ids().is_empty());
	assert_eq!(report.resolved.direct_urls().len(), 2);
	assert!(report.resolved.contains_direct_url(url));
	assert!(report.resolved.contains_direct_url("bad id"));
	assert!(!report.has_failures());
}

#[tokio::test]
async fn rejected_project_url_is_kept_as_written() {
	let registry = registry().with_rejected_project("gone", "project has been removed");
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let report = resolver.run(["https://modrinth.com/mod/gone"]).await;

	assert_eq!(registry.project_queries("gone"), 1);
	assert_eq!(registry.project_queries("https://modrinth.com/mod/gone"), 0);
	assert_eq!(report.resolved.sorted_direct_urls(), vec!["https://modrinth.com/mod/gone"]);
	assert!(!report.resolved.contains_direct_url("gone"));
	assert!(report.resolved.version_ids().is_empty());
	assert_eq!(report.unresolvable[0].0.project_id(), "gone");
}

#[tokio::test]
async fn duplicate_seeds_are_resolved_once() {
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let report = resolver.run(["lithium", "lithium", "nope", "nope"]).await;
	assert_eq!(registry.project_queries("lithium"), 1);
	assert_eq!(registry.project_queries("nope"), 1);
	assert_eq!(report.resolved.version_ids().len(), 1);
	assert_eq!(report.resolved.direct_urls().len(), 1);
}

#[tokio::test]
async fn same_project_by_slug_and_url() {
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();

	let report = resolver.run(["sodium", "https://modrinth.com/mod/sodium"]).await;
	assert_eq!(report.resolved.sorted_version_ids(), vec!["fabric-api-new", "sodium-v"]);
	assert!(report.resolved.direct_urls().is_empty());
	/* The second seed resolves to an already expanded version so its dependencies aren't looked up again. */
	assert_eq!(registry.project_queries("P7dR8mSH"), 1);
}

#[tokio::test]
async fn resolving_is_idempotent() {
	let registry = registry();
	let resolver = ResolverBuilder::new(&registry).game_version("1.20.1").loader("fabric").build();
	let seeds = ["fabric-api", "https://modrinth.com/mod/sodium", "not-a-real-id-xyz", "old-mod", "lithium"];

	let first = resolver.run(seeds).await;
	let second = resolver.run(seeds.iter().rev()).await;
	assert_eq!(first.resolved, second.resolved);
}

#[tokio::test]
async fn resolver_from_config() {
	let registry = registry();
	let mut config = mamu_rs_core::Config::new("1.20.1", "fabric", vec!["lithium".to_string()]);
	config.set_recursive_dependencies(true);
	let resolver = ResolverBuilder::from_config(&registry, &config).build();
	assert_eq!(resolver.game_version(), "1.20.1");
	assert_eq!(resolver.loader(), "fabric");

	let report = resolver.run(config.mods()).await;
	assert_eq!(report.resolved.sorted_version_ids(), vec!["lithium-v"]);
}
