//! Registry, ordering and navigation tests

use docshelf::*;
use pretty_assertions::assert_eq;

fn build(config: RegistryConfig, paths: &[&str]) -> Registry {
    let docs = paths
        .iter()
        .map(|p| (p.to_string(), DeferredLoader::from_static(*p)));
    Registry::build(config, docs).unwrap()
}

fn scenario_config() -> RegistryConfig {
    RegistryConfig::empty()
        .with_category(CategorySpec::fallback("General").priority(["getting-started", "architecture"]))
        .with_category(CategorySpec::with_members("API", ["media-flow"]))
}

fn ids<'a>(entries: impl IntoIterator<Item = &'a DocumentEntry>) -> Vec<&'a str> {
    entries.into_iter().map(|e| e.id.as_str()).collect()
}

fn full_site() -> Registry {
    build(
        RegistryConfig::default(),
        &[
            "./docs/api-reference.mdx",
            "./docs/architecture.mdx",
            "./docs/authentication-flow.mdx",
            "./docs/authentication.mdx",
            "./docs/core-concepts.mdx",
            "./docs/deployment.mdx",
            "./docs/faq.mdx",
            "./docs/getting-started.mdx",
            "./docs/media-flow.mdx",
            "./docs/subscription-flow.mdx",
        ],
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Identifier Normalization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_normalize_is_deterministic_and_idempotent() {
    for path in ["./docs/getting-started.mdx", "a/b/c.d.e", "", "plain", "x/-lead-"] {
        let first = normalize(path);
        assert_eq!(first, normalize(path));
        // Normalizing the id again changes nothing once the extension is gone
        let (id, _) = &first;
        if !id.contains('.') {
            assert_eq!(normalize(id).0, *id);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Scenario: three documents, two categories
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_categories() {
    let registry = build(
        scenario_config(),
        &["getting-started.x", "media-flow.x", "architecture.x"],
    );

    assert_eq!(
        ids(&registry.category("General").unwrap().entries),
        vec!["getting-started", "architecture"]
    );
    assert_eq!(ids(&registry.category("API").unwrap().entries), vec!["media-flow"]);
}

#[test]
fn test_scenario_linear_sequence() {
    let registry = build(
        scenario_config(),
        &["getting-started.x", "media-flow.x", "architecture.x"],
    );
    assert_eq!(
        ids(registry.linear()),
        vec!["getting-started", "architecture", "media-flow"]
    );
}

#[test]
fn test_scenario_navigation() {
    let registry = build(
        scenario_config(),
        &["getting-started.x", "media-flow.x", "architecture.x"],
    );
    let nav = registry.navigate("architecture");
    assert_eq!(nav.previous.map(|e| e.id.as_str()), Some("getting-started"));
    assert_eq!(nav.next.map(|e| e.id.as_str()), Some("media-flow"));
}

// ═══════════════════════════════════════════════════════════════════════
// Partition
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_every_document_in_exactly_one_category_except_excluded() {
    let registry = full_site();

    for doc in registry.documents() {
        let owners = registry
            .categories()
            .iter()
            .filter(|c| c.ids().any(|id| id == doc.entry.id))
            .count();
        if doc.entry.id == "api-reference" {
            assert_eq!(owners, 0);
            assert_eq!(doc.classification, Classification::Excluded);
        } else {
            assert_eq!(owners, 1, "{} should have one owner", doc.entry.id);
        }
    }
}

#[test]
fn test_full_site_ordering() {
    let registry = full_site();

    assert_eq!(
        ids(&registry.category("General").unwrap().entries),
        vec![
            "getting-started",
            "core-concepts",
            "architecture",
            "authentication",
            "deployment",
            "faq",
        ]
    );
    assert_eq!(
        ids(&registry.category("API").unwrap().entries),
        vec!["media-flow", "authentication-flow", "subscription-flow"]
    );
}

#[test]
fn test_linear_length_matches_listed_count() {
    let registry = full_site();
    assert_eq!(registry.linear().len(), registry.len() - 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Navigation Boundaries
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_first_has_no_previous() {
    let registry = full_site();
    let nav = registry.navigate("getting-started");
    assert!(nav.previous.is_none());
    assert_eq!(nav.next.map(|e| e.id.as_str()), Some("core-concepts"));
}

#[test]
fn test_last_has_no_next() {
    let registry = full_site();
    let nav = registry.navigate("subscription-flow");
    assert_eq!(nav.previous.map(|e| e.id.as_str()), Some("authentication-flow"));
    assert!(nav.next.is_none());
}

#[test]
fn test_excluded_and_unknown_have_no_pagination() {
    let registry = full_site();
    assert!(registry.navigate("api-reference").is_empty());
    assert!(registry.navigate("nonexistent").is_empty());
}

#[test]
fn test_page_view_for_excluded_document() {
    let registry = full_site();
    let page = registry.page("api-reference").unwrap();
    assert_eq!(page.entry.title, "Api Reference");
    assert!(page.pagination.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Sidebar Export
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sidebar_matches_categories() {
    let registry = full_site();
    let sidebar = registry.sidebar();

    let names: Vec<&str> = sidebar.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["General", "API"]);

    let api = sidebar.section("API").unwrap();
    assert_eq!(
        api.links[0],
        SidebarLink {
            path: "/docs/media-flow".to_string(),
            label: "Media Flow".to_string(),
        }
    );
}

#[test]
fn test_custom_route_prefix_flows_through() {
    let registry = build(
        RegistryConfig::default().with_route_prefix("/guide/"),
        &["getting-started.mdx"],
    );
    assert_eq!(
        registry.resolve("getting-started").unwrap().route_path,
        "/guide/getting-started"
    );
    assert!(matches!(registry.route("/guide/getting-started"), Route::Document(_)));
    assert_eq!(
        registry.route("/"),
        Route::Redirect("/guide/getting-started".to_string())
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Duplicates
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_duplicates_flagged_not_fatal() {
    let registry = build(
        RegistryConfig::default(),
        &["one/faq.mdx", "two/faq.mdx", "three/faq.mdx"],
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.duplicates().len(), 2);
    assert!(registry.duplicates().iter().all(|d| d.kept == "one/faq.mdx"));
}
