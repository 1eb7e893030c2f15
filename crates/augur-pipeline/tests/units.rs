use augur_core::candidate::Candidate;
use augur_core::identity::PackageIdentity;
use augur_core::DEFAULT_INDEX_URL;
use augur_pipeline::error::PipelineError;
use augur_pipeline::unit::PipelineUnit;
use augur_pipeline::units::denylist::{DenylistConfig, DenylistUnit};
use augur_pipeline::units::indexes::{AllowedIndexesConfig, AllowedIndexesUnit};
use augur_resolver::context::ResolutionContext;
use augur_resolver::path::ResolutionPath;

const MIRROR: &str = "https://mirror.example.com/simple";

fn id(name: &str, version: &str) -> PackageIdentity {
    PackageIdentity::new(name, version, DEFAULT_INDEX_URL)
}

fn id_at(name: &str, version: &str, index: &str) -> PackageIdentity {
    PackageIdentity::new(name, version, index)
}

fn chain(identities: Vec<PackageIdentity>) -> ResolutionPath {
    ResolutionPath::new(identities).unwrap()
}

#[test]
fn denylist_config_parses_toml() {
    let config = DenylistConfig::from_toml_str(
        r#"
        enforce = true

        [[deny]]
        name = "six"
        version = "1.7.0"

        [[deny]]
        name = "left-pad"
        "#,
    )
    .unwrap();

    assert!(config.enforce);
    assert_eq!(config.deny.len(), 2);
    assert_eq!(config.deny[0].version.as_deref(), Some("1.7.0"));
    assert!(config.deny[1].version.is_none());
}

#[test]
fn denylist_config_rejects_bad_toml() {
    let err = DenylistConfig::from_toml_str("deny = 3").unwrap_err();
    assert!(matches!(err, PipelineError::Configuration { .. }));
    assert!(err.to_string().contains("deny list"));
}

#[test]
fn deny_entry_version_compares_parsed_forms() {
    let config = DenylistConfig::from_toml_str(
        r#"
        [[deny]]
        name = "six"
        version = "1.7"
        "#,
    )
    .unwrap();

    assert!(config.deny[0].matches(&id("six", "1.7.0")));
    assert!(!config.deny[0].matches(&id("six", "1.8.0")));
    assert!(!config.deny[0].matches(&id("werkzeug", "1.7.0")));
}

#[test]
fn denylist_removes_matching_transitive() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("flask", "0.12.1", DEFAULT_INDEX_URL, false));
    ctx.add_paths(vec![
        chain(vec![id("flask", "0.12.1"), id("werkzeug", "0.13"), id("six", "1.7.0")]),
        chain(vec![id("flask", "0.12.1"), id("werkzeug", "0.14"), id("six", "1.8.0")]),
    ]);

    let config = DenylistConfig::from_toml_str(
        r#"
        [[deny]]
        name = "six"
        version = "1.7.0"
        "#,
    )
    .unwrap();
    DenylistUnit::new(config).run(&mut ctx).unwrap();

    assert_eq!(ctx.path_count(), 1);
    assert!(ctx.paths_containing(&id("six", "1.7.0")).is_empty());
    assert_eq!(ctx.direct_candidates().len(), 1);
}

#[test]
fn name_only_entry_denies_every_resolved_version() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("flask", "0.12.1", DEFAULT_INDEX_URL, false));
    ctx.register_direct_candidate(Candidate::locked("flask", "1.0.1", DEFAULT_INDEX_URL, false));
    ctx.add_paths(vec![
        chain(vec![id("flask", "0.12.1"), id("werkzeug", "0.13")]),
        chain(vec![id("flask", "0.12.1"), id("six", "1.7.0")]),
        chain(vec![id("flask", "1.0.1"), id("werkzeug", "0.14")]),
        chain(vec![id("flask", "1.0.1"), id("six", "1.8.0")]),
    ]);

    let config = DenylistConfig::from_toml_str(
        r#"
        [[deny]]
        name = "six"
        "#,
    )
    .unwrap();
    DenylistUnit::new(config).run(&mut ctx).unwrap();

    assert_eq!(ctx.path_count(), 2);
    let transitive = ctx.transitive_identities();
    assert_eq!(transitive, vec![&id("werkzeug", "0.13"), &id("werkzeug", "0.14")]);
}

#[test]
fn enforced_denylist_fails_on_refused_removal() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("a", "1.0", DEFAULT_INDEX_URL, false));
    ctx.add_paths(vec![chain(vec![id("a", "1.0"), id("six", "1.7.0")])]);

    let config = DenylistConfig::from_toml_str(
        r#"
        enforce = true

        [[deny]]
        name = "six"
        version = "1.7.0"
        "#,
    )
    .unwrap();
    let err = DenylistUnit::new(config).run(&mut ctx).unwrap_err();

    match err {
        PipelineError::NotAcceptable { unit, identity, reason } => {
            assert_eq!(unit, "denylist");
            assert_eq!(identity, id("six", "1.7.0"));
            assert!(reason.contains("starve"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The refused removal left the state alone.
    assert_eq!(ctx.path_count(), 1);
    assert_eq!(ctx.paths_containing(&id("six", "1.7.0")).len(), 1);
}

#[test]
fn soft_denylist_keeps_irremovable_and_continues() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("a", "1.0", DEFAULT_INDEX_URL, false));
    ctx.register_direct_candidate(Candidate::locked("b", "2.0", DEFAULT_INDEX_URL, false));
    // `a` cannot lose six 1.7.0; `b` can lose six 1.8.0.
    ctx.add_paths(vec![
        chain(vec![id("a", "1.0"), id("six", "1.7.0")]),
        chain(vec![id("b", "2.0"), id("six", "1.7.0")]),
        chain(vec![id("b", "2.0"), id("six", "1.8.0")]),
    ]);

    let config = DenylistConfig::from_toml_str(
        r#"
        [[deny]]
        name = "six"
        "#,
    )
    .unwrap();
    DenylistUnit::new(config).run(&mut ctx).unwrap();

    // The refused identity is still present and still supports both roots.
    assert_eq!(ctx.paths_containing(&id("six", "1.7.0")).len(), 2);
    assert!(ctx.paths_containing(&id("six", "1.8.0")).is_empty());
    assert_eq!(ctx.direct_candidates().len(), 2);
}

#[test]
fn allowed_indexes_config_parses_and_allows() {
    let config = AllowedIndexesConfig::from_toml_str(
        r#"
        allowed = ["https://pypi.org/simple"]
        "#,
    )
    .unwrap();
    assert!(config.allows(DEFAULT_INDEX_URL));
    assert!(!config.allows(MIRROR));

    let open = AllowedIndexesConfig::default();
    assert!(open.allows(MIRROR));
}

#[test]
fn allowed_indexes_removes_foreign_candidate() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("flask", "0.12.1", DEFAULT_INDEX_URL, false));
    ctx.register_direct_candidate(Candidate::locked("flask", "1.0.1", MIRROR, false));
    ctx.add_paths(vec![
        chain(vec![id("flask", "0.12.1"), id("werkzeug", "0.13")]),
        chain(vec![id_at("flask", "1.0.1", MIRROR), id("werkzeug", "0.14")]),
    ]);

    let config = AllowedIndexesConfig::from_toml_str(
        r#"
        allowed = ["https://pypi.org/simple"]
        "#,
    )
    .unwrap();
    AllowedIndexesUnit::new(config).run(&mut ctx).unwrap();

    assert_eq!(ctx.direct_identities(), vec![id("flask", "0.12.1")]);
    assert_eq!(ctx.transitive_identities(), vec![&id("werkzeug", "0.13")]);
}

#[test]
fn allowed_indexes_refusal_is_fatal() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("flask", "1.0.1", MIRROR, false));
    ctx.add_paths(vec![chain(vec![
        id_at("flask", "1.0.1", MIRROR),
        id("werkzeug", "0.14"),
    ])]);

    let config = AllowedIndexesConfig::from_toml_str(
        r#"
        allowed = ["https://pypi.org/simple"]
        "#,
    )
    .unwrap();
    let err = AllowedIndexesUnit::new(config).run(&mut ctx).unwrap_err();

    match err {
        PipelineError::NotAcceptable { unit, identity, .. } => {
            assert_eq!(unit, "allowed-indexes");
            assert_eq!(identity, id_at("flask", "1.0.1", MIRROR));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ctx.direct_candidates().len(), 1);
    assert_eq!(ctx.path_count(), 1);
}

#[test]
fn units_run_in_sequence_as_trait_objects() {
    let mut ctx = ResolutionContext::new();
    ctx.register_direct_candidate(Candidate::locked("flask", "0.12.1", DEFAULT_INDEX_URL, false));
    ctx.add_paths(vec![
        chain(vec![id("flask", "0.12.1"), id("werkzeug", "0.13")]),
        chain(vec![id("flask", "0.12.1"), id_at("markupsafe", "1.0", MIRROR)]),
        chain(vec![id("flask", "0.12.1"), id("six", "1.7.0")]),
    ]);

    let deny = DenylistConfig::from_toml_str(
        r#"
        [[deny]]
        name = "werkzeug"
        version = "0.13"
        "#,
    )
    .unwrap();
    let indexes = AllowedIndexesConfig::from_toml_str(
        r#"
        allowed = ["https://pypi.org/simple"]
        "#,
    )
    .unwrap();

    let mut units: Vec<Box<dyn PipelineUnit>> = vec![
        Box::new(DenylistUnit::new(deny)),
        Box::new(AllowedIndexesUnit::new(indexes)),
    ];
    for unit in &mut units {
        unit.run(&mut ctx).unwrap();
    }

    assert_eq!(ctx.path_count(), 1);
    assert_eq!(ctx.transitive_identities(), vec![&id("six", "1.7.0")]);
}
