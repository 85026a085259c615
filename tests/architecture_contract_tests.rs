//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_non_export_lines_in_mod_files, path_exists, read_relative,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "diesel::",
            "async_nats::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter::", "crate::infrastructure::", "diesel::", "async_nats::"],
    );
    assert!(
        hits.is_empty(),
        "application layer should only depend on ports and domain: {hits:#?}"
    );
}

#[test]
fn ports_do_not_name_concrete_technology() {
    let hits = find_lines_containing("src/port", &["diesel::", "async_nats::", "crate::adapter"]);
    assert!(hits.is_empty(), "ports must stay technology-neutral: {hits:#?}");
}

#[test]
fn diesel_is_confined_to_the_sqlite_adapter() {
    let hits: Vec<_> = find_lines_containing("src", &["use diesel"])
        .into_iter()
        .filter(|(path, _, _)| !path.starts_with("src/adapter/outbound/sqlite/"))
        .filter(|(path, _, _)| path != "src/infrastructure/bootstrap.rs")
        .collect();
    assert!(hits.is_empty(), "diesel used outside the sqlite adapter: {hits:#?}");
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn cli_operator_bridge_uses_operator_name() {
    let source = read_relative("src/adapter/inbound/cli/operator.rs");
    assert!(
        source.contains("pub fn operator() -> &'static dyn OperatorPort"),
        "operator bridge should expose `operator()` capability accessor"
    );
}

#[test]
fn operator_ports_are_transport_agnostic() {
    let hits = find_lines_containing("src/port/inbound/operator", &["std::path::Path", "PathBuf"]);
    assert!(
        hits.is_empty(),
        "operator inbound ports should not expose filesystem path types: {hits:#?}"
    );
}

#[test]
fn schema_is_created_by_migrations() {
    assert!(path_exists("migrations/2024-06-01-000000_create_orders/up.sql"));
    assert!(path_exists("migrations/2024-06-01-000000_create_orders/down.sql"));
}
