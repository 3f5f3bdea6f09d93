//! Two-phase boot tests
//!
//! Verifies ordering, abort-on-first-failure in phase 1, failure isolation in
//! phase 2, and license check caching across phases.

mod common;

use common::*;
use modhost_core::types::BootPhase;
use modhost_core::Error;
use modhost_lifecycle::{
    LoadState, ModulePlugin, OpenLicenseGate, PluginTable, TwoPhaseLoader,
};
use std::sync::Arc;

fn active_store(names: &[&str]) -> Arc<modhost_lifecycle::MemoryModuleStore> {
    memory_store(names.iter().map(|n| ModuleBuilder::active(n).build()).collect())
}

#[tokio::test]
async fn test_phase_one_halts_at_first_failure() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register("a", ModulePlugin::new().with_init(RecordingEntry::failing(&journal)));
    plugins.register("b", ModulePlugin::new().with_init(RecordingEntry::ok(&journal)));
    plugins.register("c", ModulePlugin::new().with_init(RecordingEntry::ok(&journal)));

    let loader = TwoPhaseLoader::new(
        active_store(&["a", "b", "c"]),
        plugins,
        Arc::new(OpenLicenseGate),
        "/srv/app",
    );
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();

    assert!(!outcome.completed());
    assert_eq!(journal.calls(), vec!["a:init"]);

    let a = outcome.sequence.get("a").unwrap();
    assert!(!a.init);
    assert_eq!(a.state, LoadState::InitFailed);
    assert_eq!(outcome.sequence.get("b").unwrap().state, LoadState::Pending);
    assert_eq!(outcome.sequence.get("c").unwrap().state, LoadState::Pending);
}

#[tokio::test]
async fn test_phase_two_continues_past_failure() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register("a", ModulePlugin::new().with_init_after(RecordingEntry::ok(&journal)));
    plugins.register(
        "b",
        ModulePlugin::new().with_init_after(RecordingEntry::failing(&journal)),
    );
    plugins.register("c", ModulePlugin::new().with_init_after(RecordingEntry::ok(&journal)));

    let loader = TwoPhaseLoader::new(
        active_store(&["a", "b", "c"]),
        plugins,
        Arc::new(OpenLicenseGate),
        "/srv/app",
    );
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();
    assert!(outcome.completed());

    let report = loader.run_phase_two(outcome.sequence, &(), &(), &()).await;

    assert_eq!(journal.calls(), vec!["a:initAfter", "b:initAfter", "c:initAfter"]);
    assert_eq!(report.loaded(), vec!["a", "c"]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        Error::EntryPoint { phase: BootPhase::InitAfter, .. }
    ));
}

#[tokio::test]
async fn test_license_checked_once_across_phases() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register(
        "shop",
        ModulePlugin::new()
            .with_init(RecordingEntry::ok(&journal))
            .with_init_after(RecordingEntry::ok(&journal)),
    );

    let mut gate = MockGate::new();
    gate.expect_is_licensed()
        .withf(|module| module == "shop")
        .times(1)
        .return_const(true);

    let loader = TwoPhaseLoader::new(active_store(&["shop"]), plugins, Arc::new(gate), "/srv/app");
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();
    assert!(outcome.sequence.get("shop").unwrap().valid);

    let report = loader.run_phase_two(outcome.sequence, &(), &(), &()).await;
    assert_eq!(report.loaded(), vec!["shop"]);
    assert_eq!(journal.calls(), vec!["shop:init", "shop:initAfter"]);
}

#[tokio::test]
async fn test_unlicensed_module_is_rejected_before_its_entry_runs() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register("shop", ModulePlugin::new().with_init(RecordingEntry::ok(&journal)));
    plugins.register("stock", ModulePlugin::new().with_init(RecordingEntry::ok(&journal)));

    let mut gate = MockGate::new();
    gate.expect_is_licensed().times(1).return_const(false);

    let loader = TwoPhaseLoader::new(
        active_store(&["shop", "stock"]),
        plugins,
        Arc::new(gate),
        "/srv/app",
    );
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();

    assert!(journal.calls().is_empty());
    assert_eq!(outcome.sequence.get("shop").unwrap().state, LoadState::Rejected);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.module, "shop");
    assert!(matches!(failure.error, Error::LicenseCheckFailed { .. }));
}

#[tokio::test]
async fn test_phase_two_entry_without_phase_one_entry_checks_license() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register(
        "stock",
        ModulePlugin::new().with_init_after(RecordingEntry::ok(&journal)),
    );

    let mut gate = MockGate::new();
    gate.expect_is_licensed().times(1).return_const(true);

    let loader = TwoPhaseLoader::new(
        active_store(&["shop", "stock"]),
        plugins,
        Arc::new(gate),
        "/srv/app",
    );
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();
    assert!(outcome.sequence.records().iter().all(|r| r.init && !r.valid));

    let report = loader.run_phase_two(outcome.sequence, &(), &(), &()).await;
    assert_eq!(report.loaded(), vec!["shop", "stock"]);
    assert_eq!(journal.calls(), vec!["stock:initAfter"]);
}

#[tokio::test]
async fn test_inactive_modules_are_not_booted() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register("archive", ModulePlugin::new().with_init(RecordingEntry::ok(&journal)));

    let store = memory_store(vec![
        ModuleBuilder::new("archive").build(),
        ModuleBuilder::active("shop").build(),
    ]);
    let loader = TwoPhaseLoader::new(store, plugins, Arc::new(OpenLicenseGate), "/srv/app");
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();

    assert_eq!(outcome.sequence.len(), 1);
    assert!(outcome.sequence.get("archive").is_none());
    assert!(journal.calls().is_empty());
}

#[tokio::test]
async fn test_aborted_sequence_boots_nothing_in_phase_two() {
    let journal = Journal::new();
    let mut plugins = PluginTable::<TestHost>::new();
    plugins.register("a", ModulePlugin::new().with_init(RecordingEntry::failing(&journal)));
    plugins.register(
        "b",
        ModulePlugin::new()
            .with_init(RecordingEntry::ok(&journal))
            .with_init_after(RecordingEntry::ok(&journal)),
    );

    let loader = TwoPhaseLoader::new(
        active_store(&["a", "b"]),
        plugins,
        Arc::new(OpenLicenseGate),
        "/srv/app",
    );
    let outcome = loader.run_phase_one(&(), &()).await.unwrap();
    assert!(!outcome.completed());

    let report = loader.run_phase_two(outcome.sequence, &(), &(), &()).await;

    assert!(report.modules.is_empty());
    assert!(report.loaded().is_empty());
    assert_eq!(journal.calls(), vec!["a:init"]);
}
