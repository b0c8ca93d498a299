//! Asset validation pipeline behaviour against an in-memory store.

mod common;

use common::{Harness, Probe, Setting, registry_with_probe};
use pretty_assertions::assert_eq;
use rstest::rstest;
use vigil_config::ValidationSettings;
use vigil_core::{AssetKind, ContextRef, MemoryStore, Object, ObjectId, StoreError};
use vigil_validate::{AssetValidationPipeline, PipelineError, PipelineReport};

fn settings(composites: bool, leaves: bool) -> ValidationSettings {
    ValidationSettings {
        validate_composites: composites,
        validate_leaves: leaves,
        search_paths: Vec::new(),
    }
}

#[test]
fn disabled_kinds_issue_no_store_query() {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert("configs/a", AssetKind::Leaf, Object::new("a", "A").with_part(Probe));

    let report = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(false, false), &h.asserter())
        .expect("nothing to validate");

    assert_eq!(report, PipelineReport::default());
    assert_eq!(store.query_count(), 0);
}

#[test]
fn failing_leaf_raises_one_violation_attributed_to_its_path() {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert(
        "configs/a",
        AssetKind::Leaf,
        Object::new("a", "A").with_part(Setting::invalid("bad config")),
    );

    let err = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter())
        .expect_err("leaf is invalid");

    let PipelineError::Violation(violation) = err else {
        panic!("expected a violation, got {err:?}");
    };
    assert_eq!(violation.message(), "bad config");
    assert_eq!(violation.context().asset_path(), Some("configs/a"));
    assert!(violation.cause().is_none());
    assert_eq!(h.sink.len(), 1);
}

#[test]
fn deep_composite_failure_is_attributed_to_root_path() {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let truck = Object::new("truck", "Truck").with_part(Setting::valid()).with_child(
        Object::new("chassis", "Chassis").with_child(
            Object::new("axle", "Axle").with_child(
                Object::new("wheel", "Wheel").with_part(Setting::invalid("wheel radius is zero")),
            ),
        ),
    );
    let mut store = MemoryStore::new();
    store.insert("prefabs/truck", AssetKind::Composite, truck);

    let err = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter())
        .expect_err("wheel is invalid");

    let PipelineError::Violation(violation) = err else {
        panic!("expected a violation, got {err:?}");
    };
    assert_eq!(violation.context(), &ContextRef::asset("prefabs/truck"));
    assert_eq!(violation.message(), "wheel radius is zero");
    assert_eq!(
        violation.root_cause().context(),
        &ContextRef::entity(ObjectId::new("wheel"), "Wheel")
    );
    assert_eq!(h.sink.len(), 1);
    assert_eq!(h.presenter.failures().len(), 1);
}

#[test]
fn composite_validates_every_descendant_not_only_root() {
    let h = Harness::authoring();
    let (registry, calls) = registry_with_probe();
    let rig = Object::new("rig", "Rig")
        .with_part(Probe)
        .with_child(Object::new("a", "A").with_part(Probe))
        .with_child(Object::new("b", "B").with_child(Object::new("c", "C").with_part(Probe)));
    let mut store = MemoryStore::new();
    store.insert("prefabs/rig", AssetKind::Composite, rig);

    let report = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter())
        .expect("all probes pass");

    assert_eq!(calls.get(), 3);
    assert_eq!(report.parts_validated, 3);
    assert_eq!(report.objects_validated, 1);
}

#[test]
fn stops_after_first_failing_object() {
    let h = Harness::authoring();
    let (registry, calls) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert(
        "configs/a",
        AssetKind::Leaf,
        Object::new("a", "A").with_part(Setting::invalid("first")),
    );
    store.insert("configs/b", AssetKind::Leaf, Object::new("b", "B").with_part(Probe));

    let result = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter());

    assert!(matches!(result, Err(PipelineError::Violation(_))));
    assert_eq!(calls.get(), 0);
}

#[rstest]
#[case(settings(false, true), 1, 1)]
#[case(settings(true, false), 1, 1)]
#[case(settings(true, true), 2, 0)]
fn kind_toggles_skip_objects(
    #[case] settings: ValidationSettings,
    #[case] validated: usize,
    #[case] skipped: usize,
) {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert(
        "prefabs/p",
        AssetKind::Composite,
        Object::new("p", "P").with_part(Probe),
    );
    store.insert("configs/c", AssetKind::Leaf, Object::new("c", "C").with_part(Probe));

    let report = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings, &h.asserter())
        .expect("probes pass");

    assert_eq!(report.objects_discovered, 2);
    assert_eq!(report.objects_validated, validated);
    assert_eq!(report.objects_skipped, skipped);
}

#[test]
fn unloadable_object_is_skipped_silently() {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert_missing("configs/gone", AssetKind::Leaf, ObjectId::new("gone"));

    let report = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter())
        .expect("absence is not a failure");

    assert_eq!(report.objects_skipped, 1);
    assert!(h.sink.is_empty());
}

#[test]
fn search_paths_restrict_discovery() {
    let h = Harness::authoring();
    let (registry, calls) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.insert("configs/a", AssetKind::Leaf, Object::new("a", "A").with_part(Probe));
    store.insert(
        "scratch/b",
        AssetKind::Leaf,
        Object::new("b", "B").with_part(Setting::invalid("never reached")),
    );

    let settings = ValidationSettings {
        search_paths: vec!["configs".to_string()],
        ..ValidationSettings::default()
    };
    let report = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings, &h.asserter())
        .expect("scratch is outside the search paths");

    assert_eq!(report.objects_discovered, 1);
    assert_eq!(calls.get(), 1);
}

#[test]
fn store_failure_propagates() {
    let h = Harness::authoring();
    let (registry, _) = registry_with_probe();
    let mut store = MemoryStore::new();
    store.mark_unavailable("index corrupted");

    let err = AssetValidationPipeline::new(&store, &registry)
        .run_on_store(&settings(true, true), &h.asserter())
        .expect_err("store is down");

    assert!(matches!(
        err,
        PipelineError::Store(StoreError::Unavailable(ref reason)) if reason == "index corrupted"
    ));
    assert!(h.sink.is_empty());
}
