//! Loading the frozen class table from disk.

mod common;

use scriptorium_analysis::classification::{Classification, Classifier, Role, RoleMap};
use scriptorium_analysis::morphology::Decomposer;
use scriptorium_core::errors::{ClassificationError, ScriptoriumErrorCode};
use tempfile::TempDir;

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let (_, table) = common::write_fixtures(dir.path());
    let classifier = Classifier::load(&table, &Decomposer::with_default_table()).unwrap();

    assert_eq!(classifier.classify("otaly"), Classification::Instruction(33));
    assert_eq!(classifier.classify("Kol"), Classification::Instruction(7));
    assert_eq!(classifier.classify("qokeedy"), Classification::OutsideGrammar);
    assert_eq!(classifier.table().version.as_deref(), Some("fixture-1"));

    let info = classifier.class(10).unwrap();
    assert_eq!(info.role, Role::CoreControl);
    assert!(info.atomic);
    assert!(info.infrastructure);
    assert_eq!(classifier.atomic_classes(), vec![10]);
}

#[test]
fn test_missing_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = Classifier::load(&dir.path().join("none.json"), &Decomposer::with_default_table())
        .unwrap_err();
    assert!(matches!(err, ClassificationError::Io { .. }));
    assert_eq!(err.error_code(), "CLASSIFICATION_UNREADABLE");
}

#[test]
fn test_inconsistent_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = common::write(
        dir.path(),
        "bad.json",
        r#"{"token_to_class": {"ol": 1}, "class_to_tokens": {"2": ["ol"]}}"#,
    );
    let err = Classifier::load(&path, &Decomposer::with_default_table()).unwrap_err();
    assert!(matches!(err, ClassificationError::Inconsistent(_)));
}

#[test]
fn test_get_role_is_total() {
    let classifier = common::small_classifier();
    for id in 0..=u16::MAX {
        let role = classifier.get_role(id);
        if !(1..=49).contains(&id) {
            assert_eq!(role, Role::Unknown);
        } else {
            assert_ne!(role, Role::Unknown);
        }
    }
}

#[test]
fn test_custom_role_map() {
    let roles = RoleMap::new([(Role::FlowOperator, vec![1, 2]), (Role::Auxiliary, vec![3])])
        .unwrap();
    assert_eq!(roles.get_role(2), Role::FlowOperator);
    assert_eq!(roles.get_role(4), Role::Unknown);
    assert_eq!(roles.members(Role::FlowOperator), vec![1, 2]);
}
