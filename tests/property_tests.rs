//! Property-based tests for path helpers, the option codec and extraction.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::path::{Component, Path};

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use tsproj::core::extract::{PreProcessor, ReferenceExtractor};
use tsproj::core::options::{
    current_key_name, internal_to_raw, raw_to_internal, validate_compiler_options,
};
use tsproj::core::paths::{consistent_path, make_relative_path, resolve_path};

/// Strategy for a single path segment, including `.` and `..`.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z][a-z0-9_]{0,7}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

/// Strategy for relative paths built from segments.
fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|segs| segs.join("/"))
}

/// Strategy for arbitrary compiler option values.
fn option_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9]{0,8}".prop_map(Value::from),
    ]
}

proptest! {
    /// Normalized paths never contain backslashes.
    #[test]
    fn consistent_path_has_no_backslashes(s in "[a-zA-Z0-9\\\\/._-]{0,40}") {
        prop_assert!(!consistent_path(&s).contains('\\'));
    }

    /// Lexical resolution removes every `.` and `..` component.
    #[cfg(unix)]
    #[test]
    fn resolve_path_is_normalized(rel in relative_path()) {
        let resolved = resolve_path(Path::new("/base/dir"), &rel);
        prop_assert!(resolved.is_absolute());
        prop_assert!(resolved
            .components()
            .all(|c| matches!(c, Component::RootDir | Component::Normal(_))));
    }

    /// Resolving the relative form of a path leads back to it.
    #[cfg(unix)]
    #[test]
    fn relative_path_round_trips(a in relative_path(), b in relative_path()) {
        let folder = resolve_path(Path::new("/root"), &a);
        let target = resolve_path(Path::new("/root"), &b);

        let rel = make_relative_path(&folder, &target);
        prop_assert!(rel.starts_with('.'));
        prop_assert_eq!(resolve_path(&folder, &rel), target);
    }

    /// Key canonicalization is idempotent.
    #[test]
    fn current_key_name_is_idempotent(key in "[a-zA-Z]{1,16}") {
        let once = current_key_name(&key);
        prop_assert_eq!(current_key_name(once), once);
    }

    /// Validation never panics, whatever the input.
    #[test]
    fn validation_is_total(
        entries in prop::collection::vec(("[a-zA-Z]{1,12}", option_value()), 0..6)
    ) {
        let raw: Map<String, Value> = entries.into_iter().collect();
        let _ = validate_compiler_options(&raw);
    }

    /// Persisted enum names survive raw → internal → raw.
    #[test]
    fn enum_names_round_trip(
        target in prop::sample::select(vec!["es3", "es5"]),
        module in prop::sample::select(vec!["commonjs", "amd"]),
    ) {
        let raw = json!({ "target": target, "module": module });
        let internal = raw_to_internal(raw.as_object().unwrap(), Path::new("/p"));
        let back = internal_to_raw(&internal);
        prop_assert_eq!(&back["target"], &json!(target));
        prop_assert_eq!(&back["module"], &json!(module));
        prop_assert!(validate_compiler_options(&back).is_ok());
    }

    /// Extraction never panics, and every reference is non-empty.
    #[test]
    fn extraction_is_total(text in "(?s).{0,200}") {
        let info = PreProcessor.extract(&text);
        prop_assert!(info.referenced_files.iter().all(|r| !r.is_empty()));
    }

    /// A reference tag is always found, whatever surrounds it.
    #[test]
    fn reference_tag_found(prefix in "[a-z ;\n]{0,20}", name in "[a-z]{1,10}") {
        let text = format!("{}\n/// <reference path=\"{}.ts\" />\n", prefix, name);
        let expected = format!("{}.ts", name);
        let info = PreProcessor.extract(&text);
        prop_assert!(info.referenced_files.contains(&expected));
    }
}
