//! Property-based tests for project path canonicalization.
//!
//! The normalize module already has property tests for component resolution.
//! This module focuses on canonicalizer behavior.

use super::{PathCanonicalizer, ProjectPath};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

fn absolute_dir_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..6).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn reference_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(".".to_string()),
            Just("..".to_string()),
            path_component_strategy(),
        ],
        1..6,
    )
    .prop_map(|parts| format!("{}\\Project.csproj", parts.join("\\")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Canonicalizing an already canonical path returns it unchanged
    #[test]
    fn canonicalize_idempotent(dir in absolute_dir_strategy(), reference in reference_strategy()) {
        let canonicalizer = PathCanonicalizer::new();
        if let Ok(once) = canonicalizer.canonicalize(&dir, &reference, &reference) {
            let text = once.to_string();
            let twice = canonicalizer.canonicalize(Path::new("/"), &text, &text).unwrap();
            prop_assert_eq!(once.as_path(), twice.as_path());
        }
    }

    // Canonical paths are absolute and never contain dot components
    #[test]
    fn canonical_paths_are_clean(dir in absolute_dir_strategy(), reference in reference_strategy()) {
        let canonicalizer = PathCanonicalizer::new();
        if let Ok(path) = canonicalizer.canonicalize(&dir, &reference, &reference) {
            prop_assert!(path.as_path().is_absolute());
            prop_assert!(!path.to_string().contains("/./"));
            prop_assert!(!path.to_string().contains("/../"));
        }
    }

    // Joining onto the owner agrees with building the absolute path directly
    #[test]
    fn relative_and_absolute_spellings_agree(dir in absolute_dir_strategy(), name in path_component_strategy()) {
        let canonicalizer = PathCanonicalizer::new();
        let relative = format!("{name}.csproj");
        let absolute = dir.join(&relative);
        let from_relative = canonicalizer.canonicalize(&dir, &relative, &relative).unwrap();
        prop_assert_eq!(from_relative, ProjectPath::new(&absolute).unwrap());
    }
}
