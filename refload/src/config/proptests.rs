//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn properties_strategy() -> impl Strategy<Value = Option<BTreeMap<String, String>>> {
    prop::option::of(prop::collection::btree_map(
        "[A-Za-z_][A-Za-z0-9_]{0,8}",
        "[a-z/]{0,8}",
        0..5,
    ))
}

fn format_strategy() -> impl Strategy<Value = Option<OutputFormat>> {
    prop::option::of(prop_oneof![Just(OutputFormat::Text), Just(OutputFormat::Json)])
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        properties_strategy(),
        prop::option::of("[A-Z][A-Za-z]{0,12}"),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        format_strategy(),
    )
        .prop_map(
            |(properties, reference_element, follow_symlinks, environment_fallback, output_format)| {
                Config {
                    properties,
                    reference_element,
                    follow_symlinks,
                    environment_fallback,
                    output_format,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins for every field it sets
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.reference_element,
            high.reference_element.clone().or(low.reference_element.clone())
        );
        prop_assert_eq!(result.follow_symlinks, high.follow_symlinks.or(low.follow_symlinks));
        prop_assert_eq!(
            result.environment_fallback,
            high.environment_fallback.or(low.environment_fallback)
        );
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));

        let merged = result.global_properties();
        for (name, value) in high.global_properties() {
            prop_assert_eq!(merged.get(&name), Some(&value));
        }
        for (name, value) in low.global_properties() {
            if !high.global_properties().contains_key(&name) {
                prop_assert_eq!(merged.get(&name), Some(&value));
            }
        }
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging is associative
    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }

    // Generated configs only use valid names, so they always validate
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    // A property name with a macro delimiter is always rejected
    #[test]
    fn macro_delimiters_in_names_rejected(
        prefix in "[A-Za-z]{0,4}",
        delimiter in prop_oneof![Just('$'), Just('('), Just(')')],
        suffix in "[A-Za-z]{0,4}"
    ) {
        let name = format!("{prefix}{delimiter}{suffix}");
        let config = Config {
            properties: Some(BTreeMap::from([(name, String::new())])),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
