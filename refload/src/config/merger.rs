//! Combining configuration layers.
//!
//! A stronger layer replaces each scalar it sets; `properties` are combined
//! name by name.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Folds configuration layers into one.
///
/// # Examples
///
/// ```
/// use refload::config::{Config, ConfigMerger};
///
/// let low = Config { follow_symlinks: Some(false), ..Default::default() };
/// let high = Config { follow_symlinks: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.follow_symlinks, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Fold `sources`, given weakest first, over the defaults.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Apply `source` on top of `target`.
    ///
    /// Every scalar `source` sets replaces the one in `target`. Properties
    /// are unioned, with `source` winning on a shared name.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.reference_element.is_some() {
            target.reference_element.clone_from(&source.reference_element);
        }

        if source.include_attribute.is_some() {
            target.include_attribute.clone_from(&source.include_attribute);
        }

        if source.shared_items_extension.is_some() {
            target
                .shared_items_extension
                .clone_from(&source.shared_items_extension);
        }

        if source.shared_project_extension.is_some() {
            target
                .shared_project_extension
                .clone_from(&source.shared_project_extension);
        }

        if source.follow_symlinks.is_some() {
            target.follow_symlinks = source.follow_symlinks;
        }

        if source.environment_fallback.is_some() {
            target.environment_fallback = source.environment_fallback;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_properties) = source.properties {
            match &mut target.properties {
                Some(target_properties) => {
                    target_properties.extend(
                        source_properties
                            .iter()
                            .map(|(k, v)| (k.clone(), v.clone())),
                    );
                }
                None => target.properties = Some(source_properties.clone()),
            }
        }
    }
}
