//! Filter registry and key lookup.
//!
//! The registry maps filter keys to their descriptors. It is built once per
//! table configuration by the caller and passed by reference to every merge,
//! hydrate and encode call; nothing in this crate holds one globally.

use crate::config::FilterConfig;
use crate::model::{Filter, FilterKey};
use std::collections::BTreeMap;

/// Read-only mapping from filter key to descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    filters: BTreeMap<FilterKey, Filter>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from the `filters` section of a config.
    pub fn from_config(config: &FilterConfig) -> Self {
        config
            .filters
            .iter()
            .map(|(key, filter)| (FilterKey::from(key.as_str()), filter.clone()))
            .collect()
    }

    /// Look up the descriptor registered under `key`.
    ///
    /// Accepts text or a [`FilterKey`]; both resolve identically. Unknown keys
    /// return `None`.
    pub fn resolve(&self, key: impl AsRef<str>) -> Option<&Filter> {
        self.filters.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.filters.contains_key(key.as_ref())
    }

    /// Descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, &Filter)> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<(FilterKey, Filter)> for Registry {
    fn from_iter<I: IntoIterator<Item = (FilterKey, Filter)>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    filters: BTreeMap<FilterKey, Filter>,
}

impl RegistryBuilder {
    /// Register a descriptor. A later registration under the same key replaces
    /// the earlier one.
    pub fn filter(mut self, key: impl Into<FilterKey>, filter: impl Into<Filter>) -> Self {
        self.filters.insert(key.into(), filter.into());
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            filters: self.filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BooleanFilter, FilterKind, MultiSelectFilter, SelectFilter};

    fn registry() -> Registry {
        Registry::builder()
            .filter("active", BooleanFilter::new("active", true))
            .filter("status", SelectFilter::new("status"))
            .filter("tags", MultiSelectFilter::new("tags"))
            .build()
    }

    #[test]
    fn resolves_registered_key() {
        let filter = registry().resolve("status").cloned();
        assert_eq!(filter.map(|f| f.kind()), Some(FilterKind::Select));
    }

    #[test]
    fn text_and_symbolic_keys_resolve_identically() {
        let registry = registry();
        let symbolic = FilterKey::from("tags");
        assert_eq!(registry.resolve("tags"), registry.resolve(&symbolic));
        assert!(registry.resolve(&symbolic).is_some());
    }

    #[test]
    fn unknown_key_is_absent() {
        assert!(registry().resolve("nonexistent").is_none());
        assert!(!registry().contains("nonexistent"));
    }

    #[test]
    fn later_registration_wins() {
        let registry = Registry::builder()
            .filter("status", SelectFilter::new("status"))
            .filter("status", MultiSelectFilter::new("status"))
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve("status").map(|f| f.kind()),
            Some(FilterKind::MultiSelect)
        );
    }

    #[test]
    fn iterates_in_key_order() {
        let keys: Vec<_> = registry().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["active", "status", "tags"]);
    }

    #[test]
    fn builds_from_config() {
        let mut config = FilterConfig::default();
        config
            .filters
            .insert("status".into(), SelectFilter::new("status").into());
        let registry = Registry::from_config(&config);
        assert!(registry.contains("status"));
        assert!(!registry.is_empty());
    }
}
