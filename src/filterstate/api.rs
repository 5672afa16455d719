//! # API Facade
//!
//! [`FilterApi`] bundles a [`Registry`] with the engine settings from
//! [`FilterConfig`] so callers don't have to thread both through every call.
//! It adds no logic of its own: each method dispatches to the matching module
//! function (`merge`, `hydrate`, `encode`).
//!
//! The facade holds no per-request state. One instance can serve any number
//! of concurrent requests; each call takes its own previous state and params
//! and returns fresh values.

use crate::config::FilterConfig;
use crate::encode::{self, EncodeOptions, WireMap};
use crate::error::Result;
use crate::hydrate::{self, LiveFilters};
use crate::merge;
use crate::params::RawParams;
use crate::registry::Registry;
use crate::state::{FilterState, TableOptions};

/// Everything one request produces: the state to store, the live filters to
/// build a query from, and the wire map to send back.
#[derive(Debug, Clone)]
pub struct Applied {
    pub options: TableOptions,
    pub live: LiveFilters,
    pub wire: WireMap,
}

#[derive(Debug, Clone)]
pub struct FilterApi {
    registry: Registry,
    encode_options: EncodeOptions,
    params_key: String,
}

impl FilterApi {
    pub fn new(registry: Registry, config: &FilterConfig) -> Self {
        Self {
            registry,
            encode_options: EncodeOptions {
                select_null: config.select_null,
            },
            params_key: config.params_key.clone(),
        }
    }

    /// Build the registry from the config's own filter definitions.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(Registry::from_config(config), config)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Key of the request-params sub-map holding filter entries.
    pub fn params_key(&self) -> &str {
        &self.params_key
    }

    pub fn merge(&self, previous: &TableOptions, params: &RawParams) -> Result<TableOptions> {
        merge::merge(previous, params, &self.registry)
    }

    pub fn hydrate(&self, state: &FilterState) -> Result<LiveFilters> {
        hydrate::hydrate(state, &self.registry)
    }

    pub fn encode(&self, live: &LiveFilters) -> WireMap {
        encode::encode(live, &self.encode_options)
    }

    /// Hydrate then encode a stored state.
    pub fn encode_state(&self, state: &FilterState) -> Result<WireMap> {
        let live = self.hydrate(state)?;
        Ok(self.encode(&live))
    }

    /// Merge, hydrate and encode in one go.
    pub fn apply(&self, previous: &TableOptions, params: &RawParams) -> Result<Applied> {
        let options = self.merge(previous, params)?;
        let live = self.hydrate(&options.filters)?;
        let wire = self.encode(&live);
        Ok(Applied {
            options,
            live,
            wire,
        })
    }
}
