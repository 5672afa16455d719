//! # Filterstate Architecture
//!
//! Filterstate keeps the filters of a tabular UI component in a canonical,
//! typed form. It sits between a web layer that decodes request params and a
//! query layer that turns filters into predicates, and it touches neither:
//! the crate only transforms data.
//!
//! ## The Pipeline
//!
//! ```text
//!   raw params (form / query string, decoded to JSON)
//!        │  params::RawParams::from_json
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  merge            previous state + raw params → new state   │
//! └─────────────────────────────────────────────────────────────┘
//!        │  state::TableOptions (stored by the caller)
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  hydrate          state + registry → live filter instances  │
//! └─────────────────────────────────────────────────────────────┘
//!        │  hydrate::LiveFilters (handed to the query builder)
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  encode           live filters → wire map for URLs / forms  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is a pure function over explicit inputs. The [`registry::Registry`]
//! of filter descriptors is built once by the caller and passed in; there is
//! no global state, so concurrent requests need no coordination.
//!
//! ## Failure Model
//!
//! Unknown filter keys and values whose shape doesn't fit the filter's kind
//! are ignored (and logged at `debug`). Only client mistakes that can't be
//! ignored are errors: a malformed bracket-form select value, and a range
//! bound that doesn't parse as the filter's type. Both report
//! [`error::FilterError::is_client_error`].
//!
//! ## Module Overview
//!
//! - [`api`]: Facade bundling registry and settings
//! - [`model`]: Filter kinds, descriptors and live instances
//! - [`registry`]: Descriptor lookup by key
//! - [`params`]: Classification of raw wire values
//! - [`state`]: Normalized state types
//! - [`merge`]: Folding raw params into state
//! - [`hydrate`]: Building live instances from state
//! - [`encode`]: Producing the wire map
//! - [`config`]: Configuration file
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod encode;
pub mod error;
pub mod hydrate;
pub mod merge;
pub mod model;
pub mod params;
pub mod registry;
pub mod state;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
