//! Turning normalized state into live filter instances.
//!
//! The merge keeps range bounds as the raw strings the client sent. Hydration
//! pairs each stored selection with its descriptor, parses bounds according to
//! the range type, and yields the live instances the encoder (and any query
//! builder) work from.

use crate::error::{FilterError, Result};
use crate::model::{Bound, Filter, FilterKey, RangeType};
use crate::registry::Registry;
use crate::state::{FilterState, Selection};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Live filter instances keyed by filter key.
pub type LiveFilters = BTreeMap<FilterKey, Filter>;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Seconds and fraction are optional: `datetime-local` inputs omit them.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Build live instances for every entry in `state` the registry knows.
///
/// Unknown keys and selections whose shape does not fit the descriptor's kind
/// are skipped. Range bounds that don't parse are a client error.
pub fn hydrate(state: &FilterState, registry: &Registry) -> Result<LiveFilters> {
    let mut live = LiveFilters::new();
    for (key, selection) in state {
        let Some(descriptor) = registry.resolve(key) else {
            debug!(%key, "skipping state entry: no such filter");
            continue;
        };
        if let Some(filter) = hydrate_one(key, descriptor, selection)? {
            live.insert(key.clone(), filter);
        }
    }
    Ok(live)
}

/// Apply one stored selection to a copy of its descriptor.
pub fn hydrate_one(
    key: &FilterKey,
    descriptor: &Filter,
    selection: &Selection,
) -> Result<Option<Filter>> {
    let filter = match (descriptor, selection) {
        (Filter::Boolean(boolean), Selection::Flag(_)) => Filter::Boolean(boolean.clone()),
        (Filter::Range(range), Selection::Range(bounds)) => {
            let ty = range.range_type();
            let min = match parse_bound(key, &bounds.min, ty)? {
                Some(bound) => Some(bound),
                None => default_bound(key, range.default_min(), ty)?,
            };
            let max = match parse_bound(key, &bounds.max, ty)? {
                Some(bound) => Some(bound),
                None => default_bound(key, range.default_max(), ty)?,
            };
            Filter::Range(range.clone().with_bounds(min, max))
        }
        (Filter::Select(select), Selection::Select(ids)) => {
            let selected = ids.id.iter().find(|id| !id.is_null()).cloned();
            Filter::Select(select.clone().with_selected(selected))
        }
        (Filter::MultiSelect(multi), Selection::MultiSelect(list)) => {
            Filter::MultiSelect(multi.clone().with_selected(list.selected.clone()))
        }
        (Filter::Transformer(transformer), selection) => match selection.to_map() {
            Some(data) => Filter::Transformer(transformer.clone().with_applied_data(data)),
            None => {
                debug!(%key, "skipping state entry: transformer data is not a map");
                return Ok(None);
            }
        },
        (descriptor, _) => {
            debug!(
                %key,
                kind = %descriptor.kind(),
                "skipping state entry: selection does not fit filter kind"
            );
            return Ok(None);
        }
    };
    Ok(Some(filter))
}

/// Parse a raw range bound. Blank input means "unbounded".
pub fn parse_bound(key: &FilterKey, raw: &str, range_type: RangeType) -> Result<Option<Bound>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let bound = match range_type {
        RangeType::Number => parse_number(raw).map(Bound::Number),
        RangeType::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .map(Bound::Date),
        RangeType::DateTime => DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(Bound::DateTime),
    };

    bound.map(Some).ok_or_else(|| FilterError::InvalidBound {
        key: key.to_string(),
        value: raw.to_string(),
        expected: range_type,
    })
}

/// Configured fallback for a blank bound. Strings parse like submitted
/// bounds; a JSON number is taken as-is for number ranges.
fn default_bound(
    key: &FilterKey,
    default: Option<&Value>,
    range_type: RangeType,
) -> Result<Option<Bound>> {
    match (default, range_type) {
        (None, _) | (Some(Value::Null), _) => Ok(None),
        (Some(Value::String(raw)), _) => parse_bound(key, raw, range_type),
        (Some(Value::Number(n)), RangeType::Number) => Ok(Some(Bound::Number(n.clone()))),
        (Some(other), _) => Err(FilterError::InvalidBound {
            key: key.to_string(),
            value: other.to_string(),
            expected: range_type,
        }),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}
