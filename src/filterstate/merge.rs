//! Parameter merge engine.
//!
//! Folds raw params into the previous filter state. Every entry goes through
//! the first rule its shape and descriptor satisfy:
//!
//! | # | Raw value | Descriptor | Effect |
//! |---|-----------|------------|--------|
//! | 1 | `"true"` | Boolean | set to the descriptor's `key` |
//! | 2 | `{min, max}` | any | set to `{min, max}` as raw strings |
//! | 3 | `"false"` | any | remove the key |
//! | 4 | `["[…]"]` | Select | set to `{id: [first element]}` |
//! | 5 | list | MultiSelect | drop `""`s; remove if nothing left, else `{selected}` |
//! | 6 | map | Transformer | set to the map verbatim |
//! | 7 | anything else | | ignored |
//!
//! Unknown keys and kind mismatches are ignored rather than reported. The only
//! failure is rule 4 meeting a string that is not valid JSON, which is the
//! client's fault and is surfaced as [`FilterError::MalformedValue`].

use crate::error::{FilterError, Result};
use crate::model::{Filter, FilterKey};
use crate::params::{RawParams, RawValue};
use crate::registry::Registry;
use crate::state::{FilterState, Selection, TableOptions};
use serde_json::Value;
use tracing::{debug, trace};

/// Merge `params` into `previous`, replacing its filter sub-map.
///
/// Empty params return `previous` unchanged. Neither input is modified.
pub fn merge(previous: &TableOptions, params: &RawParams, registry: &Registry) -> Result<TableOptions> {
    if params.is_empty() {
        return Ok(previous.clone());
    }

    let filters = merge_filters(&previous.filters, params, registry)?;
    Ok(TableOptions {
        filters,
        rest: previous.rest.clone(),
    })
}

/// Merge `params` into a bare filter state.
pub fn merge_filters(
    previous: &FilterState,
    params: &RawParams,
    registry: &Registry,
) -> Result<FilterState> {
    params
        .iter()
        .try_fold(previous.clone(), |mut acc, (key, value)| {
            apply_entry(&mut acc, key, value, registry)?;
            Ok(acc)
        })
}

fn apply_entry(
    acc: &mut FilterState,
    key: &FilterKey,
    value: &RawValue,
    registry: &Registry,
) -> Result<()> {
    match value {
        RawValue::Literal(s) if s == "true" => match registry.resolve(key) {
            Some(Filter::Boolean(boolean)) => {
                trace!(%key, "boolean filter activated");
                acc.insert(key.clone(), Selection::flag(boolean.key().clone()));
            }
            other => skip(key, value, other),
        },
        RawValue::RangeBounds { min, max } => {
            trace!(%key, %min, %max, "range bounds set");
            acc.insert(key.clone(), Selection::range(min.as_str(), max.as_str()));
        }
        RawValue::Literal(s) if s == "false" => {
            trace!(%key, "boolean filter deactivated");
            acc.remove(key);
        }
        RawValue::BracketLiteral(raw) => {
            let id = decode_bracket(key, raw)?;
            match registry.resolve(key) {
                Some(Filter::Select(_)) => {
                    trace!(%key, %id, "select id set");
                    acc.insert(key.clone(), Selection::select(id));
                }
                other => skip(key, value, other),
            }
        }
        RawValue::StringList(items) => match registry.resolve(key) {
            Some(Filter::MultiSelect(_)) => {
                let selected: Vec<Value> = items
                    .iter()
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(item.clone()))
                    .collect();
                if selected.is_empty() {
                    trace!(%key, "multi-select cleared");
                    acc.remove(key);
                } else {
                    trace!(%key, count = selected.len(), "multi-select set");
                    acc.insert(key.clone(), Selection::multi_select(selected));
                }
            }
            other => skip(key, value, other),
        },
        RawValue::Map(map) => match registry.resolve(key) {
            Some(Filter::Transformer(_)) => {
                trace!(%key, "custom data set");
                acc.insert(key.clone(), Selection::custom(map.clone()));
            }
            other => skip(key, value, other),
        },
        RawValue::Literal(_) | RawValue::Unsupported(_) => skip(key, value, None),
    }
    Ok(())
}

/// Parse a bracket-form value and take its first element as the select id.
///
/// `"[]"` decodes to no element, which yields `null`.
fn decode_bracket(key: &FilterKey, raw: &str) -> Result<Value> {
    let decoded: Vec<Value> =
        serde_json::from_str(raw).map_err(|source| FilterError::MalformedValue {
            key: key.to_string(),
            value: raw.to_string(),
            source,
        })?;
    Ok(decoded.into_iter().next().unwrap_or(Value::Null))
}

fn skip(key: &FilterKey, value: &RawValue, descriptor: Option<&Filter>) {
    match descriptor {
        Some(filter) => debug!(
            %key,
            shape = value.shape(),
            kind = %filter.kind(),
            "ignoring filter param: kind mismatch"
        ),
        None => debug!(%key, shape = value.shape(), "ignoring filter param"),
    }
}
