//! Import/export of `{schema, steps?}` documents.
//!
//! Export is plain serialization. Import never rejects a decodable
//! document: `coerce` degrades malformed parts to defaults, and only byte
//! level decode failures surface as `TransportError`.

use crate::id::{FieldId, StepId};
use crate::model::{FormState, Schema, SchemaEntry, StepEntry, Steps};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid MessagePack: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
    #[error("MessagePack encoding failed: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
}

// ─── Import ──────────────────────────────────────────────────────────────

/// Coerce an arbitrary candidate into a form state.
///
/// Returns `None` for an empty candidate (`null`, `false`, `0`, `""`),
/// which callers treat as "keep the current state". Otherwise:
/// - `schema` must be an object, else the schema is empty; `null` values
///   are deleted keys, dropped from the schema and from every step; entries
///   are typed when possible and kept raw otherwise.
/// - `steps` must be a non-empty object, else steps are absent; steps that
///   are not objects are dropped, and attributes that do not decode are
///   carried along untouched.
pub fn coerce(candidate: &Value) -> Option<FormState> {
    if is_empty_candidate(candidate) {
        return None;
    }

    let mut deleted = Vec::new();
    let schema = match candidate.get("schema") {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| {
                let id = FieldId::intern(key);
                if value.is_null() {
                    deleted.push(id);
                    return None;
                }
                Some((id, SchemaEntry::from_value(value.clone())))
            })
            .collect(),
        None | Some(Value::Null) => Schema::new(),
        Some(other) => {
            log::warn!("import: `schema` is {}, using an empty schema", kind_of(other));
            Schema::new()
        }
    };

    let steps = match candidate.get("steps") {
        Some(Value::Object(map)) if !map.is_empty() => {
            let steps: Steps = map
                .iter()
                .filter_map(|(key, value)| match StepEntry::from_value(value.clone()) {
                    Some(mut step) => {
                        step.elements.retain(|el| !deleted.contains(el));
                        Some((StepId::intern(key), step))
                    }
                    None => {
                        log::warn!("import: dropping step `{key}`, it is {}", kind_of(value));
                        None
                    }
                })
                .collect();
            (!steps.is_empty()).then_some(steps)
        }
        _ => None,
    };

    Some(FormState { schema, steps })
}

fn is_empty_candidate(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn from_json_str(input: &str) -> Result<Option<FormState>, TransportError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(coerce(&value))
}

/// Decode MessagePack into a JSON value without coercing it.
pub fn msgpack_to_value(bytes: &[u8]) -> Result<Value, TransportError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

pub fn from_msgpack(bytes: &[u8]) -> Result<Option<FormState>, TransportError> {
    Ok(coerce(&msgpack_to_value(bytes)?))
}

// ─── Export ──────────────────────────────────────────────────────────────

pub fn to_value(state: &FormState) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(state)?)
}

pub fn to_json(state: &FormState) -> Result<String, TransportError> {
    Ok(serde_json::to_string(state)?)
}

pub fn to_json_pretty(state: &FormState) -> Result<String, TransportError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// MessagePack with field names, so decoders see the same map shape as JSON.
pub fn to_msgpack(state: &FormState) -> Result<Vec<u8>, TransportError> {
    Ok(rmp_serde::to_vec_named(state)?)
}
