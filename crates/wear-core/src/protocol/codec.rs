//! Payload codec: positional value arrays ↔ named, typed commands.
//!
//! Wire format: `payload[0]` is the command id (the command's position in
//! the registry declaration order); `payload[i]` for `i ≥ 1` is the value of
//! whichever parameter of that command was assigned ordinal `i`.
//!
//! Decoding never fails loudly: an unknown command id yields `None` (the
//! message is dropped by design, not reported), short payloads leave the
//! missing trailing parameters as `Null`, and extra payload slots with no
//! matching ordinal are discarded.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::trace;

use crate::protocol::registry::CommandRegistry;
use crate::protocol::value::Value;

/// Errors that can occur when encoding a command for the wire.
///
/// Decoding has no error type: every malformed inbound shape degrades to
/// `None` or `Null` parameters instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The command name is not in the registry.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A supplied parameter is not declared for the command.
    #[error("command {command} has no parameter named {param}")]
    UnknownParam { command: String, param: String },
}

/// Named parameter map of a decoded command.
///
/// Every parameter declared in the schema is present; absent payload slots
/// are `Value::Null`, never a missing key, so the shape of a decoded command
/// is fully determined by its schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// An empty parameter map (for internally-generated commands).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the value for `name`, with `Null` standing in for keys that
    /// were never set.
    pub fn get(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&Value::Null)
    }

    /// Integer accessor; `None` for nulls and non-integers.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).as_int()
    }

    /// String accessor.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).as_str()
    }

    /// Loose truthiness of the named parameter.
    pub fn truthy(&self, name: &str) -> bool {
        self.get(name).truthy()
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A payload resolved against the registry: the command name plus its fully
/// populated parameter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCommand {
    pub name: String,
    pub params: Params,
}

/// Decodes one payload against the registry.
///
/// Returns `None` when `payload` is empty, when `payload[0]` is not an
/// integer, or when the id has no registered schema – all silently-ignored
/// conditions, by design.
pub fn decode_payload(registry: &CommandRegistry, payload: &[Value]) -> Option<DecodedCommand> {
    let id = payload.first()?.as_int()?;
    let id = u16::try_from(id).ok()?;
    let Some(schema) = registry.by_id(id) else {
        trace!(id, "payload addresses an unregistered command; dropping");
        return None;
    };

    // Every declared parameter starts out Null so the decoded shape does not
    // depend on which payload slots were present.
    let mut params = Params::new();
    for p in &schema.params {
        params.set(p.name.clone(), Value::Null);
    }

    for (index, value) in payload.iter().enumerate().skip(1) {
        let Ok(ordinal) = u8::try_from(index) else {
            break;
        };
        match schema.param_by_ordinal(ordinal) {
            Some(p) => {
                params.set(p.name.clone(), p.coercion.apply(value));
            }
            // No parameter was assigned this ordinal: the slot is dropped.
            None => continue,
        }
    }

    Some(DecodedCommand {
        name: schema.name.clone(),
        params,
    })
}

/// Encodes a named command into its positional payload.
///
/// Each parameter value lands at its declared ordinal (coerced, so the wire
/// always carries device-typed values); interior gaps are `Null` and
/// trailing nulls are trimmed.
///
/// # Errors
///
/// [`CodecError::UnknownCommand`] for an unregistered name and
/// [`CodecError::UnknownParam`] when `params` contains an undeclared key.
pub fn encode_command(
    registry: &CommandRegistry,
    name: &str,
    params: &Params,
) -> Result<Vec<Value>, CodecError> {
    let schema = registry
        .by_name(name)
        .ok_or_else(|| CodecError::UnknownCommand(name.to_string()))?;

    for (key, _) in params.iter() {
        if schema.param_by_name(key).is_none() {
            return Err(CodecError::UnknownParam {
                command: name.to_string(),
                param: key.to_string(),
            });
        }
    }

    let mut payload = vec![Value::Null; schema.params.len() + 1];
    payload[0] = Value::Int(i64::from(schema.id));
    for p in &schema.params {
        let value = params.get(&p.name);
        if !value.is_null() {
            payload[usize::from(p.ordinal)] = p.coercion.apply(value);
        }
    }

    while payload.len() > 1 && payload.last().is_some_and(Value::is_null) {
        payload.pop();
    }
    Ok(payload)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
