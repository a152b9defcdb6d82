//! Strict JSON decoding into typed envelopes.
//!
//! `decode` never fails outward: every parse error becomes a `Decoded` with
//! `ok == false`, a `DecodeErrorKind`, and a readable message.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

/// Why a payload could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Not valid JSON at all, or truncated.
    CorruptedData,
    /// A required key is absent.
    KeyNotFound,
    /// A required value is `null`.
    ValueNotFound,
    /// A value has the wrong type or an unacceptable value.
    TypeMismatch,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DecodeErrorKind::CorruptedData => "corrupted data",
            DecodeErrorKind::KeyNotFound => "key not found",
            DecodeErrorKind::ValueNotFound => "value not found",
            DecodeErrorKind::TypeMismatch => "type mismatch",
        };
        f.write_str(text)
    }
}

impl DecodeErrorKind {
    fn classify(err: &serde_json::Error) -> Self {
        match err.classify() {
            Category::Io | Category::Syntax | Category::Eof => DecodeErrorKind::CorruptedData,
            Category::Data => {
                let text = err.to_string();
                if text.starts_with("missing field") {
                    DecodeErrorKind::KeyNotFound
                } else if text.starts_with("invalid type: null") {
                    DecodeErrorKind::ValueNotFound
                } else {
                    DecodeErrorKind::TypeMismatch
                }
            }
        }
    }
}

/// Outcome of one decode attempt. `value` is present iff `ok`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    ok: bool,
    message: String,
    value: Option<T>,
    kind: Option<DecodeErrorKind>,
}

impl<T> Decoded<T> {
    pub fn success(value: T) -> Self {
        Self {
            ok: true,
            message: String::new(),
            value: Some(value),
            kind: None,
        }
    }

    pub fn failure(kind: DecodeErrorKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = kind.to_string();
        }
        Self {
            ok: false,
            message,
            value: None,
            kind: Some(kind),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Failure description; empty on success.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn kind(&self) -> Option<DecodeErrorKind> {
        self.kind
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

/// Parse `bytes` as JSON into `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Decoded<T> {
    match serde_json::from_slice::<T>(bytes) {
        Ok(value) => Decoded::success(value),
        Err(err) => {
            let kind = DecodeErrorKind::classify(&err);
            debug!(
                kind = %kind,
                line = err.line(),
                column = err.column(),
                shape = std::any::type_name::<T>(),
                "decode failed: {err}"
            );
            Decoded::failure(kind, format!("{kind}: {err}"))
        }
    }
}
