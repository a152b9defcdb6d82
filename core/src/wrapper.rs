//! Network-level outcomes and the caller-facing typed results built from them.
//!
//! # Design
//! `TransportOutcome` is what the executor produces: raw bytes on success,
//! a message on failure. `ResponseWrapper<E>` is what the caller receives
//! after the payload has been decoded into envelope `E`. Both keep their
//! fields private so `value` can only be present when `ok` is true.

use serde::de::DeserializeOwned;

use crate::decode::{decode, Decoded};
use crate::types::{ResponseArray, ResponseObject};

const UNKNOWN_FAILURE: &str = "Unknown error";

fn non_empty(message: String) -> String {
    if message.is_empty() {
        UNKNOWN_FAILURE.to_string()
    } else {
        message
    }
}

/// Classified result of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOutcome {
    ok: bool,
    message: String,
    payload: Option<Vec<u8>>,
}

impl TransportOutcome {
    pub fn success(message: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: non_empty(message.into()),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Decode the payload as a single-object envelope.
    pub fn into_object<T: DeserializeOwned>(self) -> TypedResult<T> {
        self.unwrap_with(decode::<ResponseObject<T>>)
    }

    /// Decode the payload as a list envelope.
    pub fn into_list<T: DeserializeOwned>(self) -> TypedResultList<T> {
        self.unwrap_with(decode::<ResponseArray<T>>)
    }

    /// Run `decoder` over the payload at most once.
    ///
    /// A failed outcome, or a successful one without payload, is passed
    /// through without calling `decoder`.
    pub fn unwrap_with<E, F>(self, decoder: F) -> ResponseWrapper<E>
    where
        F: FnOnce(&[u8]) -> Decoded<E>,
    {
        let payload = match (self.ok, self.payload) {
            (true, Some(payload)) => payload,
            (true, None) => return ResponseWrapper::failure("Response contained no payload"),
            (false, _) => return ResponseWrapper::failure(self.message),
        };
        let decoded = decoder(&payload);
        if decoded.is_ok() {
            if let Some(envelope) = decoded.into_value() {
                return ResponseWrapper::success(self.message, envelope);
            }
            return ResponseWrapper::failure("Decoder reported success without a value");
        }
        ResponseWrapper::failure(decoded.message().to_string())
    }
}

/// Caller-facing result: `value` holds the decoded envelope iff `ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseWrapper<E> {
    ok: bool,
    message: String,
    value: Option<E>,
}

/// Result of a call answered with a single-object envelope.
pub type TypedResult<T> = ResponseWrapper<ResponseObject<T>>;

/// Result of a call answered with a list envelope.
pub type TypedResultList<T> = ResponseWrapper<ResponseArray<T>>;

impl<E> ResponseWrapper<E> {
    pub fn success(message: impl Into<String>, value: E) -> Self {
        Self {
            ok: true,
            message: message.into(),
            value: Some(value),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: non_empty(message.into()),
            value: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn value(&self) -> Option<&E> {
        self.value.as_ref()
    }

    /// `Ok(envelope)` on success, `Err(message)` otherwise.
    pub fn into_result(self) -> Result<E, String> {
        match self.value {
            Some(value) if self.ok => Ok(value),
            _ => Err(self.message),
        }
    }
}
