//! Wire envelopes and payload DTOs for the backend API.
//!
//! # Design
//! Every backend response is wrapped in the same envelope: `rc` (result
//! code), `rd` (result description), and `data`. The single-object form also
//! carries `access_token`, which only the login endpoint fills in. The
//! payload types are defined independently of the mock-server crate;
//! integration tests catch schema drift.

use serde::{Deserialize, Serialize};

/// Envelope around a single payload object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseObject<T> {
    pub rc: i64,
    pub rd: String,
    pub data: Option<T>,
    pub access_token: Option<String>,
}

/// Envelope around a list of payload objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseArray<T> {
    pub rc: i64,
    pub rd: String,
    pub data: Option<Vec<T>>,
}

/// Payload for endpoints that return nothing meaningful in `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyResponse {}

/// The signed-in user, returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
}

/// A catalogue entry returned by the items endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub category: String,
}
