//! Typed remote-call pipeline for the app backend.
//!
//! # Overview
//! One call issues one HTTP request and returns one typed result:
//! `RouteDescriptor` → `RequestExecutor` (wire request, transport, status
//! classification) → `decode` (JSON into an envelope) → `ResponseWrapper`
//! (what the caller reads).
//!
//! # Design
//! - No layer returns `Err` to the caller. Faults become results with
//!   `ok == false` and a non-empty message; `value` is present iff `ok`.
//! - The network sits behind the `Transport` trait. `ReqwestTransport` is the
//!   real one; tests plug in deterministic stubs.
//! - The executor holds only a transport and immutable config, so calls can
//!   run concurrently without coordination.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod decode;
pub mod encoding;
pub mod error;
pub mod executor;
pub mod http;
pub mod repository;
pub mod route;
pub mod transport;
pub mod types;
pub mod wrapper;

pub use decode::{decode, DecodeErrorKind, Decoded};
pub use error::{ApiError, TransportError};
pub use executor::{classify, ExecutorConfig, RequestExecutor, SUCCESS_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use repository::AppRepository;
pub use route::{ApiRoute, AppRoute, RouteDescriptor};
pub use transport::ReqwestTransport;
pub use types::{EmptyResponse, Item, ResponseArray, ResponseObject, Session};
pub use wrapper::{ResponseWrapper, TransportOutcome, TypedResult, TypedResultList};
