//! Route descriptors: static descriptions of one HTTP operation each.
//!
//! # Design
//! A `RouteDescriptor` is immutable once built. Operations are a closed
//! enum (`AppRoute`) whose variants each produce their own descriptor
//! through the `ApiRoute` trait, so adding an endpoint means adding a
//! variant, not a type.

use std::collections::HashMap;

use serde_json::Value;

use crate::http::HttpMethod;

/// Content type values recognised when serializing a request body.
pub mod content_type {
    pub const JSON: &str = "application/json";
    pub const URL_ENCODED: &str = "application/x-www-form-urlencoded";
}

/// Everything needed to build one HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    base_url: String,
    path: String,
    method: HttpMethod,
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
    body: HashMap<String, Value>,
}

impl RouteDescriptor {
    /// Start a GET descriptor with no headers, query or body.
    pub fn builder(base_url: impl Into<String>, path: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            route: RouteDescriptor {
                base_url: base_url.into(),
                path: path.into(),
                method: HttpMethod::Get,
                headers: HashMap::new(),
                query: HashMap::new(),
                body: HashMap::new(),
            },
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn body(&self) -> &HashMap<String, Value> {
        &self.body
    }

    /// True when any header value marks the body as form-encoded.
    ///
    /// Only the media type is compared; parameters such as `charset` are ignored.
    pub fn is_url_encoded(&self) -> bool {
        self.headers.values().any(|v| {
            let media_type = v.split(';').next().unwrap_or_default().trim();
            media_type.eq_ignore_ascii_case(content_type::URL_ENCODED)
        })
    }
}

/// Consuming builder for `RouteDescriptor`.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    route: RouteDescriptor,
}

impl RouteBuilder {
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.route.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route.headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.route.body.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> RouteDescriptor {
        self.route
    }
}

/// Anything that can describe the request for one API operation.
pub trait ApiRoute {
    fn descriptor(&self, base_url: &str) -> RouteDescriptor;
}

/// The backend operations this app calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// Health check; answered with an empty envelope.
    Ping,
    /// Form-encoded sign-in; answered with a session and an access token.
    Login { username: String, password: String },
    /// Catalogue listing filtered by category.
    Items { category: String },
}

impl ApiRoute for AppRoute {
    fn descriptor(&self, base_url: &str) -> RouteDescriptor {
        match self {
            AppRoute::Ping => RouteDescriptor::builder(base_url, "/ping")
                .header("Accept", content_type::JSON)
                .header("Content-Type", content_type::JSON)
                .build(),
            AppRoute::Login { username, password } => RouteDescriptor::builder(base_url, "/login")
                .method(HttpMethod::Post)
                .header("Accept", content_type::JSON)
                .header("Content-Type", content_type::URL_ENCODED)
                .body_field("username", username.as_str())
                .body_field("password", password.as_str())
                .build(),
            AppRoute::Items { category } => RouteDescriptor::builder(base_url, "/items")
                .header("Accept", content_type::JSON)
                .query("category", category.as_str())
                .build(),
        }
    }
}
