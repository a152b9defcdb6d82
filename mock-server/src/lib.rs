use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};
use uuid::Uuid;

pub const RC_OK: i64 = 1;
pub const RC_ERROR: i64 = 0;

/// The backend's response wrapper. `access_token` is only written when set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub rc: i64,
    pub rd: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl<T> Envelope<T> {
    fn ok(rd: &str, data: T) -> Self {
        Self {
            rc: RC_OK,
            rd: rd.to_string(),
            data: Some(data),
            access_token: None,
        }
    }

    fn error(rd: impl Into<String>) -> Self {
        Self {
            rc: RC_ERROR,
            rd: rd.into(),
            data: None,
            access_token: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub category: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ItemsQuery {
    pub category: Option<String>,
}

/// Known accounts: (user_id, username, password).
const ACCOUNTS: &[(u64, &str, &str)] = &[(1, "ana", "secret"), (2, "ben", "hunter2")];

#[derive(Clone)]
pub struct Catalogue {
    items: Arc<Vec<Item>>,
}

impl Default for Catalogue {
    fn default() -> Self {
        let seed = [
            (1, "Atlas of Lakes", "maps"),
            (2, "Harbour Charts", "maps"),
            (3, "Field Notes", "books"),
        ];
        let items = seed
            .into_iter()
            .map(|(id, name, category)| Item {
                id,
                name: name.to_string(),
                category: category.to_string(),
            })
            .collect();
        Self {
            items: Arc::new(items),
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/login", post(login))
        .route("/items", get(list_items))
        .route("/status/{code}", get(status))
        .with_state(Catalogue::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> Json<Envelope<Empty>> {
    Json(Envelope::ok("pong", Empty::default()))
}

async fn login(Form(form): Form<LoginForm>) -> (StatusCode, Json<Envelope<Session>>) {
    let account = ACCOUNTS
        .iter()
        .find(|(_, username, password)| *username == form.username && *password == form.password);
    match account {
        Some((user_id, username, _)) => {
            info!(username, "login accepted");
            let mut envelope = Envelope::ok(
                "Login success",
                Session {
                    user_id: *user_id,
                    username: username.to_string(),
                },
            );
            envelope.access_token = Some(Uuid::new_v4().to_string());
            (StatusCode::OK, Json(envelope))
        }
        None => {
            warn!(username = %form.username, "login rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(Envelope::error("invalid username or password")),
            )
        }
    }
}

async fn list_items(
    State(catalogue): State<Catalogue>,
    Query(query): Query<ItemsQuery>,
) -> Json<Envelope<Vec<Item>>> {
    let items = catalogue
        .items
        .iter()
        .filter(|item| query.category.as_deref().map_or(true, |c| item.category == c))
        .cloned()
        .collect();
    Json(Envelope::ok("Success", items))
}

/// Answers with the requested status and an error envelope naming it.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Envelope<Empty>>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(Envelope::error(format!("status {code}")))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_unset_access_token() {
        let json = serde_json::to_value(Envelope::ok("pong", Empty::default())).unwrap();
        assert_eq!(json["rc"], RC_OK);
        assert_eq!(json["rd"], "pong");
        assert!(json["data"].is_object());
        assert!(json.get("access_token").is_none());
    }

    #[test]
    fn error_envelope_has_null_data() {
        let json = serde_json::to_value(Envelope::<Empty>::error("nope")).unwrap();
        assert_eq!(json["rc"], RC_ERROR);
        assert!(json["data"].is_null());
    }

    #[test]
    fn catalogue_is_seeded() {
        let catalogue = Catalogue::default();
        assert_eq!(catalogue.items.len(), 3);
        assert_eq!(
            catalogue.items.iter().filter(|i| i.category == "maps").count(),
            2
        );
    }

    #[test]
    fn login_form_requires_both_fields() {
        let result: Result<LoginForm, _> = serde_json::from_str(r#"{"username":"ana"}"#);
        assert!(result.is_err());
    }
}
