use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Empty, Envelope, Item, Session, RC_ERROR, RC_OK};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

// --- ping ---

#[tokio::test]
async fn ping_returns_empty_envelope() {
    let resp = app().oneshot(get("/ping")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Empty> = body_json(resp).await;
    assert_eq!(env.rc, RC_OK);
    assert_eq!(env.rd, "pong");
    assert!(env.data.is_some());
    assert!(env.access_token.is_none());
}

// --- login ---

#[tokio::test]
async fn login_issues_access_token() {
    let resp = app()
        .oneshot(form_request("/login", "username=ana&password=secret"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Session> = body_json(resp).await;
    assert_eq!(env.data.unwrap().username, "ana");
    let token = env.access_token.unwrap();
    assert!(uuid::Uuid::parse_str(&token).is_ok());
}

#[tokio::test]
async fn login_bad_password_returns_400_envelope() {
    let resp = app()
        .oneshot(form_request("/login", "username=ana&password=wrong"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let env: Envelope<Session> = body_json(resp).await;
    assert_eq!(env.rc, RC_ERROR);
    assert_eq!(env.rd, "invalid username or password");
    assert!(env.data.is_none());
}

#[tokio::test]
async fn login_missing_field_is_rejected() {
    let resp = app()
        .oneshot(form_request("/login", "username=ana"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- items ---

#[tokio::test]
async fn items_filters_by_category() {
    let resp = app().oneshot(get("/items?category=maps")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Vec<Item>> = body_json(resp).await;
    let items = env.data.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.category == "maps"));
}

#[tokio::test]
async fn items_without_category_lists_everything() {
    let resp = app().oneshot(get("/items")).await.unwrap();
    let env: Envelope<Vec<Item>> = body_json(resp).await;
    assert_eq!(env.data.unwrap().len(), 3);
}

#[tokio::test]
async fn items_unknown_category_is_empty_list() {
    let resp = app().oneshot(get("/items?category=films")).await.unwrap();
    let env: Envelope<Vec<Item>> = body_json(resp).await;
    assert_eq!(env.data, Some(Vec::new()));
}

// --- status ---

#[tokio::test]
async fn status_echoes_requested_code() {
    for code in [401u16, 404, 500, 503] {
        let resp = app().oneshot(get(&format!("/status/{code}"))).await.unwrap();
        assert_eq!(resp.status().as_u16(), code);
        let env: Envelope<Empty> = body_json(resp).await;
        assert_eq!(env.rd, format!("status {code}"));
    }
}

#[tokio::test]
async fn status_rejects_non_numeric_code() {
    let resp = app().oneshot(get("/status/teapot")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
