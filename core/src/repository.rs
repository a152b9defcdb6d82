//! One typed method per backend operation.

use crate::executor::RequestExecutor;
use crate::http::Transport;
use crate::route::{ApiRoute, AppRoute};
use crate::types::{EmptyResponse, Item, Session};
use crate::wrapper::{TypedResult, TypedResultList};

/// Typed access to the app's backend.
#[derive(Debug, Clone)]
pub struct AppRepository<T> {
    base_url: String,
    executor: RequestExecutor<T>,
}

impl<T: Transport> AppRepository<T> {
    pub fn new(base_url: &str, executor: RequestExecutor<T>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            executor,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn ping(&self) -> TypedResult<EmptyResponse> {
        let route = AppRoute::Ping.descriptor(&self.base_url);
        self.executor.to_object(&route).await
    }

    /// On success the envelope's `access_token` holds the session token.
    pub async fn login(&self, username: &str, password: &str) -> TypedResult<Session> {
        let route = AppRoute::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
        .descriptor(&self.base_url);
        self.executor.to_object(&route).await
    }

    pub async fn items(&self, category: &str) -> TypedResultList<Item> {
        let route = AppRoute::Items {
            category: category.to_string(),
        }
        .descriptor(&self.base_url);
        self.executor.to_list(&route).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Answers every request with `{"rc":1,"rd":<path>}` and remembers it.
    #[derive(Default)]
    struct EchoTransport {
        seen: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let path = request.url.split('?').next().unwrap_or_default().to_string();
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: serde_json::to_vec(&serde_json::json!({"rc": 1, "rd": path, "data": null}))
                    .unwrap(),
            })
        }
    }

    fn sent(repo: &AppRepository<EchoTransport>) -> Vec<HttpRequest> {
        repo.executor.transport().seen.lock().unwrap().clone()
    }

    fn repository() -> AppRepository<EchoTransport> {
        AppRepository::new(
            "http://backend.test/",
            RequestExecutor::new(EchoTransport::default()),
        )
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(repository().base_url(), "http://backend.test");
    }

    #[tokio::test]
    async fn ping_targets_ping_endpoint() {
        let repo = repository();
        let result = repo.ping().await;
        assert!(result.is_ok());
        assert_eq!(result.value().unwrap().rd, "http://backend.test/ping");
    }

    #[tokio::test]
    async fn login_posts_form_body() {
        let repo = repository();
        let result = repo.login("ana", "secret").await;
        assert!(result.is_ok());

        let seen = sent(&repo);
        assert_eq!(seen[0].method, HttpMethod::Post);
        let body = String::from_utf8(seen[0].body.clone().unwrap()).unwrap();
        assert!(body.contains("username=ana"));
        assert!(body.contains("password=secret"));
    }

    #[tokio::test]
    async fn items_sends_category_query() {
        let repo = repository();
        let result = repo.items("maps").await;
        assert!(result.is_ok());
        assert!(result.value().unwrap().data.is_none());

        let seen = sent(&repo);
        assert_eq!(seen[0].url, "http://backend.test/items?category=maps");
    }
}
