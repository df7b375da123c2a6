//! HTTP client for the event procedures.
//!
//! Error envelopes returned by the server are mapped back to typed
//! `ClientError` variants so the UI can tell the failure kinds apart.

use crate::api::common::ApiResponse;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::database::models::{CreateEvent, Event, EventFilter};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Authentication required: {0}")]
    Unauthenticated(String),
    #[error("Not authorized: {0}")]
    NotAuthorized(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// The event procedures as seen from the admin page.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Event>, ClientError>;
    async fn list_by_filter(&self, filter: EventFilter) -> Result<Vec<Event>, ClientError>;
    async fn create(&self, payload: CreateEvent) -> Result<Event, ClientError>;
    async fn delete(&self, id: i64) -> Result<Event, ClientError>;
}

/// `EventsApi` over the server's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpEventsApi {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpEventsApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Exchanges credentials for an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = self.http_client.post(self.url("/auth/login")).json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        send(request).await
    }
}

/// Sends a request and unwraps the `ApiResponse` envelope.
async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
        ClientError::Decode(format!("status {}: {} ({})", status.as_u16(), e, body))
    })?;

    if status.is_success() && envelope.success {
        return envelope
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".to_string()));
    }

    let message = envelope.message;
    let error_type = envelope
        .error
        .map(|error| error.error_type)
        .unwrap_or_default();

    Err(match error_type.as_str() {
        "unauthenticated" => ClientError::Unauthenticated(message),
        "not_authorized" => ClientError::NotAuthorized(message),
        "validation_error" => ClientError::Validation(message),
        "not_found" => ClientError::NotFound(message),
        _ => ClientError::Server(message),
    })
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    async fn list_all(&self) -> Result<Vec<Event>, ClientError> {
        send(self.http_client.get(self.url("/api/events"))).await
    }

    async fn list_by_filter(&self, filter: EventFilter) -> Result<Vec<Event>, ClientError> {
        let path = format!("/api/events/filter/{}", filter);
        send(self.http_client.get(self.url(&path))).await
    }

    async fn create(&self, payload: CreateEvent) -> Result<Event, ClientError> {
        let request = self
            .http_client
            .post(self.url("/api/admin/events"))
            .json(&payload);
        send(self.authorized(request)).await
    }

    async fn delete(&self, id: i64) -> Result<Event, ClientError> {
        let path = format!("/api/admin/events/{}", id);
        let request = self.http_client.delete(self.url(&path));
        send(self.authorized(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::app;
    use crate::database::models::EventType;
    use crate::database::test_pool;
    use crate::services::user_service::UserService;
    use crate::utils::jwt::JwtUtils;
    use chrono::{TimeZone, Utc};

    struct Server {
        base_url: String,
        admin_token: String,
        member_token: String,
    }

    async fn spawn_server() -> Server {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("client-secret", 3600);
        let users = UserService::new(&pool).with_hash_cost(4 /* bcrypt minimum cost; bcrypt::MIN_COST is private */);
        let admin = users.create_user("admin", "admin-pw", true).await.unwrap();
        let member = users.create_user("member", "member-pw", false).await.unwrap();
        let admin_token = jwt.generate_token(admin.id).unwrap();
        let member_token = jwt.generate_token(member.id).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app(pool, jwt);
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Server {
            base_url: format!("http://{}", addr),
            admin_token,
            member_token,
        }
    }

    fn payload(filter: EventFilter) -> CreateEvent {
        CreateEvent {
            name: "Intro to Rust".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            attended: 0,
            event_type: EventType::Workshop,
            image: "https://img/abc.png".to_string(),
            organizer: "CS Club".to_string(),
            description: "...".to_string(),
            filter,
        }
    }

    #[tokio::test]
    async fn admin_round_trip_over_http() {
        let server = spawn_server().await;
        let api = HttpEventsApi::new(&server.base_url, Some(server.admin_token.clone()));

        let created = api.create(payload(EventFilter::Year2023to2024)).await.unwrap();
        assert_eq!(api.list_all().await.unwrap(), vec![created.clone()]);
        assert_eq!(
            api.list_by_filter(EventFilter::Year2023to2024).await.unwrap(),
            vec![created.clone()]
        );

        assert_eq!(api.delete(created.id).await.unwrap(), created);
        assert!(matches!(
            api.delete(created.id).await,
            Err(ClientError::NotFound(_))
        ));
        assert!(api.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_kinds_survive_the_transport() {
        let server = spawn_server().await;

        let member = HttpEventsApi::new(&server.base_url, Some(server.member_token.clone()));
        assert!(matches!(
            member.create(payload(EventFilter::Year2022to2023)).await,
            Err(ClientError::NotAuthorized(_))
        ));

        let anonymous = HttpEventsApi::new(&server.base_url, None);
        assert!(matches!(
            anonymous.delete(1).await,
            Err(ClientError::Unauthenticated(_))
        ));

        let admin = HttpEventsApi::new(&server.base_url, Some(server.admin_token.clone()));
        let mut invalid = payload(EventFilter::Year2022to2023);
        invalid.name.clear();
        assert!(matches!(
            admin.create(invalid).await,
            Err(ClientError::Validation(_))
        ));

        assert!(admin.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_returns_usable_token() {
        let server = spawn_server().await;
        let anonymous = HttpEventsApi::new(format!("{}/", server.base_url), None);

        let login = anonymous.login("admin", "admin-pw").await.unwrap();
        assert!(login.user.is_admin);

        let admin = HttpEventsApi::new(&server.base_url, Some(login.access_token));
        assert!(admin.create(payload(EventFilter::Year2020to2021)).await.is_ok());

        assert!(matches!(
            anonymous.login("admin", "wrong").await,
            Err(ClientError::Unauthenticated(_))
        ));
    }
}
