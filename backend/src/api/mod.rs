//! Central module for organizing the application's API endpoints.
//!
//! `app` assembles every router together with the shared extensions
//! (database pool and JWT utilities) that handlers and middleware read.

pub mod common;
pub mod event;

use crate::api::common::ApiResponse;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;

/// Builds the full application router.
pub fn app(pool: SqlitePool, jwt_utils: JwtUtils) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/events", event::routes::event_router())
        .nest("/api/admin/events", event::routes::admin_event_router())
        .nest("/auth", crate::auth::routes::auth_router())
        .layer(Extension(jwt_utils))
        .layer(Extension(pool))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Events Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Events API",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Event, EventFilter, User};
    use crate::database::test_pool;
    use crate::services::user_service::UserService;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestApp {
        pool: SqlitePool,
        jwt: JwtUtils,
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let pool = test_pool().await;
            let jwt = JwtUtils::new("test-secret", 3600);
            let router = app(pool.clone(), jwt.clone());
            Self { pool, jwt, router }
        }

        async fn user(&self, username: &str, is_admin: bool) -> (User, String) {
            let user = UserService::new(&self.pool)
                .with_hash_cost(4 /* bcrypt minimum cost; bcrypt::MIN_COST is private */)
                .create_user(username, "password", is_admin)
                .await
                .unwrap();
            let token = self.jwt.generate_token(user.id.clone()).unwrap();
            (user, token)
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }

        async fn list_all(&self) -> Vec<Event> {
            let (status, body) = self.send(Method::GET, "/api/events", None, None).await;
            assert_eq!(status, StatusCode::OK);
            data(body)
        }
    }

    fn data<T: DeserializeOwned>(body: Value) -> T {
        serde_json::from_value(body["data"].clone()).unwrap()
    }

    fn error_type(body: &Value) -> &str {
        body["error"]["error_type"].as_str().unwrap_or_default()
    }

    fn payload(filter: &str) -> Value {
        json!({
            "name": "Intro to Rust",
            "date": "2024-01-10",
            "attended": 0,
            "type": "Workshop",
            "image": "https://img/abc.png",
            "organizer": "CS Club",
            "description": "...",
            "filter": filter
        })
    }

    #[tokio::test]
    async fn admin_can_create_and_list() {
        let app = TestApp::new().await;
        let (_, token) = app.user("admin", true).await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/events",
                Some(&token),
                Some(payload("Year2023to2024")),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let created: Event = data(body);
        assert_eq!(created.image, "https://img/abc.png");
        assert_eq!(created.filter, EventFilter::Year2023to2024);

        assert_eq!(app.list_all().await, vec![created.clone()]);

        let (status, body) = app
            .send(Method::GET, "/api/events/filter/Year2023to2024", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Vec<Event>>(body), vec![created]);

        let (_, body) = app
            .send(Method::GET, "/api/events/filter/Year2022to2023", None, None)
            .await;
        assert!(data::<Vec<Event>>(body).is_empty());
    }

    #[tokio::test]
    async fn non_admin_mutations_are_rejected_without_effect() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.user("admin", true).await;
        let (_, member_token) = app.user("member", false).await;

        let (_, body) = app
            .send(
                Method::POST,
                "/api/admin/events",
                Some(&admin_token),
                Some(payload("Year2021to2022")),
            )
            .await;
        let existing: Event = data(body);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/events",
                Some(&member_token),
                Some(payload("Year2021to2022")),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_type(&body), "not_authorized");

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("/api/admin/events/{}", existing.id),
                Some(&member_token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_type(&body), "not_authorized");

        assert_eq!(app.list_all().await, vec![existing]);
    }

    #[tokio::test]
    async fn mutations_without_session_are_unauthenticated() {
        let app = TestApp::new().await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/events",
                None,
                Some(payload("Year2021to2022")),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_type(&body), "unauthenticated");

        let (status, _) = app
            .send(Method::DELETE, "/api/admin/events/1", Some("garbage"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_create_input_is_a_validation_error() {
        let app = TestApp::new().await;
        let (_, token) = app.user("admin", true).await;

        let mut unknown_filter = payload("Year1999to2000");
        unknown_filter["name"] = json!("Bad filter");
        let mut negative = payload("Year2022to2023");
        negative["attended"] = json!(-3);

        for body in [unknown_filter, negative] {
            let (status, response) = app
                .send(Method::POST, "/api/admin/events", Some(&token), Some(body))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error_type(&response), "validation_error");
        }

        assert!(app.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn create_validation_reports_each_failing_field() {
        let app = TestApp::new().await;
        let (_, token) = app.user("admin", true).await;

        let mut body = payload("Year2022to2023");
        body["name"] = json!("");
        body["attended"] = json!(-1);
        body["image"] = json!("x");

        let (status, response) = app
            .send(Method::POST, "/api/admin/events", Some(&token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_type(&response), "validation_error");

        let mut fields: Vec<&str> = response["error"]["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|detail| detail["field"].as_str().unwrap())
            .collect();
        fields.sort();
        assert_eq!(fields, vec!["attended", "image", "name"]);

        assert!(app.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_filter_is_a_validation_error() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(Method::GET, "/api/events/filter/Year2030to2031", None, None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_type(&body), "validation_error");
    }

    #[tokio::test]
    async fn delete_removes_event_and_missing_id_is_not_found() {
        let app = TestApp::new().await;
        let (_, token) = app.user("admin", true).await;

        let mut ids = Vec::new();
        for filter in ["Year2020to2021", "Year2022to2023"] {
            let (_, body) = app
                .send(
                    Method::POST,
                    "/api/admin/events",
                    Some(&token),
                    Some(payload(filter)),
                )
                .await;
            ids.push(data::<Event>(body).id);
        }

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("/api/admin/events/{}", ids[0]),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Event>(body).id, ids[0]);

        let remaining = app.list_all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, ids[1]);

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("/api/admin/events/{}", ids[0]),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_type(&body), "not_found");
        assert_eq!(app.list_all().await, remaining);
    }

    #[tokio::test]
    async fn login_issues_a_working_token() {
        let app = TestApp::new().await;
        app.user("admin", true).await;

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": "admin", "password": "password" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["user"]["is_admin"], true);

        let (status, body) = app.send(Method::GET, "/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "admin");

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": "admin", "password": "nope" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_type(&body), "unauthenticated");
    }
}
