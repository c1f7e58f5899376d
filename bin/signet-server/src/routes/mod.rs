//! HTTP surface of the query layer.
//!
//! Everything under [`API_PREFIX`] is read-only. `/health` probes the database,
//! and Swagger UI is mounted unless `SIGNET_ENABLE_SWAGGER=false`. Every
//! response passes through the CORS and trace-ID layers. A trailing slash on
//! any API path is ignored (`/api/v1/` is the index).

pub mod doc;
mod health;
mod v1;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower::util::MapRequest;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Versioned prefix every query endpoint lives under.
pub const API_PREFIX: &str = "/api/v1";

/// The served application: the router behind the API slash trimming.
pub type App = MapRequest<Router, fn(Request) -> Request>;

pub fn build(state: Arc<AppState>) -> App {
    let mut app = Router::new()
        .merge(health::router())
        .nest(API_PREFIX, v1::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    let router = app
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state.config)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state);

    // Routing happens inside the router, so the rewrite has to wrap it.
    ServiceBuilder::new()
        .map_request(trim_api_trailing_slash as fn(Request) -> Request)
        .service(router)
}

/// `/api/v1/signatures/` → `/api/v1/signatures`, query string kept.
///
/// Paths outside [`API_PREFIX`] are left alone: Swagger UI serves its index
/// at `/swagger-ui/` and redirects the bare path there.
fn trim_api_trailing_slash(mut req: Request) -> Request {
    let path = req.uri().path();
    let under_api = path
        .strip_prefix(API_PREFIX)
        .is_some_and(|rest| rest.starts_with('/'));
    if !under_api || !path.ends_with('/') {
        return req;
    }

    let trimmed = path.trim_end_matches('/');
    let rewritten = match req.uri().query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_owned(),
    };
    let Ok(path_and_query) = rewritten.parse::<PathAndQuery>() else {
        return req;
    };
    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
    req
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::middleware::trace::X_TRACE_ID;
    use crate::testing::{app_state, memory_store, test_config};

    #[tokio::test]
    async fn index_greets() {
        let app = build(app_state(memory_store().await));
        let response = app
            .oneshot(Request::get(API_PREFIX).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"signet query layer");
    }

    #[tokio::test]
    async fn trailing_slash_reaches_the_same_routes() {
        let store = memory_store().await;
        for uri in [
            "/api/v1/",
            "/api/v1/signatures/",
            "/api/v1/verifications/",
            "/api/v1/signatures//",
        ] {
            let response = build(app_state(store.clone()))
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn trailing_slash_keeps_the_lookup_id() {
        let response = build(app_state(memory_store().await))
            .oneshot(Request::get("/api/v1/signatures/sig_404/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], br#"{"error":"Signature not found"}"#);
    }

    #[test]
    fn only_api_paths_are_trimmed() {
        let rewrite = |uri: &str| {
            trim_api_trailing_slash(Request::get(uri).body(Body::empty()).unwrap())
                .uri()
                .to_string()
        };
        assert_eq!(rewrite("/api/v1/signatures/?q=ada"), "/api/v1/signatures?q=ada");
        assert_eq!(rewrite("/api/v1/"), "/api/v1");
        assert_eq!(rewrite("/swagger-ui/"), "/swagger-ui/");
        assert_eq!(rewrite("/api/v1x/"), "/api/v1x/");
        assert_eq!(rewrite("/api/v1/signatures"), "/api/v1/signatures");
    }

    #[tokio::test]
    #[traced_test]
    async fn trace_id_is_echoed_when_supplied() {
        let app = build(app_state(memory_store().await));
        let id = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
        let response = app
            .oneshot(
                Request::get("/health")
                    .header(X_TRACE_ID, id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_TRACE_ID], id);
        assert!(logs_contain("response finished"));
    }

    #[tokio::test]
    async fn invalid_trace_id_is_replaced() {
        let app = build(app_state(memory_store().await));
        let response = app
            .oneshot(
                Request::get("/health")
                    .header(X_TRACE_ID, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let echoed = response.headers()[X_TRACE_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(echoed).is_ok());
    }

    #[tokio::test]
    async fn writes_are_not_routed() {
        let app = build(app_state(memory_store().await));
        let response = app
            .oneshot(
                Request::post("/api/v1/signatures")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn swagger_can_be_disabled() {
        let store = memory_store().await;
        let state = Arc::new(AppState {
            config: Arc::new(crate::config::Config {
                enable_swagger: false,
                ..test_config()
            }),
            store: Arc::new(store),
        });
        let response = build(state)
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
