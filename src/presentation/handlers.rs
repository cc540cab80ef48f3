// HTTP request handlers
use crate::application::navigation_service::DerivationError;
use crate::domain::dashboard::ResultSet;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/navigation", get(get_navigation))
        .route("/navigation/current", get(current_navigation))
        .route("/navigation/refresh", post(refresh_navigation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Tabs and drill-throughs, derived on first request
pub async fn get_navigation(State(state): State<Arc<AppState>>) -> Response {
    navigation_response(state.navigation_service.derive().await)
}

/// Last derived navigation without contacting the resource API
pub async fn current_navigation(State(state): State<Arc<AppState>>) -> Response {
    match state.navigation_service.current().await {
        Some(result_set) => Json(&*result_set).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "navigation not derived yet" })),
        )
            .into_response(),
    }
}

/// Drop the cached navigation and derive it again
pub async fn refresh_navigation(State(state): State<Arc<AppState>>) -> Response {
    navigation_response(state.navigation_service.refresh().await)
}

fn navigation_response(result: Result<Arc<ResultSet>, DerivationError>) -> Response {
    match result {
        Ok(result_set) => Json(&*result_set).into_response(),
        Err(e) => {
            tracing::error!("Error deriving navigation: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::navigation_service::tests::StaticClient;
    use crate::application::navigation_service::NavigationService;
    use crate::domain::dashboard::DashboardRecord;
    use crate::domain::tag::TagMarkers;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(client: Arc<StaticClient>) -> Router {
        let state = Arc::new(AppState {
            navigation_service: NavigationService::new(client, TagMarkers::default()),
        });
        build_router(state)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_navigation() {
        let client = Arc::new(StaticClient::with_rows(vec![
            DashboardRecord::new("1", "Sales", &["auth0-mt"]),
            DashboardRecord::new(
                "2",
                "Purchases",
                &["auth0-mt", "auth0-mt-dt", "ce-purchase", "p-purchase-numeric-amount"],
            ),
        ]));

        let response = app(client)
            .oneshot(Request::get("/navigation").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["tabs"], serde_json::json!([{"id": "1", "name": "Sales"}]));
        assert_eq!(json["drill_throughs"][0]["eventName"], "purchase");
        assert_eq!(
            json["drill_throughs"][0]["customEvents"]["purchase"]["required_parameters"][0],
            serde_json::json!({"name": "amount", "type": "numeric"})
        );
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_rows() {
        let client = Arc::new(StaticClient::with_rows(vec![DashboardRecord::new(
            "2",
            "Purchases",
            &["auth0-mt", "auth0-mt-dt", "ce-purchase"],
        )]));
        let app = app(client.clone());

        app.clone()
            .oneshot(Request::get("/navigation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        client.set_rows(vec![DashboardRecord::new("1", "Sales", &["auth0-mt"])]);
        let response = app
            .oneshot(
                Request::post("/navigation/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["tabs"].as_array().unwrap().len(), 1);
        assert!(json["drill_throughs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_serves_cached_navigation_only() {
        let client = Arc::new(StaticClient::with_rows(vec![DashboardRecord::new(
            "1",
            "Sales",
            &["auth0-mt"],
        )]));
        let app = app(client);

        let response = app
            .clone()
            .oneshot(Request::get("/navigation/current").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        app.clone()
            .oneshot(Request::get("/navigation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let response = app
            .oneshot(Request::get("/navigation/current").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["tabs"], serde_json::json!([{"id": "1", "name": "Sales"}]));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_bad_gateway() {
        let response = app(Arc::new(StaticClient::failing()))
            .oneshot(Request::get("/navigation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("connection refused"));
    }
}
