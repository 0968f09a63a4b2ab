use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        holidays::get_holidays,
        root::usage,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// No request timeout here; the upstream and cache clients bound their own calls.
pub fn create_app(state: AppState) -> Router {
    // The holiday endpoint is called from browsers on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(usage))
        .route("/get", get(get_holidays).layer(cors))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use calendaring_core::holiday::UpstreamEvent;

    use crate::state::test_support::{TestCache, TestProvider};

    const HOLIDAYS_URI: &str = "/get?fromDate=2024-01-01&toDate=2024-12-31&language=en&country=gb";

    fn gb_holidays() -> Vec<UpstreamEvent> {
        vec![
            UpstreamEvent {
                summary: Some("Boxing Day".to_string()),
                description: Some("Public holiday".to_string()),
                start_date: Some("2024-12-26".to_string()),
                start_date_time: None,
            },
            UpstreamEvent {
                summary: Some("St Andrew's Day".to_string()),
                description: Some("Bank holiday in: Scotland".to_string()),
                start_date: Some("2024-12-02".to_string()),
                start_date_time: None,
            },
            UpstreamEvent {
                summary: Some("Battle of the Boyne".to_string()),
                description: Some("Bank holiday in: Northern Ireland, ".to_string()),
                start_date: Some("2024-07-12".to_string()),
                start_date_time: None,
            },
        ]
    }

    fn test_state() -> (AppState, Arc<TestCache>, Arc<TestProvider>) {
        let cache = Arc::new(TestCache::default());
        let provider = Arc::new(TestProvider {
            events: gb_holidays(),
            ..Default::default()
        });
        let state = AppState::for_tests(cache.clone(), provider.clone());
        (state, cache, provider)
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = send(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn wait_for_cached(cache: &TestCache) {
        for _ in 0..100 {
            if !cache.data.read().await.is_empty() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("result was never cached");
    }

    #[tokio::test]
    async fn test_get_holidays() {
        let (state, _, _) = test_state();

        let (status, json) = get_json(create_app(state), HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "date": "2024-12-02",
                    "holiday_name": "St Andrew's Day",
                    "holiday_locations": ["Scotland"]
                },
                {
                    "date": "2024-07-12",
                    "holiday_name": "Battle of the Boyne",
                    "holiday_locations": ["Northern Ireland"]
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_get_holidays_served_from_cache() {
        let (state, cache, provider) = test_state();
        let app = create_app(state);

        let (_, first) = get_json(app.clone(), HOLIDAYS_URI).await;
        wait_for_cached(&cache).await;
        let (status, second) = get_json(app, HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_holidays_with_cache_down() {
        let (state, cache, provider) = test_state();
        cache.down.store(true, Ordering::SeqCst);
        let app = create_app(state);

        for _ in 0..2 {
            let (status, json) = get_json(app.clone(), HOLIDAYS_URI).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json.as_array().map(Vec::len), Some(2));
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let (_, health) = get_json(app, "/healthz").await;
        assert_eq!(health, serde_json::json!({"status": "ok", "cache": "degraded"}));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_opaque_400() {
        let (state, cache, provider) = test_state();
        provider.fail.store(true, Ordering::SeqCst);

        let (status, json) = get_json(create_app(state), HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "unknown"}));
        tokio::task::yield_now().await;
        assert!(cache.data.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter_is_opaque_400() {
        let (state, _, provider) = test_state();

        let (status, json) = get_json(
            create_app(state),
            "/get?fromDate=2024-01-01&toDate=2024-12-31&language=en",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "unknown"}));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_date_is_opaque_400() {
        let (state, _, _) = test_state();

        let (status, json) = get_json(
            create_app(state),
            "/get?fromDate=tomorrow&toDate=2024-12-31&language=en&country=gb",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "unknown"}));
    }

    #[tokio::test]
    async fn test_usage_text() {
        let (state, _, _) = test_state();

        let (status, body) = send(create_app(state), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("/get?fromDate="));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (state, _, _) = test_state();
        let app = create_app(state);

        let (status, _) = send(app.clone(), "/livez").await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = get_json(app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "ok", "cache": "ready"}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_upstream_is_not_cut_short() {
        let provider = Arc::new(TestProvider {
            events: gb_holidays(),
            delay: Some(Duration::from_secs(45)),
            ..Default::default()
        });
        let state = AppState::for_tests(Arc::new(TestCache::default()), provider);

        let (status, json) = get_json(create_app(state), HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_upstream_failure_is_opaque_400() {
        let provider = Arc::new(TestProvider {
            delay: Some(Duration::from_secs(45)),
            ..Default::default()
        });
        provider.fail.store(true, Ordering::SeqCst);
        let state = AppState::for_tests(Arc::new(TestCache::default()), provider);

        let (status, json) = get_json(create_app(state), HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "unknown"}));
    }

    #[tokio::test]
    async fn test_blank_upstream_summary_is_opaque_400() {
        let mut events = gb_holidays();
        events[1].summary = Some("  ".to_string());
        let cache = Arc::new(TestCache::default());
        let provider = Arc::new(TestProvider {
            events,
            ..Default::default()
        });
        let state = AppState::for_tests(cache.clone(), provider);

        let (status, json) = get_json(create_app(state), HOLIDAYS_URI).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "unknown"}));
        tokio::task::yield_now().await;
        assert!(cache.data.read().await.is_empty());
    }
}
