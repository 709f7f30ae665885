use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cardio_risk_api::create_app_with;
use cardio_risk_data::client::UpstreamConfig;
use cardio_risk_domain::health::create_default_health_service;
use cardio_risk_domain::services::{create_default_assessment_service, ClassifierConfig};

const API_KEY: &str = "test-key";
const FRONTEND_ORIGIN: &str = "http://localhost:3000";

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Behaviour and call counters of the fake prediction service
#[derive(Default)]
struct FakeUpstream {
    probability: Value,
    fail_with: Option<StatusCode>,
    predict_calls: AtomicUsize,
    dashboard_calls: AtomicUsize,
    last_request: std::sync::Mutex<Option<Value>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

async fn predict(
    State(fake): State<Arc<FakeUpstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    fake.predict_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "bad key" }))).into_response();
    }
    if let Some(status) = fake.fail_with {
        return (status, Json(json!({ "detail": "model crashed at /srv/model.pkl" }))).into_response();
    }
    if let Ok(mut last) = fake.last_request.lock() {
        *last = Some(body);
    }
    Json(json!({
        "is_cardio": 1,
        "probability": fake.probability,
        "status": "success"
    }))
    .into_response()
}

async fn model_info(State(fake): State<Arc<FakeUpstream>>) -> axum::response::Response {
    fake.dashboard_calls.fetch_add(1, Ordering::SeqCst);
    match fake.fail_with {
        Some(status) => status.into_response(),
        None => Json(json!({ "model": "GradientBoostingClassifier", "accuracy": 0.734 })).into_response(),
    }
}

async fn data_insight(State(fake): State<Arc<FakeUpstream>>) -> axum::response::Response {
    fake.dashboard_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "samples": 70000, "features": 11 })).into_response()
}

async fn root(State(fake): State<Arc<FakeUpstream>>) -> axum::response::Response {
    match fake.fail_with {
        Some(status) => status.into_response(),
        None => Json(json!({ "message": "Cardio API running" })).into_response(),
    }
}

/// Serve the fake prediction service on an ephemeral port
async fn spawn_upstream(fake: Arc<FakeUpstream>) -> String {
    let router = Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .route("/model-info", get(model_info))
        .route("/data-insight", get(data_insight))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing listens on
async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn build_app(base_url: &str) -> Router {
    initialize();
    let upstream = UpstreamConfig::new(base_url)
        .with_api_key(API_KEY)
        .with_timeout(Duration::from_secs(5));

    create_app_with(
        Arc::new(create_default_assessment_service(&upstream, ClassifierConfig::default()).unwrap()),
        Arc::new(create_default_health_service(&upstream).unwrap()),
        &[FRONTEND_ORIGIN.to_string()],
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, FRONTEND_ORIGIN)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn intake() -> Value {
    json!({
        "age": "58",
        "height": "168",
        "weight": "91.5",
        "gender": "female",
        "systolic": "150",
        "diastolic": "95",
        "cholesterol": "well_above_normal",
        "glucose": "normal",
        "smokes": "yes",
        "drinks-alcohol": "no",
        "physically-active": "off"
    })
}

#[tokio::test]
async fn test_full_assessment_against_prediction_service() {
    let fake = Arc::new(FakeUpstream {
        probability: json!("72.00%"),
        ..Default::default()
    });
    let app = build_app(&spawn_upstream(fake.clone()).await);

    let (status, headers, body) = send(&app, Method::POST, "/api/v1/assessments", Some(intake())).await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND_ORIGIN);
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

    assert_eq!(body["is_cardio"], true);
    assert_eq!(body["upstream_status"], "success");
    let assessment = &body["assessment"];
    assert_eq!(assessment["tier"], "high");
    assert_eq!(assessment["color_token"], "#ef4444");
    assert_eq!(assessment["display_percent"], 72);
    assert_eq!(assessment["recommendations"][1]["text"], "Daily BP monitoring.");
    assert_eq!(assessment["chart"][1]["value"], 28.0);

    let sent = fake.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent,
        json!({
            "age": 58,
            "gender": 1,
            "height": 168.0,
            "weight": 91.5,
            "ap_hi": 150,
            "ap_lo": 95,
            "cholesterol": 3,
            "gluc": 1,
            "smoke": true,
            "alco": false,
            "active": false
        })
    );
}

#[tokio::test]
async fn test_numeric_probability_at_medium_boundary() {
    let fake = Arc::new(FakeUpstream {
        probability: json!(40.0),
        ..Default::default()
    });
    let app = build_app(&spawn_upstream(fake).await);

    let (status, _, body) = send(&app, Method::POST, "/api/v1/assessments", Some(intake())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment"]["tier"], "medium");
    assert_eq!(body["assessment"]["verdict_label"], "Elevated Risk");
}

#[tokio::test]
async fn test_invalid_intake_is_not_forwarded() {
    let fake = Arc::new(FakeUpstream {
        probability: json!("10%"),
        ..Default::default()
    });
    let app = build_app(&spawn_upstream(fake.clone()).await);

    let mut body = intake();
    body["systolic"] = json!(70);
    body["diastolic"] = json!(90);
    let (status, _, body) = send(&app, Method::POST, "/api/v1/assessments", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "Systolic BP must be greater than Diastolic BP");
    assert_eq!(fake.predict_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_error_is_hidden_from_client() {
    let fake = Arc::new(FakeUpstream {
        probability: json!("10%"),
        fail_with: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..Default::default()
    });
    let base_url = spawn_upstream(fake.clone()).await;
    let app = build_app(&base_url);

    let (status, _, body) = send(&app, Method::POST, "/api/v1/assessments", Some(intake())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unavailable");
    let text = body.to_string();
    assert!(!text.contains(&base_url));
    assert!(!text.contains("model.pkl"));
    assert!(!text.contains("500"));
    assert_eq!(fake.predict_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let app = build_app(&dead_upstream().await);

    let (status, _, body) = send(&app, Method::POST, "/api/v1/assessments", Some(intake())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unavailable");

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["components"]["prediction_service"]["status"], "error");
}

#[tokio::test]
async fn test_health_with_live_upstream() {
    let fake = Arc::new(FakeUpstream::default());
    let app = build_app(&spawn_upstream(fake).await);

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_dashboards_are_cached() {
    let fake = Arc::new(FakeUpstream::default());
    let app = build_app(&spawn_upstream(fake.clone()).await);

    let (status, _, first) = send(&app, Method::GET, "/api/v1/model-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["model"], "GradientBoostingClassifier");

    let (_, _, second) = send(&app, Method::GET, "/api/v1/model-info", None).await;
    assert_eq!(first, second);

    let (status, _, insight) = send(&app, Method::GET, "/api/v1/data-insight", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insight["samples"], 70000);

    assert_eq!(fake.dashboard_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_reset_and_docs() {
    let fake = Arc::new(FakeUpstream::default());
    let app = build_app(&spawn_upstream(fake.clone()).await);

    let (status, _, body) = send(&app, Method::POST, "/api/v1/assessments/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "intake");
    assert_eq!(body["form"].as_array().unwrap().len(), 11);
    assert_eq!(fake.predict_calls.load(Ordering::SeqCst), 0);

    let (status, _, spec) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/api/v1/assessments"].is_object());
}
