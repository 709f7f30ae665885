#[cfg(test)]
mod assessment_tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use cardio_risk_domain::testing::{
        create_mock_assessment_service, create_mock_health_service, valid_raw_intake, MockAssessmentService,
        MockHealthService,
    };

    use crate::api::routes::create_app_with;

    fn app_with(service: MockAssessmentService) -> (Router, Arc<MockAssessmentService>) {
        let service = Arc::new(service);
        let app = create_app_with(
            service.clone(),
            Arc::new(MockHealthService::new()),
            &["http://localhost:3000".to_string()],
        );
        (app, service)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_intake_form_lists_fields() {
        let (app, _) = app_with(MockAssessmentService::new());
        let (status, body) = send(app, Method::GET, "/api/v1/intake/form", None).await;

        assert_eq!(status, StatusCode::OK);
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0]["field"], "age");
        assert_eq!(fields[0]["input"]["type"], "integer");
        assert_eq!(fields[0]["input"]["min"], 18);
    }

    #[tokio::test]
    async fn test_default_mock_services_serve_form_and_health() {
        let app = create_app_with(
            Arc::new(create_mock_assessment_service()),
            Arc::new(create_mock_health_service()),
            &[],
        );

        let (status, body) = send(app.clone(), Method::GET, "/api/v1/intake/form", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"].as_array().unwrap().len(), 11);

        let (status, body) = send(app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_intake() {
        let (app, service) = app_with(MockAssessmentService::new());
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/intake/validate",
            Some(Value::Object(valid_raw_intake())),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["record"]["systolic"], 120);
        assert_eq!(body["record"]["gender"], "male");
        assert_eq!(service.assess_calls(), 0);
    }

    #[tokio::test]
    async fn test_validate_reports_field_errors() {
        let (app, _) = app_with(MockAssessmentService::new());
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/intake/validate",
            Some(json!({ "age": 17, "systolic": 70, "diastolic": 90 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details[0]["field"], "age");
        assert_eq!(details[0]["kind"], "range_error");
        assert!(details
            .iter()
            .any(|e| e["field"] == "systolic" && e["kind"] == "ordering_error"));
    }

    #[tokio::test]
    async fn test_assessment_returns_report() {
        let (app, _) = app_with(MockAssessmentService::new().with_probability(72.0));
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/assessments",
            Some(Value::Object(valid_raw_intake())),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let assessment = &body["assessment"];
        assert_eq!(assessment["tier"], "high");
        assert_eq!(assessment["verdict_label"], "Critical Risk");
        assert_eq!(assessment["display_percent"], 72);
        assert_eq!(assessment["recommendations"][1]["text"], "Daily BP monitoring.");
        assert!(body["submission_id"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_assessment_never_requests_prediction() {
        let (app, service) = app_with(MockAssessmentService::new());
        let mut raw = valid_raw_intake();
        raw.insert("weight".to_string(), json!("heavy"));

        let (status, body) = send(app, Method::POST, "/api/v1/assessments", Some(Value::Object(raw))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "weight");
        assert_eq!(body["details"][0]["kind"], "type_error");
        assert_eq!(service.assess_calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_generic_notice() {
        let (app, _) = app_with(MockAssessmentService::new().with_upstream_failure());
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/assessments",
            Some(Value::Object(valid_raw_intake())),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_unavailable");
        let text = body.to_string();
        assert!(!text.contains("10.0.0.1"), "upstream detail leaked: {}", text);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_non_object_body_is_bad_request() {
        let (app, _) = app_with(MockAssessmentService::new());
        let (status, body) = send(app, Method::POST, "/api/v1/assessments", Some(json!([45, 170]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let (app, service) = app_with(MockAssessmentService::new());

        let (first_status, first) = send(app.clone(), Method::POST, "/api/v1/assessments/reset", None).await;
        let (second_status, second) = send(app, Method::POST, "/api/v1/assessments/reset", None).await;

        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(first["state"], "intake");
        assert_eq!(first, second);
        assert_eq!(service.assess_calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboards_pass_through() {
        let (app, _) = app_with(
            MockAssessmentService::new()
                .with_model_info(json!({ "model": "gbc", "accuracy": 0.734 }))
                .with_data_insight(json!({ "samples": 70000 })),
        );

        let (status, body) = send(app.clone(), Method::GET, "/api/v1/model-info", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "model": "gbc", "accuracy": 0.734 }));

        let (status, body) = send(app, Method::GET, "/api/v1/data-insight", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["samples"], 70000);
    }

    #[tokio::test]
    async fn test_dashboard_failure_is_bad_gateway() {
        let (app, _) = app_with(MockAssessmentService::new().with_upstream_failure());
        let (status, body) = send(app, Method::GET, "/api/v1/model-info", None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.to_string().contains("10.0.0.1"));
    }
}
