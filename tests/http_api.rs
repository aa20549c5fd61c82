//! HTTP API tests over the assembled router, wired with the mock completion
//! client and in-memory stores.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use venturelens::adapters::ai::MockCompletionClient;
use venturelens::adapters::http::{
    app_router, ProfileHandlers, PsychometricHandlers, ReportHandlers, ValidationHandlers,
};
use venturelens::adapters::memory::{
    InMemoryAssessmentStore, InMemoryProfileStore, InMemoryReportStore,
};
use venturelens::adapters::render::PdfReportRenderer;
use venturelens::application::handlers::profile::GetProfileHandler;
use venturelens::application::handlers::psychometric::{
    EvaluateAssessmentHandler, GenerateAssessmentHandler,
};
use venturelens::application::handlers::report::{
    DownloadReportHandler, GetReportHandler, ListReportsHandler,
};
use venturelens::application::handlers::validation::{
    ValidateIdeaHandler, ValidatePitchDeckHandler,
};
use venturelens::application::{PanelRunner, PersonalizationService, QuestionGenerator};
use venturelens::config::PanelConfig;
use venturelens::domain::idea::IdeaDraft;
use venturelens::ports::DocumentExtractor;

/// Extractor stub so the router wires up without real deck parsing.
struct EchoExtractor;

#[async_trait::async_trait]
impl DocumentExtractor for EchoExtractor {
    async fn extract(
        &self,
        _file_name: &str,
        _bytes: &[u8],
    ) -> Result<IdeaDraft, venturelens::domain::foundation::DomainError> {
        Ok(IdeaDraft {
            title: "Uploaded idea".to_string(),
            concept: "Concept from an uploaded deck".to_string(),
        })
    }
}

fn router() -> Router {
    let client = Arc::new(MockCompletionClient::scoring(4.0));
    let reports = Arc::new(InMemoryReportStore::new());
    let profiles = Arc::new(InMemoryProfileStore::new());
    let assessments = Arc::new(InMemoryAssessmentStore::new());

    let validate_idea = Arc::new(ValidateIdeaHandler::new(
        Arc::new(PanelRunner::new(client.clone(), PanelConfig::default())),
        Arc::new(PersonalizationService::new(profiles.clone())),
        reports.clone(),
        profiles.clone(),
        HashMap::new(),
    ));
    let validate_pitch_deck = Arc::new(ValidatePitchDeckHandler::new(
        Arc::new(EchoExtractor),
        validate_idea.clone(),
    ));
    let generate = Arc::new(GenerateAssessmentHandler::new(
        Arc::new(QuestionGenerator::new(client)),
        assessments.clone(),
    ));
    let evaluate = Arc::new(EvaluateAssessmentHandler::new(
        assessments,
        profiles.clone(),
    ));

    app_router(
        ValidationHandlers::new(validate_idea, validate_pitch_deck),
        PsychometricHandlers::new(generate, evaluate),
        ProfileHandlers::new(Arc::new(GetProfileHandler::new(profiles))),
        ReportHandlers::new(
            Arc::new(ListReportsHandler::new(reports.clone())),
            Arc::new(GetReportHandler::new(reports.clone())),
            Arc::new(DownloadReportHandler::new(
                reports,
                Arc::new(PdfReportRenderer::new()),
            )),
        ),
    )
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send_json(&router(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn validate_idea_creates_report() {
    let app = router();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/validation/idea",
        Some(serde_json::json!({
            "user_id": "founder-1",
            "title": "Solar drones",
            "concept": "Parcel delivery with solar-powered drones",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"], "Good");
    assert_eq!(body["evaluations"].as_array().unwrap().len(), 35);
    assert!(body["personalization"].is_null());

    // The stored report is fetchable and downloadable.
    let report_id = body["report_id"].as_str().unwrap().to_string();
    let (status, fetched) =
        send_json(&app, "GET", &format!("/api/report/{}", report_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["report_id"], report_id.as_str());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/report/{}/pdf", report_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn missing_title_is_bad_request() {
    let (status, body) = send_json(
        &router(),
        "POST",
        "/api/validation/idea",
        Some(serde_json::json!({
            "user_id": "founder-1",
            "title": "",
            "concept": "Something",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INPUT_VALIDATION");
}

#[tokio::test]
async fn evaluate_with_mismatched_responses_is_bad_request() {
    let app = router();

    let (status, set) = send_json(
        &app,
        "POST",
        "/api/psychometric/generate",
        Some(serde_json::json!({"count": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(set["total_questions"], 12);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/psychometric/evaluate",
        Some(serde_json::json!({
            "user_id": "founder-1",
            "assessment_id": set["assessment_id"],
            "responses": {"q1": "A"},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INPUT_VALIDATION");
}

#[tokio::test]
async fn profile_flow_via_http() {
    let app = router();

    let (status, _) = send_json(&app, "GET", "/api/profile/founder-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, set) = send_json(
        &app,
        "POST",
        "/api/psychometric/generate",
        Some(serde_json::json!({"count": 10})),
    )
    .await;
    let responses: serde_json::Map<String, serde_json::Value> = set["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| (q["id"].as_str().unwrap().to_string(), "C".into()))
        .collect();

    let (status, evaluation) = send_json(
        &app,
        "POST",
        "/api/psychometric/evaluate",
        Some(serde_json::json!({
            "user_id": "founder-1",
            "assessment_id": set["assessment_id"],
            "responses": responses,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((evaluation["fit_score"].as_f64().unwrap() - 80.0).abs() < 1e-9);

    let (status, profile) = send_json(&app, "GET", "/api/profile/founder-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user_id"], "founder-1");

    // A validation after the assessment carries a personalization block and
    // shows up in the report listing.
    let (_, report) = send_json(
        &app,
        "POST",
        "/api/validation/idea",
        Some(serde_json::json!({
            "user_id": "founder-1",
            "title": "Solar drones",
            "concept": "Parcel delivery with solar-powered drones",
        })),
    )
    .await;
    assert!(report["personalization"].is_object());

    let (status, listed) = send_json(&app, "GET", "/api/reports/founder-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_report_is_not_found() {
    let (status, body) = send_json(
        &router(),
        "GET",
        "/api/report/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn generate_with_bad_count_is_bad_request() {
    let (status, body) = send_json(
        &router(),
        "POST",
        "/api/psychometric/generate",
        Some(serde_json::json!({"count": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INPUT_VALIDATION");
}
