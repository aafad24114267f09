//! Router-level tests for the validation and report paths. Nothing here
//! touches the network or the pdfium library: analysis requests stop at the
//! validation checks, and report rendering is pure in-memory PDF writing.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ats_resume_api::llm_client::GeminiClient;
use ats_resume_api::routes::build_router;
use ats_resume_api::state::AppState;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn test_router() -> Router {
    build_router(AppState {
        llm: GeminiClient::new("test-key".to_string()),
    })
}

/// Builds a multipart body in the same field order the page submits.
fn multipart_body(include_file: bool, jd_text: &str) -> String {
    let mut body = String::new();
    if include_file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 stub\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"jd_text\"\r\n\r\n\
         {jd_text}\r\n"
    ));
    body.push_str(&format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"analysis_type\"\r\n\r\n\
         resume_evaluation\r\n"
    ));
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn analyze_request(include_file: bool, jd_text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(include_file, jd_text)))
        .unwrap()
}

async fn error_message(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body["error"]["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_serves_the_page() {
    let response = test_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Job Description"));
    assert!(page.contains("Percentage Match"));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_without_file_yields_upload_warning() {
    let response = test_router()
        .oneshot(analyze_request(false, "Senior Rust engineer, 5+ years"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Please upload your resume (PDF format)"
    );
}

#[tokio::test]
async fn missing_file_warning_wins_even_with_blank_jd() {
    let response = test_router()
        .oneshot(analyze_request(false, "   "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Please upload your resume (PDF format)"
    );
}

#[tokio::test]
async fn analyze_with_file_but_blank_jd_yields_jd_warning() {
    let response = test_router()
        .oneshot(analyze_request(true, "  \t "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Please enter the job description"
    );
}

#[tokio::test]
async fn report_download_is_a_named_pdf_attachment() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/report")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "analysis_type": "percentage_match",
                "analysis": "78% match.\n\nMissing keywords: Kubernetes, Terraform.",
                "job_description": "We are hiring a platform engineer...",
                "resume_filename": "jane_doe.pdf"
            })
            .to_string(),
        ))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"ats_match_report_"));
    assert!(disposition.ends_with(".pdf\""));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn report_with_empty_analysis_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/report")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "analysis_type": "resume_evaluation",
                "analysis": "   ",
                "job_description": "jd",
                "resume_filename": "resume.pdf"
            })
            .to_string(),
        ))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
