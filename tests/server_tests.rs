//! HTTP service tests driven through the router

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use resume_matcher::config::ServerConfig;
use resume_matcher::processing::{AnalysisEngine, AnalysisResult, SkillVocabulary};
use resume_matcher::server::{build_router, AppState};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "resume-matcher-test-boundary";

enum Part<'a> {
    File { name: &'a str, file_name: &'a str, content: &'a [u8] },
    Text { name: &'a str, value: &'a str },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File { name, file_name, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn post(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn app(upload_dir: &Path) -> Router {
    let config = ServerConfig {
        upload_dir: Some(upload_dir.to_path_buf()),
        ..ServerConfig::default()
    };
    let engine = Arc::new(AnalysisEngine::new(Arc::new(SkillVocabulary::default())));
    build_router(AppState::new(engine, config))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_dir_empty(dir: &Path) {
    let leftovers: Vec<_> = std::fs::read_dir(dir).unwrap().collect();
    assert!(leftovers.is_empty(), "temporary uploads left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_root_reports_running() {
    let dir = TempDir::new().unwrap();
    let response = app(dir.path())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Backend is running");
}

#[tokio::test]
async fn test_analyze_text_upload() {
    let dir = TempDir::new().unwrap();
    let request = post(
        "/analyze",
        &[
            Part::File {
                name: "file",
                file_name: "resume.txt",
                content: b"Experienced Python developer\nwith Docker and AWS knowledge",
            },
            Part::Text {
                name: "job_description",
                value: "Looking for Python, Java, Docker, Kubernetes expert",
            },
        ],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result: AnalysisResult = serde_json::from_value(json_body(response).await).unwrap();
    assert!(result.score > 0.0);
    for skill in ["Python", "Docker", "AWS"] {
        assert!(result.resume_skills.iter().any(|s| s == skill));
    }
    for skill in ["Java", "Kubernetes"] {
        assert!(result.missing_skills.iter().any(|s| s == skill));
    }
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_analyze_pdf_upload() {
    let dir = TempDir::new().unwrap();
    let pdf = common::pdf_with_lines(&["Experienced Python developer", "with Docker and AWS knowledge"]);
    let request = post(
        "/analyze",
        &[
            Part::File { name: "file", file_name: "resume.pdf", content: &pdf },
            Part::Text { name: "job_description", value: "Python and Docker engineer" },
        ],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["score"].as_f64().unwrap() > 0.0);
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_corrupt_pdf_is_rejected_and_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let request = post(
        "/analyze",
        &[
            Part::File { name: "file", file_name: "resume.pdf", content: b"%PDF-1.4 not a real document" },
            Part::Text { name: "job_description", value: "Python engineer" },
        ],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("Failed to extract text"));
    assert!(body.get("score").is_none());
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_missing_job_description_is_unprocessable() {
    let dir = TempDir::new().unwrap();
    let request = post(
        "/analyze",
        &[Part::File { name: "file", file_name: "resume.txt", content: b"Python" }],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_extract_text_endpoint() {
    let dir = TempDir::new().unwrap();
    let request = post(
        "/extract-text",
        &[Part::File {
            name: "file",
            file_name: "resume.md",
            content: b"# Jane Doe\n\n**Rust**  engineer\n",
        }],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["filename"], "resume.md");
    assert_eq!(body["text"], "Jane Doe Rust engineer");
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_extract_text_without_text_is_rejected() {
    let dir = TempDir::new().unwrap();
    let request = post(
        "/extract-text",
        &[Part::File { name: "file", file_name: "blank.txt", content: b" \n\t\n" }],
    );

    let response = app(dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_dir_empty(dir.path());
}
