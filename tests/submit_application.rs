//! End-to-end workflow tests against a mocked internal API.

use std::sync::Arc;

use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use applyflow::application::SubmissionService;
use applyflow::domain::{DomainError, SubmissionInput};
use applyflow::infrastructure::config::InternalApiConfig;
use applyflow::infrastructure::HttpCandidateService;

const SECRET_TOKEN: &str = "trustno1";

fn service_for(server: &MockServer) -> SubmissionService {
    let config = InternalApiConfig {
        base_url: server.uri(),
        secret_token: SECRET_TOKEN.into(),
        timeout_seconds: 5,
    };
    let api = HttpCandidateService::new(&config).unwrap();
    SubmissionService::new(Arc::new(api))
}

fn input() -> SubmissionInput {
    SubmissionInput {
        listing_id: "listing1".into(),
        email: "test@example.com".into(),
        first_name: "John".into(),
        last_name: "Doe".into(),
        cv_url: None,
        cover_letter_url: None,
    }
}

async fn mount_candidate_lookup(server: &MockServer, result: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/candidates"))
        .and(query_param("query", "c.email=test@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(result))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_active_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/listings/listing1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "listing1",
            "status": "active",
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_empty_tags(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/candidate/candidate1/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn submits_application_for_existing_candidate() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    // existing candidate gets updated in place, not recreated
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .and(header("X-Secret-Token", SECRET_TOKEN))
        .and(body_partial_json(serde_json::json!({
            "firstName": "John",
            "lastName": "Doe",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_active_listing(&server).await;
    mount_empty_tags(&server).await;
    Mock::given(method("POST"))
        .and(path("/applications"))
        .and(header("X-Secret-Token", SECRET_TOKEN))
        .and(body_partial_json(serde_json::json!({
            "candidateId": "candidate1",
            "listingId": "listing1",
            "tags": [],
            "documents": [],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "application1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let application = service_for(&server).submit(input()).await.unwrap();

    assert_eq!(application.id, "application1");
}

#[tokio::test]
async fn creates_candidate_when_email_is_unknown() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/candidates"))
        .and(header("X-Secret-Token", SECRET_TOKEN))
        .and(body_partial_json(serde_json::json!({
            "email": "test@example.com",
            "firstName": "John",
            "lastName": "Doe",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_active_listing(&server).await;
    mount_empty_tags(&server).await;
    Mock::given(method("POST"))
        .and(path("/applications"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "application1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let application = service_for(&server).submit(input()).await.unwrap();

    assert_eq!(application.id, "application1");
}

#[tokio::test]
async fn rejects_closed_listing() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listings/listing1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "listing1",
            "status": "closed",
        })))
        .mount(&server)
        .await;

    let err = service_for(&server).submit(input()).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(ref msg) if msg == "Listing is not active"));
}

#[tokio::test]
async fn rejects_missing_listing_after_upserting_candidate() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    // upsert still runs even though the submission is doomed
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listings/listing1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service_for(&server).submit(input()).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(ref msg) if msg == "Listing is not active"));
}

#[tokio::test]
async fn boosts_and_sorts_tags_in_application_payload() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .mount(&server)
        .await;
    mount_active_listing(&server).await;
    Mock::given(method("GET"))
        .and(path("/candidate/candidate1/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "t1", "category": "external", "order": 1 },
            { "id": "t2", "category": "system", "order": 2 },
            { "id": "t3", "category": "default", "order": 2 },
        ])))
        .mount(&server)
        .await;
    // external dropped, system boosted to 3 and sorted after the default tag
    Mock::given(method("POST"))
        .and(path("/applications"))
        .and(body_partial_json(serde_json::json!({
            "tags": [
                { "id": "t3", "category": "default", "order": 2 },
                { "id": "t2", "category": "system", "order": 3 },
            ],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "application1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let application = service_for(&server).submit(input()).await.unwrap();

    assert_eq!(application.id, "application1");
}

#[tokio::test]
async fn relays_documents_cv_first() {
    let server = MockServer::start().await;
    let files = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .mount(&server)
        .await;
    mount_active_listing(&server).await;
    mount_empty_tags(&server).await;

    Mock::given(method("GET"))
        .and(path("/cv.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"cv bytes".to_vec()))
        .expect(1)
        .mount(&files)
        .await;
    Mock::given(method("GET"))
        .and(path("/letter.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"letter bytes".to_vec()))
        .expect(1)
        .mount(&files)
        .await;

    Mock::given(method("POST"))
        .and(path("/documents/upload/cv"))
        .and(header("X-Secret-Token", SECRET_TOKEN))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "document1",
            "type": "cv",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/documents/upload/coverLetter"))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "document2",
            "type": "coverLetter",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/applications"))
        .and(body_partial_json(serde_json::json!({
            "documents": [
                { "id": "document1", "type": "cv" },
                { "id": "document2", "type": "coverLetter" },
            ],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "application1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut submission = input();
    submission.cv_url = Some(format!("{}/cv.pdf", files.uri()));
    submission.cover_letter_url = Some(format!("{}/letter.pdf", files.uri()));

    let application = service_for(&server).submit(submission).await.unwrap();

    assert_eq!(application.id, "application1");
}

#[tokio::test]
async fn rejects_source_file_over_upload_limit() {
    let server = MockServer::start().await;
    let files = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "candidate1" })),
        )
        .mount(&server)
        .await;
    mount_active_listing(&server).await;
    mount_empty_tags(&server).await;

    Mock::given(method("GET"))
        .and(path("/huge.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 10 * 1024 * 1024 + 1]))
        .mount(&files)
        .await;

    let mut submission = input();
    submission.cv_url = Some(format!("{}/huge.pdf", files.uri()));

    let err = service_for(&server).submit(submission).await.unwrap_err();

    assert!(matches!(err, DomainError::ExternalService(ref msg) if msg.contains("10 MB")));
}

#[tokio::test]
async fn propagates_upstream_failure_unmodified() {
    let server = MockServer::start().await;

    mount_candidate_lookup(&server, serde_json::json!([{ "id": "candidate1" }])).await;
    Mock::given(method("PUT"))
        .and(path("/candidates/candidate1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listings/listing1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "listing1",
            "status": "active",
        })))
        .mount(&server)
        .await;

    let err = service_for(&server).submit(input()).await.unwrap_err();

    assert!(matches!(err, DomainError::ExternalService(_)));
}
