//! End-to-end tests of the access flow, driven through the assembled
//! router with a recording mail transport standing in for the relay.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use url::Url;

use vouch_api::state::{AppConfig, AppState};
use vouch_core::Timestamp;
use vouch_crypto::SigningKey;
use vouch_mail::Mailer;
use vouch_token::{wire, Purpose, TokenAuthority, DEFAULT_CLAIM_TTL_SECS};

fn test_state() -> AppState {
    AppState::new(
        TokenAuthority::new(SigningKey::generate(), DEFAULT_CLAIM_TTL_SECS),
        Mailer::recording(),
        AppConfig {
            port: 0,
            mail_domain: "example.com".to_string(),
            base_url: Url::parse("https://auth.example.com").unwrap(),
        },
    )
}

fn test_app(state: &AppState) -> Router {
    vouch_api::app(state.clone())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Pull the claim token out of the recorded confirmation email.
fn token_from_email(html: &str) -> String {
    let marker = "claim-access/";
    let start = html.find(marker).expect("email should embed a claim link") + marker.len();
    let rest = &html[start..];
    let end = rest.find('"').expect("href should be quoted");
    rest[..end].to_string()
}

async fn request_access(app: &Router, email_name: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/request-access",
            serde_json::json!({"email_name": email_name}),
        ))
        .await
        .unwrap();
    response.status()
}

// ── request-access ──────────────────────────────────────────────────

#[tokio::test]
async fn request_access_sends_one_confirmation_email() {
    let state = test_state();
    let app = test_app(&state);

    let status = request_access(&app, "alice").await;
    assert_eq!(status, StatusCode::OK);

    let outbox = state.mailer.recorded().unwrap();
    assert_eq!(outbox.len(), 1);
    let message = &outbox.messages()[0];
    assert_eq!(message.to, "alice@example.com");
    assert_eq!(message.subject, "Please confirm your email address.");
}

#[tokio::test]
async fn emailed_link_carries_a_valid_claim_credential() {
    let state = test_state();
    let app = test_app(&state);

    request_access(&app, "alice").await;

    let message = &state.mailer.recorded().unwrap().messages()[0];
    assert!(message
        .html_body
        .contains("https://auth.example.com/v1/claim-access/"));

    let token = token_from_email(&message.html_body);
    let credential = state
        .authority
        .verify_claim(&token, Timestamp::now())
        .expect("emailed token should be a valid claim");

    assert_eq!(credential.purpose, Purpose::ClaimAccess);
    let expires_at = credential.expires_at.expect("claims carry an expiry");
    assert_eq!(
        expires_at,
        credential
            .issued_at
            .checked_add_secs(DEFAULT_CLAIM_TTL_SECS)
            .unwrap()
    );
}

#[tokio::test]
async fn unacceptable_email_names_are_rejected_without_sending() {
    let state = test_state();
    let app = test_app(&state);

    for bad in ["", "alice@example.com", "alice smith"] {
        let status = request_access(&app, bad).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "input: {bad:?}");
    }

    assert!(state.mailer.recorded().unwrap().is_empty());
}

#[tokio::test]
async fn unparseable_body_is_bad_request() {
    let state = test_state();
    let app = test_app(&state);

    let response = app
        .oneshot(post_json(
            "/v1/request-access",
            serde_json::json!({"unexpected_key": "alice"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ── claim-access ────────────────────────────────────────────────────

#[tokio::test]
async fn full_redemption_flow_yields_a_grant() {
    let state = test_state();
    let app = test_app(&state);

    request_access(&app, "alice").await;
    let token = token_from_email(&state.mailer.recorded().unwrap().messages()[0].html_body);

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/claim-access/{token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["credential"]["purpose"], "access_granted");
    assert!(body["credential"]["proof"]["proof_value"].is_string());
    assert!(body["credential"].get("expires_at").is_none());

    // The returned wire token validates as a grant.
    let grant_token = body["token"].as_str().unwrap();
    let response = app
        .oneshot(post_json(
            "/v1/verify-access",
            serde_json::json!({"token": grant_token}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_claim_is_denied() {
    let state = test_state();
    let app = test_app(&state);

    // Mint a claim that expired before the request arrives.
    let past = Timestamp::now()
        .checked_add_secs(-(DEFAULT_CLAIM_TTL_SECS + 60))
        .unwrap();
    let token = state.authority.issue_claim_token(past).unwrap();

    let response = app
        .oneshot(get(&format!("/v1/claim-access/{token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_denied() {
    let state = test_state();
    let app = test_app(&state);

    let token = state.authority.issue_claim_token(Timestamp::now()).unwrap();
    let mut tampered = token.into_bytes();
    let mid = tampered.len() / 2;
    tampered[mid] = if tampered[mid] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .oneshot(get(&format!("/v1/claim-access/{tampered}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_key_token_is_denied() {
    let state = test_state();
    let app = test_app(&state);

    let foreign = TokenAuthority::new(SigningKey::generate(), DEFAULT_CLAIM_TTL_SECS);
    let token = foreign.issue_claim_token(Timestamp::now()).unwrap();

    let response = app
        .oneshot(get(&format!("/v1/claim-access/{token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn grant_cannot_be_replayed_into_claim_access() {
    let state = test_state();
    let app = test_app(&state);

    let grant = state.authority.issue_grant(Timestamp::now()).unwrap();
    let token = wire::encode(&grant).unwrap();

    let response = app
        .oneshot(get(&format!("/v1/claim-access/{token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn denied_responses_are_indistinguishable() {
    let state = test_state();
    let app = test_app(&state);

    let past = Timestamp::now()
        .checked_add_secs(-(DEFAULT_CLAIM_TTL_SECS + 60))
        .unwrap();
    let expired = state.authority.issue_claim_token(past).unwrap();
    let wrong_purpose =
        wire::encode(&state.authority.issue_grant(Timestamp::now()).unwrap()).unwrap();
    let foreign = TokenAuthority::new(SigningKey::generate(), DEFAULT_CLAIM_TTL_SECS)
        .issue_claim_token(Timestamp::now())
        .unwrap();

    let mut bodies = Vec::new();
    for token in ["not-even-base64!", &expired, &wrong_purpose, &foreign] {
        let response = app
            .clone()
            .oneshot(get(&format!("/v1/claim-access/{token}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_json(response).await);
    }

    // Whatever check failed, the caller sees the same bytes.
    for body in &bodies[1..] {
        assert_eq!(body, &bodies[0]);
    }
}

// ── verify-access ───────────────────────────────────────────────────

#[tokio::test]
async fn claim_token_is_not_a_grant() {
    let state = test_state();
    let app = test_app(&state);

    let token = state.authority.issue_claim_token(Timestamp::now()).unwrap();
    let response = app
        .oneshot(post_json(
            "/v1/verify-access",
            serde_json::json!({"token": token}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn old_grant_still_verifies() {
    let state = test_state();
    let app = test_app(&state);

    let long_ago = Timestamp::now().checked_add_secs(-86_400 * 365).unwrap();
    let grant = state.authority.issue_grant(long_ago).unwrap();
    let token = wire::encode(&grant).unwrap();

    let response = app
        .oneshot(post_json(
            "/v1/verify-access",
            serde_json::json!({"token": token}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ── concurrency ─────────────────────────────────────────────────────

#[tokio::test]
async fn simultaneous_redemptions_do_not_interfere() {
    let state = test_state();
    let app = test_app(&state);
    let now = Timestamp::now();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let token = state.authority.issue_claim_token(now).unwrap();
            let app = app.clone();
            tokio::spawn(async move {
                let response = app
                    .oneshot(get(&format!("/v1/claim-access/{token}")))
                    .await
                    .unwrap();
                response.status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}

// ── plumbing ────────────────────────────────────────────────────────

#[tokio::test]
async fn health_probes_respond() {
    let state = test_state();
    let app = test_app(&state);

    for uri in ["/health/liveness", "/health/readiness"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let state = test_state();
    let app = test_app(&state);

    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/v1/request-access"].is_object());
    assert!(body["paths"]["/v1/claim-access/{token}"].is_object());
    assert!(body["paths"]["/v1/verify-access"].is_object());
}
