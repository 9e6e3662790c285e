mod common;

use anyhow::Result;
use uuid::Uuid;

use shamiri_hub_api::auth::{generate_jwt, Claims, Role};

/// Mint a session token with the same secret the spawned server validates
/// against. The config singleton reads JWT_SECRET on first access, so it is
/// set before any token is signed.
fn mint_session(name: &str, role: Role) -> String {
    std::env::set_var("JWT_SECRET", common::JWT_SECRET);
    let claims = Claims::new(Uuid::new_v4(), name.to_string(), role, Uuid::new_v4());
    generate_jwt(claims).expect("failed to sign session token")
}

#[tokio::test]
async fn whoami_echoes_the_session_actor() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = mint_session("Achieng O.", Role::HubCoordinator);
    let resp = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Achieng O.");
    assert_eq!(body["data"]["role"], "HUB_COORDINATOR");
    Ok(())
}

#[tokio::test]
async fn fellows_cannot_view_payout_reports() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = mint_session("Baraka M.", Role::Fellow);
    let resp = client
        .get(format!("{}/api/reports/payouts?day=M", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);

    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn coordinators_clear_the_capability_check() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = mint_session("Achieng O.", Role::HubCoordinator);

    // Bad day code fails validation after the capability check passes.
    let resp = client
        .get(format!("{}/api/reports/payouts?day=X", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    // A valid request reaches the datastore layer; with no database behind
    // the test server that surfaces as unavailable, never as 401/403.
    let resp = client
        .get(format!("{}/api/reports/payouts?day=M", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Header/payload shape is valid but the signature does not verify.
    let forged = mint_session("Intruder", Role::Admin) + "tampered";
    let resp = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(forged)
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    Ok(())
}
