use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// Program roles. Every session token carries exactly one; capability checks
/// happen once at the authorization boundary via [`Role::can`], not through
/// string comparisons scattered across handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    HubCoordinator,
    Supervisor,
    ClinicalLead,
    Fellow,
    Operations,
}

/// What a request is trying to do. One capability per protected surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// View payout and repayment reports for the actor's implementer.
    ViewPayouts,
}

impl Role {
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ViewPayouts => match self {
                Role::Admin | Role::HubCoordinator | Role::Operations => true,
                Role::Supervisor | Role::ClinicalLead | Role::Fellow => false,
            },
        }
    }
}

/// Claims carried by a session JWT issued for a hub user.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub role: Role,
    pub implementer_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: Uuid, name: String, role: Role, implementer_id: Uuid) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(24)).timestamp();

        Self {
            sub,
            name,
            role,
            implementer_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Sign a session token for the given claims. The identity provider mints
/// production tokens; this path backs the CLI-free surfaces (integration
/// tests, local smoke sessions) with the same claim shape.
pub fn generate_jwt(claims: Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
