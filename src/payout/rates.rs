//! Static session-type rate table.
//!
//! Rates are whole Kenyan shillings per attended session. The table is
//! versionless and read-only at aggregation time; attendance rows carry the
//! session type as a raw label because historic data contains legacy labels
//! that no longer map to a known session type.

use serde::{Deserialize, Serialize};

/// Known intervention session slots with a fixed payout rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    Presession,
    Session01,
    Session02,
    Session03,
    Session04,
    SpecialSession01,
    SpecialSession02,
}

impl SessionType {
    /// Parse a stored session-type label. Returns `None` for legacy or
    /// unknown labels, which callers treat as a zero-rate session.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Presession" => Some(SessionType::Presession),
            "Session01" => Some(SessionType::Session01),
            "Session02" => Some(SessionType::Session02),
            "Session03" => Some(SessionType::Session03),
            "Session04" => Some(SessionType::Session04),
            "SpecialSession01" => Some(SessionType::SpecialSession01),
            "SpecialSession02" => Some(SessionType::SpecialSession02),
            _ => None,
        }
    }

    /// Fixed payout rate in KES.
    pub fn rate_kes(self) -> i64 {
        match self {
            SessionType::Presession => 500,
            SessionType::Session01
            | SessionType::Session02
            | SessionType::Session03
            | SessionType::Session04 => 1000,
            SessionType::SpecialSession01 | SessionType::SpecialSession02 => 1000,
        }
    }

    pub fn is_presession(self) -> bool {
        matches!(self, SessionType::Presession)
    }
}

/// Rate lookup over raw labels. Unknown labels rate at 0 rather than failing,
/// so a stale label in historic attendance cannot block report generation.
pub fn rate_for(label: &str) -> i64 {
    SessionType::from_label(label).map_or(0, SessionType::rate_kes)
}
