//! Payment Proof Model

use serde::{Deserialize, Serialize};

/// Verification state of a single uploaded proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ProofStatus {
    Pending,
    Verified,
    Rejected,
}

/// Customer-submitted payment proof image
///
/// An order may accumulate several proofs (re-upload after rejection);
/// each is verified independently by an admin decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentProof {
    pub id: i64,
    pub order_id: i64,
    pub image_path: String,
    pub status: ProofStatus,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Admin decision on one proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofDecision {
    Verified,
    Rejected,
}

impl From<ProofDecision> for ProofStatus {
    fn from(decision: ProofDecision) -> Self {
        match decision {
            ProofDecision::Verified => Self::Verified,
            ProofDecision::Rejected => Self::Rejected,
        }
    }
}
