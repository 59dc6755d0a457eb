use base64::Engine as _;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::users::email::{normalize_email, same_email};

const TOKEN_BYTES: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(InvitationStatus::Pending),
            "accepted" => Some(InvitationStatus::Accepted),
            "rejected" => Some(InvitationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Uuid,
    pub choir_id: Uuid,
    pub email: String,
    pub token: String,
    pub status: InvitationStatus,
    pub sent_at: DateTime<Utc>,
}

pub(crate) fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

impl Invitation {
    pub fn create(choir_id: Uuid, email: &str) -> Result<Self, DomainError> {
        if choir_id.is_nil() {
            return Err(DomainError::Empty { field: "choir id" });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            choir_id,
            email: normalize_email(email)?,
            token: generate_token(),
            status: InvitationStatus::Pending,
            sent_at: Utc::now(),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    pub fn is_for(&self, email: &str) -> bool {
        same_email(&self.email, email)
    }

    /// Only pending invitations transition; returns whether the status changed.
    pub fn accept(&mut self) -> bool {
        self.transition(InvitationStatus::Accepted)
    }

    pub fn reject(&mut self) -> bool {
        self.transition(InvitationStatus::Rejected)
    }

    fn transition(&mut self, to: InvitationStatus) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = to;
        true
    }
}
