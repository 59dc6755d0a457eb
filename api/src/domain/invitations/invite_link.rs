use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::invitations::invitation::generate_token;

/// A reusable join link for a choir. Anyone holding the token may join while
/// the link is active, unexpired and under its use limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLink {
    pub id: Uuid,
    pub choir_id: Uuid,
    pub token: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub max_uses: Option<i32>,
    pub uses: i32,
}

impl InviteLink {
    pub fn create(
        choir_id: Uuid,
        created_by: Uuid,
        expires_at: Option<DateTime<Utc>>,
        max_uses: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if choir_id.is_nil() {
            return Err(DomainError::Empty { field: "choir id" });
        }
        if expires_at.is_some_and(|at| at <= now) {
            return Err(DomainError::ExpiryNotInFuture);
        }
        if max_uses.is_some_and(|max| max <= 0) {
            return Err(DomainError::InvalidMaxUses);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            choir_id,
            token: generate_token(),
            created_by,
            created_at: now,
            expires_at,
            is_active: true,
            max_uses,
            uses: 0,
        })
    }

    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active {
            return Err(DomainError::LinkInactive);
        }
        if self.expires_at.is_some_and(|at| at <= now) {
            return Err(DomainError::LinkExpired);
        }
        if self.max_uses.is_some_and(|max| self.uses >= max) {
            return Err(DomainError::LinkExhausted);
        }
        Ok(())
    }

    /// Counts one use; fails without changing anything when the link is unusable.
    pub fn redeem(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.check_usable(now)?;
        self.uses += 1;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
