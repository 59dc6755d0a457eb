use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, required_text};
use crate::domain::users::email::normalize_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    #[default]
    General,
    ChoirAdmin,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::General => "general",
            UserRole::ChoirAdmin => "choirAdmin",
            UserRole::SuperAdmin => "superAdmin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "general" => Some(UserRole::General),
            "choirAdmin" => Some(UserRole::ChoirAdmin),
            "superAdmin" => Some(UserRole::SuperAdmin),
            _ => None,
        }
    }

    /// General users become choir admins; other roles are kept.
    pub fn promoted(self) -> Self {
        match self {
            UserRole::General => UserRole::ChoirAdmin,
            other => other,
        }
    }

    pub fn demoted(self) -> Self {
        match self {
            UserRole::ChoirAdmin => UserRole::General,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub has_completed_onboarding: bool,
    /// Identity-provider subject (Google id); never leaves the backend.
    #[serde(skip)]
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn create(
        external_id: Option<&str>,
        name: &str,
        email: &str,
    ) -> Result<Self, DomainError> {
        let external_id = match external_id {
            Some(id) => Some(required_text("external id", id, 255)?),
            None => None,
        };
        let name = required_text("user name", name, 200)?;
        let email = normalize_email(email)?;
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            name,
            role: UserRole::General,
            has_completed_onboarding: false,
            external_id,
            created_at: Utc::now(),
        })
    }

    pub fn is_new(&self) -> bool {
        !self.has_completed_onboarding
    }

    pub fn promote_to_admin(&mut self) {
        self.role = self.role.promoted();
    }

    pub fn demote_to_general(&mut self) {
        self.role = self.role.demoted();
    }

    pub fn complete_onboarding(&mut self) {
        self.has_completed_onboarding = true;
    }
}
