use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, optional_text, required_text};
use crate::domain::users::email::same_email;
use crate::domain::users::user::User;

pub const MAX_CHOIR_NAME_LEN: usize = 100;

/// Display form of a choir name: trimmed, inner whitespace runs collapsed.
pub fn normalize_choir_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key for uniqueness checks. Two names collide when their keys match.
pub fn choir_name_key(name: &str) -> String {
    normalize_choir_name(name).to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoirMember {
    #[serde(flatten)]
    pub user: User,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choir {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub admin_user_id: Uuid,
    pub members: Vec<ChoirMember>,
    pub created_at: DateTime<Utc>,
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    required_text("choir name", &normalize_choir_name(name), MAX_CHOIR_NAME_LEN)
}

impl Choir {
    /// New choir with `admin` as its first (admin) member.
    pub fn create(
        name: &str,
        description: Option<String>,
        admin: User,
    ) -> Result<Self, DomainError> {
        let name = validate_name(name)?;
        if admin.id.is_nil() {
            return Err(DomainError::MissingAdmin);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description: optional_text(description),
            admin_user_id: admin.id,
            members: vec![ChoirMember {
                user: admin,
                is_admin: true,
            }],
            created_at: Utc::now(),
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = optional_text(description);
    }

    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.admin_user_id == user_id
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|m| m.user.id == user_id)
    }

    pub fn has_member_email(&self, email: &str) -> bool {
        self.members.iter().any(|m| same_email(&m.user.email, email))
    }

    pub fn add_member(&mut self, user: User, is_admin: bool) -> Result<(), DomainError> {
        if self.is_member(user.id) {
            return Err(DomainError::AlreadyMember);
        }
        self.members.push(ChoirMember { user, is_admin });
        Ok(())
    }

    pub fn remove_member(
        &mut self,
        member_id: Uuid,
        requesting_user_id: Uuid,
    ) -> Result<ChoirMember, DomainError> {
        if !self.is_admin(requesting_user_id) {
            return Err(DomainError::NotAdmin {
                action: "remove members",
            });
        }
        if member_id == self.admin_user_id {
            return Err(DomainError::AdminRemoval);
        }
        let idx = self
            .members
            .iter()
            .position(|m| m.user.id == member_id)
            .ok_or(DomainError::MemberNotFound)?;
        Ok(self.members.remove(idx))
    }

    /// Grants or revokes co-admin rights. The owning admin always stays admin.
    pub fn set_member_admin(
        &mut self,
        member_id: Uuid,
        is_admin: bool,
        requesting_user_id: Uuid,
    ) -> Result<&ChoirMember, DomainError> {
        if !self.is_admin(requesting_user_id) {
            return Err(DomainError::NotAdmin {
                action: "update member roles",
            });
        }
        if member_id == self.admin_user_id {
            return Err(DomainError::AdminRoleChange);
        }
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user.id == member_id)
            .ok_or(DomainError::MemberNotFound)?;
        member.is_admin = is_admin;
        Ok(member)
    }
}
