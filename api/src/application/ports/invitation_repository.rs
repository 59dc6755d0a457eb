use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::invitations::invitation::Invitation;

#[derive(Debug, Clone)]
pub struct InvitationRow {
    pub invitation: Invitation,
    pub choir_name: String,
}

/// Facts the invitation policy decides on, gathered in one round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvitationEligibility {
    pub choir_exists: bool,
    pub already_member: bool,
    pub pending_invitation: bool,
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// A second pending invitation for the same choir and email fails with
    /// [`UniqueViolation`](crate::application::ports::conflict::UniqueViolation).
    async fn insert_invitation(&self, invitation: &Invitation) -> anyhow::Result<()>;
    async fn find_pending_by_token(&self, token: &str) -> anyhow::Result<Option<Invitation>>;
    /// Marks a pending invitation accepted and adds `user_id` to its choir in one
    /// transaction. Returns false, changing nothing, when it is no longer pending.
    async fn accept(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    /// Returns false when the invitation is no longer pending.
    async fn reject(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn list_pending_for_email(&self, email: &str) -> anyhow::Result<Vec<InvitationRow>>;
    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InvitationRow>>;
    /// `email` is already normalised.
    async fn eligibility(
        &self,
        choir_id: Uuid,
        email: &str,
    ) -> anyhow::Result<InvitationEligibility>;
}
