use async_trait::async_trait;
use uuid::Uuid;

/// Gate consulted before a membership invitation is created.
///
/// An invitation may be created when the choir exists, the email does not
/// already belong to a member, and no pending invitation exists for the pair.
#[async_trait]
pub trait InvitationPolicy: Send + Sync {
    async fn can_be_created(&self, choir_id: Uuid, email: &str) -> anyhow::Result<bool>;
}
