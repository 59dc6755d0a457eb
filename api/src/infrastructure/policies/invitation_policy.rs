use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::invitation_repository::InvitationRepository;
use crate::domain::services::invitation_policy::InvitationPolicy;
use crate::domain::users::email::normalize_email;

/// Allows an invitation when the choir exists, the email is not a member yet and
/// no pending invitation for the same pair is outstanding.
pub struct StoreInvitationPolicy {
    invitations: Arc<dyn InvitationRepository>,
}

impl StoreInvitationPolicy {
    pub fn new(invitations: Arc<dyn InvitationRepository>) -> Self {
        Self { invitations }
    }
}

#[async_trait]
impl InvitationPolicy for StoreInvitationPolicy {
    async fn can_be_created(&self, choir_id: Uuid, email: &str) -> anyhow::Result<bool> {
        let Ok(email) = normalize_email(email) else {
            return Ok(false);
        };
        let facts = self.invitations.eligibility(choir_id, &email).await?;
        tracing::debug!(
            choir_id = %choir_id,
            choir_exists = facts.choir_exists,
            already_member = facts.already_member,
            pending_invitation = facts.pending_invitation,
            "invitation_eligibility"
        );
        Ok(facts.choir_exists && !facts.already_member && !facts.pending_invitation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::choir_repository::ChoirRepository as _;
    use crate::domain::invitations::invitation::Invitation;
    use crate::test_support::InMemoryStore;

    #[tokio::test]
    async fn members_cannot_be_invited_again() {
        let store = Arc::new(InMemoryStore::new());
        let admin = store.seed_user("Julia");
        let singer = store.seed_user("Oscar");
        let choir = store.seed_choir("Allegro", &admin);
        store.add_member(choir.id, singer.id, false).await.unwrap();
        let policy = StoreInvitationPolicy::new(store.clone());

        assert!(!policy.can_be_created(choir.id, &singer.email).await.unwrap());
        assert!(
            !policy
                .can_be_created(choir.id, &singer.email.to_uppercase())
                .await
                .unwrap()
        );
        assert!(!policy.can_be_created(choir.id, &admin.email).await.unwrap());
    }

    #[tokio::test]
    async fn pending_invitation_blocks_until_answered() {
        let store = Arc::new(InMemoryStore::new());
        let admin = store.seed_user("Julia");
        let choir = store.seed_choir("Allegro", &admin);
        let invitation = Invitation::create(choir.id, "guest@example.com").unwrap();
        store.insert_invitation(&invitation).await.unwrap();
        let policy = StoreInvitationPolicy::new(store.clone());

        assert!(!policy.can_be_created(choir.id, "guest@example.com").await.unwrap());
        assert!(store.reject(invitation.id).await.unwrap());
        assert!(policy.can_be_created(choir.id, "guest@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_choir_or_bad_email_is_refused() {
        let store = Arc::new(InMemoryStore::new());
        let admin = store.seed_user("Julia");
        let choir = store.seed_choir("Allegro", &admin);
        let policy = StoreInvitationPolicy::new(store.clone());

        assert!(!policy.can_be_created(Uuid::new_v4(), "guest@example.com").await.unwrap());
        assert!(!policy.can_be_created(choir.id, "guest").await.unwrap());
        assert!(policy.can_be_created(choir.id, "guest@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn pending_invitation_for_another_choir_does_not_block() {
        let store = Arc::new(InMemoryStore::new());
        let admin = store.seed_user("Julia");
        let first = store.seed_choir("Allegro", &admin);
        let second = store.seed_choir("Adagio", &admin);
        store
            .insert_invitation(&Invitation::create(first.id, "guest@example.com").unwrap())
            .await
            .unwrap();
        let policy = StoreInvitationPolicy::new(store.clone());
        assert!(policy.can_be_created(second.id, "guest@example.com").await.unwrap());
    }
}
