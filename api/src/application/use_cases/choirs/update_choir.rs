use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::use_cases::choirs::{
    ChoirError, ensure_admin, load_choir, name_write_error,
};
use crate::domain::choirs::choir::{Choir, choir_name_key};
use crate::domain::services::choir_uniqueness::ChoirUniquenessChecker;

pub struct UpdateChoir<'a, C, Q>
where
    C: ChoirRepository + ?Sized,
    Q: ChoirUniquenessChecker + ?Sized,
{
    pub choirs: &'a C,
    pub uniqueness: &'a Q,
}

impl<'a, C, Q> UpdateChoir<'a, C, Q>
where
    C: ChoirRepository + ?Sized,
    Q: ChoirUniquenessChecker + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        name: &str,
        description: Option<String>,
        requester_id: Uuid,
    ) -> Result<Choir, ChoirError> {
        let mut choir = load_choir(self.choirs, choir_id).await?;
        ensure_admin(&choir, requester_id, "update the choir")?;
        let previous_key = choir_name_key(&choir.name);
        choir.rename(name)?;
        choir.set_description(description);
        // Renaming to a different casing of the same name is not a conflict.
        if choir_name_key(&choir.name) != previous_key
            && !self
                .uniqueness
                .is_unique(&choir.name)
                .await
                .map_err(ChoirError::Storage)?
        {
            return Err(ChoirError::DuplicateName(choir.name));
        }
        let updated = self
            .choirs
            .update_details(choir.id, &choir.name, choir.description.as_deref())
            .await
            .map_err(|e| name_write_error(&choir.name, e))?;
        if !updated {
            return Err(ChoirError::NotFound);
        }
        tracing::info!(choir_id = %choir.id, "choir_updated");
        Ok(choir)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::use_cases::choirs::get_choir::GetChoir;
    use crate::infrastructure::policies::choir_uniqueness::StoreChoirUniquenessChecker;
    use crate::test_support::InMemoryStore;

    #[tokio::test]
    async fn admin_can_rename_including_case_only_changes() {
        let store = Arc::new(InMemoryStore::new());
        let checker = StoreChoirUniquenessChecker::new(store.clone());
        let admin = store.seed_user("Ines");
        let choir = store.seed_choir("cantoria", &admin);
        let uc = UpdateChoir {
            choirs: store.as_ref(),
            uniqueness: &checker,
        };

        let renamed = uc
            .execute(choir.id, "Cantoria", Some("Madrid".into()), admin.id)
            .await
            .unwrap();
        assert_eq!(renamed.name, "Cantoria");
        assert_eq!(renamed.description.as_deref(), Some("Madrid"));
    }

    struct StaleChecker;

    #[async_trait::async_trait]
    impl ChoirUniquenessChecker for StaleChecker {
        async fn is_unique(&self, _choir_name: &str) -> anyhow::Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn rename_losing_the_race_reports_duplicate_name() {
        let store = Arc::new(InMemoryStore::new());
        let admin = store.seed_user("Ines");
        let choir = store.seed_choir("Cantoria", &admin);
        store.seed_choir("Schola", &admin);
        let uc = UpdateChoir {
            choirs: store.as_ref(),
            uniqueness: &StaleChecker,
        };

        assert!(matches!(
            uc.execute(choir.id, "schola", None, admin.id).await,
            Err(ChoirError::DuplicateName(_))
        ));
        assert_eq!(
            GetChoir { repo: store.as_ref() }
                .execute(choir.id)
                .await
                .unwrap()
                .name,
            "Cantoria"
        );
    }

    #[tokio::test]
    async fn rejects_taken_names_and_non_admins() {
        let store = Arc::new(InMemoryStore::new());
        let checker = StoreChoirUniquenessChecker::new(store.clone());
        let admin = store.seed_user("Ines");
        let other = store.seed_user("Olga");
        let choir = store.seed_choir("Cantoria", &admin);
        store.seed_choir("Schola", &other);
        let uc = UpdateChoir {
            choirs: store.as_ref(),
            uniqueness: &checker,
        };

        assert!(matches!(
            uc.execute(choir.id, "SCHOLA", None, admin.id).await,
            Err(ChoirError::DuplicateName(_))
        ));
        assert!(matches!(
            uc.execute(choir.id, "New Name", None, other.id).await,
            Err(ChoirError::Forbidden { .. })
        ));
        assert!(matches!(
            uc.execute(Uuid::new_v4(), "New Name", None, admin.id).await,
            Err(ChoirError::NotFound)
        ));
    }
}
