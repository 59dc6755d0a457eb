use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::domain::choirs::choir::normalize_choir_name;
use crate::domain::services::choir_uniqueness::ChoirUniquenessChecker;

/// Checks choir names against the choir store, ignoring case and spacing.
pub struct StoreChoirUniquenessChecker {
    choirs: Arc<dyn ChoirRepository>,
}

impl StoreChoirUniquenessChecker {
    pub fn new(choirs: Arc<dyn ChoirRepository>) -> Self {
        Self { choirs }
    }
}

#[async_trait]
impl ChoirUniquenessChecker for StoreChoirUniquenessChecker {
    async fn is_unique(&self, choir_name: &str) -> anyhow::Result<bool> {
        let name = normalize_choir_name(choir_name);
        if name.is_empty() {
            return Ok(true);
        }
        Ok(!self.choirs.name_exists(&name).await?)
    }
}
