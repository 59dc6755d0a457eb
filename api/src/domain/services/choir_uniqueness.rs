use async_trait::async_trait;

/// Guards choir creation and renames against name collisions.
///
/// Names collide when they are equal after trimming, collapsing inner
/// whitespace and lowercasing (see [`crate::domain::choirs::choir::choir_name_key`]).
#[async_trait]
pub trait ChoirUniquenessChecker: Send + Sync {
    /// `Ok(true)` when no existing choir uses `choir_name`.
    async fn is_unique(&self, choir_name: &str) -> anyhow::Result<bool>;
}
