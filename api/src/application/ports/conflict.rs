/// A write collided with a uniqueness constraint in the store.
///
/// Adapters return it inside `anyhow::Error`; use cases downcast with
/// [`is_unique_violation`] to turn a lost race into their own conflict error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unique constraint violated: {constraint}")]
pub struct UniqueViolation {
    pub constraint: String,
}

impl UniqueViolation {
    pub fn on(constraint: &str) -> Self {
        Self {
            constraint: constraint.to_string(),
        }
    }
}

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UniqueViolation>().is_some()
}
