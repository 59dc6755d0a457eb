pub mod complete_onboarding;
pub mod find_or_create_user;
pub mod get_user;
pub mod update_user_role;

use crate::domain::errors::DomainError;

#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("only a super admin can change user roles")]
    Forbidden,
    #[error("{0} cannot be assigned")]
    InvalidRole(&'static str),
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("user storage failed")]
    Storage(#[source] anyhow::Error),
}
