pub mod create_choir;
pub mod delete_choir;
pub mod get_choir;
pub mod list_user_choirs;
pub mod remove_member;
pub mod update_choir;
pub mod update_member_role;

use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::conflict::is_unique_violation;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::choirs::choir::Choir;
use crate::domain::errors::DomainError;

#[derive(thiserror::Error, Debug)]
pub enum ChoirError {
    #[error("choir not found")]
    NotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("only the choir admin can {action}")]
    Forbidden { action: &'static str },
    #[error("a choir named '{0}' already exists")]
    DuplicateName(String),
    #[error("{0} is not a choir member role")]
    InvalidRole(&'static str),
    #[error(transparent)]
    Invalid(DomainError),
    #[error("choir storage failed")]
    Storage(#[source] anyhow::Error),
}

impl From<DomainError> for ChoirError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotAdmin { action } => ChoirError::Forbidden { action },
            other => ChoirError::Invalid(other),
        }
    }
}

async fn load_choir<R: ChoirRepository + ?Sized>(repo: &R, id: Uuid) -> Result<Choir, ChoirError> {
    repo.find_by_id(id)
        .await
        .map_err(ChoirError::Storage)?
        .ok_or(ChoirError::NotFound)
}

/// A write that lost the race for `name` against the unique index.
fn name_write_error(name: &str, err: anyhow::Error) -> ChoirError {
    if is_unique_violation(&err) {
        ChoirError::DuplicateName(name.to_string())
    } else {
        ChoirError::Storage(err)
    }
}

/// Drops a stored choirAdmin role once the user administers no choir.
async fn drop_unused_admin_role<U, C>(users: &U, choirs: &C, user_id: Uuid) -> anyhow::Result<()>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    if choirs.administers_any(user_id).await? {
        return Ok(());
    }
    let Some(mut user) = users.find_by_id(user_id).await? else {
        return Ok(());
    };
    let before = user.role;
    user.demote_to_general();
    if user.role != before {
        users.save_profile(&user).await?;
        tracing::info!(user_id = %user_id, "admin_role_dropped");
    }
    Ok(())
}

/// Role bookkeeping never fails the operation that triggered it.
async fn settle_admin_role<U, C>(users: &U, choirs: &C, user_id: Uuid)
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    if let Err(e) = drop_unused_admin_role(users, choirs, user_id).await {
        tracing::warn!(user_id = %user_id, error = ?e, "admin_role_settle_failed");
    }
}

fn ensure_admin(choir: &Choir, user_id: Uuid, action: &'static str) -> Result<(), ChoirError> {
    if choir.is_admin(user_id) {
        Ok(())
    } else {
        Err(ChoirError::Forbidden { action })
    }
}
