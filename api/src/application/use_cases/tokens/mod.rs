pub mod issue_token;
pub mod refresh_token;
pub mod validate_token;

use crate::domain::users::user::UserRole;

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("user not found")]
    NotFound,
    #[error("invalid token")]
    InvalidToken(#[source] anyhow::Error),
    #[error("failed to sign token")]
    Signing(#[source] anyhow::Error),
    #[error("token storage lookup failed")]
    Storage(#[source] anyhow::Error),
}

/// Role carried in a token. Administering any choir makes a user a choir admin;
/// super admins stay super admins.
pub fn effective_role(stored: UserRole, administers_any_choir: bool) -> UserRole {
    match stored {
        UserRole::SuperAdmin => UserRole::SuperAdmin,
        _ if administers_any_choir => UserRole::ChoirAdmin,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choir_administration_drives_the_role() {
        assert_eq!(effective_role(UserRole::General, true), UserRole::ChoirAdmin);
        assert_eq!(effective_role(UserRole::General, false), UserRole::General);
        assert_eq!(effective_role(UserRole::ChoirAdmin, false), UserRole::ChoirAdmin);
        assert_eq!(effective_role(UserRole::SuperAdmin, true), UserRole::SuperAdmin);
    }
}
