/// Validation failures raised by entity constructors and mutators.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("a valid email is required")]
    InvalidEmail,
    #[error("a choir must have an admin")]
    MissingAdmin,
    #[error("only the choir admin can {action}")]
    NotAdmin { action: &'static str },
    #[error("the choir admin cannot be removed")]
    AdminRemoval,
    #[error("the choir admin's role cannot be changed")]
    AdminRoleChange,
    #[error("user is already a member of this choir")]
    AlreadyMember,
    #[error("member not found in this choir")]
    MemberNotFound,
    #[error("song is already in the playlist")]
    DuplicateSong,
    #[error("song not found in the playlist")]
    SongNotInPlaylist,
    #[error("expiry date must be in the future")]
    ExpiryNotInFuture,
    #[error("maximum uses must be greater than zero")]
    InvalidMaxUses,
    #[error("invitation link has been deactivated")]
    LinkInactive,
    #[error("invitation link has expired")]
    LinkExpired,
    #[error("invitation link has reached its maximum number of uses")]
    LinkExhausted,
}

/// Trims a required text field, rejecting blanks and values longer than `max` chars.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
