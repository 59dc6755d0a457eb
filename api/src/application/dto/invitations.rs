use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::invitation_repository::InvitationRow;
use crate::domain::invitations::invitation::InvitationStatus;

/// Invitation as shown to the invitee or the choir admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDto {
    pub invitation_token: String,
    pub choir_id: Uuid,
    pub choir_name: String,
    pub email: String,
    pub status: InvitationStatus,
    pub sent_at: DateTime<Utc>,
}

impl From<InvitationRow> for InvitationDto {
    fn from(row: InvitationRow) -> Self {
        let InvitationRow {
            invitation,
            choir_name,
        } = row;
        Self {
            invitation_token: invitation.token,
            choir_id: invitation.choir_id,
            choir_name,
            email: invitation.email,
            status: invitation.status,
            sent_at: invitation.sent_at,
        }
    }
}
