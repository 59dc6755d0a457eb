pub mod invitations;
pub mod playlists;
pub mod tags;
