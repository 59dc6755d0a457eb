pub mod choirs;
pub mod errors;
pub mod invitations;
pub mod playlists;
pub mod services;
pub mod songs;
pub mod users;
