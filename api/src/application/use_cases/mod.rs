pub mod choir_songs;
pub mod choirs;
pub mod invitations;
pub mod playlists;
pub mod songs;
pub mod tags;
pub mod tokens;
pub mod users;
