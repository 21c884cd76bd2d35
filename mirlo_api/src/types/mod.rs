mod meta;
pub use self::meta::{ListResponse, Response};

mod artist;
pub use self::artist::{Artist, ArtistID};

mod track_group;
pub use self::track_group::{Cover, Track, TrackGroup, TrackGroupID, TrackGroupUpdate, TrackID};

pub type UserID = i64;
