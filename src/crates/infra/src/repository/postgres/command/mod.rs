pub mod artist;
pub mod db_data;

pub use artist::ArtistRepositoryImpl;
