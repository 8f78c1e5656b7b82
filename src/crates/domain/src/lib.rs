pub mod artist;
pub mod value;
