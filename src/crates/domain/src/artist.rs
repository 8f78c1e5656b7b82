use crate::value::ArtistId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Platform name (e.g. "spotify") to link.
pub type Platforms = BTreeMap<String, String>;

/// Fields that must be present and non-empty, checked in this order.
pub const REQUIRED_FIELDS: [&str; 2] = ["name", "img"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtistError {
    #[error("{0}")]
    DbErr(String),
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("duplicate key: {field}={value}")]
    DuplicateKey { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub img: String,
    pub para1: String,
    pub para2: String,
    pub para3: String,
    pub hit_song: String,
    pub platforms: Platforms,
    pub text: String,
}

impl Artist {
    pub fn new(id: ArtistId, new_artist: NewArtist) -> Self {
        Self {
            id,
            name: new_artist.name,
            img: new_artist.img,
            para1: new_artist.para1,
            para2: new_artist.para2,
            para3: new_artist.para3,
            hit_song: new_artist.hit_song,
            platforms: new_artist.platforms,
            text: new_artist.text,
        }
    }

    /// Overwrites every field the patch carries; absent fields are kept.
    pub fn apply(&mut self, patch: ArtistPatch) {
        let ArtistPatch {
            name,
            img,
            para1,
            para2,
            para3,
            hit_song,
            platforms,
            text,
        } = patch;
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = img {
            self.img = v;
        }
        if let Some(v) = para1 {
            self.para1 = v;
        }
        if let Some(v) = para2 {
            self.para2 = v;
        }
        if let Some(v) = para3 {
            self.para3 = v;
        }
        if let Some(v) = hit_song {
            self.hit_song = v;
        }
        if let Some(v) = platforms {
            self.platforms = v;
        }
        if let Some(v) = text {
            self.text = v;
        }
    }
}

/// A normalized record ready for insertion: required fields verbatim,
/// optional fields defaulted to empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewArtist {
    pub name: String,
    pub img: String,
    pub para1: String,
    pub para2: String,
    pub para3: String,
    pub hit_song: String,
    pub platforms: Platforms,
    pub text: String,
}

impl TryFrom<ArtistPatch> for NewArtist {
    type Error = ArtistError;

    fn try_from(patch: ArtistPatch) -> Result<Self, Self::Error> {
        if let Some(field) = patch.missing_required_field() {
            return Err(ArtistError::MissingField { field });
        }
        Ok(Self {
            name: patch.name.unwrap_or_default(),
            img: patch.img.unwrap_or_default(),
            para1: patch.para1.unwrap_or_default(),
            para2: patch.para2.unwrap_or_default(),
            para3: patch.para3.unwrap_or_default(),
            hit_song: patch.hit_song.unwrap_or_default(),
            platforms: patch.platforms.unwrap_or_default(),
            text: patch.text.unwrap_or_default(),
        })
    }
}

/// Partial record: every field optional. Used both as the create payload
/// (before normalization) and as the update payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub img: Option<String>,
    pub para1: Option<String>,
    pub para2: Option<String>,
    pub para3: Option<String>,
    pub hit_song: Option<String>,
    pub platforms: Option<Platforms>,
    pub text: Option<String>,
}

impl ArtistPatch {
    fn required_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "img" => self.img.as_deref(),
            _ => None,
        }
    }

    /// First required field that is absent or empty.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|field| self.required_value(field).map_or(true, str::is_empty))
    }

    /// First required field that is present but empty. Absent fields are
    /// fine here since an update leaves them untouched.
    pub fn blank_required_field(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|field| self.required_value(field) == Some(""))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Persistence contract for the artist collection. The store assigns ids and
/// enforces `name` uniqueness, reporting violations as `DuplicateKey`.
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn create(&self, artist: NewArtist) -> Result<Artist, ArtistError>;
    async fn find_all(&self) -> Result<Vec<Artist>, ArtistError>;
    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError>;
    async fn update_by_id(
        &self,
        id: &ArtistId,
        patch: ArtistPatch,
    ) -> Result<Option<Artist>, ArtistError>;
    async fn delete_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError>;
}
