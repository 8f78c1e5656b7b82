//! `SeaORM` Entity for artist table

use domain::artist::{Artist, NewArtist, Platforms};
use domain::value::ArtistId;
use log::warn;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Database-assigned insertion sequence.
    #[sea_orm(unique)]
    pub seq: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub img: String,
    #[sea_orm(column_type = "Text")]
    pub para1: String,
    #[sea_orm(column_type = "Text")]
    pub para2: String,
    #[sea_orm(column_type = "Text")]
    pub para3: String,
    pub hit_song: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub platforms: Json,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No relations defined for Artist")
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn platforms_to_json(platforms: &Platforms) -> Json {
    Json::Object(
        platforms
            .iter()
            .map(|(k, v)| (k.clone(), Json::String(v.clone())))
            .collect(),
    )
}

fn platforms_from_json(id: &Uuid, value: Json) -> Platforms {
    match value {
        Json::Object(map) => map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Json::String(s) => Some((k, s)),
                other => {
                    warn!("artist {}: dropping non-string platform {}={}", id, k, other);
                    None
                }
            })
            .collect(),
        Json::Null => Platforms::new(),
        other => {
            warn!("artist {}: platforms column is not an object: {}", id, other);
            Platforms::new()
        }
    }
}

impl ActiveModel {
    pub fn from_new_artist(id: ArtistId, artist: NewArtist, now: DateTime) -> Self {
        Self {
            id: Set(id.as_uuid()),
            seq: NotSet,
            name: Set(artist.name),
            img: Set(artist.img),
            para1: Set(artist.para1),
            para2: Set(artist.para2),
            para3: Set(artist.para3),
            hit_song: Set(artist.hit_song),
            platforms: Set(platforms_to_json(&artist.platforms)),
            text: Set(artist.text),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

impl From<Model> for Artist {
    fn from(model: Model) -> Self {
        let platforms = platforms_from_json(&model.id, model.platforms);
        Artist {
            id: ArtistId::from(model.id),
            name: model.name,
            img: model.img,
            para1: model.para1,
            para2: model.para2,
            para3: model.para3,
            hit_song: model.hit_song,
            platforms,
            text: model.text,
        }
    }
}
