use super::db_data::artist::{platforms_to_json, ActiveModel, Column, Entity, Model};
use async_trait::async_trait;
use domain::artist::{Artist, ArtistError, ArtistPatch, ArtistRepository, NewArtist};
use domain::value::ArtistId;
use log::error;
use sea_orm::*;

#[derive(Clone)]
pub struct ArtistRepositoryImpl {
    db: DatabaseConnection,
}

impl ArtistRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &ArtistId) -> Result<Option<Model>, ArtistError> {
        Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

/// Listing order is the insertion sequence assigned by the database.
fn ordered() -> Select<Entity> {
    Entity::find().order_by_asc(Column::Seq)
}

fn db_err(e: DbErr) -> ArtistError {
    error!("artist store error: {}", e);
    ArtistError::DbErr(e.to_string())
}

/// `name` carries the only secondary unique index, so a unique violation
/// is attributed to it.
fn write_err(e: DbErr, name: &str) -> ArtistError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ArtistError::DuplicateKey {
            field: "name".to_string(),
            value: name.to_string(),
        },
        _ => db_err(e),
    }
}

#[async_trait]
impl ArtistRepository for ArtistRepositoryImpl {
    async fn create(&self, new_artist: NewArtist) -> Result<Artist, ArtistError> {
        let name = new_artist.name.clone();
        let now = chrono::Utc::now().naive_utc();
        let model = ActiveModel::from_new_artist(ArtistId::generate(), new_artist, now)
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &name))?;
        Ok(model.into())
    }

    async fn find_all(&self) -> Result<Vec<Artist>, ArtistError> {
        let rows = ordered()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
        Ok(self.find_model(id).await?.map(Artist::from))
    }

    async fn update_by_id(
        &self,
        id: &ArtistId,
        patch: ArtistPatch,
    ) -> Result<Option<Artist>, ArtistError> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut merged = Artist::from(model.clone());
        merged.apply(patch);

        let mut active_model = model.into_active_model();
        active_model.name = Set(merged.name.clone());
        active_model.img = Set(merged.img);
        active_model.para1 = Set(merged.para1);
        active_model.para2 = Set(merged.para2);
        active_model.para3 = Set(merged.para3);
        active_model.hit_song = Set(merged.hit_song);
        active_model.platforms = Set(platforms_to_json(&merged.platforms));
        active_model.text = Set(merged.text);
        active_model.updated_at = Set(chrono::Utc::now().naive_utc());

        match active_model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into())),
            // row vanished between the lookup and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(write_err(e, &merged.name)),
        }
    }

    async fn delete_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };
        let result = Entity::delete_many()
            .filter(Column::Id.eq(id.as_uuid()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(model.into()))
    }
}
