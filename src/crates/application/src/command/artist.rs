use crate::error::AppError;
use domain::artist::{Artist, ArtistPatch, ArtistRepository, NewArtist};
use domain::value::ArtistId;
use log::{debug, info, warn};
use std::sync::Arc;

/// Presence check over the required fields, in declaration order.
/// Returns the message for the first missing one.
pub fn validate_artist(payload: &ArtistPatch) -> Option<String> {
    payload
        .missing_required_field()
        .map(|field| format!("{} is required", field))
}

#[derive(Clone)]
pub struct ArtistService {
    artist_repository: Arc<dyn ArtistRepository>,
}

impl ArtistService {
    pub fn new(artist_repository: Arc<dyn ArtistRepository>) -> Self {
        Self { artist_repository }
    }

    pub async fn create_artist(&self, payload: ArtistPatch) -> Result<Artist, AppError> {
        if let Some(message) = validate_artist(&payload) {
            debug!("Rejected artist payload: {}", message);
            return Err(AppError::InvalidInput(message));
        }
        let new_artist = NewArtist::try_from(payload)?;
        let artist = self.artist_repository.create(new_artist).await.map_err(|e| {
            warn!("Error adding artist: {}", e);
            AppError::from(e)
        })?;
        info!("Artist created: {} ({})", artist.name, artist.id);
        Ok(artist)
    }

    pub async fn list_artists(&self) -> Result<Vec<Artist>, AppError> {
        Ok(self.artist_repository.find_all().await?)
    }

    pub async fn get_artist(&self, raw_id: &str) -> Result<Artist, AppError> {
        let id = ArtistId::parse(raw_id)?;
        self.artist_repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))
    }

    pub async fn update_artist(
        &self,
        raw_id: &str,
        patch: ArtistPatch,
    ) -> Result<Artist, AppError> {
        let id = ArtistId::parse(raw_id)?;
        if let Some(field) = patch.blank_required_field() {
            return Err(AppError::InvalidInput(format!("{} is required", field)));
        }
        let artist = self
            .artist_repository
            .update_by_id(&id, patch)
            .await?
            .ok_or_else(|| not_found(&id))?;
        info!("Artist updated: {}", artist.id);
        Ok(artist)
    }

    pub async fn delete_artist(&self, raw_id: &str) -> Result<Artist, AppError> {
        let id = ArtistId::parse(raw_id)?;
        let artist = self
            .artist_repository
            .delete_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        info!("Artist deleted: {}", artist.id);
        Ok(artist)
    }
}

fn not_found(id: &ArtistId) -> AppError {
    debug!("Artist not found: {}", id);
    AppError::AggregateNotFound("Artist".to_string(), id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::artist::ArtistError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Vec-backed store that counts every call it receives.
    #[derive(Default)]
    struct RecordingRepository {
        rows: Mutex<Vec<Artist>>,
        calls: AtomicUsize,
        fail_with: Option<ArtistError>,
    }

    impl RecordingRepository {
        fn failing(err: ArtistError) -> Self {
            Self {
                fail_with: Some(err),
                ..Default::default()
            }
        }

        fn touch(&self) -> Result<(), ArtistError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ArtistRepository for RecordingRepository {
        async fn create(&self, artist: NewArtist) -> Result<Artist, ArtistError> {
            self.touch()?;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|a| a.name == artist.name) {
                return Err(ArtistError::DuplicateKey {
                    field: "name".to_string(),
                    value: artist.name,
                });
            }
            let artist = Artist::new(ArtistId::generate(), artist);
            rows.push(artist.clone());
            Ok(artist)
        }

        async fn find_all(&self) -> Result<Vec<Artist>, ArtistError> {
            self.touch()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
            self.touch()?;
            Ok(self.rows.lock().unwrap().iter().find(|a| a.id == *id).cloned())
        }

        async fn update_by_id(
            &self,
            id: &ArtistId,
            patch: ArtistPatch,
        ) -> Result<Option<Artist>, ArtistError> {
            self.touch()?;
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.iter_mut().find(|a| a.id == *id).map(|a| {
                a.apply(patch);
                a.clone()
            }))
        }

        async fn delete_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
            self.touch()?;
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|a| a.id == *id);
            Ok(pos.map(|p| rows.remove(p)))
        }
    }

    fn payload(name: &str, img: &str) -> ArtistPatch {
        ArtistPatch {
            name: Some(name.to_string()),
            img: Some(img.to_string()),
            ..Default::default()
        }
    }

    fn service(repo: &Arc<RecordingRepository>) -> ArtistService {
        ArtistService::new(repo.clone())
    }

    #[test]
    fn test_validate_artist_reports_first_missing_field() {
        assert_eq!(
            validate_artist(&ArtistPatch::default()),
            Some("name is required".to_string())
        );
        assert_eq!(
            validate_artist(&ArtistPatch {
                img: Some("u".to_string()),
                ..Default::default()
            }),
            Some("name is required".to_string())
        );
        assert_eq!(
            validate_artist(&ArtistPatch {
                name: Some("A".to_string()),
                img: Some(String::new()),
                ..Default::default()
            }),
            Some("img is required".to_string())
        );
        assert_eq!(validate_artist(&payload("A", "u")), None);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload_without_store_access() {
        let repo = Arc::new(RecordingRepository::default());
        let err = service(&repo)
            .create_artist(ArtistPatch {
                img: Some("u".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, AppError::InvalidInput("name is required".to_string()));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_defaults_optional_fields() {
        let repo = Arc::new(RecordingRepository::default());
        let mut input = payload("A", "u");
        input.para2 = Some("bio".to_string());
        let artist = service(&repo).create_artist(input).await.unwrap();
        assert_eq!(artist.name, "A");
        assert_eq!(artist.img, "u");
        assert_eq!(artist.para1, "");
        assert_eq!(artist.para2, "bio");
        assert_eq!(artist.text, "");
        assert!(artist.platforms.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_conflict() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);
        svc.create_artist(payload("A", "u")).await.unwrap();
        let err = svc.create_artist(payload("A", "v")).await.unwrap_err();
        assert_eq!(
            err,
            AppError::DuplicateKey("artist".to_string(), "name".to_string(), "A".to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_id_short_circuits() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);
        let get = svc.get_artist("nope").await.unwrap_err();
        let update = svc
            .update_artist("nope", ArtistPatch::default())
            .await
            .unwrap_err();
        let delete = svc.delete_artist("nope").await.unwrap_err();
        for err in [get, update, delete] {
            assert_eq!(err, AppError::InvalidArtistId("nope".to_string()));
        }
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);
        let id = ArtistId::generate().to_string();
        assert!(matches!(
            svc.get_artist(&id).await,
            Err(AppError::AggregateNotFound(_, _))
        ));
        assert!(matches!(
            svc.update_artist(&id, payload("A", "u")).await,
            Err(AppError::AggregateNotFound(_, _))
        ));
        assert!(matches!(
            svc.delete_artist(&id).await,
            Err(AppError::AggregateNotFound(_, _))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_blanked_required_field() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);
        let artist = svc.create_artist(payload("A", "u")).await.unwrap();
        let err = svc
            .update_artist(
                &artist.id.to_string(),
                ArtistPatch {
                    img: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, AppError::InvalidInput("img is required".to_string()));
        assert_eq!(svc.get_artist(&artist.id.to_string()).await.unwrap(), artist);
    }

    #[tokio::test]
    async fn test_round_trip_and_delete_twice() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);
        let created = svc.create_artist(payload("A", "u")).await.unwrap();
        let id = created.id.to_string();

        assert_eq!(svc.get_artist(&id).await.unwrap(), created);

        let updated = svc
            .update_artist(
                &id,
                ArtistPatch {
                    hit_song: Some("S".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hit_song, "S");
        assert_eq!(updated.name, created.name);

        assert_eq!(svc.delete_artist(&id).await.unwrap(), updated);
        assert!(matches!(
            svc.delete_artist(&id).await,
            Err(AppError::AggregateNotFound(_, _))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_repository_error() {
        let repo = Arc::new(RecordingRepository::failing(ArtistError::DbErr(
            "connection refused".to_string(),
        )));
        let svc = service(&repo);
        assert_eq!(
            svc.list_artists().await.unwrap_err(),
            AppError::RepositoryError("connection refused".to_string())
        );
        assert_eq!(
            svc.create_artist(payload("A", "u")).await.unwrap_err(),
            AppError::RepositoryError("connection refused".to_string())
        );
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }
}
