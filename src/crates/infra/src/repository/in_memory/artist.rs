use async_trait::async_trait;
use domain::artist::{Artist, ArtistError, ArtistPatch, ArtistRepository, NewArtist};
use domain::value::ArtistId;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Insertion-ordered artist store. Enforces `name` uniqueness like the
/// unique index of the database table does.
#[derive(Clone, Default)]
pub struct InMemoryArtistRepository {
    store: Arc<RwLock<IndexMap<ArtistId, Artist>>>,
}

impl InMemoryArtistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_name_free(
    store: &IndexMap<ArtistId, Artist>,
    name: &str,
    except: Option<&ArtistId>,
) -> Result<(), ArtistError> {
    let clash = store
        .values()
        .any(|a| a.name == name && Some(&a.id) != except);
    if clash {
        return Err(ArtistError::DuplicateKey {
            field: "name".to_string(),
            value: name.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ArtistRepository for InMemoryArtistRepository {
    async fn create(&self, new_artist: NewArtist) -> Result<Artist, ArtistError> {
        let mut store = self.store.write().await;
        ensure_name_free(&store, &new_artist.name, None)?;
        let artist = Artist::new(ArtistId::generate(), new_artist);
        store.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn find_all(&self) -> Result<Vec<Artist>, ArtistError> {
        Ok(self.store.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
        Ok(self.store.read().await.get(id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &ArtistId,
        patch: ArtistPatch,
    ) -> Result<Option<Artist>, ArtistError> {
        let mut store = self.store.write().await;
        if !store.contains_key(id) {
            return Ok(None);
        }
        if let Some(name) = &patch.name {
            ensure_name_free(&store, name, Some(id))?;
        }
        Ok(store.get_mut(id).map(|artist| {
            artist.apply(patch);
            artist.clone()
        }))
    }

    async fn delete_by_id(&self, id: &ArtistId) -> Result<Option<Artist>, ArtistError> {
        Ok(self.store.write().await.shift_remove(id))
    }
}
