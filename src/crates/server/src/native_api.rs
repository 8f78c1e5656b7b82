use super::consts;
use super::AppState;
use crate::payload::{ArtistPayload, ArtistResponse, ErrorBody};
use actix_web::{
    error::InternalError, http::StatusCode, web, web::Json, web::Path, HttpResponse, Scope,
};
use application::error::AppError;
use log::{error, info};
use serde_json::Value;
use thiserror::Error;

/// Handler-boundary error: an application error plus the operation label
/// reported when the store itself failed.
#[derive(Error, Debug)]
#[error("{inner}")]
pub struct ApiError {
    inner: AppError,
    context: Option<&'static str>,
}

impl ApiError {
    pub fn context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    fn body(&self) -> ErrorBody {
        match &self.inner {
            AppError::InvalidInput(msg) => ErrorBody::new(msg.as_str()),
            AppError::InvalidArtistId(_) => ErrorBody::new("Invalid artist ID"),
            AppError::AggregateNotFound(_, _) => ErrorBody::new("Artist not found"),
            AppError::DuplicateKey(_, field, value) => {
                let mut conflict = serde_json::Map::new();
                conflict.insert(field.clone(), Value::String(value.clone()));
                ErrorBody::new("Duplicate artist").with_error(Value::Object(conflict))
            }
            AppError::RepositoryError(msg) => match self.context {
                Some(context) => ErrorBody::new(context).with_error(Value::String(msg.clone())),
                None => ErrorBody::new(msg.as_str()),
            },
        }
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            context: None,
        }
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.inner {
            AppError::InvalidInput(_)
            | AppError::InvalidArtistId(_)
            | AppError::DuplicateKey(..) => StatusCode::BAD_REQUEST,
            AppError::AggregateNotFound(_, _) => StatusCode::NOT_FOUND,
            AppError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}: {}", self.context.unwrap_or("Artist store error"), self.inner);
        }
        HttpResponse::build(status).json(self.body())
    }
}

fn with_context(context: &'static str) -> impl Fn(AppError) -> ApiError {
    move |e| ApiError::from(e).context(context)
}

async fn create(
    state: web::Data<AppState>,
    Json(payload): Json<ArtistPayload>,
) -> Result<HttpResponse, ApiError> {
    let artist = state
        .artist_service
        .create_artist(payload.into())
        .await
        .map_err(with_context("Error adding artist"))?;
    Ok(HttpResponse::Created().json(ArtistResponse::from(artist)))
}

async fn list(state: web::Data<AppState>) -> Result<Json<Vec<ArtistResponse>>, ApiError> {
    let artists = state.artist_service.list_artists().await?;
    Ok(Json(artists.into_iter().map(ArtistResponse::from).collect()))
}

async fn retrieve(
    state: web::Data<AppState>,
    path: Path<String>,
) -> Result<Json<ArtistResponse>, ApiError> {
    let artist = state
        .artist_service
        .get_artist(&path.into_inner())
        .await
        .map_err(with_context("Error fetching artist"))?;
    Ok(Json(artist.into()))
}

async fn update(
    state: web::Data<AppState>,
    path: Path<String>,
    Json(payload): Json<ArtistPayload>,
) -> Result<Json<ArtistResponse>, ApiError> {
    let artist = state
        .artist_service
        .update_artist(&path.into_inner(), payload.into())
        .await
        .map_err(with_context("Error updating artist"))?;
    Ok(Json(artist.into()))
}

async fn delete(
    state: web::Data<AppState>,
    path: Path<String>,
) -> Result<Json<ArtistResponse>, ApiError> {
    let artist = state
        .artist_service
        .delete_artist(&path.into_inner())
        .await
        .map_err(with_context("Error deleting artist"))?;
    Ok(Json(artist.into()))
}

/// Malformed JSON bodies answer 400 in the same `{message, error}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new("Invalid request body").with_error(Value::String(err.to_string()));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn scope_artists() -> Scope {
    info!("http config for {}", consts::URL_PATH_ARTISTS);
    web::scope(consts::URL_PATH_ARTISTS)
        .service(
            web::resource("/{id}")
                .route(web::get().to(retrieve))
                .route(web::patch().to(update))
                .route(web::delete().to(delete)),
        )
        .service(
            web::resource("")
                .route(web::get().to(list))
                .route(web::post().to(create)),
        )
}

pub fn configure_service(svc: &mut web::ServiceConfig) {
    svc.service(
        web::scope(consts::URL_PATH_NATIVE_API)
            .app_data(json_config())
            .service(scope_artists()),
    );
}
