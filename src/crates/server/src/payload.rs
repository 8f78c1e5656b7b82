use domain::artist::{Artist, ArtistPatch, Platforms};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for create and update. Every field is optional; `null`
/// counts as absent and unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPayload {
    #[serde(default, deserialize_with = "required_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "required_text")]
    pub img: Option<String>,
    pub para1: Option<String>,
    pub para2: Option<String>,
    pub para3: Option<String>,
    pub hit_song: Option<String>,
    pub platforms: Option<Platforms>,
    pub text: Option<String>,
}

/// Required text fields accept `false` and `0` as blank so that they fail the
/// presence check instead of the body parser.
fn required_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(false)) => Ok(Some(String::new())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(Some(String::new())),
        Some(other) => Err(de::Error::custom(format!(
            "invalid type: {}, expected a string",
            other
        ))),
    }
}

impl From<ArtistPayload> for ArtistPatch {
    fn from(p: ArtistPayload) -> Self {
        ArtistPatch {
            name: p.name,
            img: p.img,
            para1: p.para1,
            para2: p.para2,
            para3: p.para3,
            hit_song: p.hit_song,
            platforms: p.platforms,
            text: p.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub id: String,
    pub name: String,
    pub img: String,
    pub para1: String,
    pub para2: String,
    pub para3: String,
    pub hit_song: String,
    pub platforms: Platforms,
    pub text: String,
}

impl From<Artist> for ArtistResponse {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id.to_string(),
            name: artist.name,
            img: artist.img,
            para1: artist.para1,
            para2: artist.para2,
            para3: artist.para3,
            hit_song: artist.hit_song,
            platforms: artist.platforms,
            text: artist.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }
}
