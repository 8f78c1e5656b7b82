pub const URL_PATH_NATIVE_API: &str = "/api";
pub const URL_PATH_ARTISTS: &str = "/artists";
pub const WELCOME_MESSAGE: &str = "Welcome to Artists API";
pub const CORS_MAX_AGE: usize = 3600;
