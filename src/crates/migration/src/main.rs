use env_logger::Env;
use log::info;
use sea_orm_migration::prelude::*;

/// The service reads its connection string from `APP__DATABASE_URL`; the
/// sea-orm CLI expects `DATABASE_URL`.
const APP_DATABASE_URL_ENV: &str = "APP__DATABASE_URL";

#[async_std::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    if std::env::var_os("DATABASE_URL").is_none() {
        if let Some(url) = std::env::var_os(APP_DATABASE_URL_ENV) {
            info!("DATABASE_URL not set, using {}", APP_DATABASE_URL_ENV);
            std::env::set_var("DATABASE_URL", url);
        }
    }
    cli::run_cli(migration::Migrator).await;
}
