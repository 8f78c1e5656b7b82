use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use anyhow::Context;
use infra::config::AppConfigImpl;
use log::{error, info};
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use server::middleware::other;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}";

fn log_level() -> log::LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

// 日志输出到控制台; 给出 log_file 时同时写入文件
fn logging_config(log_file: Option<&str>) -> anyhow::Result<Config> {
    let mut builder = Config::builder().appender(Appender::builder().build(
        "stdout",
        Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build(),
        ),
    ));
    let mut root = Root::builder().appender("stdout");

    if let Some(log_file) = log_file {
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file)
            .with_context(|| format!("cannot open log file {}", log_file))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(log_level()))?)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // console only until the config names the log file
    let log_handle = log4rs::init_config(logging_config(None)?)?;
    let cfg = match AppConfigImpl::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            return Err(anyhow::Error::new(e).context("failed to load configuration"));
        }
    };
    log_handle.set_config(logging_config(Some(cfg.log_file()))?);

    let server_cfg = cfg.server();
    let app_state = server::AppState::from_config(&cfg)
        .await
        .context("failed to initialise artist store")?;
    let app_state = web::Data::new(app_state);
    let allowed_origins = cfg.allowed_origins();

    info!(
        "Server is running on {}:{}",
        server_cfg.host, server_cfg.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(server::configure_app)
            .wrap(other::cors(allowed_origins.clone()))
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await?;
    Ok(())
}
