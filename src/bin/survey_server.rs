use anyhow::{Context, Result};
use clap::Parser;
use geotag_survey::api::create_router;
use geotag_survey::config::{AppState, ServerConfig, DEFAULT_BIND, DEFAULT_MAX_BODY_MB};
use geotag_survey::ingest_directory;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Survey image API server", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SURVEY_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Also keep a copy of each upload in this directory
    #[arg(long, env = "SURVEY_UPLOAD_DIR", value_name = "DIR")]
    upload_dir: Option<PathBuf>,

    /// Request body limit in megabytes
    #[arg(long, env = "SURVEY_MAX_BODY_MB", default_value_t = DEFAULT_MAX_BODY_MB)]
    max_body_mb: usize,

    /// Ingest a survey directory before serving
    #[arg(long, env = "SURVEY_INGEST_DIR", value_name = "DIR")]
    ingest_dir: Option<PathBuf>,

    /// Stop the startup ingest after this many images
    #[arg(long, env = "SURVEY_MAX_IMAGES")]
    max_images: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = ServerConfig {
        bind: args.bind,
        ..ServerConfig::default()
    }
    .with_body_limit_mb(args.max_body_mb);
    if let Some(dir) = args.upload_dir {
        config = config.with_upload_dir(dir);
    }

    let state = AppState::in_memory(config);

    if let Some(dir) = args.ingest_dir {
        let limit = args.max_images;
        let report = tokio::task::spawn_blocking(move || ingest_directory(&dir, limit))
            .await?
            .context("startup ingest failed")?;

        for failure in &report.failures {
            warn!("startup ingest skipped {}: {}", failure.filename, failure.error);
        }
        let inserted = state.store.insert_many(report.records);
        info!("Loaded {} image(s) at startup", inserted.len());
    }

    let bind = state.config.bind;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    info!("Survey API listening on http://{}", bind);
    info!("  POST   /api/upload (multipart/form-data: one or more `file` parts)");
    info!("  GET    /api/images | /api/images/first | /api/images/:id/raw");
    info!("  DELETE /api/images");
    info!("  GET    /api/features | /api/features.csv | /api/health");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
