use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use emoji_core::GenerationPipeline;
use emoji_llm::{AnthropicProvider, LLMError, MessagesProvider};

use crate::config::ServerConfig;
use crate::handlers;
use crate::middleware::TracingMiddleware;

/// Shared per-worker state. The pipeline itself is stateless; cloning it only
/// bumps the provider's reference count.
pub struct AppState {
    pub pipeline: GenerationPipeline,
}

impl AppState {
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self { pipeline }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/generate-emoji", web::post().to(handlers::generate::handler))
            .route("/health", web::get().to(handlers::health::handler)),
    )
    .route(
        "/assets/{category}/{file}",
        web::get().to(handlers::assets::handler),
    );
}

/// Wire the real service client and asset store from `config`.
pub fn build_state(config: &ServerConfig) -> Result<AppState, LLMError> {
    let provider: Arc<dyn MessagesProvider> = Arc::new(
        AnthropicProvider::new(config.api_key.clone())?
            .with_base_url(config.anthropic_base_url.clone()),
    );

    Ok(AppState::new(GenerationPipeline::new(
        config.asset_store(),
        provider,
    )))
}

pub async fn run_server(config: ServerConfig) -> io::Result<()> {
    log::info!("Initializing server with {:?}", config);

    let state = web::Data::new(build_state(&config).map_err(io::Error::other)?);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingMiddleware)
            .configure(app_config)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let address = config.bind_address();
    let server = server.bind(&address)?.run();

    log::info!("Starting emoji service on http://{address}");

    server.await
}
