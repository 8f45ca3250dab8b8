use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use hitl_agent::{ApprovalGate, Assistant};
use hitl_common::SystemConfig;
use hitl_llm::OpenAiClient;
use hitl_session::SessionStore;
use hitl_tools::{TavilyClient, ToolRegistry};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{middleware, openapi, routes};

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub config: Arc<SystemConfig>,
}

pub struct ApiServer {
    state: AppState,
    addr: String,
}

impl ApiServer {
    /// Build the production server: resolve API keys from the environment and
    /// wire up the real LLM and search clients.
    pub fn new(config: SystemConfig) -> Result<Self> {
        let llm_key = std::env::var(&config.llm.api_key_env)
            .with_context(|| format!("Missing API key in {}", config.llm.api_key_env))?;
        let search_key = std::env::var(&config.search.api_key_env)
            .with_context(|| format!("Missing API key in {}", config.search.api_key_env))?;

        let backend = Arc::new(OpenAiClient::new(&config.llm, llm_key)?);
        let search_client = TavilyClient::new(
            config.search.endpoint.clone(),
            search_key,
            config.search.timeout_secs,
            config.search.max_results,
        )?;

        let store = Arc::new(SessionStore::new(Duration::from_secs(
            config.session.idle_ttl_secs,
        )));
        let assistant = Arc::new(Assistant::new(
            backend,
            ToolRegistry::builtin(search_client),
            Arc::clone(&store),
            ApprovalGate::new(config.gate.mode),
        ));

        let addr = format!("{}:{}", config.server.host, config.server.port);

        Ok(Self {
            state: AppState {
                assistant,
                config: Arc::new(config),
            },
            addr,
        })
    }

    /// Build the router for the given state. Split out so tests can drive the
    /// API with injected fakes.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(routes::frontend::frontend))
            .route("/chat", post(routes::chat::chat))
            .route("/approve", post(routes::approve::approve))
            .route("/health", get(routes::health::health))
            .route("/api-doc/openapi.json", get(openapi::openapi_json))
            .layer(axum::middleware::from_fn(
                middleware::logging::logging_middleware,
            ))
            .layer(middleware::logging::get_tracing_layer())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn run(self) -> Result<()> {
        let sweep_interval = Duration::from_secs(self.state.config.session.sweep_interval_secs);
        let _sweeper = self.state.assistant.store().spawn_sweeper(sweep_interval);

        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        info!("HITL assistant server listening on {}", self.addr);

        let router = Self::router(self.state);
        axum::serve(listener, router).await?;
        Ok(())
    }
}
