//! HTTP server implementation

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::llm::Generator;
use crate::Result;

/// Start the API server with an already-built answering service.
///
/// Index construction happens before this point; the server only ever sees
/// read-only state.
pub async fn serve_api<E, G>(config: &AppConfig, state: AppState<E, G>) -> Result<()>
where
    E: Embedder + 'static,
    G: Generator + 'static,
{
    info!("🚀 Starting FAQ-RAG API server...");

    let mut app: Router = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if config.server.enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /health    - Health check");
    info!("  POST /ask       - Answer a question");
    info!("  GET  /history   - Recent interactions");
    info!("  POST /retrieve  - Raw retrieval (no generation)");

    axum::serve(listener, app).await?;

    Ok(())
}
