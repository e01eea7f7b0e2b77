use cartas_search_core::{
    AzureSearchStore, SearchConfig, SearchService, DEFAULT_API_VERSION, DEFAULT_INDEX_NAME,
};
use chrono::Utc;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod routes;

#[derive(Parser)]
#[command(name = "cartas-search-api", version)]
struct Cli {
    /// Azure Cognitive Search service name
    #[arg(long, env = "SEARCH_SERVICE_NAME")]
    search_service_name: String,

    /// Azure Cognitive Search query or admin key
    #[arg(long, env = "SEARCH_API_KEY", hide_env_values = true)]
    search_api_key: String,

    /// Facet fields, comma separated; a trailing `*` marks a collection field
    #[arg(long, env = "SEARCH_FACETS", default_value = "")]
    search_facets: String,

    /// Index queried by every request
    #[arg(long, env = "SEARCH_INDEX_NAME", default_value = DEFAULT_INDEX_NAME)]
    index_name: String,

    /// Search REST API version
    #[arg(long, env = "SEARCH_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:7071")]
    listen: SocketAddr,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            index_name: self.index_name.clone(),
            api_version: self.api_version.clone(),
            ..SearchConfig::new(
                &self.search_service_name,
                &self.search_api_key,
                &self.search_facets,
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.search_config();
    config.validate()?;

    let store = AzureSearchStore::new(&config);
    let service = Arc::new(SearchService::new(store, config.search_facets.clone()));

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        endpoint = %config.endpoint(),
        index = %config.index_name,
        facets = %service.facet_declaration(),
        "cartas-search-api boot"
    );

    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!("http listening on {}", cli.listen);
    axum::serve(listener, routes::router(service)).await?;

    Ok(())
}
