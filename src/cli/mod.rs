use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use crate::app::{app, AppState};
use crate::auth::PgAuthProvider;
use crate::config;
use crate::controllers;
use crate::database::DatabaseManager;
use crate::openapi;

#[derive(Parser)]
#[command(name = "planets-api")]
#[command(about = "Planets API server and OpenAPI exporter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PLANETS_API_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print the generated OpenAPI document")]
    Openapi {
        #[arg(long, value_enum, default_value_t = DocumentFormat::Json)]
        format: DocumentFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Openapi { format } => {
            println!("{}", render_document(format)?);
            Ok(())
        }
    }
}

pub fn render_document(format: DocumentFormat) -> anyhow::Result<String> {
    let document = openapi::api_document(&controllers::registry());
    let rendered = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(&document)?,
        DocumentFormat::Yaml => serde_yaml::to_string(&document)?,
    };
    Ok(rendered)
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting planets-api in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let pool = DatabaseManager::connect_lazy(&config.database).context("database pool")?;
    if let Err(e) = DatabaseManager::ensure_schema(&pool).await {
        tracing::warn!("Database schema not ensured, continuing without it: {}", e);
    }

    let state = AppState::new(
        pool.clone(),
        Arc::new(PgAuthProvider::new(pool)),
        controllers::registry(),
    );

    let bind_addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Planets API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["planets-api"]);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["planets-api", "serve", "--port", "4100"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(4100) })));
    }

    #[test]
    fn renders_yaml_documents() {
        let cli = Cli::parse_from(["planets-api", "openapi", "--format", "yaml"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Openapi { format: DocumentFormat::Yaml })
        ));

        let yaml = render_document(DocumentFormat::Yaml).unwrap();
        assert!(yaml.contains("openapi: 3.0.0"));
        assert!(yaml.contains("/api/SampleController/getSample"));
    }
}
