//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::gallery::{GalleryHandler, GalleryStore, InMemoryGalleryStore, PgGalleryStore};
use crate::http_server::HttpServer;
use crate::images::ImageCatalog;
use crate::observability::ObservationScope;

use super::args::{Command, Function};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_json};

/// How the PostgreSQL pool opens its first connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connect {
    /// Connect now and fail if the database is unreachable
    Eager,
    /// Connect on first statement
    Lazy,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            in_memory,
        } => serve(&config, port, in_memory),
        Command::Invoke {
            function,
            config,
            in_memory,
        } => invoke(function, &config, in_memory),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Serve `/gallery`, `/images` and `/health` over HTTP
pub fn serve(config_path: &Path, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    let mut config = ServiceConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
        config.validate()?;
    }

    let rt = runtime()?;
    rt.block_on(async {
        let scope = ObservationScope::new("BOOT");

        let store = match open_store(&config, in_memory, Connect::Eager).await {
            Ok(store) => store,
            Err(e) => {
                scope.fail(e.message());
                return Err(e);
            }
        };

        scope.complete_with_fields(&[
            ("layout", config.layout.as_str()),
            ("store", if in_memory { "memory" } else { "postgres" }),
        ]);

        HttpServer::new(config.http_config(), GalleryHandler::new(store))
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Read one request envelope from stdin, write the response envelope to stdout.
///
/// Database failures are reported inside the envelope (500), like any other
/// handler failure.
pub fn invoke(function: Function, config_path: &Path, in_memory: bool) -> CliResult<()> {
    let request = read_request()?;

    let response = match function {
        Function::Images => ImageCatalog::new().handle(&request),
        Function::Gallery => {
            let config = ServiceConfig::load(config_path)?;
            let rt = runtime()?;
            rt.block_on(async {
                let store = open_store(&config, in_memory, Connect::Lazy).await?;
                Ok::<_, CliError>(GalleryHandler::new(store).handle(&request).await)
            })?
        }
    };

    write_json(&response)
}

/// Validate configuration and print it with the password masked
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = ServiceConfig::load(config_path)?;
    config.require_database_url()?;
    write_json(&config.redacted())
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

async fn open_store(
    config: &ServiceConfig,
    in_memory: bool,
    connect: Connect,
) -> CliResult<Arc<dyn GalleryStore>> {
    let layout = config.table_layout()?;

    if in_memory {
        return Ok(Arc::new(InMemoryGalleryStore::new(layout.variant())));
    }

    let url = config.require_database_url()?;
    let settings = config.pool_settings();
    let store = match connect {
        Connect::Eager => PgGalleryStore::connect(url, &layout, settings).await?,
        Connect::Lazy => PgGalleryStore::connect_lazy(url, &layout, settings)?,
    };
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::ItemLayout;

    #[tokio::test]
    async fn test_open_in_memory_store() {
        let config = ServiceConfig {
            layout: ItemLayout::Basic,
            ..Default::default()
        };
        let store = open_store(&config, true, Connect::Eager).await.unwrap();
        assert_eq!(store.layout(), ItemLayout::Basic);
    }

    #[tokio::test]
    async fn test_missing_database_url_is_config_error() {
        let config = ServiceConfig::default();
        let err = match open_store(&config, false, Connect::Lazy).await {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.code_str(), "GALLERY_CLI_CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_lazy_store_does_not_connect() {
        let config = ServiceConfig {
            database_url: Some("postgres://gallery:pw@127.0.0.1:1/gallery".to_string()),
            ..Default::default()
        };
        let store = open_store(&config, false, Connect::Lazy).await.unwrap();
        assert_eq!(store.layout(), ItemLayout::Profile);
    }
}
