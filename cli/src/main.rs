//! Tariff Lookup CLI
//!
//! ```sh
//! # Ranked next-level results for a keyword or code
//! tariff-lookup search "chewing gum"
//! tariff-lookup search 1704.90 --country AU
//!
//! # Rate history and per-country map from stored price records
//! tariff-lookup history 1704.90.35 --country NZ
//! tariff-lookup countries 1704.90.35
//!
//! # Load fetched price records, browse by category or code
//! tariff-lookup import prices.json
//! tariff-lookup browse sugar
//!
//! # Validate config without running anything
//! tariff-lookup --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use tariff_lookup::config::{AppConfig, CONFIG_ENV_VAR};
use tariff_lookup::domain::{IsoCountryRegistry, ProductPriceRecord};
use tariff_lookup::infrastructure::{InMemorySearchProvider, SeaOrmPriceRecordRepository};
use tariff_lookup::shared::errors::{AppError, InfraError};
use tariff_lookup::{
    default_config_path, init_database, init_tracing, DomainError, PriceHistoryService,
    TariffLookupService,
};

/// Tariff classification lookup and country-rate resolution.
#[derive(Parser, Debug)]
#[command(name = "tariff-lookup", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the tariff dataset used by `search`.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Override the price-record database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Next classification level below a keyword or code, ranked.
    Search {
        query: String,
        /// ISO country code to resolve the applicable rate for.
        #[arg(long)]
        country: Option<String>,
    },
    /// Rate applying to a country on every stored date of a code.
    History {
        code: String,
        #[arg(long)]
        country: String,
    },
    /// Rate applying to a country as of the latest record of a code.
    Price {
        code: String,
        #[arg(long)]
        country: String,
    },
    /// Rate for every country as of the latest record of a code.
    Countries { code: String },
    /// Next level of stored records below a category keyword or code.
    Browse { query: String },
    /// Import a JSON array of dated price records.
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&Default::default());
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref dataset) = cli.dataset {
        config.search.dataset_path = Some(dataset.clone());
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }
    init_tracing(&config.logging);
    info!("Configuration loaded from {}", config_path.display());

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!(
            "   Dataset     : {}",
            config
                .search
                .dataset_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
        println!("   Lookups     : {}", config.search.max_concurrent_lookups);
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        error!("No command given; see --help");
        return ExitCode::from(64);
    };

    match run(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            exit_code(&e)
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<(), AppError> {
    let countries = Arc::new(IsoCountryRegistry::new());

    match command {
        Command::Search { query, country } => {
            let Some(ref path) = config.search.dataset_path else {
                return Err(DomainError::InvalidInput(
                    "no tariff dataset configured (set [search] dataset_path or --dataset)".into(),
                )
                .into());
            };
            let provider = InMemorySearchProvider::from_json_file(path).await?;
            if provider.is_empty() {
                return Err(DomainError::InvalidInput(format!(
                    "tariff dataset {} is empty",
                    path.display()
                ))
                .into());
            }
            let provider = Arc::new(provider);
            let service =
                TariffLookupService::new(provider, countries, config.search.max_concurrent_lookups);
            print_json(&service.search(&query, country.as_deref()).await?)
        }
        Command::History { code, country } => {
            let service = price_service(config, countries).await?;
            print_json(&service.historical_prices(&code, &country).await?)
        }
        Command::Price { code, country } => {
            let service = price_service(config, countries).await?;
            print_json(&service.price_for_country(&code, &country).await?)
        }
        Command::Countries { code } => {
            let service = price_service(config, countries).await?;
            print_json(&service.country_price_map(&code).await?)
        }
        Command::Browse { query } => {
            let service = price_service(config, countries).await?;
            print_json(&service.browse(&query).await?)
        }
        Command::Import { file } => {
            let raw = tokio::fs::read_to_string(&file).await.map_err(InfraError::from)?;
            let records: Vec<ProductPriceRecord> =
                serde_json::from_str(&raw).map_err(InfraError::from)?;
            let service = price_service(config, countries).await?;
            print_json(&service.import(records).await?)
        }
    }
}

async fn price_service(
    config: &AppConfig,
    countries: Arc<IsoCountryRegistry>,
) -> Result<PriceHistoryService, AppError> {
    let db = init_database(&config.database_config())
        .await
        .map_err(InfraError::from)?;
    let store = Arc::new(SeaOrmPriceRecordRepository::new(db));
    Ok(PriceHistoryService::new(store, countries))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value).map_err(InfraError::from)?;
    println!("{}", out);
    Ok(())
}

fn exit_code(err: &AppError) -> ExitCode {
    match err {
        AppError::Domain(DomainError::NotFound { .. }) => ExitCode::from(2),
        AppError::Domain(DomainError::InvalidInput(_)) => ExitCode::from(65),
        _ => ExitCode::FAILURE,
    }
}
