//! Server entrypoint: config, tracing, pool, router, serve.

use std::process::exit;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use opsdeck::adapters::auth::{PasswordHasher, TokenService};
use opsdeck::adapters::http::{api_router, health_router, AppState};
use opsdeck::adapters::postgres::{
    create_pool, PostgresClientRepository, PostgresContractRepository, PostgresFinanceReader,
    PostgresLeadRepository, PostgresMeetingRepository, PostgresMemberRepository,
    PostgresProjectRepository, PostgresSuggestionRepository, PostgresTaskRepository,
    PostgresTransactionRepository, MIGRATOR,
};
use opsdeck::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        exit(1);
    }

    init_tracing(&config);

    if let Err(err) = run(config).await {
        tracing::error!("server failed: {}", err);
        exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        MIGRATOR.run(&pool).await?;
    }

    let state = AppState {
        clients: Arc::new(PostgresClientRepository::new(pool.clone())),
        leads: Arc::new(PostgresLeadRepository::new(pool.clone())),
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        contracts: Arc::new(PostgresContractRepository::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionRepository::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        meetings: Arc::new(PostgresMeetingRepository::new(pool.clone())),
        suggestions: Arc::new(PostgresSuggestionRepository::new(pool.clone())),
        finance: Arc::new(PostgresFinanceReader::new(pool.clone())),
        tokens: Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl(),
        )),
        passwords: Arc::new(PasswordHasher::new()),
    };

    let app = api_router(state, &config.server).merge(health_router(pool));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
