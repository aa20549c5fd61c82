//! VentureLens server entry point.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use venturelens::adapters::ai::{OpenAiCompletionClient, OpenAiConfig};
use venturelens::adapters::document::PitchDeckExtractor;
use venturelens::adapters::http::{
    app_router, ProfileHandlers, PsychometricHandlers, ReportHandlers, ValidationHandlers,
};
use venturelens::adapters::postgres::{PgAssessmentStore, PgProfileStore, PgReportStore};
use venturelens::adapters::render::PdfReportRenderer;
use venturelens::application::handlers::profile::GetProfileHandler;
use venturelens::application::handlers::psychometric::{
    EvaluateAssessmentHandler, GenerateAssessmentHandler,
};
use venturelens::application::handlers::report::{
    DownloadReportHandler, GetReportHandler, ListReportsHandler,
};
use venturelens::application::handlers::validation::{
    ValidateIdeaHandler, ValidatePitchDeckHandler,
};
use venturelens::application::{PanelRunner, PersonalizationService, QuestionGenerator};
use venturelens::config::AppConfig;
use venturelens::ports::{
    AssessmentStore, CompletionClient, ProfileStore, ReportStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    info!(
        environment = ?config.server.environment,
        "starting venturelens {}",
        env!("CARGO_PKG_VERSION")
    );

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let completions: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletionClient::new(
        OpenAiConfig::from(&config.ai),
    )?);
    let reports: Arc<dyn ReportStore> = Arc::new(PgReportStore::new(pool.clone()));
    let profiles: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(pool.clone()));
    let assessments: Arc<dyn AssessmentStore> = Arc::new(PgAssessmentStore::new(pool));
    let extractor = Arc::new(PitchDeckExtractor::new(completions.clone()));
    let renderer = Arc::new(PdfReportRenderer::new());

    // Services
    let panel_runner = Arc::new(PanelRunner::new(completions.clone(), config.panel.clone()));
    let personalization = Arc::new(PersonalizationService::new(profiles.clone()));
    let question_generator = Arc::new(QuestionGenerator::new(completions));

    // Use-case handlers
    let validate_idea = Arc::new(ValidateIdeaHandler::new(
        panel_runner,
        personalization,
        reports.clone(),
        profiles.clone(),
        config.panel.weight_overrides.clone(),
    ));
    let validate_pitch_deck = Arc::new(ValidatePitchDeckHandler::new(
        extractor,
        validate_idea.clone(),
    ));
    let generate_assessment = Arc::new(GenerateAssessmentHandler::new(
        question_generator,
        assessments.clone(),
    ));
    let evaluate_assessment = Arc::new(EvaluateAssessmentHandler::new(
        assessments,
        profiles.clone(),
    ));
    let get_profile = Arc::new(GetProfileHandler::new(profiles));
    let list_reports = Arc::new(ListReportsHandler::new(reports.clone()));
    let get_report = Arc::new(GetReportHandler::new(reports.clone()));
    let download_report = Arc::new(DownloadReportHandler::new(reports, renderer));

    // HTTP
    let router = app_router(
        ValidationHandlers::new(validate_idea, validate_pitch_deck),
        PsychometricHandlers::new(generate_assessment, evaluate_assessment),
        ProfileHandlers::new(get_profile),
        ReportHandlers::new(list_reports, get_report, download_report),
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
    }
    info!("shutdown signal received");
}
