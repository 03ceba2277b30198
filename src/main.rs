use co_database_console::{
    HttpIdentityService, IdentityState, NotifierState,
    config::{AppConfig, Env},
    create_navigator,
    events::AppEvent,
    navigator::Bootstrap,
    surface::{TracingNotifier, TracingTitleSink},
};
use std::{process::ExitCode, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Boots the console's navigation core the way the browser shell does:
/// configuration, logging, the initial navigation, the one-time identity fetch,
/// then every further location given on the command line. Each committed
/// navigation is printed as one JSON line.
#[tokio::main]
async fn main() -> ExitCode {
    // 1. Configuration & Environment Loading
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging, pretty locally and JSON in production.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "co_database_console=debug,co_console=debug".into());
    match config.env {
        Env::Local => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        Env::Production => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    tracing::info!("Console starting in {:?} mode", config.env);

    // 3. Collaborators
    let identity = Arc::new(HttpIdentityService::new(&config.api_base_url)) as IdentityState;
    let notifier = Arc::new(TracingNotifier) as NotifierState;

    // 4. Navigator
    let mut navigator = match create_navigator(config, Arc::new(TracingTitleSink)) {
        Ok(navigator) => navigator,
        Err(e) => {
            tracing::error!(error = %e, "invalid route table");
            return ExitCode::FAILURE;
        }
    };
    navigator.events_mut().subscribe(Box::new(|event| {
        if let AppEvent::Navigated { route, view_mode } = event {
            tracing::debug!(%route, %view_mode, "layout chrome notified");
        }
    }));

    let mut locations: Vec<String> = std::env::args().skip(1).collect();
    if locations.is_empty() {
        locations.push("/".to_string());
    }
    let initial = locations.remove(0);

    // 5. Initial navigation, then the identity fetch (admin is provisional until it lands).
    let mut reports = Vec::new();
    match navigator.navigate(initial.as_str()) {
        Ok(nav) => reports.push(nav),
        Err(e) => {
            tracing::error!(error = %e, location = %initial, "navigation failed");
            return ExitCode::FAILURE;
        }
    }

    match navigator.bootstrap(identity.as_ref(), notifier.as_ref()).await {
        Ok(Bootstrap::Loaded(Some(nav)))
        | Ok(Bootstrap::Failed {
            navigation: Some(nav),
            ..
        }) => reports.push(nav),
        Ok(Bootstrap::Loaded(None)) | Ok(Bootstrap::Failed { navigation: None, .. }) => {}
        Ok(Bootstrap::LoginRequired { login_url }) => {
            println!("{}", serde_json::json!({ "login": login_url }));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            tracing::error!(error = %e, "re-resolution after identity load failed");
            return ExitCode::FAILURE;
        }
    }

    // 6. Remaining locations, one navigation at a time.
    for location in locations {
        match navigator.navigate(location.as_str()) {
            Ok(nav) => reports.push(nav),
            Err(e) => {
                tracing::error!(error = %e, %location, "navigation failed");
                return ExitCode::FAILURE;
            }
        }
    }

    for nav in &reports {
        match serde_json::to_string(nav) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "could not serialize navigation report"),
        }
    }

    ExitCode::SUCCESS
}
