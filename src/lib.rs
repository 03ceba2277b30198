// --- Module Structure ---

// Core navigation pipeline: table -> guard -> resolver, driven by the navigator.
pub mod guard;
pub mod navigator;
pub mod resolver;

// Shared state consumed by the pipeline.
pub mod auth;
pub mod view;

// Collaborators and supporting services.
pub mod config;
pub mod events;
pub mod identity;
pub mod models;
pub mod surface;

// Module for route families (Default, Admin) and the table that matches them.
pub mod routes;

use auth::Session;
use view::ViewState;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use identity::{HttpIdentityService, IdentityState, MockIdentityService};
pub use navigator::{Bootstrap, NavigationError, Navigator};
pub use routes::{RouteTable, RouteTableError};
pub use surface::{MemoryTitleSink, MockNotifier, NotifierState, TitleSinkState};

/// AppState
///
/// The single, explicit state container of the console: the session identity,
/// the active view mode and the loaded configuration. It is owned by the
/// navigator and handed to the resolver by reference, so tests can build one
/// with any fabricated identity instead of touching process-wide globals.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Session Layer: the identity and its role predicates.
    pub session: Session,
    /// View Layer: which UI area the chrome should show.
    pub view: ViewState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Session::new(),
            view: ViewState::default(),
            config,
        }
    }
}

/// create_navigator
///
/// Assembles the application's route table from the configured admin prefix
/// and wraps it, together with a fresh state container, into a navigator.
pub fn create_navigator(
    config: AppConfig,
    title_sink: TitleSinkState,
) -> Result<Navigator, RouteTableError> {
    let table = routes::app_route_table(&config.admin_prefix)?;
    Ok(Navigator::new(table, AppState::new(config), title_sink))
}
