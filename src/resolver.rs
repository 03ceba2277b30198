use crate::{
    AppState,
    auth::IdentityStatus,
    config::AppConfig,
    models::{PageInfo, PageMeta, ResolvedRoute, ViewMode},
    routes::{admin::is_admin_location, default::ROOT},
};

/// Resolution
///
/// Outcome of the post-navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The navigation stands: the view mode has been committed and the title
    /// is ready for the title sink.
    Commit {
        view_mode: ViewMode,
        page: PageMeta,
        title: String,
    },
    /// The admin area was denied; navigate to the named route instead. The view
    /// mode and title are left untouched.
    Redirect(&'static str),
}

/// Resolver
///
/// Runs after every completed navigation, guard redirects included. It decides
/// the view mode, enforces the staff check on the admin area and composes the
/// document title.
///
/// Authorization:
/// An admin location is denied once the session holds a loaded identity that
/// lacks the staff flag, or once the identity fetch has failed. While the fetch
/// is still pending the admin area is provisionally allowed, unless
/// `strict_admin_gate` is set, in which case anything short of a loaded staff
/// identity is denied. Denial is a silent redirect to the default root, never
/// an error.
#[derive(Debug, Clone)]
pub struct Resolver {
    admin_prefix: String,
    title_base: String,
    title_delimiter: String,
    strict_admin_gate: bool,
}

impl Resolver {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            admin_prefix: config.admin_prefix.trim_end_matches('/').to_string(),
            title_base: config.title_base.clone(),
            title_delimiter: config.title_delimiter.clone(),
            strict_admin_gate: config.strict_admin_gate,
        }
    }

    pub fn resolve(&self, route: &ResolvedRoute, state: &mut AppState) -> Resolution {
        // The matched pattern decides the area, not the spelling of the request.
        if is_admin_location(&route.path, &self.admin_prefix) {
            if self.denies_admin(state) {
                tracing::info!(
                    route = %route.name,
                    user_id = ?state.session.identity().and_then(|i| i.id),
                    "admin area denied to non-staff session"
                );
                return Resolution::Redirect(ROOT);
            }
            state.view.switch_admin_view();
        } else {
            state.view.switch_user_view();
        }

        Resolution::Commit {
            view_mode: state.view.mode(),
            page: PageMeta::from(route.meta.as_ref()),
            title: self.compose_title(route.meta.as_ref()),
        }
    }

    fn denies_admin(&self, state: &AppState) -> bool {
        let session = &state.session;
        if self.strict_admin_gate {
            return !(session.is_loaded_user() && session.is_staff_user());
        }
        match session.status() {
            IdentityStatus::Pending => false,
            IdentityStatus::Failed => true,
            IdentityStatus::Loaded => session.is_loaded_user() && !session.is_staff_user(),
        }
    }

    /// compose_title
    ///
    /// `"{base}{sep}"`, then `"{title}{sep}"` when a title exists, then
    /// `"{title_desc}"` when a description exists.
    pub fn compose_title(&self, meta: Option<&PageInfo>) -> String {
        let mut title = format!("{}{}", self.title_base, self.title_delimiter);
        let Some(meta) = meta else {
            return title;
        };
        if let Some(page_title) = meta.title.as_deref().filter(|t| !t.is_empty()) {
            title.push_str(page_title);
            title.push_str(&self.title_delimiter);
        }
        if let Some(desc) = meta.title_desc.as_deref().filter(|d| !d.is_empty()) {
            title.push_str(desc);
        }
        title
    }
}
