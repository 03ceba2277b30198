use thiserror::Error;

use crate::{
    AppState,
    events::{AppEvent, EventBus},
    guard::{GuardDecision, guard},
    identity::{IdentityError, IdentityService},
    models::{
        Navigation, NavigationRequest, NavigationTarget, RedirectHop, RedirectReason,
        ResolvedRoute, Route, RouteParams, RouteTarget, SessionIdentity,
    },
    resolver::{Resolution, Resolver},
    routes::RouteTable,
    surface::{Notifier, TitleSinkState},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The redirect chain grew past `max_redirect_hops`. Cannot happen with the
    /// shipped route table, whose area roots are never in the admin area.
    #[error("navigation to {last} exceeded {hops} redirect hops")]
    RedirectLoop { hops: usize, last: String },

    /// The guard let through a request that matched no route.
    #[error("no route matches '{0}'")]
    Unmatched(String),
}

/// Bootstrap
///
/// Outcome of the start-up identity fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// The identity is in the session. Carries the re-resolution of the current
    /// location when it was in the admin area.
    Loaded(Option<Navigation>),
    /// The fetch failed; the session stays empty and the error was displayed.
    /// Carries the re-resolution of the current location when it was in the
    /// admin area.
    Failed {
        error: IdentityError,
        navigation: Option<Navigation>,
    },
    /// The backend rejected the session; the host should leave for `login_url`.
    LoginRequired { login_url: String },
}

/// Navigator
///
/// Drives every navigation through the pipeline:
///
/// 1. **Route table**: the target is turned into a location and matched.
/// 2. **Guard**: an unmatched target is replaced by its area root.
/// 3. **Route forward**: a matched redirect route is replaced by its target.
/// 4. **Resolver**: commits the view mode and title, or denies the admin area.
///
/// Every replacement is a new hop of the same loop rather than a recursive
/// call, and the hop counter bounds the loop. Navigations take `&mut self`, so
/// one always runs to completion before the next one starts.
pub struct Navigator {
    table: RouteTable,
    state: AppState,
    resolver: Resolver,
    title_sink: TitleSinkState,
    events: EventBus,
    current: Option<ResolvedRoute>,
    max_redirect_hops: usize,
}

impl Navigator {
    pub fn new(table: RouteTable, state: AppState, title_sink: TitleSinkState) -> Self {
        let resolver = Resolver::from_config(&state.config);
        let max_redirect_hops = state.config.max_redirect_hops;
        Self {
            table,
            state,
            resolver,
            title_sink,
            events: EventBus::new(),
            current: None,
            max_redirect_hops,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// The location of the last committed navigation.
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// navigate
    ///
    /// Resolves `target` to a committed route. Unmatched targets, forwarding
    /// routes and denied admin locations all end on a real route; the returned
    /// report lists each hop taken on the way.
    pub fn navigate(
        &mut self,
        target: impl Into<NavigationTarget>,
    ) -> Result<Navigation, NavigationError> {
        let mut target = target.into();
        let mut hops: Vec<RedirectHop> = Vec::new();

        loop {
            if hops.len() > self.max_redirect_hops {
                return Err(NavigationError::RedirectLoop {
                    hops: hops.len(),
                    last: target.to_string(),
                });
            }

            let (request, found) = self.locate(&target);
            let from = if request.target_path.is_empty() {
                target.to_string()
            } else {
                request.target_path.clone()
            };

            let found = match guard(&request, self.table.admin_prefix()) {
                GuardDecision::Allow => found,
                GuardDecision::Redirect(to) => {
                    hops.push(hop(from, to, RedirectReason::Unmatched));
                    target = NavigationTarget::named(to);
                    continue;
                }
            };
            let Some((route, params)) = found else {
                return Err(NavigationError::Unmatched(request.target_path));
            };

            let view = match route.target {
                RouteTarget::View(view) => view,
                RouteTarget::Redirect(to) => {
                    hops.push(hop(from, &to, RedirectReason::RouteRedirect));
                    target = NavigationTarget::Named { name: to, params };
                    continue;
                }
            };

            let resolved = ResolvedRoute {
                name: route.name,
                path: route.path,
                full_path: request.target_path,
                params,
                view,
                meta: route.meta,
            };

            match self.resolver.resolve(&resolved, &mut self.state) {
                Resolution::Redirect(to) => {
                    hops.push(hop(from, to, RedirectReason::Unauthorized));
                    target = NavigationTarget::named(to);
                }
                Resolution::Commit {
                    view_mode,
                    page,
                    title,
                } => {
                    self.title_sink.set_title(&title);
                    self.events.publish(AppEvent::Navigated {
                        route: resolved.name.clone(),
                        view_mode,
                    });
                    tracing::info!(
                        route = %resolved.name,
                        path = %resolved.full_path,
                        %view_mode,
                        hops = hops.len(),
                        "navigation committed"
                    );
                    self.current = Some(resolved.clone());
                    return Ok(Navigation {
                        route: resolved,
                        view_mode,
                        page,
                        title,
                        hops,
                    });
                }
            }
        }
    }

    /// back
    ///
    /// Follows the current page's back reference, keeping its parameters.
    /// Returns `None` when nothing is committed yet or the page has no back link.
    pub fn back(&mut self) -> Option<Result<Navigation, NavigationError>> {
        let current = self.current.as_ref()?;
        let name = self.table.back_of(&current.name)?.name.clone();
        let params = current.params.clone();
        Some(self.navigate(NavigationTarget::Named { name, params }))
    }

    /// apply_identity
    ///
    /// Stores a freshly loaded identity. When the current location is in the
    /// admin area it is resolved again, so a non-staff user who got there
    /// before the identity arrived is sent back to the default root.
    pub fn apply_identity(
        &mut self,
        identity: SessionIdentity,
    ) -> Result<Option<Navigation>, NavigationError> {
        self.state.session.set_identity(identity);
        self.recheck_admin_location()
    }

    /// bootstrap
    ///
    /// Fetches the identity once and stores it. A failure is shown on the
    /// notification surface and closes the admin area; a 401 additionally asks
    /// the host to go to the login page.
    pub async fn bootstrap(
        &mut self,
        service: &dyn IdentityService,
        notifier: &dyn Notifier,
    ) -> Result<Bootstrap, NavigationError> {
        match service.fetch_current().await {
            Ok(identity) => Ok(Bootstrap::Loaded(self.apply_identity(identity)?)),
            Err(error) => {
                tracing::warn!(%error, "identity fetch failed");
                notifier.error(&error.user_message(), self.state.config.message_delay_ms);
                self.state.session.clear();
                if error == IdentityError::Unauthorized {
                    return Ok(Bootstrap::LoginRequired {
                        login_url: self.login_url(),
                    });
                }
                let navigation = self.recheck_admin_location()?;
                Ok(Bootstrap::Failed { error, navigation })
            }
        }
    }

    /// The login page, carrying the current path and fragment as `next`. The
    /// query string is dropped.
    pub fn login_url(&self) -> String {
        let Some(current) = self.current.as_ref() else {
            return "/?next=/".to_string();
        };
        let (location, fragment) = match current.full_path.split_once('#') {
            Some((location, fragment)) => (location, Some(fragment)),
            None => (current.full_path.as_str(), None),
        };
        let path = location.split('?').next().unwrap_or_default();
        match fragment {
            Some(fragment) => format!("/?next={}#{}", path, fragment),
            None => format!("/?next={}", path),
        }
    }

    // Resolves the current location again when it is in the admin area.
    fn recheck_admin_location(&mut self) -> Result<Option<Navigation>, NavigationError> {
        let Some(location) = self
            .current
            .as_ref()
            .filter(|current| self.table.is_admin_path(&current.path))
            .map(|current| current.full_path.clone())
        else {
            return Ok(None);
        };

        self.navigate(location).map(Some)
    }

    fn locate(&self, target: &NavigationTarget) -> (NavigationRequest, Option<(Route, RouteParams)>) {
        let (path, name) = match target {
            NavigationTarget::Path(path) => (path.clone(), None),
            NavigationTarget::Named { name, params } => match self.table.href(name, params) {
                Ok(path) => (path, Some(name.clone())),
                Err(error) => {
                    tracing::warn!(%error, "named navigation could not be resolved");
                    (String::new(), Some(name.clone()))
                }
            },
        };

        let found = self
            .table
            .match_path(&path)
            .map(|m| (m.route.clone(), m.params));

        let request = NavigationRequest {
            target_path: path,
            target_name: name,
            matched: found.is_some(),
        };
        (request, found)
    }
}

fn hop(from: String, to: &str, reason: RedirectReason) -> RedirectHop {
    RedirectHop {
        from,
        to: to.to_string(),
        reason,
    }
}
