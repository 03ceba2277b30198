use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

/// Named parameters captured from a dynamic path segment (e.g. `record_id`).
pub type RouteParams = BTreeMap<String, String>;

// --- Route Table Schemas ---

/// View
///
/// The opaque renderable unit a route is bound to. The navigation core never
/// inspects a view; it only hands the value to whatever renders the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    MyProfile,
    ExcludePatterns,
    NewExcludePattern,
    EditExcludePattern,
    AdminUsers,
    AdminNewUser,
    AdminEditUser,
    AdminChangePasswordUser,
    AdminGroups,
    AdminNewGroup,
    AdminEditGroup,
}

/// PageInfo
///
/// Route metadata used for the document title and the page header.
/// `back` names the route the page header's back button leads to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

impl PageInfo {
    pub fn new(title: &str, title_desc: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            title_desc: Some(title_desc.to_string()),
            back: None,
        }
    }
}

/// RouteTarget
///
/// What a matched route does: render a view, or forward to another named route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteTarget {
    View(View),
    Redirect(String),
}

/// Route
///
/// A declarative binding of a path pattern to a view and its metadata.
/// Patterns may carry at most one `:param` segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub target: RouteTarget,
    pub meta: Option<PageInfo>,
}

impl Route {
    /// Builds a route rendering `view`, without page metadata.
    pub fn view(path: impl Into<String>, name: &str, view: View) -> Self {
        Self {
            path: path.into(),
            name: name.to_string(),
            target: RouteTarget::View(view),
            meta: None,
        }
    }

    /// Builds a route that forwards to the route named `to`.
    pub fn redirect(path: impl Into<String>, name: &str, to: &str) -> Self {
        Self {
            path: path.into(),
            name: name.to_string(),
            target: RouteTarget::Redirect(to.to_string()),
            meta: None,
        }
    }

    pub fn with_page(mut self, title: &str, title_desc: &str) -> Self {
        let back = self.meta.take().and_then(|m| m.back);
        self.meta = Some(PageInfo {
            back,
            ..PageInfo::new(title, title_desc)
        });
        self
    }

    pub fn with_back(mut self, back: &str) -> Self {
        self.meta.get_or_insert_with(PageInfo::default).back = Some(back.to_string());
        self
    }
}

// --- Navigation Schemas ---

/// NavigationTarget
///
/// Where a navigation wants to go: a raw location (as typed in the address bar)
/// or a route name plus its parameters (as issued by the screens themselves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Path(String),
    Named { name: String, params: RouteParams },
}

impl NavigationTarget {
    pub fn named(name: &str) -> Self {
        Self::Named {
            name: name.to_string(),
            params: RouteParams::new(),
        }
    }

    pub fn named_with(name: &str, params: &[(&str, &str)]) -> Self {
        Self::Named {
            name: name.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Named { name, .. } => write!(f, "{{name: {}}}", name),
        }
    }
}

/// NavigationRequest
///
/// Transient record of one navigation attempt, handed to the guard.
/// `target_path` is empty when a named target could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_path: String,
    pub target_name: Option<String>,
    pub matched: bool,
}

/// ResolvedRoute
///
/// The location a navigation settled on: the matched route plus the concrete
/// path and captured parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub name: String,
    /// The route's pattern, e.g. `/admin/users/:record_id/edit`.
    pub path: String,
    /// The requested location, query string and fragment included.
    pub full_path: String,
    pub params: RouteParams,
    pub view: View,
    pub meta: Option<PageInfo>,
}

/// RedirectReason
///
/// Why a navigation hop was replaced by another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// The matched route is itself a forward (e.g. `/` to `dashboard`).
    RouteRedirect,
    /// Nothing in the table matched; the guard sent the user to an area root.
    Unmatched,
    /// The admin area was requested by a loaded, non-staff identity.
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHop {
    pub from: String,
    pub to: String,
    pub reason: RedirectReason,
}

/// Navigation
///
/// Report of a completed navigation: the final route, the committed view mode,
/// the composed title and every redirect hop taken on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: ResolvedRoute,
    pub view_mode: ViewMode,
    pub page: PageMeta,
    pub title: String,
    pub hops: Vec<RedirectHop>,
}

// --- Shared State Schemas (read by the layout chrome) ---

/// ViewMode
///
/// Which UI area is active. The layout chrome swaps its menus on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ViewMode {
    #[default]
    User,
    Admin,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::User => f.write_str("user"),
            ViewMode::Admin => f.write_str("admin"),
        }
    }
}

/// PageMeta
///
/// The `{title, titleDesc}` pair derived from the matched route's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageMeta {
    pub title: Option<String>,
    pub title_desc: Option<String>,
}

impl From<Option<&PageInfo>> for PageMeta {
    fn from(info: Option<&PageInfo>) -> Self {
        match info {
            Some(info) => Self {
                title: info.title.clone(),
                title_desc: info.title_desc.clone(),
            },
            None => Self::default(),
        }
    }
}

/// SessionIdentity
///
/// The authenticated user as returned by the backend `me` resource.
/// Every field is optional on the wire: a payload without an `id` is an
/// identity that has not been loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionIdentity {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    // The staff flag gates the admin area; only an explicit `true` grants it.
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Severity
///
/// Levels understood by the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}
