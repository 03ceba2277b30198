use std::collections::HashSet;

use thiserror::Error;

use super::admin::is_admin_location;
use crate::models::{Route, RouteParams, RouteTarget};

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("route '{name}' has more than one parameter in '{path}'")]
    MultipleParams { name: String, path: String },

    #[error("route '{name}' has an invalid path pattern '{path}'")]
    InvalidPattern { name: String, path: String },

    #[error("route '{name}' redirects to unknown route '{target}'")]
    UnknownRedirect { name: String, target: String },

    #[error("route '{name}' points back to unknown route '{target}'")]
    UnknownBack { name: String, target: String },
}

/// Errors raised while turning a route name into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrefError {
    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("route '{name}' needs parameter '{param}'")]
    MissingParam { name: String, param: String },
}

#[derive(Debug, Clone)]
enum Segment {
    // Stored lowercased; literal matching is case-insensitive.
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    route: Route,
    segments: Vec<Segment>,
}

/// RouteMatch
///
/// A successful match of a location against the table.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: RouteParams,
}

/// RouteTable
///
/// The validated, ordered list of routes. Names are unique, every pattern has
/// at most one `:param` segment and every redirect or back reference names a
/// route of the same table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    admin_prefix: String,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, admin_prefix: &str) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        for route in &routes {
            if !names.insert(route.name.as_str()) {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
        }

        for route in &routes {
            if let RouteTarget::Redirect(target) = &route.target {
                if !names.contains(target.as_str()) {
                    return Err(RouteTableError::UnknownRedirect {
                        name: route.name.clone(),
                        target: target.clone(),
                    });
                }
            }
            if let Some(back) = route.meta.as_ref().and_then(|m| m.back.as_ref()) {
                if !names.contains(back.as_str()) {
                    return Err(RouteTableError::UnknownBack {
                        name: route.name.clone(),
                        target: back.clone(),
                    });
                }
            }
        }

        let routes = routes
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(routes = routes.len(), admin_prefix, "route table built");

        Ok(Self {
            routes,
            admin_prefix: admin_prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn admin_prefix(&self) -> &str {
        &self.admin_prefix
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|c| &c.route)
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes().find(|r| r.name == name)
    }

    /// The route a page's back button leads to, if the page declares one.
    pub fn back_of(&self, name: &str) -> Option<&Route> {
        let back = self.route(name)?.meta.as_ref()?.back.as_deref()?;
        self.route(back)
    }

    /// Whether `location` lies inside the admin area (`{prefix}/...`).
    pub fn is_admin_path(&self, location: &str) -> bool {
        is_admin_location(location, &self.admin_prefix)
    }

    /// match_path
    ///
    /// Finds the first route whose pattern matches `location`. The query string
    /// and fragment are ignored and a single trailing slash is optional, so
    /// `/admin` matches the `/admin/` pattern.
    pub fn match_path(&self, location: &str) -> Option<RouteMatch<'_>> {
        let segments = split_location(location)?;

        self.routes.iter().find_map(|compiled| {
            if compiled.segments.len() != segments.len() {
                return None;
            }
            let mut params = RouteParams::new();
            for (pattern, actual) in compiled.segments.iter().zip(&segments) {
                match pattern {
                    Segment::Literal(lit) => {
                        if !lit.eq_ignore_ascii_case(actual) {
                            return None;
                        }
                    }
                    Segment::Param(name) => {
                        if actual.is_empty() {
                            return None;
                        }
                        params.insert(name.clone(), actual.to_string());
                    }
                }
            }
            Some(RouteMatch {
                route: &compiled.route,
                params,
            })
        })
    }

    /// href
    ///
    /// Builds the location of the route called `name`, substituting `params`
    /// into its dynamic segment. Extra parameters are ignored.
    pub fn href(&self, name: &str, params: &RouteParams) -> Result<String, HrefError> {
        let route = self
            .route(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?;

        let parts = route
            .path
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some(param) => params.get(param).cloned().ok_or_else(|| HrefError::MissingParam {
                    name: name.to_string(),
                    param: param.to_string(),
                }),
                None => Ok(seg.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(parts.join("/"))
    }
}

fn compile(route: Route) -> Result<CompiledRoute, RouteTableError> {
    let invalid = || RouteTableError::InvalidPattern {
        name: route.name.clone(),
        path: route.path.clone(),
    };

    let segments = split_location(&route.path)
        .ok_or_else(invalid)?
        .into_iter()
        .map(|seg| match seg.strip_prefix(':') {
            Some("") => Err(invalid()),
            Some(param) => Ok(Segment::Param(param.to_string())),
            None if seg.is_empty() => Err(invalid()),
            None => Ok(Segment::Literal(seg.to_ascii_lowercase())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let params = segments
        .iter()
        .filter(|s| matches!(s, Segment::Param(_)))
        .count();
    if params > 1 {
        return Err(RouteTableError::MultipleParams {
            name: route.name.clone(),
            path: route.path.clone(),
        });
    }

    Ok(CompiledRoute { route, segments })
}

/// Splits an absolute location into its path segments. Returns `None` for
/// relative locations. `/` yields no segments.
fn split_location(location: &str) -> Option<Vec<&str>> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .strip_prefix('/')?;
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Some(Vec::new());
    }
    Some(path.split('/').collect())
}
