use crate::models::NavigationRequest;
use crate::routes::admin::{ADMIN_NAME_PREFIX, ADMIN_ROOT, is_admin_location};
use crate::routes::default::ROOT;

/// GuardDecision
///
/// Outcome of the pre-navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The target matched a route; proceed unchanged.
    Allow,
    /// The target matched nothing; go to the named area root instead.
    Redirect(&'static str),
}

/// guard
///
/// Pre-navigation validator. A matched request passes through untouched. An
/// unmatched one is classified by area and sent to that area's root route, so
/// navigation never settles on a location the table does not know:
///
/// - a name starting with `admin_`, or a path starting with `{admin_prefix}/`,
///   goes to `admin_root` (which forwards to the admin dashboard);
/// - anything else goes to `root` (which forwards to the dashboard).
pub fn guard(request: &NavigationRequest, admin_prefix: &str) -> GuardDecision {
    if request.matched {
        return GuardDecision::Allow;
    }

    let admin_by_name = request
        .target_name
        .as_deref()
        .is_some_and(|name| name.starts_with(ADMIN_NAME_PREFIX));
    let admin_by_path = is_admin_location(&request.target_path, admin_prefix);

    let to = if admin_by_name || admin_by_path {
        ADMIN_ROOT
    } else {
        ROOT
    };

    tracing::debug!(
        path = %request.target_path,
        name = ?request.target_name,
        to,
        "unmatched navigation redirected"
    );

    GuardDecision::Redirect(to)
}
