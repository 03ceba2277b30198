/// Route Table Module Index
///
/// Organizes the console's client-side routes into two disjoint families.
/// The split mirrors the two UI areas: every route in `admin` lives under the
/// admin prefix and is subject to the staff check in the resolver, every route
/// in `default` is reachable by any session.

/// Routes of the ordinary user area, rooted at `/`.
pub mod default;

/// Routes of the administrative area, rooted at the admin prefix.
pub mod admin;

/// Pattern compilation, matching and named-route resolution.
pub mod table;

pub use table::{HrefError, RouteMatch, RouteTable, RouteTableError};

/// app_route_table
///
/// Assembles the full route table: default routes first, then the admin family
/// rooted at `admin_prefix`. Declaration order is matching order. A trailing
/// `/` on the prefix is dropped, so `/admin/` and `/admin` build the same table.
pub fn app_route_table(admin_prefix: &str) -> Result<RouteTable, RouteTableError> {
    let admin_prefix = admin_prefix.trim_end_matches('/');
    let mut routes = default::default_routes();
    routes.extend(admin::admin_routes(admin_prefix));
    RouteTable::new(routes, admin_prefix)
}
