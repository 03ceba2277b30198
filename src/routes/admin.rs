use crate::models::{Route, View};

/// Default prefix of the administrative area.
pub const ADMIN_ROUTE_PREFIX: &str = "/admin";

/// Every admin route name starts with this; the guard uses it to classify
/// unknown named targets.
pub const ADMIN_NAME_PREFIX: &str = "admin_";

/// Name of the admin area root. Unmatched admin navigations land here.
pub const ADMIN_ROOT: &str = "admin_root";

/// Canonical view of the admin area.
pub const ADMIN_DASHBOARD: &str = "admin_dashboard";

/// Whether `location` lies inside the admin area, i.e. starts with `{prefix}/`.
/// The prefix is compared ignoring ASCII case, like route literals. The bare
/// prefix (`/admin`) is not inside: it only reaches the area through the
/// `admin_root` forward.
pub fn is_admin_location(location: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    let (Some(head), Some(rest)) = (location.get(..prefix.len()), location.get(prefix.len()..))
    else {
        return false;
    };
    head.eq_ignore_ascii_case(prefix) && rest.starts_with('/')
}

/// Admin Route Family
///
/// Defines the screens reserved to staff users: the admin dashboard, the
/// admin profile page and the user and group management screens.
///
/// Access Control:
/// Nothing here is checked at match time. The post-navigation resolver denies
/// the whole family (anything whose path starts with `{prefix}/`) to loaded
/// identities without the staff flag, by redirecting them to the default root.
pub fn admin_routes(prefix: &str) -> Vec<Route> {
    let at = |path: &str| format!("{}{}", prefix, path);

    vec![
        Route::redirect(at("/"), ADMIN_ROOT, ADMIN_DASHBOARD),
        Route::view(at("/dashboard"), ADMIN_DASHBOARD, View::Dashboard)
            .with_page("Admin Dashboard", "reports & statistics"),
        Route::view(at("/myprofile"), "admin_myprofile", View::MyProfile)
            .with_page("My Profile", "user account info"),
        // --- Users ---
        Route::view(at("/users"), "admin_users", View::AdminUsers)
            .with_page("Users List", "list of users"),
        Route::view(at("/users/new"), "admin_new_user", View::AdminNewUser)
            .with_page("New User", "add new user")
            .with_back("admin_users"),
        Route::view(
            at("/users/:record_id/edit"),
            "admin_edit_user",
            View::AdminEditUser,
        )
        .with_page("Edit User", "edit existing user")
        .with_back("admin_users"),
        // No back link: the change-password screen is reached from the edit screen.
        Route::view(
            at("/users/:record_id/change-password"),
            "admin_change_password_user",
            View::AdminChangePasswordUser,
        )
        .with_page("Change Password", "change password of user"),
        // --- Groups ---
        Route::view(at("/groups"), "admin_groups", View::AdminGroups)
            .with_page("Groups List", "list of groups"),
        Route::view(at("/groups/new"), "admin_new_group", View::AdminNewGroup)
            .with_page("New Group", "add new group")
            .with_back("admin_groups"),
        Route::view(
            at("/groups/:record_id/edit"),
            "admin_edit_group",
            View::AdminEditGroup,
        )
        .with_page("Edit Group", "edit existing Group")
        .with_back("admin_groups"),
    ]
}
