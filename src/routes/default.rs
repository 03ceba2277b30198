use crate::models::{Route, View};

/// Name of the default area root. Unmatched, non-admin navigations land here.
pub const ROOT: &str = "root";

/// Canonical view of the default area.
pub const DASHBOARD: &str = "dashboard";

/// Default Route Family
///
/// Screens available to every session: the dashboard, the exclude pattern
/// CRUD screens and the profile page. The root path only forwards to the
/// dashboard.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::redirect("/", ROOT, DASHBOARD),
        Route::view("/dashboard", DASHBOARD, View::Dashboard)
            .with_page("Dashboard", "reports & statistics"),
        // --- Exclude Patterns ---
        Route::view("/exclude-patterns", "exclude_patterns", View::ExcludePatterns)
            .with_page("Exclude Patterns", "list of excluded pattern files"),
        Route::view(
            "/exclude-patterns/new",
            "new_exclude_pattern",
            View::NewExcludePattern,
        )
        .with_page("New Exclude Pattern", "add new exclude pattern")
        .with_back("exclude_patterns"),
        Route::view(
            "/exclude-patterns/:record_id/edit",
            "edit_exclude_pattern",
            View::EditExcludePattern,
        )
        .with_page("Edit Exclude Pattern", "edit existing exclude pattern")
        .with_back("exclude_patterns"),
        // --- Profile ---
        Route::view("/myprofile", "myprofile", View::MyProfile)
            .with_page("My Profile", "user account info"),
    ]
}
