use co_database_console::{
    AppConfig, AppState, MemoryTitleSink, NavigationError, Navigator, RouteTable,
    auth::Session,
    create_navigator,
    events::AppEvent,
    models::{NavigationTarget, RedirectReason, Route, SessionIdentity, View, ViewMode},
};
use std::sync::{Arc, Mutex};

// --- Test Utilities ---

fn navigator() -> (Navigator, Arc<MemoryTitleSink>) {
    let titles = Arc::new(MemoryTitleSink::new());
    let navigator = create_navigator(AppConfig::default(), titles.clone()).unwrap();
    (navigator, titles)
}

fn identity(id: i64, is_staff: Option<bool>) -> SessionIdentity {
    SessionIdentity {
        id: Some(id),
        username: Some(format!("user{}", id)),
        is_staff,
        ..Default::default()
    }
}

fn signed_in(id: i64, is_staff: Option<bool>) -> (Navigator, Arc<MemoryTitleSink>) {
    let (mut navigator, titles) = navigator();
    // Nothing is committed yet, so loading the identity triggers no navigation.
    assert!(navigator.apply_identity(identity(id, is_staff)).unwrap().is_none());
    (navigator, titles)
}

// --- Guard: unmatched locations ---

#[test]
fn test_unmatched_default_paths_land_on_dashboard() {
    for location in ["/bogus/path", "/nope", "/exclude-patterns/1/delete", "/administrator"] {
        let (mut navigator, _) = navigator();
        let nav = navigator.navigate(location).unwrap();

        assert_eq!(nav.route.name, "dashboard", "location {}", location);
        assert_eq!(nav.view_mode, ViewMode::User);
        assert_eq!(nav.hops[0].reason, RedirectReason::Unmatched);
        assert_eq!(nav.hops[0].to, "root");
    }
}

#[test]
fn test_unmatched_admin_paths_land_on_admin_dashboard() {
    for location in ["/admin/bogus", "/admin/users/1/2/3", "/admin/groups/x"] {
        let (mut navigator, _) = navigator();
        let nav = navigator.navigate(location).unwrap();

        assert_eq!(nav.route.name, "admin_dashboard", "location {}", location);
        assert_eq!(nav.hops[0].to, "admin_root");
        assert_eq!(nav.hops[1].reason, RedirectReason::RouteRedirect);
    }
}

#[test]
fn test_bogus_path_without_identity() {
    let (mut navigator, titles) = navigator();

    let nav = navigator.navigate("/bogus/path").unwrap();

    assert_eq!(nav.route.name, "dashboard");
    assert_eq!(nav.view_mode, ViewMode::User);
    assert_eq!(
        titles.last().as_deref(),
        Some("Co Database :: Dashboard :: reports & statistics")
    );
}

#[test]
fn test_area_roots_forward_to_dashboards() {
    let (mut navigator, _) = navigator();
    assert_eq!(navigator.navigate("/").unwrap().route.name, "dashboard");
    assert_eq!(navigator.navigate("/admin").unwrap().route.name, "admin_dashboard");
    assert_eq!(navigator.navigate("/admin/").unwrap().route.name, "admin_dashboard");
}

// --- Resolver: authorization and view mode ---

#[test]
fn test_non_staff_is_sent_back_to_dashboard() {
    let (mut navigator, titles) = signed_in(7, Some(false));

    let nav = navigator.navigate("/admin/users").unwrap();

    assert_eq!(nav.route.name, "dashboard");
    assert_eq!(nav.view_mode, ViewMode::User);
    assert!(navigator.state().view.is_user_view());
    let reasons: Vec<_> = nav.hops.iter().map(|h| h.reason).collect();
    assert_eq!(
        reasons,
        vec![RedirectReason::Unauthorized, RedirectReason::RouteRedirect]
    );
    // The denied hop never reached the title sink.
    assert_eq!(titles.titles().len(), 1);
}

#[test]
fn test_admin_area_check_ignores_path_case() {
    for location in ["/ADMIN/users", "/Admin/Groups", "/admin/USERS/42/Edit"] {
        let (mut navigator, _) = signed_in(7, Some(false));

        let nav = navigator.navigate(location).unwrap();

        assert_eq!(nav.route.name, "dashboard", "location {}", location);
        assert_eq!(nav.view_mode, ViewMode::User);
        assert_eq!(nav.hops[0].reason, RedirectReason::Unauthorized);
    }

    let (mut staff, _) = signed_in(1, Some(true));
    let nav = staff.navigate("/ADMIN/users").unwrap();
    assert_eq!(nav.route.name, "admin_users");
    assert_eq!(nav.view_mode, ViewMode::Admin);
}

#[test]
fn test_mixed_case_unmatched_admin_path_goes_to_admin_root() {
    let (mut navigator, _) = navigator();
    let nav = navigator.navigate("/ADMIN/bogus").unwrap();
    assert_eq!(nav.hops[0].to, "admin_root");
    assert_eq!(nav.route.name, "admin_dashboard");
}

#[test]
fn test_late_identity_rechecks_mixed_case_admin_location() {
    let (mut navigator, _) = navigator();
    navigator.navigate("/Admin/Users").unwrap();

    let nav = navigator
        .apply_identity(identity(3, Some(false)))
        .unwrap()
        .unwrap();

    assert_eq!(nav.route.name, "dashboard");
}

#[test]
fn test_unset_staff_flag_is_denied() {
    let (mut navigator, _) = signed_in(8, None);
    let nav = navigator.navigate("/admin/groups").unwrap();
    assert_eq!(nav.route.name, "dashboard");
}

#[test]
fn test_staff_and_unloaded_sessions_get_admin_view() {
    let (mut staff, _) = signed_in(1, Some(true));
    assert_eq!(staff.navigate("/admin/groups").unwrap().view_mode, ViewMode::Admin);

    let (mut pending, _) = navigator();
    assert_eq!(pending.navigate("/admin/groups").unwrap().view_mode, ViewMode::Admin);
}

#[test]
fn test_user_area_is_user_view_for_everyone() {
    for is_staff in [Some(true), Some(false), None] {
        let (mut navigator, _) = signed_in(2, is_staff);
        navigator.navigate("/admin/dashboard").unwrap();

        let nav = navigator.navigate("/exclude-patterns").unwrap();

        assert_eq!(nav.route.name, "exclude_patterns");
        assert_eq!(nav.view_mode, ViewMode::User);
    }
}

#[test]
fn test_edit_user_scenario() {
    let (mut navigator, titles) = signed_in(1, Some(true));

    let nav = navigator.navigate("/admin/users/42/edit").unwrap();

    assert_eq!(nav.route.name, "admin_edit_user");
    assert_eq!(nav.route.view, View::AdminEditUser);
    assert_eq!(nav.route.params.get("record_id").map(String::as_str), Some("42"));
    assert_eq!(nav.view_mode, ViewMode::Admin);
    assert_eq!(nav.title, "Co Database :: Edit User :: edit existing user");
    assert_eq!(titles.last().as_deref(), Some(nav.title.as_str()));
    assert!(nav.hops.is_empty());
}

#[test]
fn test_same_route_twice_is_idempotent() {
    let (mut navigator, titles) = signed_in(1, Some(true));

    let first = navigator.navigate("/admin/users").unwrap();
    let second = navigator.navigate("/admin/users").unwrap();

    assert_eq!(first.view_mode, second.view_mode);
    assert_eq!(first.title, second.title);
    assert_eq!(first.title, "Co Database :: Users List :: list of users");
    assert_eq!(titles.titles(), vec![first.title.clone(), second.title]);
}

#[test]
fn test_query_string_is_kept_in_full_path() {
    let (mut navigator, _) = navigator();
    let nav = navigator.navigate("/admin/users?page=2#top").unwrap();
    assert_eq!(nav.route.name, "admin_users");
    assert_eq!(nav.route.full_path, "/admin/users?page=2#top");
}

// --- Configured admin prefix ---

fn navigator_with_prefix(prefix: &str, staff: Option<bool>) -> Navigator {
    let config = AppConfig {
        admin_prefix: prefix.to_string(),
        ..AppConfig::default()
    };
    let mut navigator = create_navigator(config, Arc::new(MemoryTitleSink::new())).unwrap();
    if let Some(is_staff) = staff {
        navigator.apply_identity(identity(9, Some(is_staff))).unwrap();
    }
    navigator
}

#[test]
fn test_prefix_with_trailing_slash() {
    let mut navigator = navigator_with_prefix("/admin/", Some(true));

    assert_eq!(navigator.navigate("/admin").unwrap().route.name, "admin_dashboard");
    let nav = navigator.navigate("/admin/groups").unwrap();
    assert_eq!(nav.route.name, "admin_groups");
    assert_eq!(nav.view_mode, ViewMode::Admin);
}

#[test]
fn test_custom_prefix_drives_guard_and_resolver() {
    let mut staff = navigator_with_prefix("/staff", Some(true));
    let nav = staff.navigate("/staff/users").unwrap();
    assert_eq!(nav.route.name, "admin_users");
    assert_eq!(nav.route.full_path, "/staff/users");
    assert_eq!(nav.view_mode, ViewMode::Admin);

    // Unmatched locations are classified by the configured prefix.
    assert_eq!(staff.navigate("/staff/bogus").unwrap().route.name, "admin_dashboard");
    assert_eq!(staff.navigate("/admin/users").unwrap().route.name, "dashboard");

    let mut member = navigator_with_prefix("/staff", Some(false));
    let nav = member.navigate("/staff/groups").unwrap();
    assert_eq!(nav.route.name, "dashboard");
    assert_eq!(nav.hops[0].reason, RedirectReason::Unauthorized);
}

// --- Named navigation and back links ---

#[test]
fn test_named_navigation_builds_location() {
    let (mut navigator, _) = navigator();
    let target = NavigationTarget::named_with("admin_edit_group", &[("record_id", "9")]);

    let nav = navigator.navigate(target).unwrap();

    assert_eq!(nav.route.name, "admin_edit_group");
    assert_eq!(nav.route.full_path, "/admin/groups/9/edit");
}

#[test]
fn test_unknown_names_are_classified_by_prefix() {
    let (mut navigator, _) = navigator();
    let nav = navigator.navigate(NavigationTarget::named("admin_reports")).unwrap();
    assert_eq!(nav.route.name, "admin_dashboard");

    // Known name, missing parameter: unmatched and not an admin name.
    let nav = navigator.navigate(NavigationTarget::named("edit_exclude_pattern")).unwrap();
    assert_eq!(nav.route.name, "dashboard");
}

#[test]
fn test_back_follows_page_back_reference() {
    let (mut navigator, _) = signed_in(1, Some(true));
    assert!(navigator.back().is_none());

    navigator.navigate("/admin/users/42/edit").unwrap();
    let nav = navigator.back().unwrap().unwrap();
    assert_eq!(nav.route.name, "admin_users");

    // The users list has no back link.
    assert!(navigator.back().is_none());
}

// --- Identity arriving after the first navigation ---

#[test]
fn test_late_non_staff_identity_leaves_admin_area() {
    let (mut navigator, _) = navigator();
    let provisional = navigator.navigate("/admin/users").unwrap();
    assert_eq!(provisional.view_mode, ViewMode::Admin);

    let nav = navigator
        .apply_identity(identity(3, Some(false)))
        .unwrap()
        .unwrap();

    assert_eq!(nav.route.name, "dashboard");
    assert_eq!(nav.view_mode, ViewMode::User);
    assert_eq!(navigator.current().map(|c| c.name.as_str()), Some("dashboard"));
}

#[test]
fn test_late_identity_does_not_move_user_area() {
    let (mut navigator, _) = navigator();
    navigator.navigate("/myprofile").unwrap();
    assert!(navigator.apply_identity(identity(3, Some(false))).unwrap().is_none());
}

// --- Events ---

#[test]
fn test_each_commit_publishes_navigated_event() {
    let (mut navigator, _) = signed_in(1, Some(true));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    navigator.events_mut().subscribe(Box::new(move |event| {
        if let AppEvent::Navigated { route, view_mode } = event {
            sink.lock().unwrap().push((route.clone(), *view_mode));
        }
    }));

    navigator.navigate("/").unwrap();
    navigator.navigate("/admin/groups/new").unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("dashboard".to_string(), ViewMode::User),
            ("admin_new_group".to_string(), ViewMode::Admin),
        ]
    );
}

// --- Termination ---

#[test]
fn test_redirect_loop_is_bounded() {
    // A broken table: the default root forwards into the admin area, so a
    // non-staff session would bounce forever without the hop counter.
    let routes = vec![
        Route::redirect("/", "root", "dashboard"),
        Route::view("/admin/dashboard", "dashboard", View::Dashboard),
    ];
    let table = RouteTable::new(routes, "/admin").unwrap();
    let state = AppState {
        session: Session::with_identity(identity(4, Some(false))),
        ..AppState::new(AppConfig::default())
    };
    let mut navigator = Navigator::new(table, state, Arc::new(MemoryTitleSink::new()));

    let err = navigator.navigate("/admin/dashboard").unwrap_err();

    assert!(matches!(err, NavigationError::RedirectLoop { .. }));
    assert!(navigator.current().is_none());
}
