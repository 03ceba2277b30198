use co_database_console::models::{
    PageInfo, PageMeta, RedirectReason, SessionIdentity, Severity, ViewMode,
};

// --- Wire shapes shared with the browser chrome ---

#[test]
fn test_identity_tolerates_sparse_payload() {
    // An anonymous `me` answer carries no id and no flags.
    let identity: SessionIdentity = serde_json::from_str("{}").unwrap();
    assert_eq!(identity, SessionIdentity::default());

    let identity: SessionIdentity =
        serde_json::from_str(r#"{"id": 12, "is_staff": null, "groups": [1, 2]}"#).unwrap();
    assert_eq!(identity.id, Some(12));
    assert_eq!(identity.is_staff, None);
}

#[test]
fn test_view_mode_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ViewMode::Admin).unwrap(), r#""admin""#);
    assert_eq!(serde_json::to_string(&ViewMode::User).unwrap(), r#""user""#);
    assert_eq!(ViewMode::default(), ViewMode::User);
}

#[test]
fn test_page_meta_uses_title_desc_key() {
    let meta = PageMeta::from(Some(&PageInfo::new("Groups List", "list of groups")));
    let json_output = serde_json::to_string(&meta).unwrap();

    assert!(json_output.contains(r#""titleDesc":"list of groups""#));
    assert!(!json_output.contains("title_desc"));
}

#[test]
fn test_page_info_omits_missing_back() {
    let json_output = serde_json::to_string(&PageInfo::new("Users List", "list of users")).unwrap();
    assert!(!json_output.contains("back"));
}

#[test]
fn test_enum_wire_names() {
    assert_eq!(serde_json::to_string(&Severity::Danger).unwrap(), r#""danger""#);
    assert_eq!(
        serde_json::to_string(&RedirectReason::RouteRedirect).unwrap(),
        r#""route_redirect""#
    );
}
