// Identifier resolution tests: canonical id, group precedence, map loading

use std::io::Write;

use promreport::resolve::{IdentityEntry, canonical_id, load_identity_map, resolve_group};

#[test]
fn docker_cgroup_id_truncates_to_12_chars() {
    assert_eq!(canonical_id("/docker/abcdef0123456789"), "abcdef012345");
}

#[test]
fn full_64_char_id_truncates_to_12_chars() {
    let full = "a".repeat(64);
    assert_eq!(canonical_id(&format!("/docker/{full}")), "a".repeat(12));
}

#[test]
fn exactly_12_hex_chars_is_accepted() {
    assert_eq!(canonical_id("/docker/0123456789ab"), "0123456789ab");
}

#[test]
fn non_matching_id_is_used_verbatim() {
    assert_eq!(canonical_id("foo"), "foo");
    assert_eq!(canonical_id("/system.slice/docker.service"), "/system.slice/docker.service");
}

#[test]
fn too_short_hex_is_used_verbatim() {
    // 11 chars: below the 12-64 bound
    assert_eq!(canonical_id("/docker/0123456789a"), "/docker/0123456789a");
}

#[test]
fn too_long_hex_is_used_verbatim() {
    let too_long = "a".repeat(65);
    let raw = format!("/docker/{too_long}");
    assert_eq!(canonical_id(&raw), raw);
}

#[test]
fn uppercase_hex_is_used_verbatim() {
    assert_eq!(canonical_id("/docker/ABCDEF012345"), "/docker/ABCDEF012345");
}

#[test]
fn trailing_path_segment_is_used_verbatim() {
    assert_eq!(canonical_id("/docker/abcdef012345/x"), "/docker/abcdef012345/x");
}

#[test]
fn group_prefers_service_over_name() {
    let entry = IdentityEntry {
        name: Some("N".into()),
        service: Some("S".into()),
    };
    assert_eq!(resolve_group("abcdef012345", &entry), "S");
}

#[test]
fn group_falls_back_to_name() {
    let entry = IdentityEntry {
        name: Some("N".into()),
        service: None,
    };
    assert_eq!(resolve_group("abcdef012345", &entry), "N");
}

#[test]
fn group_falls_back_to_canonical_id() {
    assert_eq!(
        resolve_group("abcdef012345", &IdentityEntry::default()),
        "abcdef012345"
    );
}

#[test]
fn empty_strings_count_as_absent() {
    let entry = IdentityEntry {
        name: Some("".into()),
        service: Some("".into()),
    };
    assert_eq!(resolve_group("abcdef012345", &entry), "abcdef012345");

    let entry = IdentityEntry {
        name: Some("N".into()),
        service: Some("".into()),
    };
    assert_eq!(resolve_group("abcdef012345", &entry), "N");
}

#[test]
fn no_map_path_yields_empty_map() {
    let map = load_identity_map(None).expect("empty map");
    assert!(map.is_empty());
}

#[test]
fn map_file_loads_entries_with_missing_and_unknown_fields() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        f,
        r#"{{
            "abcdef012345": {{ "name": "web-1", "service": "web", "image": "nginx" }},
            "0123456789ab": {{ "name": "db-1" }},
            "ba9876543210": {{}}
        }}"#
    )
    .expect("write");

    let map = load_identity_map(Some(f.path())).expect("load");
    assert_eq!(map.len(), 3);
    assert_eq!(map["abcdef012345"].name.as_deref(), Some("web-1"));
    assert_eq!(map["abcdef012345"].service.as_deref(), Some("web"));
    assert_eq!(map["0123456789ab"].service, None);
    assert_eq!(map["ba9876543210"].name, None);
}

#[test]
fn unreadable_map_file_is_an_error() {
    let err = load_identity_map(Some(std::path::Path::new("/nonexistent/map.json"))).unwrap_err();
    assert!(err.to_string().contains("reading docker map"));
}

#[test]
fn invalid_map_json_is_an_error() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(f, "not json").expect("write");
    let err = load_identity_map(Some(f.path())).unwrap_err();
    assert!(err.to_string().contains("parsing docker map"));
}
