//! Model-level unit tests.

use super::paste::*;
use crate::detection::catalog::PLAIN_TEXT;
use chrono::{Duration, TimeZone, Utc};

fn sample_paste(language: &str) -> Paste {
    let created = Utc.with_ymd_and_hms(2013, 1, 2, 0, 0, 0).unwrap();
    let modified = Utc.with_ymd_and_hms(2014, 2, 3, 0, 0, 0).unwrap();
    Paste {
        id: PasteId::new(0xffff),
        content: "My paste content".to_string(),
        language: language.to_string(),
        theme: "unittest".to_string(),
        numbers: true,
        created_at: created,
        modified_at: modified,
        delete_at: Some(modified + Duration::hours(24)),
        delete_on_views: Some(72),
        viewed: 0,
    }
}

#[test]
fn paste_id_renders_and_parses_lowercase_hex() {
    let id = PasteId::new(0xABCDE);
    assert_eq!(id.to_string(), "abcde");
    assert_eq!("abcde".parse::<PasteId>().unwrap(), id);
    assert_eq!("ABCDE".parse::<PasteId>().unwrap(), id);
}

#[test]
fn paste_id_rejects_non_hex_and_oversized_input() {
    let oversized = "f".repeat(33);
    for raw in ["", "xyz", "+abc", "-1", "12 34", oversized.as_str()] {
        assert!(raw.parse::<PasteId>().is_err(), "input: {raw:?}");
    }
    assert_eq!(
        "f".repeat(32).parse::<PasteId>().unwrap(),
        PasteId::new(u128::MAX)
    );
}

#[test]
fn paste_id_serializes_as_hex_string() {
    let json = serde_json::to_string(&PasteId::new(255)).unwrap();
    assert_eq!(json, "\"ff\"");
    let back: PasteId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, PasteId::new(255));
}

#[test]
fn syntax_flag_tracks_plain_text_sentinel() {
    assert!(sample_paste("python").syntax_enabled());
    assert!(!sample_paste(PLAIN_TEXT).syntax_enabled());
}

#[test]
fn time_expiry_is_inclusive_of_the_deadline() {
    let paste = sample_paste("python");
    let deadline = paste.delete_at.unwrap();
    assert!(!paste.is_time_expired(deadline - Duration::seconds(1)));
    assert!(paste.is_time_expired(deadline));
    assert!(paste.is_time_expired(deadline + Duration::seconds(1)));

    let forever = Paste {
        delete_at: None,
        ..paste
    };
    assert!(!forever.is_time_expired(deadline + Duration::days(3650)));
}

#[test]
fn views_exhausted_once_counter_reaches_limit() {
    let mut paste = sample_paste("python");
    paste.delete_on_views = Some(3);
    paste.viewed = 2;
    assert!(!paste.views_exhausted());
    paste.viewed = 3;
    assert!(paste.views_exhausted());

    paste.delete_on_views = None;
    paste.viewed = u64::MAX;
    assert!(!paste.views_exhausted());
}

#[test]
fn meta_projection_uses_camel_case_keys() {
    let paste = sample_paste("python");
    let meta = PasteMeta::from(&paste);
    let value = serde_json::to_value(&meta).unwrap();

    assert_eq!(value["theme"], "unittest");
    assert_eq!(value["created"], "2013-01-02T00:00:00Z");
    assert_eq!(value["modified"], "2014-02-03T00:00:00Z");
    assert_eq!(value["deleteOnViews"], 72);
    assert_eq!(value["deleteAt"], "2014-02-04T00:00:00Z");
    assert_eq!(value["syntax"], true);
    assert_eq!(value["numbers"], true);
    assert_eq!(value["viewed"], 0);
}

#[test]
fn create_request_accepts_legacy_prettify_field() {
    let req: CreatePasteRequest =
        serde_json::from_str(r#"{"content":"{}","json_prettify":true}"#).unwrap();
    assert!(req.pretty_print_json);
    assert!(req.language.is_none());
    assert!(req.delete_on_views.is_none());
}

#[test]
fn create_request_parses_both_deadline_forms() {
    let rfc: CreatePasteRequest =
        serde_json::from_str(r#"{"content":"x","delete_at":"2014-02-04T01:02:03+01:00"}"#)
            .unwrap();
    assert_eq!(
        rfc.delete_at,
        Some(Utc.with_ymd_and_hms(2014, 2, 4, 0, 2, 3).unwrap())
    );

    let compact: CreatePasteRequest =
        serde_json::from_str(r#"{"content":"x","delete_at":"20140204T00:02:03"}"#).unwrap();
    assert_eq!(compact.delete_at, rfc.delete_at);

    let blank: CreatePasteRequest =
        serde_json::from_str(r#"{"content":"x","delete_at":null}"#).unwrap();
    assert!(blank.delete_at.is_none());

    assert!(serde_json::from_str::<CreatePasteRequest>(
        r#"{"content":"x","delete_at":"next tuesday"}"#
    )
    .is_err());
}
