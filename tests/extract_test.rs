use chatsync::extract::{extract_track_ids, extract_track_refs};
use chatsync::types::TrackRef;

const EXPORT: &str = "\
Messages and calls are end-to-end encrypted.
Early link https://open.spotify.com/track/early0001
[1/9/24, 10:15:02] Ana: check this https://open.spotify.com/track/abc123?si=xyz
still the same day https://open.spotify.com/track/def456
[5/9/24, 22:01:59] Ben: two at once https://open.spotify.com/track/ghi789 and https://open.spotify.com/track/abc123
[5/9/24, 22:02:10] Ben: no links here
[12/10/24, 08:00:00] Ana: album https://open.spotify.com/album/notatrack
";

#[test]
fn test_extract_pairs_tracks_with_current_date() {
    let refs = extract_track_refs(EXPORT);

    assert_eq!(
        refs,
        vec![
            TrackRef::new(None, "early0001"),
            TrackRef::new(Some("1/9/24"), "abc123"),
            TrackRef::new(Some("1/9/24"), "def456"),
            TrackRef::new(Some("5/9/24"), "ghi789"),
            TrackRef::new(Some("5/9/24"), "abc123"),
        ]
    );
}

#[test]
fn test_extract_counts_every_occurrence() {
    let text = "https://open.spotify.com/track/a1 https://open.spotify.com/track/a1\n\
                https://open.spotify.com/track/b2";

    let refs = extract_track_refs(text);

    // Duplicates are kept, order is file order
    let ids: Vec<&str> = refs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a1", "b2"]);
    assert!(refs.iter().all(|r| r.date.is_none()));
}

#[test]
fn test_extract_date_only_from_line_start() {
    let text = "\
[2/9/24, 09:00:00] Ana: hi
Ben quoted [7/9/24, 11:11:11] https://open.spotify.com/track/q1
";

    let refs = extract_track_refs(text);

    assert_eq!(refs, vec![TrackRef::new(Some("2/9/24"), "q1")]);
}

#[test]
fn test_extract_handles_whatsapp_markers_and_crlf() {
    let text = "\u{200e}[3/9/24, 12:00:00] Ana: \u{200e}https://open.spotify.com/track/m1\r\n\
                plain https://open.spotify.com/intl-de/track/m2\r\n";

    let refs = extract_track_refs(text);

    assert_eq!(
        refs,
        vec![
            TrackRef::new(Some("3/9/24"), "m1"),
            TrackRef::new(Some("3/9/24"), "m2"),
        ]
    );
}

#[test]
fn test_extract_ignores_malformed_lines() {
    let text = "\
[1/9/2024, 10:00:00] wrong year format https://open.spotify.com/track/x1
[1/9/24 10:00:00] missing comma
http://open.spotify.com/track/insecure
https://open.spotify.com/track/
";

    let refs = extract_track_refs(text);

    // Neither timestamp matches, only the first link is valid
    assert_eq!(refs, vec![TrackRef::new(None, "x1")]);
}

#[test]
fn test_extract_track_ids_ignores_dates() {
    let ids = extract_track_ids(EXPORT);

    assert_eq!(
        ids,
        vec!["early0001", "abc123", "def456", "ghi789", "abc123"]
    );
    assert_eq!(ids.len(), extract_track_refs(EXPORT).len());
}

#[test]
fn test_extract_empty_text() {
    assert!(extract_track_refs("").is_empty());
    assert!(extract_track_ids("").is_empty());
}
