//! Track link extraction from exported chat logs.
//!
//! Chat exports are line oriented. A message starts with a timestamp such as
//! `[1/9/24, 14:03:27]`; the date part becomes the context for every track
//! link found from that line on, until the next timestamp line.

use std::{io, path::Path, sync::LazyLock};

use regex::Regex;

use crate::types::TrackRef;

// WhatsApp prefixes some lines (attachments, system messages) with U+200E.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\x{200E}]*\[(\d{1,2}/\d{1,2}/\d{2}), \d{2}:\d{2}:\d{2}\]")
        .expect("date pattern is valid")
});

static TRACK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://open\.spotify\.com/(?:intl-[A-Za-z-]+/)?track/([A-Za-z0-9]+)")
        .expect("track pattern is valid")
});

/// Returns every track link in `text` paired with its message date, in file order.
///
/// Links before the first timestamp line carry no date. Duplicate links are
/// reported each time they occur.
pub fn extract_track_refs(text: &str) -> Vec<TrackRef> {
    let mut refs = Vec::new();
    let mut current_date: Option<&str> = None;

    for line in text.lines() {
        if let Some(caps) = DATE_PATTERN.captures(line) {
            current_date = caps.get(1).map(|m| m.as_str());
        }

        for caps in TRACK_PATTERN.captures_iter(line) {
            refs.push(TrackRef::new(current_date, &caps[1]));
        }
    }

    refs
}

/// Returns the ids of every track link in `text`, ignoring dates.
pub fn extract_track_ids(text: &str) -> Vec<String> {
    TRACK_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Reads a UTF-8 chat export from disk and extracts its track links.
pub async fn read_export(path: &Path) -> io::Result<Vec<TrackRef>> {
    let text = async_fs::read_to_string(path).await?;
    Ok(extract_track_refs(&text))
}
