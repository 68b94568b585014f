use std::collections::HashSet;

use crate::{types::TrackRef, utils};

use super::SyncError;

/// Returns the elements of `new_list` that are not in `old_list`.
///
/// The result holds each id once, in the order it first appears in `new_list`.
pub fn compare_track_lists<S: AsRef<str>>(old_list: &[S], new_list: &[S]) -> Vec<String> {
    let old: HashSet<&str> = old_list.iter().map(AsRef::as_ref).collect();
    subtract(new_list.iter().map(AsRef::as_ref), &old)
}

/// Ids of the track refs shared on or before `cutoff` (`D/M/YY`).
///
/// Refs without a date are dropped.
///
/// # Errors
///
/// Fails on the first date, or a cutoff, that is not a valid `D/M/YY` date.
pub fn filter_until(refs: &[TrackRef], cutoff: &str) -> Result<Vec<String>, SyncError> {
    let cutoff_date = utils::parse_chat_date(cutoff)
        .map_err(|e| SyncError::DateError(cutoff.to_string(), e))?;

    let mut ids = Vec::new();
    for track in refs {
        let Some(date) = &track.date else {
            continue;
        };
        let shared_on =
            utils::parse_chat_date(date).map_err(|e| SyncError::DateError(date.clone(), e))?;
        if shared_on <= cutoff_date {
            ids.push(track.id.clone());
        }
    }

    Ok(ids)
}

/// Decides which extracted tracks must be added to the target playlist.
///
/// Without a cutoff every extracted id is a candidate; with one, only ids
/// shared on or before it. Candidates already in `baseline` are dropped.
pub fn reconcile(
    baseline: &HashSet<String>,
    refs: &[TrackRef],
    cutoff: Option<&str>,
) -> Result<Vec<String>, SyncError> {
    let candidates = match cutoff {
        Some(cutoff) => filter_until(refs, cutoff)?,
        None => refs.iter().map(|r| r.id.clone()).collect(),
    };

    let known: HashSet<&str> = baseline.iter().map(String::as_str).collect();
    Ok(subtract(candidates.iter().map(String::as_str), &known))
}

fn subtract<'a>(items: impl Iterator<Item = &'a str>, known: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|id| !known.contains(*id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
