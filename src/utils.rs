use std::{
    collections::{BTreeSet, HashSet},
    fmt,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Datelike, Duration, NaiveDate};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseKind {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseKind::Album => "album",
            ReleaseKind::Single => "single",
            ReleaseKind::AppearsOn => "appears_on",
            ReleaseKind::Compilation => "compilation",
        };
        f.write_str(s)
    }
}

/// Release groups requested from `/artists/{id}/albums`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseKinds(pub BTreeSet<ReleaseKind>);

impl ReleaseKinds {
    pub fn iter(&self) -> impl Iterator<Item = ReleaseKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ReleaseKinds {
    fn default() -> Self {
        ReleaseKinds(BTreeSet::from([ReleaseKind::Album, ReleaseKind::Single]))
    }
}

impl fmt::Display for ReleaseKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

pub fn parse_release_kinds(input: &str) -> Result<ReleaseKinds, String> {
    let mut set = BTreeSet::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "album" => {
                set.insert(ReleaseKind::Album);
            }
            "single" => {
                set.insert(ReleaseKind::Single);
            }
            "appears_on" => {
                set.insert(ReleaseKind::AppearsOn);
            }
            "compilation" => {
                set.insert(ReleaseKind::Compilation);
            }
            "all" => {
                set.extend([
                    ReleaseKind::Album,
                    ReleaseKind::Single,
                    ReleaseKind::AppearsOn,
                    ReleaseKind::Compilation,
                ]);
            }
            other => return Err(format!("unknown release type '{}'", other)),
        }
    }

    if set.is_empty() {
        return Err("at least one release type is required".to_string());
    }

    Ok(ReleaseKinds(set))
}

/// Parses a catalog release date.
///
/// Spotify reports dates with `day`, `month` or `year` precision. Coarser
/// values are pinned to the first day of their month or year so they can be
/// compared with a release window.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    match value.len() {
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok(),
        4 => value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        _ => None,
    }
}

/// Release dates considered new for a run.
///
/// `end` is the run date and is only used for display. Releases dated after
/// it (pre-dated, or a day ahead because of time zones) are still new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReleaseWindow {
    /// Starts seven days before `today`, that day included.
    pub fn trailing_week(today: NaiveDate) -> Self {
        ReleaseWindow {
            start: today - Duration::days(7),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start
    }
}

pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Name of the weekly playlist, e.g. `HEBDO - 07/03`.
pub fn playlist_name(date: NaiveDate) -> String {
    format!("HEBDO - {}", date.format("%d/%m"))
}

pub fn playlist_url_from_id(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}

/// Returns the bare id of a `spotify:track:<id>` URI, if it is a track.
pub fn track_id_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix("spotify:track:").filter(|id| !id.is_empty())
}

/// Removes repeated lines, keeping the first occurrence of each.
pub fn dedup_preserving_order(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Escapes `&`, `<` and `>` for insertion into an HTML body.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Parses the boolean spellings accepted in the environment.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
