use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    config::{Features, PodcastMode},
    spotify::Catalog,
    types::{Album, Episode, ErrorRecord, FollowedArtist, FollowedShow, ReleaseRecord},
    utils::{self, ReleaseKinds, ReleaseWindow},
    warning,
};

/// Releases and episodes requested per followed source.
pub const FETCH_LIMIT: u32 = 50;

/// Catalog URIs collected during a run, unique and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIdentifierSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NewIdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the identifier was already present.
    pub fn insert(&mut self, identifier: impl Into<String>) -> bool {
        let identifier = identifier.into();
        if self.seen.contains(&identifier) {
            return false;
        }
        self.seen.insert(identifier.clone());
        self.order.push(identifier);
        true
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}

impl<S: Into<String>> Extend<S> for NewIdentifierSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for identifier in iter {
            self.insert(identifier);
        }
    }
}

/// Everything the scan found, including the sources that failed.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub new_identifiers: NewIdentifierSet,
    pub music_lines: Vec<String>,
    pub podcast_lines: Vec<String>,
    pub errors: Vec<ErrorRecord>,
}

impl ScanOutcome {
    fn absorb(&mut self, records: Vec<ReleaseRecord>, podcast: bool) {
        for record in records {
            self.new_identifiers.extend(record.track_identifiers);
            if podcast {
                self.podcast_lines.extend(record.display_lines);
            } else {
                self.music_lines.extend(record.display_lines);
            }
        }
    }
}

/// Scans every followed artist and show for releases inside `window`.
///
/// A failing source is recorded in [`ScanOutcome::errors`] and the scan
/// moves on to the next one. Shows are only scanned when podcasts are
/// enabled in `features`.
pub async fn scan<C: Catalog>(
    catalog: &C,
    artists: &[FollowedArtist],
    shows: &[FollowedShow],
    window: ReleaseWindow,
    features: &Features,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let shows: &[FollowedShow] = if features.include_podcasts {
        shows
    } else {
        &[]
    };

    let total = artists.len() + shows.len();
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    for (index, artist) in artists.iter().enumerate() {
        pb.set_message(format!(
            "Scanning releases of {artist_name} ({count}/{total})",
            artist_name = artist.name,
            count = index + 1,
            total = total
        ));

        match scan_artist(catalog, artist, window, &features.release_kinds, &pb).await {
            Ok(records) => outcome.absorb(records, false),
            Err(e) => {
                pb.suspend(|| warning!("Error for {}: {}", artist.name, e));
                outcome.errors.push(ErrorRecord {
                    source_name: artist.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    for (index, show) in shows.iter().enumerate() {
        let Some(show_id) = show.id.as_deref().filter(|id| !id.is_empty()) else {
            pb.suspend(|| warning!("No id for podcast '{}', skipping", show.name));
            continue;
        };

        pb.set_message(format!(
            "Scanning episodes of {show_name} ({count}/{total})",
            show_name = show.name,
            count = artists.len() + index + 1,
            total = total
        ));

        match scan_show(catalog, &show.name, show_id, window, features.podcast_mode).await {
            Ok(records) => outcome.absorb(records, true),
            Err(e) => {
                pb.suspend(|| warning!("Error for show {}: {}", show.name, e));
                outcome.errors.push(ErrorRecord {
                    source_name: show.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    pb.finish_and_clear();
    outcome
}

/// Collects the releases of one artist that fall inside `window`.
///
/// Albums produce one `"{artist} - {album} [Album]"` line; singles and
/// other release types produce one `"{artist} - {track}"` line per track.
/// Every track URI of a kept release is part of the record. Releases with
/// an unreadable date are skipped with a warning printed above `pb`.
pub async fn scan_artist<C: Catalog>(
    catalog: &C,
    artist: &FollowedArtist,
    window: ReleaseWindow,
    release_kinds: &ReleaseKinds,
    pb: &ProgressBar,
) -> Res<Vec<ReleaseRecord>> {
    let albums = catalog
        .artist_albums(&artist.id, release_kinds, FETCH_LIMIT)
        .await?;

    let mut records = Vec::new();
    for album in albums.iter().filter(|a| released_within(a, window, pb)) {
        let tracks = catalog.album_tracks(&album.id).await?;

        let display_lines = if album.album_type == "album" {
            vec![format!("{} - {} [Album]", artist.name, album.name)]
        } else {
            tracks
                .iter()
                .map(|track| format!("{} - {}", artist.name, track.name))
                .collect()
        };

        records.push(ReleaseRecord {
            display_lines,
            track_identifiers: tracks.into_iter().map(|t| t.uri).collect(),
        });
    }

    Ok(records)
}

/// Collects the episodes of one show that fall inside `window`.
///
/// With [`PodcastMode::All`] every episode is listed and its URI is kept
/// for the playlist. With [`PodcastMode::Latest`] only the most recent
/// episode is listed and no URI is kept.
pub async fn scan_show<C: Catalog>(
    catalog: &C,
    show_name: &str,
    show_id: &str,
    window: ReleaseWindow,
    mode: PodcastMode,
) -> Res<Vec<ReleaseRecord>> {
    let episodes = catalog.show_episodes(show_id, FETCH_LIMIT).await?;

    let mut recent: Vec<(chrono::NaiveDate, Episode)> = episodes
        .into_iter()
        .filter_map(|episode| {
            let date = episode
                .release_date
                .as_deref()
                .and_then(utils::parse_release_date)?;
            window.contains(date).then_some((date, episode))
        })
        .collect();

    let records = match mode {
        PodcastMode::All => recent
            .into_iter()
            .filter_map(|(_, episode)| {
                let uri = episode.uri?;
                Some(ReleaseRecord {
                    display_lines: vec![format!("{} - {}", show_name, episode.name)],
                    track_identifiers: vec![uri],
                })
            })
            .collect(),
        PodcastMode::Latest => {
            recent.sort_by(|a, b| b.0.cmp(&a.0));
            recent
                .into_iter()
                .next()
                .map(|(_, episode)| ReleaseRecord {
                    display_lines: vec![format!("{} - {}", show_name, episode.name)],
                    track_identifiers: Vec::new(),
                })
                .into_iter()
                .collect()
        }
    };

    Ok(records)
}

fn released_within(album: &Album, window: ReleaseWindow, pb: &ProgressBar) -> bool {
    match utils::parse_release_date(&album.release_date) {
        Some(date) => window.contains(date),
        None => {
            pb.suspend(|| {
                warning!(
                    "Cannot parse release date '{}' of {}",
                    album.release_date,
                    album.name
                )
            });
            false
        }
    }
}
