use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

use crate::{
    Res,
    genius::Annotations,
    spotify::Catalog,
    types::{ArchiveEntry, ArchivePick, ContextualInfo, Track},
    utils, warning,
};

use super::scanner::NewIdentifierSet;

pub const ARCHIVE_SAMPLE_SIZE: usize = 3;
pub const RECOMMENDATION_SEEDS: usize = 5;
pub const RECOMMENDATION_COUNT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    ClassicAlbum,
    NotableSong,
}

/// Random source for the archive sample of an ISO week.
///
/// The same week number always yields the same generator state, so every
/// run within a week picks the same entries.
pub fn weekly_rng(week: u32) -> StdRng {
    StdRng::seed_from_u64(u64::from(week))
}

/// Picks [`ARCHIVE_SAMPLE_SIZE`] distinct entries, in sample order.
///
/// Returns nothing when the list holds fewer entries than the sample size.
pub fn sample_archive<'a, R: Rng + ?Sized>(
    entries: &'a [ArchiveEntry],
    rng: &mut R,
) -> Vec<&'a ArchiveEntry> {
    if entries.len() < ARCHIVE_SAMPLE_SIZE {
        return Vec::new();
    }

    index::sample(rng, entries.len(), ARCHIVE_SAMPLE_SIZE)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}

/// Formats a recommended track as `"{artist1, artist2} - {title}"`.
pub fn format_track_line(track: &Track) -> String {
    let artists = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {}", artists, track.name)
}

/// Asks the catalog for tracks seeded from the week's new tracks.
///
/// Episodes are not valid seeds and are skipped. Any failure drops the
/// section: it is logged and an empty list is returned.
pub async fn recommend<C: Catalog>(catalog: &C, new_identifiers: &NewIdentifierSet) -> Vec<String> {
    let seeds: Vec<String> = new_identifiers
        .iter()
        .filter_map(|uri| utils::track_id_from_uri(uri))
        .take(RECOMMENDATION_SEEDS)
        .map(str::to_string)
        .collect();

    if seeds.is_empty() {
        return Vec::new();
    }

    match catalog.recommendations(&seeds, RECOMMENDATION_COUNT).await {
        Ok(tracks) => tracks.iter().map(format_track_line).collect(),
        Err(e) => {
            warning!("Recommendations unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Samples a reference list for the week and resolves every pick.
///
/// Entries whose catalog lookup fails are logged and left out; the other
/// picks are kept.
pub async fn select_archive<C, A, R>(
    catalog: &C,
    annotations: Option<&A>,
    entries: &[ArchiveEntry],
    kind: ArchiveKind,
    rng: &mut R,
) -> Vec<ArchivePick>
where
    C: Catalog,
    A: Annotations,
    R: Rng + ?Sized,
{
    let mut picks = Vec::new();

    for entry in sample_archive(entries, rng) {
        match resolve_entry(catalog, entry, kind).await {
            Ok(mut pick) => {
                if let Some(annotations) = annotations {
                    pick.context = lookup_context(annotations, entry, kind).await;
                }
                picks.push(pick);
            }
            Err(e) => warning!("Skipping {} - {}: {}", entry.artist, entry.title, e),
        }
    }

    picks
}

/// Fetches the canonical URL and track URIs of an archive entry.
pub async fn resolve_entry<C: Catalog>(
    catalog: &C,
    entry: &ArchiveEntry,
    kind: ArchiveKind,
) -> Res<ArchivePick> {
    let (url, track_identifiers) = match kind {
        ArchiveKind::ClassicAlbum => {
            let album = catalog.album(&entry.reference_id).await?;
            let url = album
                .external_urls
                .spotify
                .unwrap_or_else(|| format!("https://open.spotify.com/album/{}", album.id));
            let uris = album.tracks.items.into_iter().map(|t| t.uri).collect();
            (url, uris)
        }
        ArchiveKind::NotableSong => {
            let track = catalog.track(&entry.reference_id).await?;
            let url = track
                .external_urls
                .spotify
                .unwrap_or_else(|| format!("https://open.spotify.com/track/{}", track.id));
            (url, vec![track.uri])
        }
    };

    Ok(ArchivePick {
        entry: entry.clone(),
        url,
        track_identifiers,
        context: None,
    })
}

async fn lookup_context<A: Annotations>(
    annotations: &A,
    entry: &ArchiveEntry,
    kind: ArchiveKind,
) -> Option<ContextualInfo> {
    let result = match kind {
        ArchiveKind::ClassicAlbum => annotations.search_artist(&entry.artist).await,
        ArchiveKind::NotableSong => annotations.search_song(&entry.title, &entry.artist).await,
    };

    match result {
        Ok(context) => context,
        Err(e) => {
            warning!("No context for {} - {}: {}", entry.artist, entry.title, e);
            None
        }
    }
}
