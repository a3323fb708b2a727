//! # Digest Pipeline
//!
//! One run of the weekly job, from the followed sources to a ready-to-send
//! [`Report`]:
//!
//! ```text
//! Library (static catalog files)
//!     ↓
//! scanner   - releases and episodes of the trailing week
//!     ↓
//! selector  - recommendations and the weekly archive sample
//!     ↓
//! playlist  - dated private playlist with the new tracks
//!     ↓
//! report    - plain-text and HTML bodies
//! ```
//!
//! Every step is awaited in turn. External services are reached only through
//! the [`Catalog`] and [`Annotations`] traits held by [`Pipeline`], and the
//! archive samples draw from caller-supplied random sources, so a run can be
//! replayed deterministically in tests.

pub mod playlist;
pub mod report;
pub mod scanner;
pub mod selector;

use chrono::NaiveDate;
use rand::Rng;

use crate::{
    Res,
    config::Features,
    genius::Annotations,
    info,
    management::Library,
    spotify::Catalog,
    success,
    types::{ArchivePick, Report},
    utils::{self, ReleaseWindow},
};

use playlist::PublishedPlaylist;
use report::ReportInput;
use scanner::ScanOutcome;
use selector::ArchiveKind;

/// Result of a run, before delivery.
#[derive(Debug, Clone)]
pub struct Digest {
    pub week: u32,
    pub scan: ScanOutcome,
    pub playlist: Option<PublishedPlaylist>,
    pub recommendations: Vec<String>,
    pub classics: Vec<ArchivePick>,
    pub notable_songs: Vec<ArchivePick>,
    pub report: Report,
}

/// The explicit context of a run: collaborators, feature toggles and the date.
pub struct Pipeline<'a, C, A> {
    catalog: &'a C,
    annotations: Option<&'a A>,
    features: &'a Features,
    today: NaiveDate,
}

impl<'a, C: Catalog, A: Annotations> Pipeline<'a, C, A> {
    pub fn new(
        catalog: &'a C,
        annotations: Option<&'a A>,
        features: &'a Features,
        today: NaiveDate,
    ) -> Self {
        Pipeline {
            catalog,
            annotations,
            features,
            today,
        }
    }

    /// ISO week of the run, shared by the subject line and the archive seed.
    pub fn week(&self) -> u32 {
        utils::iso_week_number(self.today)
    }

    pub fn window(&self) -> ReleaseWindow {
        ReleaseWindow::trailing_week(self.today)
    }

    /// Runs the pipeline with the archive samples seeded by the ISO week.
    pub async fn run(&self, library: &Library) -> Res<Digest> {
        let week = self.week();
        self.run_with_rng(library, || selector::weekly_rng(week))
            .await
    }

    /// Runs the pipeline drawing each archive sample from a generator made
    /// by `fresh_rng`.
    ///
    /// Classics and notable songs each get their own generator, so one list
    /// never shifts the picks of the other.
    pub async fn run_with_rng<R, F>(&self, library: &Library, mut fresh_rng: F) -> Res<Digest>
    where
        R: Rng,
        F: FnMut() -> R,
    {
        let week = self.week();

        let user = self.catalog.current_user().await?;
        success!(
            "Connected to Spotify as: {}",
            user.display_name.as_deref().unwrap_or(&user.id)
        );

        let window = self.window();
        info!(
            "Looking for releases since {} (today is {})",
            window.start, window.end
        );
        let scan = scanner::scan(
            self.catalog,
            &library.artists,
            &library.shows,
            window,
            self.features,
        )
        .await;
        info!(
            "Found {} new items from {} sources ({} failed)",
            scan.new_identifiers.len(),
            library.artists.len() + library.shows.len(),
            scan.errors.len()
        );

        let recommendations = if self.features.include_recommendations {
            selector::recommend(self.catalog, &scan.new_identifiers).await
        } else {
            Vec::new()
        };

        let annotations = if self.features.include_annotations {
            self.annotations
        } else {
            None
        };
        let (classics, notable_songs) = if self.features.include_archive {
            let classics = selector::select_archive(
                self.catalog,
                annotations,
                &library.classics,
                ArchiveKind::ClassicAlbum,
                &mut fresh_rng(),
            )
            .await;
            let notable_songs = selector::select_archive(
                self.catalog,
                annotations,
                &library.notable_songs,
                ArchiveKind::NotableSong,
                &mut fresh_rng(),
            )
            .await;
            (classics, notable_songs)
        } else {
            (Vec::new(), Vec::new())
        };

        let supplemental: Vec<String> = classics
            .iter()
            .chain(notable_songs.iter())
            .flat_map(|pick| pick.track_identifiers.iter().cloned())
            .collect();

        let playlist = playlist::build(
            self.catalog,
            &user.id,
            self.today,
            &scan.new_identifiers,
            &supplemental,
        )
        .await?;
        match &playlist {
            Some(p) => success!(
                "Playlist '{}' created with {} items ({})",
                p.name,
                p.item_count,
                p.url
            ),
            None => info!("No new releases this week."),
        }

        let report = report::compose(
            &ReportInput {
                week,
                music_lines: scan.music_lines.clone(),
                podcast_lines: scan.podcast_lines.clone(),
                playlist_url: playlist.as_ref().map(|p| p.url.clone()),
                recommendations: recommendations.clone(),
                classics: classics.clone(),
                notable_songs: notable_songs.clone(),
                errors: scan.errors.clone(),
            },
            self.features.html_email,
        );

        Ok(Digest {
            week,
            scan,
            playlist,
            recommendations,
            classics,
            notable_songs,
            report,
        })
    }
}
