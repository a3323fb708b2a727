use std::path::PathBuf;

use chrono::Local;
use tabled::Table;

use crate::{
    Res,
    config::Settings,
    digest::{Digest, Pipeline},
    genius::GeniusClient,
    info,
    mailer::{Mailer, SmtpMailer},
    management::Library,
    spotify::SpotifyClient,
    success,
    types::DigestTableRow,
    utils,
};

/// Runs the weekly digest end to end.
///
/// Configuration, catalog files and the Spotify session are resolved first;
/// any failure there aborts the run. Once the digest is composed it is
/// mailed, and a delivery failure is returned as an error even though the
/// playlist has already been created.
pub async fn run(send_email: Option<bool>, catalog_dir: Option<PathBuf>) -> Res<()> {
    let settings = Settings::from_env(send_email, catalog_dir)?;

    let library = Library::load(&settings.catalog_dir).await?;
    info!(
        "Loaded {} artists, {} podcasts, {} classics and {} notable songs from {}",
        library.artists.len(),
        library.shows.len(),
        library.classics.len(),
        library.notable_songs.len(),
        settings.catalog_dir.display()
    );

    let catalog = SpotifyClient::connect(&settings.spotify).await?;
    let genius = settings.genius.as_ref().map(GeniusClient::new);
    if settings.features.include_annotations && genius.is_none() {
        info!("GENIUS_ACCESS_TOKEN not set, archive entries will not be annotated");
    }

    let today = Local::now().date_naive();
    let pipeline = Pipeline::new(&catalog, genius.as_ref(), &settings.features, today);
    let digest = pipeline.run(&library).await?;

    match &settings.mail {
        Some(mail) => {
            SmtpMailer::new(mail).send(&digest.report).await?;
            success!("Email sent to {}", mail.to);
        }
        None => preview(&digest),
    }

    Ok(())
}

/// Prints the digest as a table instead of mailing it.
pub fn preview(digest: &Digest) {
    let mut rows: Vec<DigestTableRow> = Vec::new();
    let mut push = |section: &str, entries: Vec<String>| {
        rows.extend(entries.into_iter().map(|entry| DigestTableRow {
            section: section.to_string(),
            entry,
        }));
    };

    push(
        "Musique",
        utils::dedup_preserving_order(digest.scan.music_lines.clone()),
    );
    push(
        "Podcasts",
        utils::dedup_preserving_order(digest.scan.podcast_lines.clone()),
    );
    push("Recommandations", digest.recommendations.clone());
    push(
        "Classiques",
        digest
            .classics
            .iter()
            .map(|p| format!("{} - {}", p.entry.artist, p.entry.title))
            .collect(),
    );
    push(
        "Incontournables",
        digest
            .notable_songs
            .iter()
            .map(|p| format!("{} - {}", p.entry.artist, p.entry.title))
            .collect(),
    );
    push(
        "Erreurs",
        digest.scan.errors.iter().map(ToString::to_string).collect(),
    );

    let table = Table::new(rows);
    println!(
        "{subject}\n{table}",
        subject = digest.report.subject,
        table = table
    );
    if let Some(playlist) = &digest.playlist {
        info!("Playlist: {}", playlist.url);
    }
}
