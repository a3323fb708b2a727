use crate::{
    types::{ArchivePick, ErrorRecord, Report},
    utils::{dedup_preserving_order, escape_html},
};

/// What the report is assembled from.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub week: u32,
    pub music_lines: Vec<String>,
    pub podcast_lines: Vec<String>,
    pub playlist_url: Option<String>,
    pub recommendations: Vec<String>,
    pub classics: Vec<ArchivePick>,
    pub notable_songs: Vec<ArchivePick>,
    pub errors: Vec<ErrorRecord>,
}

pub fn subject(week: u32) -> String {
    format!("🎶 Sorties de la Semaine - WK{}", week)
}

/// Builds the plain-text and (optionally) HTML bodies.
///
/// Sections come in a fixed order: music, playlist link, podcasts,
/// recommendations, classic archive, notable songs, errors. Sections with
/// nothing to show are left out. Dynamic text is escaped in the HTML body.
pub fn compose(input: &ReportInput, html: bool) -> Report {
    let music = dedup_preserving_order(input.music_lines.clone());
    let podcasts = dedup_preserving_order(input.podcast_lines.clone());
    let errors: Vec<String> = input.errors.iter().map(ToString::to_string).collect();

    let mut doc = Document::new();

    doc.list_section("-- Musique --", "<h4>🎶 Musique</h4>", &music);

    if let Some(url) = &input.playlist_url {
        doc.text.push_str(&format!("\nPlaylist créée : {}\n", url));
        doc.html.push_str(&format!(
            "<p>🔗 Playlist créée : <a href=\"{}\" target=\"_blank\" style=\"text-decoration:none; color:#1DB954;\">Ouvrir la playlist</a></p>",
            escape_html(url)
        ));
    }

    doc.list_section("\n-- Podcasts --", "<h4>🎧 Podcasts</h4>", &podcasts);
    doc.list_section(
        "\n-- Recommandations --",
        "<h4>✨ Recommandations</h4>",
        &input.recommendations,
    );
    doc.archive_section(
        "\n-- Classiques de l'archive --",
        "<h4>💿 Classiques de l'archive</h4>",
        &input.classics,
    );
    doc.archive_section(
        "\n-- Titres incontournables --",
        "<h4>🎵 Titres incontournables</h4>",
        &input.notable_songs,
    );
    doc.list_section("\nErreurs rencontrées :", "<h3>Erreurs rencontrées :</h3>", &errors);

    doc.finish(subject(input.week), html)
}

struct Document {
    text: String,
    html: String,
}

impl Document {
    fn new() -> Self {
        Document {
            text: "🎶 Voici les sorties Spotify de cette semaine :\n\n".to_string(),
            html: "<html><body><h3> 🍝 Au menu cette semaine</h3>".to_string(),
        }
    }

    fn list_section(&mut self, text_title: &str, html_title: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }

        self.text.push_str(text_title);
        self.text.push('\n');
        self.html.push_str(html_title);
        self.html.push_str("<ul>");
        for line in lines {
            self.text.push_str(line);
            self.text.push('\n');
            self.html.push_str(&format!("<li>{}</li>", escape_html(line)));
        }
        self.html.push_str("</ul>");
    }

    fn archive_section(&mut self, text_title: &str, html_title: &str, picks: &[ArchivePick]) {
        if picks.is_empty() {
            return;
        }

        self.text.push_str(text_title);
        self.text.push('\n');
        self.html.push_str(html_title);
        self.html.push_str("<ul>");
        for pick in picks {
            self.archive_item(pick);
        }
        self.html.push_str("</ul>");
    }

    fn archive_item(&mut self, pick: &ArchivePick) {
        let entry = &pick.entry;
        let year = entry
            .year
            .as_ref()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();

        self.text
            .push_str(&format!("{} - {}{}\n  {}\n", entry.artist, entry.title, year, pick.url));
        self.html.push_str(&format!(
            "<li><a href=\"{url}\" target=\"_blank\" style=\"text-decoration:none; color:#1DB954;\">{artist} - {title}</a>{year}",
            url = escape_html(&pick.url),
            artist = escape_html(&entry.artist),
            title = escape_html(&entry.title),
            year = escape_html(&year)
        ));

        if let Some(context) = &pick.context {
            if let Some(date) = &context.release_date_text {
                self.text.push_str(&format!("  Sortie : {}\n", date));
                self.html
                    .push_str(&format!("<br><small>Sortie : {}</small>", escape_html(date)));
            }
            if !context.description.is_empty() {
                self.text.push_str(&format!("  {}\n", context.description));
                self.html
                    .push_str(&format!("<br><em>{}</em>", escape_html(&context.description)));
            }
            if !context.facts.is_empty() {
                self.html.push_str("<ul>");
                for fact in &context.facts {
                    self.text.push_str(&format!("  • {}\n", fact));
                    self.html.push_str(&format!("<li>{}</li>", escape_html(fact)));
                }
                self.html.push_str("</ul>");
            }
            if !context.url.is_empty() {
                self.text.push_str(&format!("  En savoir plus : {}\n", context.url));
                self.html.push_str(&format!(
                    "<br><a href=\"{}\" target=\"_blank\">En savoir plus</a>",
                    escape_html(&context.url)
                ));
            }
        }

        self.html.push_str("</li>");
    }

    fn finish(mut self, subject: String, html: bool) -> Report {
        self.html.push_str("</body></html>");
        Report {
            subject,
            text_body: self.text,
            html_body: html.then_some(self.html),
        }
    }
}
