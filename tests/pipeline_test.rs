mod support;

use chrono::NaiveDate;
use hebdo::{
    config::Features,
    digest::{
        Pipeline,
        selector::{sample_archive, weekly_rng},
    },
    mailer::Mailer,
    management::Library,
    types::{FollowedArtist, FollowedShow},
};
use support::{FakeAnnotations, FakeCatalog, FakeMailer, album, archive_entry, episode, track};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

fn artist(name: &str, id: &str) -> FollowedArtist {
    FollowedArtist {
        name: name.to_string(),
        id: id.to_string(),
    }
}

fn weekly_catalog() -> FakeCatalog {
    FakeCatalog::default()
        .with_artist("a1", vec![album("al1", "Fresh", "2024-03-10", "album")])
        .with_tracks(
            "al1",
            vec![
                track("t1", "One", "Artist A"),
                track("t2", "Two", "Artist A"),
                track("t3", "Three", "Artist A"),
            ],
        )
        .failing("b1")
}

fn weekly_library() -> Library {
    Library {
        artists: vec![artist("Artist A", "a1"), artist("Artist B", "b1")],
        ..Library::default()
    }
}

#[tokio::test]
async fn test_weekly_run_end_to_end() {
    let catalog = weekly_catalog();
    let features = Features::default();
    let pipeline = Pipeline::<_, FakeAnnotations>::new(&catalog, None, &features, today());

    let digest = pipeline.run(&weekly_library()).await.unwrap();

    assert_eq!(digest.week, 11);
    assert_eq!(digest.scan.new_identifiers.len(), 3);
    assert_eq!(digest.scan.music_lines.len(), 1);
    assert_eq!(digest.scan.errors.len(), 1);
    assert_eq!(digest.scan.errors[0].source_name, "Artist B");

    let playlist = digest.playlist.unwrap();
    assert_eq!(playlist.item_count, 3);
    assert_eq!(catalog.added_uris().len(), 3);

    let html = digest.report.html_body.unwrap();
    assert_eq!(html.matches("<h4>🎶 Musique</h4>").count(), 1);
    assert_eq!(html.matches("<li>Artist A - Fresh [Album]</li>").count(), 1);
    assert_eq!(html.matches("<h3>Erreurs rencontrées :</h3>").count(), 1);
    assert!(!html.contains("Podcasts"));
    assert!(html.contains(&playlist.url));
    assert_eq!(digest.report.subject, "🎶 Sorties de la Semaine - WK11");
}

#[tokio::test]
async fn test_quiet_week_creates_no_playlist() {
    let catalog = FakeCatalog::default()
        .with_full_album("c1", "Classic 1", vec![track("c1t", "C1", "X")])
        .with_full_album("c2", "Classic 2", vec![track("c2t", "C2", "Y")])
        .with_full_album("c3", "Classic 3", vec![track("c3t", "C3", "Z")]);
    let library = Library {
        artists: vec![artist("Silent", "s1")],
        classics: vec![
            archive_entry("Classic 1", "X", "c1"),
            archive_entry("Classic 2", "Y", "c2"),
            archive_entry("Classic 3", "Z", "c3"),
        ],
        ..Library::default()
    };
    let features = Features::default();
    let pipeline = Pipeline::<_, FakeAnnotations>::new(&catalog, None, &features, today());

    let digest = pipeline.run(&library).await.unwrap();

    assert!(digest.playlist.is_none());
    assert!(catalog.created.lock().unwrap().is_empty());
    // The archive is still part of the report
    assert_eq!(digest.classics.len(), 3);
    assert!(digest.report.text_body.contains("Classiques de l'archive"));
}

#[tokio::test]
async fn test_archive_tracks_follow_new_releases_in_playlist() {
    let mut catalog = weekly_catalog();
    let mut notable = Vec::new();
    for i in 0..3 {
        let id = format!("n{}", i);
        catalog = catalog.with_track(track(&id, &format!("Song {}", i), "Old Artist"));
        notable.push(archive_entry(&format!("Song {}", i), "Old Artist", &id));
    }
    let library = Library {
        notable_songs: notable,
        ..weekly_library()
    };
    let annotations = FakeAnnotations::default();
    let features = Features::default();
    let pipeline = Pipeline::new(&catalog, Some(&annotations), &features, today());

    let digest = pipeline
        .run_with_rng(&library, || weekly_rng(11))
        .await
        .unwrap();

    let added = catalog.added_uris();
    assert_eq!(added.len(), 6);
    assert_eq!(&added[..3], ["spotify:track:t1", "spotify:track:t2", "spotify:track:t3"]);
    assert!(added[3..].iter().all(|uri| uri.starts_with("spotify:track:n")));
    assert_eq!(digest.notable_songs.len(), 3);
    assert!(digest.notable_songs.iter().all(|p| p.context.is_some()));
}

async fn notable_ids(catalog: &FakeCatalog, library: &Library) -> Vec<String> {
    let features = Features::default();
    let pipeline = Pipeline::<_, FakeAnnotations>::new(catalog, None, &features, today());
    let digest = pipeline.run(library).await.unwrap();
    digest
        .notable_songs
        .iter()
        .map(|p| p.entry.reference_id.clone())
        .collect()
}

#[tokio::test]
async fn test_notable_sample_does_not_depend_on_classics() {
    let mut catalog = weekly_catalog();
    let mut notable = Vec::new();
    for i in 0..10 {
        let id = format!("n{}", i);
        catalog = catalog.with_track(track(&id, &format!("Song {}", i), "Old Artist"));
        notable.push(archive_entry(&format!("Song {}", i), "Old Artist", &id));
    }
    let mut classics = Vec::new();
    for i in 0..10 {
        let id = format!("c{}", i);
        catalog = catalog.with_full_album(&id, &format!("Album {}", i), vec![]);
        classics.push(archive_entry(&format!("Album {}", i), "Old Artist", &id));
    }

    let without_classics = Library {
        notable_songs: notable.clone(),
        ..weekly_library()
    };
    let with_classics = Library {
        classics,
        ..without_classics.clone()
    };

    let alone = notable_ids(&catalog, &without_classics).await;
    let alongside = notable_ids(&catalog, &with_classics).await;

    // Same week, same notable picks, whatever the classics list holds
    let expected: Vec<String> = sample_archive(&notable, &mut weekly_rng(11))
        .iter()
        .map(|e| e.reference_id.clone())
        .collect();
    assert_eq!(alone, expected);
    assert_eq!(alongside, expected);
}

#[tokio::test]
async fn test_disabled_features_are_skipped() {
    let catalog = weekly_catalog().with_episodes(
        "p1",
        vec![episode("e1", "Weekly Talk", Some("2024-03-12"))],
    );
    let library = Library {
        shows: vec![FollowedShow {
            name: "Talk Show".to_string(),
            id: Some("p1".to_string()),
        }],
        classics: vec![
            archive_entry("A", "X", "c1"),
            archive_entry("B", "Y", "c2"),
            archive_entry("C", "Z", "c3"),
        ],
        ..weekly_library()
    };
    let annotations = FakeAnnotations::default();
    let features = Features {
        include_podcasts: false,
        include_recommendations: false,
        include_archive: false,
        include_annotations: false,
        html_email: false,
        ..Features::default()
    };
    let pipeline = Pipeline::new(&catalog, Some(&annotations), &features, today());

    let digest = pipeline.run(&library).await.unwrap();

    assert!(digest.scan.podcast_lines.is_empty());
    assert!(digest.classics.is_empty());
    assert!(digest.recommendations.is_empty());
    assert!(catalog.seeds.lock().unwrap().is_empty());
    assert!(annotations.artists.lock().unwrap().is_empty());
    assert!(digest.report.html_body.is_none());
}

#[tokio::test]
async fn test_mail_failure_happens_after_playlist_creation() {
    let catalog = weekly_catalog();
    let features = Features::default();
    let pipeline = Pipeline::<_, FakeAnnotations>::new(&catalog, None, &features, today());
    let mailer = FakeMailer {
        fail: true,
        ..FakeMailer::default()
    };

    let digest = pipeline.run(&weekly_library()).await.unwrap();
    let sent = mailer.send(&digest.report).await;

    assert!(sent.is_err());
    // The playlist is not rolled back
    assert_eq!(catalog.created.lock().unwrap().len(), 1);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mailer_receives_composed_report() {
    let catalog = weekly_catalog();
    let features = Features::default();
    let pipeline = Pipeline::<_, FakeAnnotations>::new(&catalog, None, &features, today());
    let mailer = FakeMailer::default();

    let digest = pipeline.run(&weekly_library()).await.unwrap();
    mailer.send(&digest.report).await.unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], digest.report);
}
