use std::path::PathBuf;

use hebdo::{error::Error, management::Library, types::Year};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hebdo-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_load_full_catalog() {
    let dir = scratch_dir("full");
    std::fs::write(
        dir.join("artists.json"),
        r#"[{"artist": "Radiohead", "id": "a1"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("podcasts.json"),
        r#"[{"podcast": "Show", "id": "s1"}, {"podcast": "No Id"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("classics.json"),
        r#"[{"title": "OK Computer", "artist": "Radiohead", "year": 1997, "id": "al1"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("notable_songs.json"),
        r#"[{"title": "Creep", "artist": "Radiohead", "year": "1992", "id": "t1"}]"#,
    )
    .unwrap();

    let library = Library::load(&dir).await.unwrap();

    assert_eq!(library.artists[0].name, "Radiohead");
    assert_eq!(library.shows.len(), 2);
    assert_eq!(library.shows[1].id, None);
    assert_eq!(library.classics[0].year, Some(Year::Number(1997)));
    assert_eq!(library.notable_songs[0].year, Some(Year::Text("1992".to_string())));
    assert_eq!(library.notable_songs[0].reference_id, "t1");
}

#[tokio::test]
async fn test_optional_files_may_be_missing() {
    let dir = scratch_dir("minimal");
    std::fs::write(dir.join("artists.json"), "[]").unwrap();

    let library = Library::load(&dir).await.unwrap();

    assert!(library.artists.is_empty());
    assert!(library.shows.is_empty());
    assert!(library.classics.is_empty());
    assert!(library.notable_songs.is_empty());
}

#[tokio::test]
async fn test_missing_artists_file_is_fatal() {
    let dir = scratch_dir("empty");
    let err = Library::load(&dir).await.unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[tokio::test]
async fn test_malformed_file_is_fatal() {
    let dir = scratch_dir("malformed");
    std::fs::write(dir.join("artists.json"), "[]").unwrap();
    std::fs::write(dir.join("classics.json"), "{not json").unwrap();

    let err = Library::load(&dir).await.unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}
