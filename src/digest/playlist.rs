use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{Res, spotify::Catalog, utils};

use super::scanner::NewIdentifierSet;

/// Maximum number of URIs per add-items call.
pub const ADD_BATCH_SIZE: usize = 100;

/// The weekly playlist once it exists on the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPlaylist {
    pub id: String,
    pub name: String,
    pub url: String,
    pub item_count: usize,
}

/// Creates the private weekly playlist and fills it.
///
/// Nothing is created when `new_identifiers` is empty, whatever the
/// supplemental identifiers hold. Otherwise the playlist receives the new
/// identifiers first, then the supplemental ones (classics before notable
/// songs, as passed in), skipping URIs already added.
pub async fn build<C: Catalog>(
    catalog: &C,
    user_id: &str,
    today: NaiveDate,
    new_identifiers: &NewIdentifierSet,
    supplemental: &[String],
) -> Res<Option<PublishedPlaylist>> {
    if new_identifiers.is_empty() {
        return Ok(None);
    }

    let name = utils::playlist_name(today);
    let created = catalog.create_playlist(user_id, &name, false).await?;

    let items = playlist_items(new_identifiers, supplemental);
    for chunk in items.chunks(ADD_BATCH_SIZE) {
        catalog.add_playlist_items(&created.id, chunk).await?;
    }

    let url = created
        .external_urls
        .and_then(|urls| urls.spotify)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| utils::playlist_url_from_id(&created.id));

    Ok(Some(PublishedPlaylist {
        id: created.id,
        name,
        url,
        item_count: items.len(),
    }))
}

/// New identifiers followed by supplemental ones, without repeats.
///
/// A supplemental URI that is already among the new identifiers (an archive
/// track released again this week, say) is not appended a second time, so
/// the playlist never lists the same item twice.
pub fn playlist_items(new_identifiers: &NewIdentifierSet, supplemental: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    new_identifiers
        .iter()
        .chain(supplemental.iter())
        .filter(|uri| seen.insert(*uri))
        .cloned()
        .collect()
}
