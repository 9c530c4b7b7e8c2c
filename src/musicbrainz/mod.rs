//! musicbrainz/mod.rs
//!
//! Everything that talks to MusicBrainz or the Cover Art Archive, plus the
//! pure mapping from a release onto local files.
//! No Iced imports.

mod apply;
mod client;
mod error;
pub mod submit;
mod types;

pub use apply::release_edits;
pub use client::{ClientConfig, MusicBrainzClient, SEARCH_LIMIT};
pub use error::MbError;
pub use types::{Release, ReleaseSummary};

use crate::core::types::CoverArt;

/// Release details and (when the archive has one) its front cover.
pub async fn fetch_release_with_cover(
    client: &MusicBrainzClient,
    release_id: &str,
) -> Result<(Release, Option<CoverArt>), MbError> {
    let release = client.get_release(release_id).await?;
    let cover = client.fetch_front_cover(release_id).await;
    Ok((release, cover))
}
