use thiserror::Error;

/// MusicBrainz / Cover Art Archive errors
#[derive(Debug, Error)]
pub enum MbError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("MusicBrainz is rate limiting requests; try again shortly")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("A contact email is required for MusicBrainz requests")]
    MissingContact,
}
