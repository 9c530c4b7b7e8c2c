//! MusicBrainz web service + Cover Art Archive client.
//!
//! - Every MusicBrainz request waits on a shared rate limiter (1 req/s).
//! - The user agent carries the user's contact email, as MusicBrainz asks.
//! - Cover art lookups never fail the caller: no art is just `None`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::{APP_NAME, APP_VERSION, is_valid_contact_email};
use crate::core::cover::sniff_mime;
use crate::core::types::CoverArt;

use super::error::MbError;
use super::types::{MbRelease, MbSearchResponse, Release, ReleaseSummary};

const MUSICBRAINZ_BASE_URL: &str = "https://musicbrainz.org/ws/2";
const COVER_ART_BASE_URL: &str = "https://coverartarchive.org";
const RATE_LIMIT_MS: u64 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const COVER_TIMEOUT: Duration = Duration::from_secs(15);

pub const SEARCH_LIMIT: u32 = 20;

const RELEASE_INC: &str = "artists+recordings+artist-credits+release-groups+labels+url-rels";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub cover_art_base: String,
    pub user_agent: String,
    pub min_interval: Duration,
}

impl ClientConfig {
    /// Production endpoints. Fails without a usable contact email.
    pub fn new(contact_email: &str) -> Result<Self, MbError> {
        let email = contact_email.trim();
        if !is_valid_contact_email(email) {
            return Err(MbError::MissingContact);
        }

        Ok(Self {
            api_base: MUSICBRAINZ_BASE_URL.to_string(),
            cover_art_base: COVER_ART_BASE_URL.to_string(),
            user_agent: user_agent(email),
            min_interval: Duration::from_millis(RATE_LIMIT_MS),
        })
    }
}

/// "Tagwright/0.3.0 ( someone@example.org )"
pub fn user_agent(contact_email: &str) -> String {
    format!("{APP_NAME}/{APP_VERSION} ( {contact_email} )")
}

fn escape_lucene(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `artist:"x" AND release:"y"`. An empty side is left out.
pub fn build_search_query(artist: &str, album: &str) -> Result<String, MbError> {
    let artist = artist.trim();
    let album = album.trim();

    let mut parts = Vec::with_capacity(2);
    if !artist.is_empty() {
        parts.push(format!("artist:\"{}\"", escape_lucene(artist)));
    }
    if !album.is_empty() {
        parts.push(format!("release:\"{}\"", escape_lucene(album)));
    }

    if parts.is_empty() {
        return Err(MbError::InvalidQuery(
            "Please enter an artist or an album.".to_string(),
        ));
    }
    Ok(parts.join(" AND "))
}

/// Rate limiter enforcing a minimum gap between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Cheap to clone; clones share the rate limiter.
#[derive(Clone)]
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    config: Arc<ClientConfig>,
    rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for MusicBrainzClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicBrainzClient")
            .field("api_base", &self.config.api_base)
            .finish()
    }
}

impl MusicBrainzClient {
    pub fn new(config: ClientConfig) -> Result<Self, MbError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MbError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(config.min_interval)),
            config: Arc::new(config),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, MbError> {
        self.rate_limiter.wait().await;

        tracing::debug!(url = %url, "Querying MusicBrainz API");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| MbError::Network(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(MbError::NotFound(what.to_string()));
        }

        if status == 503 {
            return Err(MbError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MbError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| MbError::Parse(e.to_string()))
    }

    /// Up to [`SEARCH_LIMIT`] releases matching artist and/or album.
    pub async fn search_releases(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Vec<ReleaseSummary>, MbError> {
        let query = build_search_query(artist, album)?;
        let url = format!("{}/release", self.config.api_base);
        let limit = SEARCH_LIMIT.to_string();

        let response: MbSearchResponse = self
            .get_json(
                &url,
                &[("query", query.as_str()), ("limit", limit.as_str()), ("fmt", "json")],
                "release search",
            )
            .await?;

        let hits: Vec<ReleaseSummary> = response
            .releases
            .into_iter()
            .map(ReleaseSummary::from)
            .collect();

        tracing::info!(query = %query, hits = hits.len(), "MusicBrainz search");
        Ok(hits)
    }

    /// Full release with media and tracks.
    pub async fn get_release(&self, release_id: &str) -> Result<Release, MbError> {
        let url = format!("{}/release/{}", self.config.api_base, release_id);

        let raw: MbRelease = self
            .get_json(
                &url,
                &[("inc", RELEASE_INC), ("fmt", "json")],
                &format!("release {release_id}"),
            )
            .await?;

        tracing::info!(id = %raw.id, title = %raw.title, "Retrieved release from MusicBrainz");
        Ok(Release::from(raw))
    }

    /// The 500px front cover from the Cover Art Archive, if there is one.
    pub async fn fetch_front_cover(&self, release_id: &str) -> Option<CoverArt> {
        let url = format!(
            "{}/release/{}/front-500",
            self.config.cover_art_base, release_id
        );

        let response = match self
            .http_client
            .get(&url)
            .timeout(COVER_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "cover art request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url = %url, status = %response.status(), "no cover art");
            return None;
        }

        let header_mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(';').next().unwrap_or(s).trim().to_string())
            .filter(|s| s.starts_with("image/"));

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => {
                let data = bytes.to_vec();
                let mime = header_mime.unwrap_or_else(|| sniff_mime(&data).to_string());
                Some(CoverArt { data, mime })
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "cover art download failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> MusicBrainzClient {
        let mut config = ClientConfig::new("tester@example.org").unwrap();
        config.api_base = format!("{}/ws/2", server.uri());
        config.cover_art_base = server.uri();
        config.min_interval = Duration::ZERO;
        MusicBrainzClient::new(config).unwrap()
    }

    #[test]
    fn query_joins_and_escapes() {
        assert_eq!(
            build_search_query("Band", "Record").unwrap(),
            r#"artist:"Band" AND release:"Record""#
        );
        assert_eq!(build_search_query("", " Solo ").unwrap(), r#"release:"Solo""#);
        assert_eq!(
            build_search_query(r#"The "Best" \ Band"#, "").unwrap(),
            r#"artist:"The \"Best\" \\ Band""#
        );
        assert!(matches!(
            build_search_query("  ", ""),
            Err(MbError::InvalidQuery(_))
        ));
    }

    #[test]
    fn config_requires_contact_email() {
        assert!(matches!(ClientConfig::new(""), Err(MbError::MissingContact)));
        assert!(matches!(
            ClientConfig::new("not-an-email"),
            Err(MbError::MissingContact)
        ));

        let config = ClientConfig::new(" me@example.org ").unwrap();
        assert!(config.user_agent.ends_with("( me@example.org )"));
        assert!(config.user_agent.starts_with(APP_NAME));
    }

    #[tokio::test]
    async fn search_sends_query_and_parses_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/2/release"))
            .and(query_param("query", r#"artist:"Band" AND release:"Record""#))
            .and(query_param("limit", "20"))
            .and(query_param("fmt", "json"))
            .and(header("user-agent", user_agent("tester@example.org").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count":1,"releases":[{"id":"r1","title":"Record","date":"2001",
                    "track-count":9,"artist-credit":[{"name":"Band"}]}]}"#,
            ))
            .mount(&server)
            .await;

        let hits = test_client(&server)
            .search_releases("Band", "Record")
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "r1");
        assert_eq!(hits[0].display_line(), "Band - Record (2001) [9 tracks]");
    }

    #[tokio::test]
    async fn release_lookup_maps_status_codes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/2/release/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ws/2/release/busy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ws/2/release/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(matches!(
            client.get_release("missing").await,
            Err(MbError::NotFound(_))
        ));
        assert!(matches!(
            client.get_release("busy").await,
            Err(MbError::RateLimited)
        ));
        assert!(matches!(
            client.get_release("broken").await,
            Err(MbError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn release_lookup_requests_includes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/2/release/r1"))
            .and(query_param("inc", RELEASE_INC))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id":"r1","title":"Record","artist-credit":[{"name":"Band"}],
                    "media":[{"tracks":[{"number":"1","title":"One"}]}]}"#,
            ))
            .mount(&server)
            .await;

        let release = test_client(&server).get_release("r1").await.unwrap();
        assert_eq!(release.title, "Record");
        assert_eq!(release.media[0].tracks[0].title, "One");
    }

    #[tokio::test]
    async fn cover_art_is_optional() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/release/r1/front-500"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/release/r2/front-500"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let art = client.fetch_front_cover("r1").await.unwrap();
        assert_eq!(art.mime, "image/jpeg");
        assert_eq!(art.data.len(), 7);

        assert!(client.fetch_front_cover("r2").await.is_none());
    }

    #[tokio::test]
    async fn rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
