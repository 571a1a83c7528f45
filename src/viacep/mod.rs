use color_eyre::eyre::eyre;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use crate::search::{FetchError, LookupClient};

pub mod model;

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws/";
const UA: &str = concat!("cep-lookup/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the ViaCEP web service
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    pub fn new(base_url: Url) -> color_eyre::Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(eyre!("[{}] cannot be used as a base URL", base_url));
        }
        Ok(
            Self {
                client: Client::builder()
                    .default_headers(Self::default_headers())
                    .build()?,
                base_url,
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        map
    }

    /// build the request URL, percent-encoding every segment on its own
    ///
    /// * `segments` - path below the base URL, i.e. `["SP", "Sao Paulo", "Avenida Paulista", "json"]`
    fn url_for(&self, segments: &[String]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl LookupClient for ViaCepClient {
    async fn get_json(&self, segments: &[String]) -> Result<Value, FetchError> {
        let url = self.url_for(segments);
        debug!("GET {}", url);
        let body = self.client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
