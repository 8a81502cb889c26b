use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;

use crate::geocode::error::ResolutionError;
use crate::geocode::response::FeatureCollection;

pub mod error;
pub mod response;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("shelter-import/", env!("CARGO_PKG_VERSION"));
const PLACES_PATH: [&str; 3] = ["geocoding", "v5", "mapbox.places"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

pub trait AddressResolver {
    fn resolve(&self, address: &str) -> Result<Coordinates, ResolutionError>;
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
    /// When set, a first candidate whose relevance is below this value is
    /// treated as unresolved.
    pub min_relevance: Option<f64>,
}

/// Forward geocoding against the Mapbox places endpoint. Each call is a
/// single blocking request; nothing is cached between calls.
pub struct MapboxResolver {
    client: Client,
    base_url: Url,
    access_token: String,
    min_relevance: Option<f64>,
}

impl MapboxResolver {
    pub fn new(config: &GeocoderConfig) -> Result<MapboxResolver, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(MapboxResolver {
            client,
            base_url: config.base_url.clone(),
            access_token: config.api_key.clone(),
            min_relevance: config.min_relevance,
        })
    }

    fn lookup_url(&self, address: &str) -> Result<Url, ResolutionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolutionError::InvalidUrl { address: address.to_owned() })?
            .pop_if_empty()
            .extend(PLACES_PATH)
            .push(&format!("{}.json", address));
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

impl AddressResolver for MapboxResolver {
    fn resolve(&self, address: &str) -> Result<Coordinates, ResolutionError> {
        let url = self.lookup_url(address)?;
        debug!("Geocoding '{}' via {}", address, redacted(&url));

        let transport = |source: reqwest::Error| ResolutionError::Transport {
            address: address.to_owned(),
            source,
        };
        let response = self.client.get(url).send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::Status {
                address: address.to_owned(),
                status,
            });
        }

        let body = response.text().map_err(transport)?;
        first_candidate(address, &body, self.min_relevance)
    }
}

/// Picks the first feature of a places response. The provider lists
/// coordinates as `[longitude, latitude]`.
pub fn first_candidate(
    address: &str,
    body: &str,
    min_relevance: Option<f64>,
) -> Result<Coordinates, ResolutionError> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|source| ResolutionError::InvalidResponse {
            address: address.to_owned(),
            source,
        })?;

    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| ResolutionError::NoMatch { address: address.to_owned() })?;

    if let (Some(minimum), Some(relevance)) = (min_relevance, feature.relevance) {
        if relevance < minimum {
            return Err(ResolutionError::LowRelevance {
                address: address.to_owned(),
                relevance,
            });
        }
    }

    if let Some(place_name) = &feature.place_name {
        debug!("Resolved '{}' as '{}'", address, place_name);
    }

    let [longitude, latitude] = feature.geometry.coordinates;
    Ok(Coordinates { latitude, longitude })
}

fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" { "***".to_owned() } else { value.into_owned() };
            (key.into_owned(), value)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}
