static STATION_SEARCH: &str = "json/stations/search";
static STATION_BY_UUID: &str = "json/stations/byuuid";
static COUNTRY_CODES: &str = "json/countrycodes";
static LANGUAGES: &str = "json/languages";
static TAGS: &str = "json/tags";

mod client;
mod error;
mod facets;
mod station_metadata;
mod station_request;

pub use client::Client;
pub use error::Error;
pub use facets::{CountryInfo, LanguageInfo, TagInfo};
pub use station_metadata::StationMetadata;
pub use station_request::StationRequest;
