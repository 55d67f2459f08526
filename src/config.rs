pub static NAME: &str = "Airwaves";
pub static APP_ID: &str = "org.airwaves.Airwaves";
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
pub static USER_AGENT: &str = concat!("Airwaves/", env!("CARGO_PKG_VERSION"));

// radio-browser.info compatible directory server
pub static API_SERVER: &str = "https://de1.api.radio-browser.info/";

// Number of stations kept in the recently played collection
pub const RECENTS_LIMIT: usize = 100;

// Smallest gap between two neighbouring sort keys before all siblings get
// renumbered
pub const SORT_KEY_EPSILON: f64 = 1e-9;
