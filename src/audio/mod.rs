mod player;
mod queue;

pub use player::Player;
pub use queue::PlaybackQueue;

use url::Url;

#[derive(Display, Debug, Clone, EnumString, PartialEq)]
#[strum(serialize_all = "kebab_case")]
pub enum PlaybackState {
    Stopped,
    Loading,
    Playing,
    Paused,
    Failure(String),
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Stopped
    }
}

/// The audio output the player drives.
pub trait AudioBackend: Send {
    fn load(&self, url: &Url);
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
}
