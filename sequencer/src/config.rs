use serde::{Deserialize, Serialize};

use crate::track::{TrackMap, Volume};

/// The module only speaks 9600 baud.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct SequencerConfig {
    #[serde(alias = "BAUD_RATE")]
    pub baud_rate: u32,

    #[serde(alias = "VOLUME")]
    pub volume: Volume,

    /// Time the module needs after power-up before it answers.
    #[serde(alias = "SETTLE_DELAY_MS")]
    pub settle_delay_ms: u64,

    #[serde(alias = "POLL_INTERVAL_MS")]
    pub poll_interval_ms: u64,

    #[serde(alias = "TRACKS")]
    pub tracks: TrackMap,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            volume: Volume::default(),
            settle_delay_ms: 5000,
            poll_interval_ms: 10,
            tracks: TrackMap::default(),
        }
    }
}

impl SequencerConfig {
    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_tracks(mut self, tracks: TrackMap) -> Self {
        self.tracks = tracks;
        self
    }
}
