use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of a file on the module's storage medium, e.g. `0003.mp3` is 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u16", into = "u16")]
pub struct TrackId(u16);

impl TrackId {
    pub const fn new(number: u16) -> Result<Self, ConfigError> {
        if number == 0 {
            Err(ConfigError::ZeroTrackId)
        } else {
            Ok(Self(number))
        }
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for TrackId {
    type Error = ConfigError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<TrackId> for u16 {
    fn from(id: TrackId) -> Self {
        id.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a track plays in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Track {
    Primary,
    Triggered,
    ResumeRoom,
}

impl Track {
    pub fn label(self) -> &'static str {
        match self {
            Track::Primary => "bg",
            Track::Triggered => "siren",
            Track::ResumeRoom => "room",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TrackMap {
    #[serde(alias = "PRIMARY")]
    pub primary: TrackId,
    #[serde(alias = "TRIGGERED")]
    pub triggered: TrackId,
    #[serde(alias = "RESUME_ROOM")]
    pub resume_room: TrackId,
}

impl TrackMap {
    pub fn id(&self, track: Track) -> TrackId {
        match track {
            Track::Primary => self.primary,
            Track::Triggered => self.triggered,
            Track::ResumeRoom => self.resume_room,
        }
    }
}

impl Default for TrackMap {
    fn default() -> Self {
        Self {
            primary: TrackId(1),
            triggered: TrackId(3),
            resume_room: TrackId(2),
        }
    }
}

/// Output volume as understood by the module, 0 (mute) to 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8", into = "u8")]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(30);

    pub const fn new(level: u8) -> Result<Self, ConfigError> {
        if level > Self::MAX.0 {
            Err(ConfigError::VolumeOutOfRange(level))
        } else {
            Ok(Self(level))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume(1)
    }
}

impl TryFrom<u8> for Volume {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}
