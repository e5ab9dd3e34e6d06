#![no_std]

// Must stay first so the log macros are visible in every module below.
#[macro_use]
mod fmt;

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod player;
pub mod sequencer;
pub mod serial;
pub mod state;
pub mod track;

#[cfg(test)]
extern crate std;


pub use config::SequencerConfig;
pub use diagnostic::{Diagnostic, DiagnosticSink};
pub use error::{ConfigError, SerialError};
pub use event::{Fault, PlayerEvent};
pub use player::{ActiveLow, Player, TriggerInput};
pub use sequencer::{Sequencer, Tick};
pub use state::{PlaybackState, SequencerState};
pub use track::{Track, TrackId, TrackMap, Volume};
