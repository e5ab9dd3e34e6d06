#![no_std]

use core::fmt::Debug;

use defmt::{error, info};
use sequencer::SequencerConfig;

pub mod console;
pub mod trigger;

extern crate alloc;

/// Baked in at build time, the SD card belongs to the audio module.
const CONFIG_JSON: &[u8] = include_bytes!("../config.json");

pub trait PrintErr<T> {
    fn print_err(self, msg: &str) -> Option<T>;
}

impl<T, E: Debug> PrintErr<T> for Result<T, E> {
    fn print_err(self, msg: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                error!("{}: {}", msg, defmt::Debug2Format(&err));
                None
            }
        }
    }
}

pub fn load_config() -> SequencerConfig {
    let config: SequencerConfig = serde_json::from_slice(CONFIG_JSON)
        .print_err("Invalid config.json, using defaults")
        .unwrap_or_default();
    info!("Config: {}", config);
    config
}
