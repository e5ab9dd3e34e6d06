use core::fmt::Debug;

use embedded_hal::digital::InputPin;

use crate::event::PlayerEvent;
use crate::fmt::Debug2Format;
use crate::track::{TrackId, Volume};

/// Commands and status reports of the audio module.
pub trait Player {
    type Error: Debug;

    /// Handshake with the module. Called once at startup.
    fn begin(&mut self) -> Result<(), Self::Error>;

    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error>;

    /// Starts playing, does not wait for the module to confirm.
    fn play(&mut self, track: TrackId) -> Result<(), Self::Error>;

    /// Returns at most one pending report without blocking.
    fn poll_event(&mut self) -> Result<Option<PlayerEvent>, Self::Error>;
}

pub trait TriggerInput {
    fn is_active(&mut self) -> bool;
}

/// A pulled-up pin that counts as triggered while grounded.
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> TriggerInput for ActiveLow<P> {
    fn is_active(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(err) => {
                warn!("Failed to read trigger pin: {}", Debug2Format(&err));
                false
            }
        }
    }
}
