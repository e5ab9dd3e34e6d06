use core::fmt::Debug;

use thiserror::Error;

use crate::event::Fault;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("volume {0} is out of range (0 to 30)")]
    VolumeOutOfRange(u8),
    #[error("track id must be a positive number")]
    ZeroTrackId,
}

#[derive(Error, Debug)]
pub enum SerialError<E: Debug> {
    #[error("serial transport failed: {0:?}")]
    Transport(E),
    #[error("no response from the module")]
    NoResponse,
    #[error("module reported a fault during the handshake: {0}")]
    Rejected(Fault),
}

impl<E: embedded_io::Error> From<E> for SerialError<E> {
    fn from(err: E) -> Self {
        SerialError::Transport(err)
    }
}
