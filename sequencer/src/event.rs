//! Status messages reported by the module, decoded once at the boundary.

use core::fmt;

/// Finished playing from the USB drive, the SD card or the flash.
const FINISHED_USB: u8 = 0x3C;
const FINISHED_CARD: u8 = 0x3D;
const FINISHED_FLASH: u8 = 0x3E;
const INSERTED: u8 = 0x3A;
const REMOVED: u8 = 0x3B;
const ONLINE: u8 = 0x3F;
const FAULT: u8 = 0x40;

const MEDIUM_USB: u16 = 0x01;
const MEDIUM_CARD: u16 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerEvent {
    /// Carries the file number, which the sequencer does not look at.
    PlaybackFinished { track: u16 },
    CardInserted,
    CardRemoved,
    CardOnline,
    UsbInserted,
    UsbRemoved,
    UsbOnline,
    /// A partial frame stopped arriving.
    Timeout,
    /// A frame arrived garbled or with a bad checksum.
    WrongStack,
    Fault(Fault),
}

/// Error codes carried by the module's error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    Busy,
    Sleeping,
    SerialWrongStack,
    ChecksumMismatch,
    FileIndexOutOfRange,
    FileNotFound,
    Advertising,
    Unknown(u16),
}

impl Fault {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Fault::Busy,
            2 => Fault::Sleeping,
            3 => Fault::SerialWrongStack,
            4 => Fault::ChecksumMismatch,
            5 => Fault::FileIndexOutOfRange,
            6 => Fault::FileNotFound,
            7 => Fault::Advertising,
            other => Fault::Unknown(other),
        }
    }
}

impl PlayerEvent {
    /// Returns `None` for acknowledgements, query replies and anything else
    /// that is not a status report.
    pub fn decode(command: u8, parameter: u16) -> Option<Self> {
        let event = match command {
            FINISHED_USB | FINISHED_CARD | FINISHED_FLASH => {
                PlayerEvent::PlaybackFinished { track: parameter }
            }
            INSERTED => match parameter {
                MEDIUM_USB => PlayerEvent::UsbInserted,
                MEDIUM_CARD => PlayerEvent::CardInserted,
                _ => return None,
            },
            REMOVED => match parameter {
                MEDIUM_USB => PlayerEvent::UsbRemoved,
                MEDIUM_CARD => PlayerEvent::CardRemoved,
                _ => return None,
            },
            ONLINE => {
                if parameter & MEDIUM_CARD != 0 {
                    PlayerEvent::CardOnline
                } else if parameter & MEDIUM_USB != 0 {
                    PlayerEvent::UsbOnline
                } else {
                    return None;
                }
            }
            FAULT => PlayerEvent::Fault(Fault::from_code(parameter)),
            _ => return None,
        };

        Some(event)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, PlayerEvent::PlaybackFinished { .. })
    }

    pub fn is_online(&self) -> bool {
        matches!(self, PlayerEvent::CardOnline | PlayerEvent::UsbOnline)
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerEvent::PlaybackFinished { track } => write!(f, "Number:{track} Play Finished!"),
            PlayerEvent::CardInserted => f.write_str("Card Inserted!"),
            PlayerEvent::CardRemoved => f.write_str("Card Removed!"),
            PlayerEvent::CardOnline => f.write_str("Card Online!"),
            PlayerEvent::UsbInserted => f.write_str("USB Inserted!"),
            PlayerEvent::UsbRemoved => f.write_str("USB Removed!"),
            PlayerEvent::UsbOnline => f.write_str("USB Online!"),
            PlayerEvent::Timeout => f.write_str("Time Out!"),
            PlayerEvent::WrongStack => f.write_str("Stack Wrong!"),
            PlayerEvent::Fault(fault) => write!(f, "DFPlayerError:{fault}"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The module reports a missing card as busy.
            Fault::Busy => f.write_str("Card not found"),
            Fault::Sleeping => f.write_str("Sleeping"),
            Fault::SerialWrongStack => f.write_str("Get Wrong Stack"),
            Fault::ChecksumMismatch => f.write_str("Check Sum Not Match"),
            Fault::FileIndexOutOfRange => f.write_str("File Index Out of Bound"),
            Fault::FileNotFound => f.write_str("Cannot Find File"),
            Fault::Advertising => f.write_str("In Advertise"),
            Fault::Unknown(code) => write!(f, "Unknown error {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_decode_finished_from_any_medium() {
        for command in [0x3C, 0x3D, 0x3E] {
            assert_eq!(
                PlayerEvent::decode(command, 3),
                Some(PlayerEvent::PlaybackFinished { track: 3 })
            );
        }
    }

    #[test]
    fn test_decode_media_changes() {
        assert_eq!(PlayerEvent::decode(0x3A, 2), Some(PlayerEvent::CardInserted));
        assert_eq!(PlayerEvent::decode(0x3A, 1), Some(PlayerEvent::UsbInserted));
        assert_eq!(PlayerEvent::decode(0x3B, 2), Some(PlayerEvent::CardRemoved));
        assert_eq!(PlayerEvent::decode(0x3B, 1), Some(PlayerEvent::UsbRemoved));
        assert_eq!(PlayerEvent::decode(0x3F, 0x03), Some(PlayerEvent::CardOnline));
        assert_eq!(PlayerEvent::decode(0x3F, 0x01), Some(PlayerEvent::UsbOnline));
        assert_eq!(PlayerEvent::decode(0x3F, 0x00), None);
    }

    #[test]
    fn test_decode_faults() {
        assert_eq!(
            PlayerEvent::decode(0x40, 6),
            Some(PlayerEvent::Fault(Fault::FileNotFound))
        );
        assert_eq!(
            PlayerEvent::decode(0x40, 42),
            Some(PlayerEvent::Fault(Fault::Unknown(42)))
        );
    }

    #[test]
    fn test_acks_are_not_events() {
        assert_eq!(PlayerEvent::decode(0x41, 0), None);
        assert_eq!(PlayerEvent::decode(0x43, 20), None);
    }

    #[test]
    fn test_diagnostic_text() {
        assert_eq!(
            PlayerEvent::PlaybackFinished { track: 3 }.to_string(),
            "Number:3 Play Finished!"
        );
        assert_eq!(
            PlayerEvent::Fault(Fault::Busy).to_string(),
            "DFPlayerError:Card not found"
        );
        assert_eq!(PlayerEvent::Timeout.to_string(), "Time Out!");
    }
}
