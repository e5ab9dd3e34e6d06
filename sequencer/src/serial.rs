//! DFPlayer Mini serial adapter.
//!
//! Every message in either direction is a fixed 10-byte frame:
//!
//! ```text
//! 7E FF 06 CMD FB PH PL CH CL EF
//! ```
//!
//! `FB` asks the module for an acknowledgement, `PH PL` is the big-endian
//! parameter and `CH CL` is the two's complement of the sum of the six bytes
//! from `FF` to `PL`.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::error::SerialError;
use crate::event::PlayerEvent;
use crate::player::Player;
use crate::track::{TrackId, Volume};

pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const END: u8 = 0xEF;

pub const CMD_PLAY_TRACK: u8 = 0x03;
pub const CMD_SET_VOLUME: u8 = 0x06;
pub const CMD_RESET: u8 = 0x0C;

/// The module needs up to about 1.5 s to come back from a reset.
const HANDSHAKE_TIMEOUT_MS: u32 = 2000;
const HANDSHAKE_POLL_MS: u32 = 10;

/// Polls a partial frame may sit without new bytes before it is dropped.
const STALE_POLL_LIMIT: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub command: u8,
    pub feedback: bool,
    pub parameter: u16,
}

impl Frame {
    pub fn new(command: u8, parameter: u16) -> Self {
        Self {
            command,
            feedback: false,
            parameter,
        }
    }

    pub fn play(track: TrackId) -> Self {
        Self::new(CMD_PLAY_TRACK, track.get())
    }

    pub fn volume(volume: Volume) -> Self {
        Self::new(CMD_SET_VOLUME, u16::from(volume.get()))
    }

    pub fn reset() -> Self {
        Self {
            feedback: true,
            ..Self::new(CMD_RESET, 0)
        }
    }

    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let [high, low] = self.parameter.to_be_bytes();
        let mut bytes = [
            START,
            VERSION,
            LENGTH,
            self.command,
            u8::from(self.feedback),
            high,
            low,
            0,
            0,
            END,
        ];
        let [check_high, check_low] = checksum(&bytes).to_be_bytes();
        bytes[7] = check_high;
        bytes[8] = check_low;
        bytes
    }

    /// Validates framing and checksum of a complete frame.
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Option<Self> {
        if bytes[0] != START || bytes[1] != VERSION || bytes[2] != LENGTH || bytes[9] != END {
            return None;
        }

        let expected = u16::from_be_bytes([bytes[7], bytes[8]]);
        if checksum(bytes) != expected {
            return None;
        }

        Some(Self {
            command: bytes[3],
            feedback: bytes[4] != 0,
            parameter: u16::from_be_bytes([bytes[5], bytes[6]]),
        })
    }
}

fn checksum(bytes: &[u8; FRAME_LEN]) -> u16 {
    let sum = bytes[1..7]
        .iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(u16::from(byte)));
    0u16.wrapping_sub(sum)
}

/// Reassembles frames from a byte stream, resyncing on the start byte.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: [u8; FRAME_LEN],
    len: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(None)` for a complete frame that failed validation.
    pub fn push(&mut self, byte: u8) -> Option<Option<Frame>> {
        let expected = match self.len {
            0 => Some(START),
            1 => Some(VERSION),
            2 => Some(LENGTH),
            _ => None,
        };
        if expected.is_some_and(|expected| byte != expected) {
            self.len = 0;
            if byte == START {
                self.buffer[0] = byte;
                self.len = 1;
            }
            return None;
        }

        self.buffer[self.len] = byte;
        self.len += 1;

        if self.len < FRAME_LEN {
            return None;
        }

        self.len = 0;
        let frame = Frame::decode(&self.buffer);
        if frame.is_none() {
            self.resync();
        }
        Some(frame)
    }

    /// Replays the bytes after the first later start byte of a rejected frame,
    /// in case a short frame swallowed the head of the next one.
    fn resync(&mut self) {
        let Some(offset) = self.buffer[1..].iter().position(|&byte| byte == START) else {
            return;
        };

        let rest = self.buffer;
        for &byte in &rest[offset + 1..] {
            // Fewer than FRAME_LEN bytes, so nothing completes here.
            let _ = self.push(byte);
        }
    }

    pub fn is_partial(&self) -> bool {
        self.len > 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

pub struct DfPlayer<U, D> {
    uart: U,
    delay: D,
    decoder: FrameDecoder,
    stale_polls: u16,
}

impl<U, D> DfPlayer<U, D>
where
    U: Read + ReadReady + Write,
    D: DelayNs,
{
    pub fn new(uart: U, delay: D) -> Self {
        Self {
            uart,
            delay,
            decoder: FrameDecoder::new(),
            stale_polls: 0,
        }
    }

    pub fn into_inner(self) -> (U, D) {
        (self.uart, self.delay)
    }

    fn send(&mut self, frame: Frame) -> Result<(), SerialError<U::Error>> {
        debug!("Sending {}", frame);
        self.uart.write_all(&frame.encode())?;
        self.uart.flush()?;
        Ok(())
    }

    /// Reads buffered bytes until a frame completes or the buffer is empty.
    fn read_frame(&mut self) -> Result<Option<Option<Frame>>, SerialError<U::Error>> {
        let mut progressed = false;

        while self.uart.read_ready()? {
            let mut byte = [0u8; 1];
            if self.uart.read(&mut byte)? == 0 {
                break;
            }
            progressed = true;

            if let Some(frame) = self.decoder.push(byte[0]) {
                self.stale_polls = 0;
                return Ok(Some(frame));
            }
        }

        if progressed || !self.decoder.is_partial() {
            self.stale_polls = 0;
        } else {
            self.stale_polls += 1;
        }

        Ok(None)
    }
}

impl<U, D> Player for DfPlayer<U, D>
where
    U: Read + ReadReady + Write,
    D: DelayNs,
{
    type Error = SerialError<U::Error>;

    /// Resets the module and waits for it to report a medium online.
    fn begin(&mut self) -> Result<(), Self::Error> {
        self.decoder.clear();
        self.send(Frame::reset())?;

        // Every frame read costs one poll interval too, so chatter cannot
        // stretch the handshake.
        let mut waited = 0;
        while waited < HANDSHAKE_TIMEOUT_MS {
            waited += HANDSHAKE_POLL_MS;

            if let Some(Some(frame)) = self.read_frame()? {
                match PlayerEvent::decode(frame.command, frame.parameter) {
                    Some(event) if event.is_online() => {
                        info!("Module online: {}", event);
                        return Ok(());
                    }
                    Some(PlayerEvent::Fault(fault)) => return Err(SerialError::Rejected(fault)),
                    _ => debug!("Ignoring {} during handshake", frame),
                }
                continue;
            }

            self.delay.delay_ms(HANDSHAKE_POLL_MS);
        }

        Err(SerialError::NoResponse)
    }

    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.send(Frame::volume(volume))
    }

    fn play(&mut self, track: TrackId) -> Result<(), Self::Error> {
        self.send(Frame::play(track))
    }

    fn poll_event(&mut self) -> Result<Option<PlayerEvent>, Self::Error> {
        loop {
            match self.read_frame()? {
                Some(Some(frame)) => {
                    if let Some(event) = PlayerEvent::decode(frame.command, frame.parameter) {
                        return Ok(Some(event));
                    }
                }
                Some(None) => return Ok(Some(PlayerEvent::WrongStack)),
                None => break,
            }
        }

        if self.stale_polls >= STALE_POLL_LIMIT {
            self.decoder.clear();
            self.stale_polls = 0;
            return Ok(Some(PlayerEvent::Timeout));
        }

        Ok(None)
    }
}
