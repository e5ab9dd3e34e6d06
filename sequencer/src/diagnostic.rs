use core::fmt;

use crate::event::PlayerEvent;
use crate::track::Track;

/// A human-readable line for the debug console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    Ready,
    ConnectFailed,
    Playing(Track),
    Event(PlayerEvent),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Ready => f.write_str("OK"),
            Diagnostic::ConnectFailed => f.write_str(
                "Connecting to DFPlayer Mini failed!\n\
                 1.Please recheck the connection!\n\
                 2.Please insert the SD card!",
            ),
            Diagnostic::Playing(track) => write!(f, "Playing {} song...", track.label()),
            Diagnostic::Event(event) => fmt::Display::fmt(event, f),
        }
    }
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic);
}

impl<F: FnMut(&Diagnostic)> DiagnosticSink for F {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}
