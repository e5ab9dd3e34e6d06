use clap::{Args, Subcommand};
use sequencer::serial::Frame;
use sequencer::{TrackId, Volume};

#[derive(Args)]
#[command(about = "Print the serial frame for a module command")]
pub struct FrameCommand {
    #[command(subcommand)]
    pub kind: FrameKind,
}

#[derive(Subcommand)]
pub enum FrameKind {
    /// Play a file by number
    Play { track: u16 },
    /// Set the output volume (0 to 30)
    Volume { level: u8 },
    /// Reset the module
    Reset,
}

impl FrameCommand {
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let frame = self.frame()?;
        println!("{}", hex(&frame.encode()));
        Ok(())
    }

    fn frame(&self) -> Result<Frame, Box<dyn std::error::Error>> {
        let frame = match self.kind {
            FrameKind::Play { track } => Frame::play(TrackId::new(track)?),
            FrameKind::Volume { level } => Frame::volume(Volume::new(level)?),
            FrameKind::Reset => Frame::reset(),
        };
        Ok(frame)
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_frame_hex() {
        let command = FrameCommand {
            kind: FrameKind::Play { track: 1 },
        };
        let frame = command.frame().unwrap();
        assert_eq!(hex(&frame.encode()), "7E FF 06 03 00 00 01 FE F7 EF");
    }

    #[test]
    fn test_invalid_arguments_are_errors() {
        let zero = FrameCommand {
            kind: FrameKind::Play { track: 0 },
        };
        assert!(zero.frame().is_err());

        let loud = FrameCommand {
            kind: FrameKind::Volume { level: 31 },
        };
        assert!(loud.frame().is_err());
    }
}
