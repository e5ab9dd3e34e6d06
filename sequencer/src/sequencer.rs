use crate::config::SequencerConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::fmt::Debug2Format;
use crate::player::{Player, TriggerInput};
use crate::state::{PlaybackState, SequencerState};
use crate::track::{TrackId, TrackMap};

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    Running {
        state: PlaybackState,
        played: Option<TrackId>,
    },
    Halted,
}

/// Polls the trigger and keeps the module playing the right track.
pub struct Sequencer<P, T, S> {
    player: P,
    trigger: T,
    sink: S,
    tracks: TrackMap,
    state: SequencerState,
}

impl<P, T, S> Sequencer<P, T, S>
where
    P: Player,
    T: TriggerInput,
    S: DiagnosticSink,
{
    /// Opens the module. A failed handshake leaves the sequencer halted for
    /// good; it is never retried.
    pub fn start(config: &SequencerConfig, mut player: P, trigger: T, mut sink: S) -> Self {
        let state = match player.begin() {
            Ok(()) => {
                sink.emit(&Diagnostic::Ready);
                if let Err(err) = player.set_volume(config.volume) {
                    warn!("Failed to set volume: {}", Debug2Format(&err));
                }
                info!("Player ready, volume {}", config.volume.get());
                SequencerState::default()
            }
            Err(err) => {
                error!("Player handshake failed: {}", Debug2Format(&err));
                sink.emit(&Diagnostic::ConnectFailed);
                SequencerState::halted()
            }
        };

        Self {
            player,
            trigger,
            sink,
            tracks: config.tracks,
            state,
        }
    }

    /// Samples the trigger, advances one step, and drains at most one report.
    pub fn poll(&mut self) -> Tick {
        if self.state.halted {
            return Tick::Halted;
        }

        let trigger = self.trigger.is_active();
        let (state, action) = self.state.step(trigger);
        self.state = state;

        let played = action.map(|track| {
            let id = self.tracks.id(track);
            if let Err(err) = self.player.play(id) {
                warn!("Failed to send play {}: {}", id.get(), Debug2Format(&err));
            }
            self.sink.emit(&Diagnostic::Playing(track));
            id
        });

        match self.player.poll_event() {
            Ok(Some(event)) => {
                debug!("Player event: {}", event);
                self.state = self.state.observe(&event);
                self.sink.emit(&Diagnostic::Event(event));
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to read from player: {}", Debug2Format(&err)),
        }

        Tick::Running {
            state: self.state.playback,
            played,
        }
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}
