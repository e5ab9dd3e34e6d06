use crate::event::PlayerEvent;
use crate::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    #[default]
    Idle,
    PlayingPrimaryTrack,
    WaitingForTrigger,
    PlayingTriggeredTrack,
    WaitingForTriggeredTrackToFinish,
    PlayingResumeTrack,
    WaitingForResumeTrackToFinish,
}

impl PlaybackState {
    pub const ALL: [PlaybackState; 7] = [
        PlaybackState::Idle,
        PlaybackState::PlayingPrimaryTrack,
        PlaybackState::WaitingForTrigger,
        PlaybackState::PlayingTriggeredTrack,
        PlaybackState::WaitingForTriggeredTrackToFinish,
        PlaybackState::PlayingResumeTrack,
        PlaybackState::WaitingForResumeTrackToFinish,
    ];

    pub fn next(self, trigger: bool, in_flight: bool) -> Self {
        use PlaybackState::*;

        match self {
            Idle => PlayingPrimaryTrack,
            PlayingPrimaryTrack => WaitingForTrigger,
            WaitingForTrigger if trigger => PlayingTriggeredTrack,
            WaitingForTrigger if !in_flight => PlayingPrimaryTrack,
            WaitingForTrigger => WaitingForTrigger,
            PlayingTriggeredTrack => WaitingForTriggeredTrackToFinish,
            WaitingForTriggeredTrackToFinish if !in_flight => PlayingResumeTrack,
            WaitingForTriggeredTrackToFinish => WaitingForTriggeredTrackToFinish,
            PlayingResumeTrack => WaitingForResumeTrackToFinish,
            WaitingForResumeTrackToFinish if !in_flight => PlayingResumeTrack,
            WaitingForResumeTrackToFinish => WaitingForResumeTrackToFinish,
        }
    }

    /// Track to start on entering this state.
    pub fn action(self) -> Option<Track> {
        match self {
            PlaybackState::PlayingPrimaryTrack => Some(Track::Primary),
            PlaybackState::PlayingTriggeredTrack => Some(Track::Triggered),
            PlaybackState::PlayingResumeTrack => Some(Track::ResumeRoom),
            _ => None,
        }
    }
}

/// Everything the sequencer remembers between ticks. Lives only in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerState {
    pub playback: PlaybackState,
    /// Set when a play command goes out, cleared by a finished event.
    pub in_flight: bool,
    pub current_track: Option<Track>,
    pub halted: bool,
}

impl SequencerState {
    pub fn halted() -> Self {
        Self {
            halted: true,
            ..Self::default()
        }
    }

    /// Runs one transition followed by the action of the state entered.
    pub fn step(self, trigger: bool) -> (Self, Option<Track>) {
        if self.halted {
            return (self, None);
        }

        let playback = self.playback.next(trigger, self.in_flight);
        let mut state = Self { playback, ..self };

        let action = playback.action();
        if let Some(track) = action {
            state.in_flight = true;
            state.current_track = Some(track);
        }

        (state, action)
    }

    /// Any finished report clears in-flight, whichever file it names.
    pub fn observe(self, event: &PlayerEvent) -> Self {
        if event.is_finished() {
            Self {
                in_flight: false,
                ..self
            }
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlaybackState::*;
    use super::*;

    #[test]
    fn test_transition_table() {
        // Columns are (trigger, in_flight): (false, false), (false, true),
        // (true, false), (true, true).
        let table = [
            (Idle, [PlayingPrimaryTrack; 4]),
            (PlayingPrimaryTrack, [WaitingForTrigger; 4]),
            (
                WaitingForTrigger,
                [
                    PlayingPrimaryTrack,
                    WaitingForTrigger,
                    PlayingTriggeredTrack,
                    PlayingTriggeredTrack,
                ],
            ),
            (PlayingTriggeredTrack, [WaitingForTriggeredTrackToFinish; 4]),
            (
                WaitingForTriggeredTrackToFinish,
                [
                    PlayingResumeTrack,
                    WaitingForTriggeredTrackToFinish,
                    PlayingResumeTrack,
                    WaitingForTriggeredTrackToFinish,
                ],
            ),
            (PlayingResumeTrack, [WaitingForResumeTrackToFinish; 4]),
            (
                WaitingForResumeTrackToFinish,
                [
                    PlayingResumeTrack,
                    WaitingForResumeTrackToFinish,
                    PlayingResumeTrack,
                    WaitingForResumeTrackToFinish,
                ],
            ),
        ];

        assert!(PlaybackState::ALL
            .iter()
            .all(|state| table.iter().any(|(from, _)| from == state)));

        let inputs = [(false, false), (false, true), (true, false), (true, true)];
        for (from, successors) in table {
            for ((trigger, in_flight), expected) in inputs.into_iter().zip(successors) {
                assert_eq!(
                    from.next(trigger, in_flight),
                    expected,
                    "{from:?} trigger={trigger} in_flight={in_flight}"
                );
            }
        }
    }

    #[test]
    fn test_only_playing_states_have_actions() {
        assert_eq!(PlayingPrimaryTrack.action(), Some(Track::Primary));
        assert_eq!(PlayingTriggeredTrack.action(), Some(Track::Triggered));
        assert_eq!(PlayingResumeTrack.action(), Some(Track::ResumeRoom));
        for state in [
            Idle,
            WaitingForTrigger,
            WaitingForTriggeredTrackToFinish,
            WaitingForResumeTrackToFinish,
        ] {
            assert_eq!(state.action(), None);
        }
    }

    #[test]
    fn test_step_sets_in_flight_on_play() {
        let (state, action) = SequencerState::default().step(false);
        assert_eq!(action, Some(Track::Primary));
        assert!(state.in_flight);
        assert_eq!(state.current_track, Some(Track::Primary));
        assert_eq!(state.playback, PlayingPrimaryTrack);
    }

    #[test]
    fn test_only_finished_events_clear_in_flight() {
        let (state, _) = SequencerState::default().step(false);

        let state = state.observe(&PlayerEvent::CardRemoved);
        assert!(state.in_flight);

        let state = state.observe(&PlayerEvent::PlaybackFinished { track: 42 });
        assert!(!state.in_flight);
    }

    #[test]
    fn test_halted_state_never_acts() {
        let (state, action) = SequencerState::halted().step(true);
        assert_eq!(action, None);
        assert_eq!(state, SequencerState::halted());
    }
}
