use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use sequencer::{
    Diagnostic, Player, PlayerEvent, Sequencer, SequencerConfig, Tick, TrackId, TriggerInput,
    Volume,
};

#[derive(Args)]
#[command(about = "Run the sequencer against a simulated module")]
pub struct SimulateCommand {
    /// Trigger pattern, one character per tick: `x` is active, anything else inactive
    #[arg(long, default_value = "")]
    pub trigger: String,
    /// Number of ticks to run
    #[arg(long, default_value_t = 40)]
    pub ticks: usize,
    /// Ticks a track plays before the module reports it finished
    #[arg(long, default_value_t = 5)]
    pub track_length: usize,
    /// Simulate a module that never answers the handshake
    #[arg(long)]
    pub fail_handshake: bool,
    /// Delay between ticks in milliseconds
    #[arg(long, default_value_t = 0)]
    pub tick_ms: u64,
    /// JSON config file, defaults apply to missing fields
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SimulateCommand {
    pub async fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        use comfy_table::{Table, presets::UTF8_FULL};

        let config = match &self.config {
            Some(path) => serde_json::from_slice(&std::fs::read(path)?)?,
            None => SequencerConfig::default(),
        };

        let module = SimulatedModule::new(!self.fail_handshake, self.track_length);
        let trigger = Pattern::new(&self.trigger);
        let (tx, rx) = mpsc::channel();
        let sink = move |diagnostic: &Diagnostic| {
            let _ = tx.send(diagnostic.to_string());
        };

        let mut sequencer = Sequencer::start(&config, module, trigger, sink);

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Tick", "Trigger", "State", "Play", "Event"]);

        for tick in 1..=self.ticks {
            let triggered = trigger_char(&self.trigger, tick - 1);
            match sequencer.poll() {
                Tick::Halted => {
                    table.add_row(vec![tick.to_string(), triggered, "halted".into()]);
                    break;
                }
                Tick::Running { state, played } => {
                    let event = sequencer.player().last_event.map(|event| event.to_string());
                    table.add_row(vec![
                        tick.to_string(),
                        triggered,
                        format!("{state:?}"),
                        played.map(|id| id.to_string()).unwrap_or_default(),
                        event.unwrap_or_default(),
                    ]);
                }
            }

            if self.tick_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.tick_ms)).await;
            }
        }

        println!("{}", table);
        if let Some(volume) = sequencer.player().volume {
            println!("Module volume: {}", volume.get());
        }

        drop(sequencer);
        println!("Console:");
        for line in rx.try_iter() {
            println!("  {}", line.replace('\n', "\n  "));
        }

        Ok(())
    }
}

fn trigger_char(pattern: &str, index: usize) -> String {
    match pattern.chars().nth(index) {
        Some('x') => "x".into(),
        _ => String::new(),
    }
}

struct Pattern {
    ticks: Vec<bool>,
    position: usize,
}

impl Pattern {
    fn new(pattern: &str) -> Self {
        Self {
            ticks: pattern.chars().map(|c| c == 'x').collect(),
            position: 0,
        }
    }
}

impl TriggerInput for Pattern {
    fn is_active(&mut self) -> bool {
        let active = self.ticks.get(self.position).copied().unwrap_or(false);
        self.position += 1;
        active
    }
}

/// Module stand-in that finishes every track after a fixed number of polls.
struct SimulatedModule {
    reachable: bool,
    track_length: usize,
    playing: Option<(TrackId, usize)>,
    volume: Option<Volume>,
    last_event: Option<PlayerEvent>,
}

impl SimulatedModule {
    fn new(reachable: bool, track_length: usize) -> Self {
        Self {
            reachable,
            track_length,
            playing: None,
            volume: None,
            last_event: None,
        }
    }
}

#[derive(Debug)]
struct NoAnswer;

impl Player for SimulatedModule {
    type Error = NoAnswer;

    fn begin(&mut self) -> Result<(), Self::Error> {
        if self.reachable { Ok(()) } else { Err(NoAnswer) }
    }

    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.volume = Some(volume);
        Ok(())
    }

    fn play(&mut self, track: TrackId) -> Result<(), Self::Error> {
        self.playing = Some((track, 0));
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<PlayerEvent>, Self::Error> {
        self.last_event = match self.playing {
            Some((track, elapsed)) if elapsed >= self.track_length => {
                self.playing = None;
                Some(PlayerEvent::PlaybackFinished { track: track.get() })
            }
            Some((track, elapsed)) => {
                self.playing = Some((track, elapsed + 1));
                None
            }
            None => None,
        };
        Ok(self.last_event)
    }
}
