use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::debug;
use crate::frames::Page;
use crate::simulator::{Outcome, SimulationResult};

/// The interval between steps when playing automatically
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(700);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlaybackState {
    /// Nothing revealed yet, or reset
    Idle,
    Playing,
    Paused,
    /// Every step has been revealed
    Finished,
}

/// A playback control, typed one per line at the terminal
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Step,
    TogglePlay,
    Reset,
    Quit,
}

impl Command {
    /// An empty line steps, anything unrecognised is None
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "step" | "n" | "next" => Some(Command::Step),
            "p" | "play" | "pause" => Some(Command::TogglePlay),
            "r" | "reset" => Some(Command::Reset),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// A single revealed step, with everything needed to draw it
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StepView {
    pub index: usize,
    pub reference: Page,
    pub outcome: Outcome,
    pub frames: Vec<Option<Page>>,
    /// The one slot to draw attention to, see [`changed_slot`]
    pub highlighted_slot: Option<usize>,
    pub hits_so_far: u64,
    pub faults_so_far: u64,
}

/// Display state for revealing a finished simulation one step at a time
///
/// The session only borrows the result, playback never simulates anything. Manual stepping and
/// automatic playback both go through [`PlaybackSession::advance`]
pub struct PlaybackSession<'a> {
    result: &'a SimulationResult,
    cursor: usize,
    hits: u64,
    faults: u64,
    state: PlaybackState,
}

impl<'a> PlaybackSession<'a> {
    /// Starts a session with no steps revealed
    pub fn start(result: &'a SimulationResult) -> Self {
        Self {
            result,
            cursor: 0,
            hits: 0,
            faults: 0,
            state: PlaybackState::Idle,
        }
    }

    pub fn result(&self) -> &'a SimulationResult {
        self.result
    }

    /// The number of steps revealed so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn faults(&self) -> u64 {
        self.faults
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.result.len()
    }

    /// Reveals the next step
    ///
    /// returns: Option<StepView>, None once every step has been revealed
    pub fn advance(&mut self) -> Option<StepView> {
        let Some(step) = self.result.steps.get(self.cursor) else {
            self.state = PlaybackState::Finished;
            return None;
        };
        match step.outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Fault => self.faults += 1,
        }
        let view = StepView {
            index: self.cursor,
            reference: step.reference,
            outcome: step.outcome,
            frames: step.frames.clone(),
            highlighted_slot: changed_slot(self.result, self.cursor),
            hits_so_far: self.hits,
            faults_so_far: self.faults,
        };
        self.cursor += 1;
        if self.is_at_end() {
            self.state = PlaybackState::Finished;
        }
        Some(view)
    }

    /// Manual step. Stepping past the end starts again from the first step
    pub fn step(&mut self) -> Option<StepView> {
        if self.is_at_end() {
            self.rewind();
        }
        self.advance()
    }

    /// Hides every step and clears the counters
    pub fn reset(&mut self) {
        self.rewind();
        self.state = PlaybackState::Idle;
    }

    /// Starts playing, from the beginning if everything was already revealed
    pub fn play(&mut self) {
        if self.is_at_end() {
            self.rewind();
        }
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Switches between playing and paused, returning the new state
    pub fn toggle_play(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
        self.state
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.hits = 0;
        self.faults = 0;
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Idle;
        }
    }
}

/// Works out which slot changed (or was accessed) at a step, for highlighting
///
/// On a hit this is the slot holding the referenced page. On a fault it is the replaced slot when
/// there was an eviction, otherwise the first slot which differs from the previous step, or the
/// first occupied slot for the very first step
pub fn changed_slot(result: &SimulationResult, index: usize) -> Option<usize> {
    let step = result.steps.get(index)?;
    match step.outcome {
        Outcome::Hit => step.frames.iter().position(|f| *f == Some(step.reference)),
        Outcome::Fault => step.replaced_slot.or_else(|| {
            match index.checked_sub(1).and_then(|previous| result.steps.get(previous)) {
                Some(previous) => step
                    .frames
                    .iter()
                    .zip(&previous.frames)
                    .position(|(now, before)| now != before),
                None => step.frames.iter().position(Option::is_some),
            }
        }),
    }
}

/// Something which waits out the time between two automatically played steps
pub trait Ticker {
    fn tick(&mut self);
}

/// Waits a fixed interval on the current thread
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) {
        thread::sleep(self.interval);
    }
}

/// Plays a session automatically, one step per tick
///
/// Each revealed step is handed to the sink. Returning `ControlFlow::Break` pauses the session,
/// which can later be resumed with another call
///
/// # Arguments
///
/// * `session`: The session to play, started from the beginning if it is already at the end
/// * `ticker`: Waits between steps
/// * `sink`: Receives each revealed step
///
/// returns: usize, the number of steps revealed by this call
pub fn autoplay<T, F>(session: &mut PlaybackSession, ticker: &mut T, mut sink: F) -> usize
where
    T: Ticker,
    F: FnMut(&StepView) -> ControlFlow<()>,
{
    session.play();
    let mut revealed = 0;
    while session.state() == PlaybackState::Playing {
        ticker.tick();
        let Some(view) = session.advance() else {
            break;
        };
        revealed += 1;
        if sink(&view).is_break() {
            session.pause();
        }
    }
    debug!(revealed, state = ?session.state(), "Playback stopped");
    revealed
}

/// Runs a session from a stream of commands until `Quit` arrives or the stream ends
///
/// Any command received while playing pauses the session. A reset or quit received that way is
/// then carried out, a step or play/pause only pauses.
///
/// # Arguments
///
/// * `session`: The session to control
/// * `ticker`: Waits between steps while playing
/// * `commands`: Commands in the order they were entered
/// * `redraw`: Called with the number of revealed steps after every change
pub fn drive<T, D>(session: &mut PlaybackSession, ticker: &mut T, commands: &Receiver<Command>, mut redraw: D)
where
    T: Ticker,
    D: FnMut(usize),
{
    let mut pending = None;
    loop {
        let command = match pending.take() {
            Some(command) => command,
            None => match commands.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };
        debug!(?command, state = ?session.state(), cursor = session.cursor(), "Playback command");
        match command {
            Command::Step => {
                session.step();
                redraw(session.cursor());
            }
            Command::Reset => {
                session.reset();
                redraw(0);
            }
            Command::Quit => break,
            Command::TogglePlay => {
                let restarting = session.is_at_end();
                if session.toggle_play() != PlaybackState::Playing {
                    continue;
                }
                if restarting {
                    redraw(0);
                }
                autoplay(session, ticker, |view| {
                    redraw(view.index + 1);
                    match commands.try_recv() {
                        Ok(Command::Step | Command::TogglePlay) => ControlFlow::Break(()),
                        Ok(command) => {
                            pending = Some(command);
                            ControlFlow::Break(())
                        }
                        // Input closing while playing lets the playback run out
                        Err(TryRecvError::Empty | TryRecvError::Disconnected) => ControlFlow::Continue(()),
                    }
                });
            }
        }
    }
}
