use std::cell::Cell;
use std::time::{Duration, Instant};

use game_core::*;
use tracing::{debug, info};

use crate::pilot::Autopilot;

// Abstract environment (clock)
pub trait Environment {
    fn now(&self) -> u64; // ms
    fn sleep(&self, ms: u64);
}

/// Wall-clock time
pub struct RealTime {
    origin: Instant,
}

impl RealTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for RealTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for RealTime {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Simulated time that jumps ahead instead of sleeping
#[derive(Default)]
pub struct FastForward {
    now: Cell<u64>,
}

impl FastForward {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for FastForward {
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn sleep(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The bird died
    Finished(RoundSummary),
    /// The round hit the time limit and was stopped
    TimedOut { score: u32, elapsed_ms: u64 },
}

impl RoundOutcome {
    pub fn score(&self) -> u32 {
        match self {
            RoundOutcome::Finished(summary) => summary.score,
            RoundOutcome::TimedOut { score, .. } => *score,
        }
    }
}

/// Plays rounds of a headless game against an environment clock
pub struct Session {
    pub env: Box<dyn Environment>,
    pub game: Game,
    pub pilot: Option<Autopilot>,
    pub frame_ms: u64,
    pub rounds_played: u32,
}

impl Session {
    pub fn new(env: Box<dyn Environment>, game: Game) -> Self {
        Self {
            env,
            game,
            pilot: None,
            frame_ms: 16, // ~60 Hz
            rounds_played: 0,
        }
    }

    pub fn with_pilot(mut self, pilot: Autopilot) -> Self {
        self.pilot = Some(pilot);
        self
    }

    /// Play one round until the bird dies or `max_round_ms` passes
    pub fn play_round(&mut self, max_round_ms: u64) -> RoundOutcome {
        if !self.game.start() {
            self.game.stop();
            self.game.start();
        }
        self.rounds_played += 1;

        let env_origin = self.env.now();
        let game_origin = self.game.now();
        let mut frames: u64 = 0;

        loop {
            self.env.sleep(self.frame_ms);
            frames += 1;
            let elapsed = self.env.now().saturating_sub(env_origin);

            let events = self.game.advance_to(game_origin + elapsed).clone();
            if events.scored > 0 {
                debug!("round {}: score {}", self.rounds_played, self.game.score().score);
            }
            if let Some(summary) = events.round_over {
                info!(
                    "round {} finished after {} frames: score {}, best {}, time {}",
                    self.rounds_played,
                    frames,
                    summary.score,
                    summary.best,
                    summary.elapsed_display()
                );
                return RoundOutcome::Finished(summary);
            }

            if elapsed >= max_round_ms {
                self.game.stop();
                let score = self.game.score().score;
                info!(
                    "round {} stopped at the {}ms limit with score {}",
                    self.rounds_played, max_round_ms, score
                );
                return RoundOutcome::TimedOut {
                    score,
                    elapsed_ms: elapsed,
                };
            }

            if self
                .pilot
                .as_ref()
                .is_some_and(|pilot| pilot.should_jump(&self.game))
            {
                self.game.jump();
            }
        }
    }
}

/// Window size from the command line, then settings, then the default
pub fn resolve_playfield(
    width: Option<u32>,
    height: Option<u32>,
    settings: Option<(u32, u32)>,
) -> (u32, u32) {
    let (fallback_w, fallback_h) =
        settings.unwrap_or((Params::DEFAULT_WIDTH, Params::DEFAULT_HEIGHT));
    (width.unwrap_or(fallback_w), height.unwrap_or(fallback_h))
}
