use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::Config;
use crate::resources::{Events, GameRng, RoundSummary, ScoreBoard};
use crate::scene::{Scene, Surface};
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::systems::{Bird, Fall, Jump, Scroll, Tubes};

/// The bird and tube stream of one round
#[derive(Debug)]
struct Round {
    bird: Bird,
    tubes: Tubes,
}

/// Owns every component of the game and drives them off the scheduler
pub struct Game<S: Surface = Scene> {
    config: Config,
    scene: S,
    scheduler: Scheduler,
    timers: HashMap<Task, TimerId>,
    rng: GameRng,
    scroll: Scroll,
    round: Option<Round>,
    score: ScoreBoard,
    events: Events,
    active: bool,
    started_at: u64,
}

impl Game<Scene> {
    /// A game drawing into an in-process scene
    pub fn headless(config: Config, seed: u64) -> Self {
        Self::new(config, Scene::new(), seed)
    }
}

impl<S: Surface> Game<S> {
    pub fn new(config: Config, scene: S, seed: u64) -> Self {
        let scroll = Scroll::new(&config);
        Self {
            config,
            scene,
            scheduler: Scheduler::new(),
            timers: HashMap::new(),
            rng: GameRng::new(seed),
            scroll,
            round: None,
            score: ScoreBoard::new(),
            events: Events::new(),
            active: false,
            started_at: 0,
        }
    }

    /// Seed the best score, usually from disk
    pub fn with_best(mut self, best: u32) -> Self {
        self.score = ScoreBoard::with_best(best);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn bird(&self) -> Option<&Bird> {
        self.round.as_ref().map(|round| &round.bird)
    }

    pub fn tubes(&self) -> Option<&Tubes> {
        self.round.as_ref().map(|round| &round.tubes)
    }

    pub fn scroll(&self) -> &Scroll {
        &self.scroll
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Begin a new round. Returns false if one is already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }

        self.cancel_timers();
        self.events.clear();
        self.score.reset_round();
        self.started_at = self.scheduler.now();

        if let Some(mut previous) = self.round.take() {
            previous.tubes.clear(&mut self.scene);
        }
        // Wipes the previous round's bird along with the background
        self.scene.reset();
        self.scroll.reset(&mut self.scene);
        if self.config.background_animation {
            self.schedule(Task::Scroll, 0);
        } else {
            self.scroll.stop();
        }

        let mut bird = Bird::spawn(&mut self.scene, &self.config);
        let tubes = Tubes::new(&self.config, bird.profile());
        bird.start();
        self.round = Some(Round { bird, tubes });
        self.active = true;

        self.schedule(Task::BirdFall, 0);
        self.schedule(Task::Tubes, 0);

        info!(
            "round started at {}ms on a {}x{} playfield (best {})",
            self.started_at, self.config.width, self.config.height, self.score.best
        );
        true
    }

    /// Player input
    pub fn jump(&mut self) -> Jump {
        let Some(round) = self.round.as_mut() else {
            return Jump::Ignored;
        };
        let result = round.bird.jump(&mut self.scene);
        if result == Jump::Started && !self.scheduler.pending(Task::BirdAscend) {
            self.schedule(Task::BirdAscend, self.config.ascent_step_ms);
        }
        result
    }

    /// Halt the round without reporting it as finished
    pub fn stop(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.bird.kill();
            round.tubes.stop();
        }
        self.scroll.stop();
        self.cancel_timers();
        self.active = false;
    }

    /// Run every task due up to `now_ms` and report what happened
    pub fn advance_to(&mut self, now_ms: u64) -> &Events {
        self.events.clear();
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            self.timers.remove(&task);
            self.dispatch(task);
        }
        self.scheduler.advance(now_ms);
        &self.events
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::Scroll => {
                if self.scroll.tick(&mut self.scene) {
                    self.schedule(Task::Scroll, self.config.scroll_interval_ms);
                }
            }
            Task::BirdFall => {
                let Some(round) = self.round.as_mut() else {
                    return;
                };
                match round.bird.fall_tick(&mut self.scene) {
                    Fall::Continue => self.schedule(Task::BirdFall, self.config.fall_interval_ms),
                    Fall::Died => self.on_death(),
                    Fall::Halted => {}
                }
            }
            Task::BirdAscend => {
                let Some(round) = self.round.as_mut() else {
                    return;
                };
                if round.bird.ascend_tick(&mut self.scene) {
                    self.schedule(Task::BirdAscend, self.config.ascent_step_ms);
                }
            }
            Task::Tubes => {
                let Some(round) = self.round.as_mut() else {
                    return;
                };
                let tick = round.tubes.tick(&mut self.scene, &mut self.rng);
                for _ in 0..tick.scored {
                    self.score.increment();
                    self.events.scored += 1;
                    debug!("score {} (best {})", self.score.score, self.score.best);
                }
                if tick.running {
                    self.schedule(Task::Tubes, self.config.tube_interval_ms);
                }
            }
        }
    }

    fn on_death(&mut self) {
        let elapsed_ms = self.scheduler.now().saturating_sub(self.started_at);
        self.scroll.stop();
        if let Some(round) = self.round.as_mut() {
            round.tubes.stop();
        }
        self.cancel_timers();
        self.active = false;

        let summary = RoundSummary {
            score: self.score.score,
            best: self.score.best,
            elapsed_ms,
        };
        info!(
            "round over: score {} best {} time {}",
            summary.score,
            summary.best,
            summary.elapsed_display()
        );
        self.events.round_over = Some(summary);
    }

    fn schedule(&mut self, task: Task, delay_ms: u64) {
        let id = self.scheduler.schedule(task, delay_ms);
        if let Some(previous) = self.timers.insert(task, id) {
            self.scheduler.cancel(previous);
        }
    }

    fn cancel_timers(&mut self) {
        self.timers.clear();
        self.scheduler.cancel_all();
    }
}
