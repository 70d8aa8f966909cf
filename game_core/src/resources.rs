/// Round score and the best score across rounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub best: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously persisted best score
    pub fn with_best(best: u32) -> Self {
        Self { score: 0, best }
    }

    pub fn increment(&mut self) {
        self.score += 1;
        if self.score > self.best {
            self.best = self.score;
        }
    }

    /// Zero the round score, keeping the best
    pub fn reset_round(&mut self) {
        self.score = 0;
    }
}

/// What a finished round reports to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub best: u32,
    pub elapsed_ms: u64,
}

impl RoundSummary {
    /// Elapsed round time as `H:MM:SS`, whole seconds
    pub fn elapsed_display(&self) -> String {
        let secs = self.elapsed_ms / 1000;
        format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during one `Game::advance_to` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub scored: u32,
    pub round_over: Option<RoundSummary>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.scored = 0;
        self.round_over = None;
    }
}
