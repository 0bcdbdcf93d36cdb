use std::time::{Duration, Instant};

/// Statistics for one run of the program, across restarts
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Set while a game is in progress
    started: Option<Instant>,
    elapsed: Duration,
    best_score: u32,
    games_played: u32,
    items_this_game: u32,
    items_total: u32,
}

impl RunStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            started: Some(now),
            elapsed: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            items_this_game: 0,
            items_total: 0,
        }
    }

    /// A new game began; the clock and per-game count start over
    pub fn start_game(&mut self) {
        self.start_game_at(Instant::now());
    }

    fn start_game_at(&mut self, now: Instant) {
        self.started = Some(now);
        self.elapsed = Duration::ZERO;
        self.items_this_game = 0;
    }

    pub fn record_item(&mut self) {
        self.items_this_game = self.items_this_game.saturating_add(1);
        self.items_total = self.items_total.saturating_add(1);
    }

    /// Close out the current game. A second call for the same game is ignored.
    pub fn finish_game(&mut self, final_score: u32) {
        self.finish_game_at(final_score, Instant::now());
    }

    fn finish_game_at(&mut self, final_score: u32, now: Instant) {
        let Some(started) = self.started.take() else {
            return;
        };
        self.elapsed = now.saturating_duration_since(started);
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Bring the displayed clock up to date. Frozen between games.
    pub fn tick_clock(&mut self) {
        self.tick_clock_at(Instant::now());
    }

    fn tick_clock_at(&mut self, now: Instant) {
        if let Some(started) = self.started {
            self.elapsed = now.saturating_duration_since(started);
        }
    }

    pub fn is_game_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn items_this_game(&self) -> u32 {
        self.items_this_game
    }

    pub fn items_total(&self) -> u32 {
        self.items_total
    }

    /// `MM:SS`, or `H:MM:SS` past the hour
    pub fn format_elapsed(&self) -> String {
        let secs = self.elapsed.as_secs();
        let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
