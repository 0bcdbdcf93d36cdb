use std::io::{Stderr, Write, stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use log::{info, warn};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::time::interval;

use crate::game::{GameConfig, GameSession, TickOutcome};
use crate::input::InputHandler;
use crate::metrics::RunStats;
use crate::modes::GameController;
use crate::render::{Renderer, TickObserver};

/// Render at 30 FPS (33ms per frame), independent of the tick rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Terminal-side reaction to ticks: run statistics and the bell cue
pub struct TerminalFeedback {
    stats: RunStats,
    sound: bool,
}

impl TerminalFeedback {
    pub fn new(sound: bool) -> Self {
        Self {
            stats: RunStats::new(),
            sound,
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Advance the displayed game clock
    pub fn refresh(&mut self) {
        self.stats.tick_clock();
    }

    fn ring_bell(&self) {
        if !self.sound {
            return;
        }
        let mut err = stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|_| err.flush()) {
            warn!("failed to ring terminal bell: {}", e);
        }
    }
}

impl TickObserver for TerminalFeedback {
    fn on_tick(&mut self, session: &GameSession, outcome: TickOutcome) {
        match outcome {
            TickOutcome::ItemEaten => {
                self.stats.record_item();
                self.ring_bell();
            }
            TickOutcome::GameOver(_) => self.stats.finish_game(session.score()),
            TickOutcome::Continuing | TickOutcome::Idle => {}
        }
    }

    fn on_restart(&mut self, _session: &GameSession) {
        self.stats.start_game();
    }
}

pub struct HumanMode {
    controller: GameController<TerminalFeedback>,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let tick_interval = config.tick_interval();
        let sound = config.sound;
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::new(config),
        }
        .context("Failed to start game session")?;

        Ok(Self {
            controller: GameController::new(session, TerminalFeedback::new(sound)),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "starting {}x{} game, tick {:?}",
            self.controller.session().width(),
            self.controller.session().height(),
            self.tick_interval
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, EventStream::new()).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Drive the session from `events` and the tick timer until quit.
    /// Ticks keep firing after the event stream closes.
    async fn run_game_loop<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut events: S,
    ) -> Result<()>
    where
        B: Backend,
        S: Stream<Item = std::io::Result<Event>> + Unpin,
    {
        let mut tick_timer = interval(self.tick_interval);
        let mut render_timer = interval(RENDER_INTERVAL);
        let mut events_open = true;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = events.next(), if events_open => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(e)) => warn!("terminal event error: {}", e),
                        None => {
                            warn!("terminal event stream closed");
                            events_open = false;
                        }
                    }
                }

                // Game logic tick; keeps firing after game over
                _ = tick_timer.tick() => {
                    self.controller.tick().context("Game tick failed")?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.controller.observer_mut().refresh();
                    let session = self.controller.session();
                    let stats = self.controller.observer().stats();
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, session, stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            if self.controller.apply(action).context("Failed to apply input")? {
                self.should_quit = true;
            }
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EndReason, Point, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(5)).unwrap();
        let session = mode.controller.session();
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(mode.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_config_fails() {
        assert!(HumanMode::new(GameConfig::new(1, 1), None).is_err());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(5)).unwrap();
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);

        mode.handle_event(Event::Key(release)).unwrap();
        assert!(!mode.should_quit);

        mode.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)))
            .unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_feedback_tracks_game_over() {
        let snake = Snake::new(Point::new(7, 4), Direction::Right, 2);
        let mut session = GameSession::with_layout(
            GameConfig::small(),
            snake,
            Point::new(0, 0),
            0,
        )
        .unwrap();
        let mut feedback = TerminalFeedback::new(false);

        let outcome = session.tick().unwrap();
        assert_eq!(outcome, TickOutcome::GameOver(EndReason::Wall));
        feedback.on_tick(&session, outcome);
        feedback.on_tick(&session, TickOutcome::Idle);

        assert_eq!(feedback.stats().games_played(), 1);
        assert!(!feedback.stats().is_game_running());
    }

    fn press(c: char) -> std::io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_loop_ticks_and_steers() {
        use futures::channel::mpsc;
        use ratatui::backend::TestBackend;
        use tokio::time::sleep;

        let config = GameConfig {
            tick_interval_ms: 100,
            sound: false,
            ..GameConfig::new(20, 20)
        };
        let mut mode = HumanMode::new(config, Some(1)).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let (tx, rx) = mpsc::unbounded();

        // ticks fire at 0, 100, 200 and 300ms
        let keys = async move {
            sleep(Duration::from_millis(150)).await;
            tx.unbounded_send(press('w')).unwrap();
            sleep(Duration::from_millis(200)).await;
            tx.unbounded_send(press('q')).unwrap();
        };
        let (result, ()) = tokio::join!(mode.run_game_loop(&mut terminal, rx), keys);
        result.unwrap();

        let session = mode.controller.session();
        assert!(mode.should_quit);
        assert_eq!(session.ticks(), 4);
        // two steps right from (10, 10), then two up
        assert_eq!(session.head(), Point::new(12, 8));
        assert_eq!(session.snake().heading(), Direction::Up);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_loop_survives_closed_event_stream() {
        use ratatui::backend::TestBackend;
        use tokio::time::timeout;

        let config = GameConfig {
            tick_interval_ms: 100,
            sound: false,
            ..GameConfig::new(20, 20)
        };
        let mut mode = HumanMode::new(config, Some(1)).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        // no input ever arrives; the timer alone drives the snake into the wall
        let events = futures::stream::empty::<std::io::Result<Event>>();
        let run = mode.run_game_loop(&mut terminal, events);
        assert!(timeout(Duration::from_millis(2_000), run).await.is_err());

        let session = mode.controller.session();
        assert_eq!(session.end_reason(), Some(EndReason::Wall));
        // nine steps reach x = 19, the tenth leaves the board
        assert_eq!(session.ticks(), 10);
        assert_eq!(session.head(), Point::new(20, 10));
    }
}
