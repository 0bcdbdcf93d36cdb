use log::debug;

use crate::game::{GameError, GameSession, TickOutcome};
use crate::input::KeyAction;
use crate::render::TickObserver;

/// Owns a session and routes ticks and input into it.
///
/// The timer keeps firing after game over; those ticks come back as
/// [`TickOutcome::Idle`] until a restart.
pub struct GameController<O: TickObserver> {
    session: GameSession,
    observer: O,
}

impl<O: TickObserver> GameController<O> {
    pub fn new(session: GameSession, observer: O) -> Self {
        Self { session, observer }
    }

    /// Run one engine tick and report it to the observer
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        let outcome = self.session.tick()?;
        self.observer.on_tick(&self.session, outcome);
        Ok(outcome)
    }

    /// Apply one input action. Returns true when the caller should quit.
    pub fn apply(&mut self, action: KeyAction) -> Result<bool, GameError> {
        match action {
            KeyAction::Steer(direction) => {
                if !self.session.change_direction(Some(direction)) {
                    debug!("ignored steer {:?}", direction);
                }
            }
            KeyAction::Restart => {
                self.session.restart()?;
                self.observer.on_restart(&self.session);
            }
            KeyAction::Quit => return Ok(true),
            KeyAction::None => {}
        }
        Ok(false)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EndReason, GameConfig, Point, Snake};

    #[derive(Default)]
    struct Recorder {
        outcomes: Vec<TickOutcome>,
        scores: Vec<u32>,
        restarts: usize,
    }

    impl TickObserver for Recorder {
        fn on_tick(&mut self, session: &GameSession, outcome: TickOutcome) {
            self.outcomes.push(outcome);
            self.scores.push(session.score());
        }

        fn on_restart(&mut self, _session: &GameSession) {
            self.restarts += 1;
        }
    }

    fn controller_at(head: Point, item: Point) -> GameController<Recorder> {
        let snake = Snake::new(head, Direction::Right, 2);
        let session = GameSession::with_layout(GameConfig::small(), snake, item, 0).unwrap();
        GameController::new(session, Recorder::default())
    }

    #[test]
    fn test_outcomes_reach_observer() {
        let mut controller = controller_at(Point::new(5, 4), Point::new(6, 4));

        assert_eq!(controller.tick(), Ok(TickOutcome::ItemEaten));
        assert_eq!(controller.observer().outcomes, vec![TickOutcome::ItemEaten]);
        assert_eq!(controller.observer().scores, vec![10]);
    }

    #[test]
    fn test_steering_latch_through_controller() {
        let mut controller = controller_at(Point::new(2, 4), Point::new(0, 0));

        controller.apply(KeyAction::Steer(Direction::Up)).unwrap();
        controller.apply(KeyAction::Steer(Direction::Right)).unwrap();
        controller.tick().unwrap();

        assert_eq!(controller.session().snake().heading(), Direction::Up);
        assert_eq!(controller.session().head(), Point::new(2, 3));
    }

    #[test]
    fn test_timer_keeps_running_after_game_over() {
        let mut controller = controller_at(Point::new(7, 4), Point::new(0, 0));

        assert_eq!(
            controller.tick(),
            Ok(TickOutcome::GameOver(EndReason::Wall))
        );
        assert_eq!(controller.tick(), Ok(TickOutcome::Idle));
        assert_eq!(controller.tick(), Ok(TickOutcome::Idle));
        assert_eq!(controller.observer().outcomes.len(), 3);

        assert!(!controller.apply(KeyAction::Restart).unwrap());
        assert_eq!(controller.observer().restarts, 1);
        assert!(!controller.session().is_game_over());
        assert_eq!(controller.session().score(), 0);
        assert_eq!(controller.session().snake().len(), 2);
    }

    #[test]
    fn test_quit_and_noop_actions() {
        let mut controller = controller_at(Point::new(2, 4), Point::new(0, 0));

        assert!(!controller.apply(KeyAction::None).unwrap());
        assert!(controller.apply(KeyAction::Quit).unwrap());
        assert!(controller.observer().outcomes.is_empty());
    }
}
