use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    grid::Grid,
    point::Point,
    score::Score,
    snake::Snake,
};

/// Body length of a freshly spawned snake (head plus one segment)
pub const INITIAL_LENGTH: usize = 2;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// The snake filled the board, nowhere left for an item
    BoardFull,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved, nothing else happened
    Continuing,
    /// The snake moved onto the item, grew and scored
    ItemEaten,
    /// This tick ended the game
    GameOver(EndReason),
    /// The game was already over; nothing moved
    Idle,
}

/// What a renderer should show in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Item,
    Head,
    Body,
}

/// One game: board, snake, item, score and the game-over flag.
///
/// `tick` is the only operation that moves the simulation forward; input
/// arrives through `change_direction` and `restart` between ticks.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    score: Score,
    end_reason: Option<EndReason>,
    /// Last item eaten with no free cell left; the next tick ends the game
    board_cleared: bool,
    ticks: u64,
    rng: StdRng,
}

impl GameSession {
    /// Start a game seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a game with a reproducible item sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Self::spawn_snake(&config);

        let mut session = Self {
            config,
            grid,
            snake,
            score: Score::new(),
            end_reason: None,
            board_cleared: false,
            ticks: 0,
            rng,
        };
        session.spawn_item()?;
        Ok(session)
    }

    /// Start a game from an explicit snake and item placement.
    ///
    /// Every segment and the item must be on the board, and the item must
    /// not sit under the snake.
    pub fn with_layout(
        config: GameConfig,
        snake: Snake,
        item: Point,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut grid = Grid::new(config.grid_width, config.grid_height);
        for segment in snake.body() {
            grid.cell_index(segment)?;
        }
        if snake.occupies(item) {
            return Err(GameError::InvalidConfig(format!(
                "item at ({}, {}) overlaps the snake",
                item.x, item.y
            )));
        }
        grid.place_item(item)?;

        Ok(Self {
            config,
            grid,
            snake,
            score: Score::new(),
            end_reason: None,
            board_cleared: false,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn spawn_snake(config: &GameConfig) -> Snake {
        let head = Point::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        Snake::new(head, Direction::Right, INITIAL_LENGTH)
    }

    /// Place the item on a random cell the snake did not touch this tick
    fn spawn_item(&mut self) -> Result<Point, GameError> {
        self.grid.clear_item();
        let snake = &self.snake;
        let vacated = snake.vacated();
        let item = self
            .grid
            .random_empty_cell(&mut self.rng, |p| snake.occupies(p) || vacated == Some(p))?;
        self.grid.place_item(item)?;
        debug!("item spawned at ({}, {})", item.x, item.y);
        Ok(item)
    }

    /// Forward a steering request to the snake. `None` is an unrecognized
    /// input and is ignored.
    pub fn change_direction(&mut self, requested: Option<Direction>) -> bool {
        self.snake.change_direction(requested)
    }

    /// Advance the game by one tick
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.is_game_over() {
            return Ok(TickOutcome::Idle);
        }
        if self.board_cleared {
            self.ticks += 1;
            return Ok(self.end(EndReason::BoardFull));
        }

        self.snake.advance();
        self.ticks += 1;
        let head = self.snake.head();

        if !self.grid.is_in_bounds(head) {
            return Ok(self.end(EndReason::Wall));
        }
        if self.snake.head_hits_body() {
            return Ok(self.end(EndReason::SelfCollision));
        }

        if self.grid.item() != Some(head) {
            return Ok(TickOutcome::Continuing);
        }

        self.snake.grow();
        self.score.award(self.config.points_per_item);
        info!(
            "item eaten at ({}, {}), length {}, score {}",
            head.x,
            head.y,
            self.snake.len(),
            self.score.total()
        );

        match self.spawn_item() {
            Ok(_) => {}
            Err(GameError::BoardFull) => {
                info!("no free cell left for an item");
                self.board_cleared = true;
            }
            Err(err) => return Err(err),
        }
        Ok(TickOutcome::ItemEaten)
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        info!(
            "game over ({:?}) after {} ticks, score {}",
            reason,
            self.ticks,
            self.score.total()
        );
        self.end_reason = Some(reason);
        TickOutcome::GameOver(reason)
    }

    /// Throw away the current game and start a fresh one with the same
    /// configuration
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.snake = Self::spawn_snake(&self.config);
        self.score.reset();
        self.end_reason = None;
        self.board_cleared = false;
        self.ticks = 0;
        self.spawn_item()?;
        info!("game restarted");
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn item(&self) -> Option<Point> {
        self.grid.item()
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_game_over(&self) -> bool {
        self.end_reason.is_some()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// What `p` should show. Points off the board are reported as empty.
    pub fn cell_view(&self, p: Point) -> CellView {
        if p == self.snake.head() {
            CellView::Head
        } else if self.snake.occupies(p) {
            CellView::Body
        } else if self.grid.item() == Some(p) {
            CellView::Item
        } else {
            CellView::Empty
        }
    }
}
