use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    action::Direction,
    board::Board,
    config::GameConfig,
    error::GameError,
    spawn::{CellSource, RandomCells, random_free_cell},
    state::{Advance, Apple, CollisionType, GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether a pending turn was applied
    pub turned: bool,
    /// Score of the run that a collision just ended
    pub ended_run: Option<u32>,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Owns the board geometry and the apple's random source, and drives
/// [`GameState`] one tick at a time
pub struct GameEngine<S = RandomCells<StdRng>> {
    config: GameConfig,
    board: Board,
    cells: S,
}

impl GameEngine {
    /// Engine whose apple placement is seeded from OS entropy
    pub fn new(config: GameConfig) -> Self {
        Self::with_source(config, RandomCells::new(StdRng::from_entropy()))
    }

    /// Engine with reproducible apple placement
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_source(config, RandomCells::new(StdRng::seed_from_u64(seed)))
    }
}

impl<S: CellSource> GameEngine<S> {
    pub fn with_source(config: GameConfig, cells: S) -> Self {
        let board = config.board();
        Self {
            config,
            board,
            cells,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Start a game: a one-cell snake in the middle and an apple somewhere free
    pub fn new_game(&mut self) -> Result<GameState, GameError> {
        let snake = Snake::new(self.board.center());
        let apple = self.place_apple(&snake)?;
        Ok(GameState::new(snake, Apple::new(apple)))
    }

    /// Queue a turn for the next tick
    pub fn request(&self, state: &mut GameState, direction: Direction) {
        state.snake.request_direction(direction);
    }

    /// Execute one tick: commit the turn, move, resolve collisions and the apple
    pub fn step(&mut self, state: &mut GameState) -> Result<StepResult, GameError> {
        state.ticks += 1;
        let turned = state.snake.commit_direction();

        let collision_type = match state.snake.advance(&self.board, self.config.topology) {
            Advance::Moved => None,
            Advance::HitWall => Some(CollisionType::Wall),
            Advance::HitSelf => Some(CollisionType::SelfCollision),
        };

        if let Some(collision_type) = collision_type {
            let ended_run = state.score;
            // A wall reset leaves a still-valid apple where it is.
            let relocate = collision_type == CollisionType::SelfCollision
                || state.apple.position == self.board.center();
            self.reset(state, relocate)?;
            info!(?collision_type, score = ended_run, tick = state.ticks, "snake reset");

            return Ok(StepResult {
                turned,
                ended_run: Some(ended_run),
                info: StepInfo {
                    ate_apple: false,
                    collision_type: Some(collision_type),
                },
            });
        }

        let ate_apple = state.snake.head() == state.apple.position;
        if ate_apple {
            state.snake.grow();
            state.score += 1;
            state.apple.position = self.place_apple(&state.snake)?;
            debug!(
                length = state.snake.len(),
                apple = ?state.apple.position,
                "apple eaten"
            );
        }

        Ok(StepResult {
            turned,
            ended_run: None,
            info: StepInfo {
                ate_apple,
                collision_type: None,
            },
        })
    }

    /// Start over without a collision, e.g. on player request
    pub fn restart(&mut self, state: &mut GameState) -> Result<u32, GameError> {
        let ended_run = state.score;
        self.reset(state, true)?;
        info!(score = ended_run, "snake restarted");
        Ok(ended_run)
    }

    fn reset(&mut self, state: &mut GameState, relocate_apple: bool) -> Result<(), GameError> {
        state.snake.reset(self.board.center());
        state.score = 0;
        state.resets += 1;
        if relocate_apple {
            state.apple.position = self.place_apple(&state.snake)?;
        }
        Ok(())
    }

    fn place_apple(&mut self, snake: &Snake) -> Result<Position, GameError> {
        random_free_cell(&self.board, &snake.occupied(), &mut self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Topology;
    use crate::game::spawn::CycleCells;
    use rand::Rng;

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn scripted(config: GameConfig, script: &[(i32, i32)]) -> GameEngine<CycleCells> {
        GameEngine::with_source(config, CycleCells::new(script))
    }

    #[test]
    fn test_new_game() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let state = engine.new_game().unwrap();

        assert_eq!(state.snake.positions, vec![Position::new(16, 12)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.target_length, 1);
        assert_ne!(state.apple.position, state.snake.head());
        assert!(engine.board().contains(state.apple.position));
    }

    #[test]
    fn test_first_tick_from_center() {
        let mut engine = scripted(GameConfig::default(), &[(2, 2)]);
        let mut state = engine.new_game().unwrap();

        let result = engine.step(&mut state).unwrap();

        let board = *engine.board();
        assert!(!result.turned);
        assert_eq!(result.info.collision_type, None);
        assert_eq!(board.pixel_origin(state.snake.head()), (340, 240));
        assert_eq!(state.snake.positions, vec![Position::new(17, 12)]);
        assert_eq!(
            state.snake.last_vacated.map(|c| board.pixel_origin(c)),
            Some((320, 240))
        );
    }

    #[test]
    fn test_reversal_is_rejected_at_commit() {
        // Pixel (100,100) with 20px cells is cell (5,5).
        let mut engine = scripted(GameConfig::default(), &[(20, 20)]);
        let mut state = engine.new_game().unwrap();
        state.snake = Snake::from_body(cells(&[(5, 5), (4, 5), (3, 5)]), Direction::Right);

        engine.request(&mut state, Direction::Left);
        let result = engine.step(&mut state).unwrap();

        assert!(!result.turned);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(engine.board().pixel_origin(state.snake.head()), (120, 100));
    }

    #[test]
    fn test_apple_consumption_grows_and_relocates() {
        // Apple lands on (17,12), i.e. pixel (340,240), right in front of the snake.
        let mut engine = scripted(
            GameConfig::default(),
            &[(17, 12), (16, 12), (17, 12), (3, 3)],
        );
        let mut state = engine.new_game().unwrap();
        assert_eq!(state.apple.position, Position::new(17, 12));

        let result = engine.step(&mut state).unwrap();

        assert!(result.info.ate_apple);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.target_length, 2);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.apple.position, Position::new(3, 3));
        assert!(!state.snake.occupies(state.apple.position));
    }

    #[test]
    fn test_self_collision_resets() {
        let mut engine = scripted(GameConfig::default(), &[(16, 12), (1, 1)]);
        let mut state = engine.new_game().unwrap();
        state.score = 4;
        state.snake = Snake::from_body(
            cells(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)]),
            Direction::Up,
        );

        engine.request(&mut state, Direction::Right);
        let result = engine.step(&mut state).unwrap();

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(result.ended_run, Some(4));
        assert_eq!(state.snake.positions, vec![engine.board().center()]);
        assert_eq!(state.snake.target_length, 1);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.resets, 1);
        assert_ne!(state.apple.position, engine.board().center());
    }

    #[test]
    fn test_collision_at_index_two_via_wrap() {
        // Two columns: moving right from column 0 wraps onto the neck's cell
        // at column 1, which is index 2 once the new head is inserted.
        let config = GameConfig::new(40, 100);
        let mut engine = scripted(config, &[(0, 0)]);
        let mut state = engine.new_game().unwrap();
        state.snake = Snake::from_body(cells(&[(0, 2), (1, 2)]), Direction::Right);

        let result = engine.step(&mut state).unwrap();

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(state.snake.positions, vec![Position::new(1, 2)]);
    }

    #[test]
    fn test_wall_topology_resets_at_edge() {
        let config = GameConfig {
            topology: Topology::Wall,
            ..Default::default()
        };
        let mut engine = scripted(config, &[(2, 2), (9, 9)]);
        let mut state = engine.new_game().unwrap();
        state.snake = Snake::from_body(cells(&[(31, 3), (30, 3)]), Direction::Right);

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.positions, vec![Position::new(16, 12)]);
        // The apple was not on the reset snake, so it stays.
        assert_eq!(state.apple.position, Position::new(2, 2));
    }

    #[test]
    fn test_wall_reset_moves_apple_off_center() {
        let config = GameConfig {
            topology: Topology::Wall,
            ..Default::default()
        };
        // (16,12) is the center: free at game start, taken once the snake resets.
        let mut engine = scripted(config, &[(2, 2), (16, 12), (7, 9)]);
        let mut state = engine.new_game().unwrap();
        state.snake = Snake::from_body(cells(&[(0, 5), (1, 5)]), Direction::Left);
        state.apple.position = engine.board().center();

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.positions, vec![Position::new(16, 12)]);
        assert_eq!(state.apple.position, Position::new(7, 9));
        assert!(!state.snake.occupies(state.apple.position));
    }

    #[test]
    fn test_wrap_topology_crosses_edge() {
        let mut engine = scripted(GameConfig::default(), &[(2, 2)]);
        let mut state = engine.new_game().unwrap();
        state.snake = Snake::from_body(cells(&[(0, 0), (0, 1)]), Direction::Up);

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.info.collision_type, None);
        assert_eq!(state.snake.head(), Position::new(0, 23));
    }

    #[test]
    fn test_restart() {
        let mut engine = scripted(GameConfig::default(), &[(2, 2), (16, 12), (4, 4)]);
        let mut state = engine.new_game().unwrap();
        state.score = 3;
        state.snake = Snake::from_body(cells(&[(5, 5), (4, 5)]), Direction::Right);

        assert_eq!(engine.restart(&mut state).unwrap(), 3);
        assert_eq!(state.snake.positions, vec![Position::new(16, 12)]);
        assert_eq!(state.apple.position, Position::new(4, 4));
        assert_eq!(state.resets, 1);
    }

    #[test]
    fn test_full_board_is_an_error() {
        // A 2x1 board: once the snake is two cells long nothing is free.
        let config = GameConfig::new(40, 20);
        let mut engine = scripted(config, &[(0, 0), (1, 0)]);
        let mut state = engine.new_game().unwrap();
        assert_eq!(state.snake.head(), Position::new(1, 0));
        assert_eq!(state.apple.position, Position::new(0, 0));

        let err = engine.step(&mut state).unwrap_err();
        assert_eq!(err, GameError::BoardFull { cells: 2 });
    }

    #[test]
    fn test_invariants_hold_under_random_play() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 11);
        let mut state = engine.new_game().unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..5_000 {
            if rng.gen_bool(0.3) {
                let direction = Direction::ALL[rng.gen_range(0..4)];
                engine.request(&mut state, direction);
            }
            let before = state.snake.direction;
            let long = state.snake.len() > 1;

            let result = engine.step(&mut state).unwrap();

            assert_eq!(state.snake.len(), state.snake.target_length);
            assert!(!state.snake.occupies(state.apple.position));
            if long && result.info.collision_type.is_none() {
                assert!(!before.is_opposite(state.snake.direction));
            }
        }
        assert_eq!(state.ticks, 5_000);
    }
}
