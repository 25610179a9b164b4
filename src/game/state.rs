use std::collections::HashSet;

use super::action::Direction;
use super::board::Board;
use super::config::Topology;

/// A cell on the game grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Outcome of moving the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// The head would have left a walled board; nothing was changed
    HitWall,
    /// The new head landed on the body behind the neck
    HitSelf,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Occupied cells, head first
    pub positions: Vec<Position>,
    /// Heading applied on every tick
    pub direction: Direction,
    /// Turn requested since the last tick
    pub pending_direction: Option<Direction>,
    /// Length the body is trimmed to after each move
    pub target_length: usize,
    /// Cell given up by the tail on the last move
    pub last_vacated: Option<Position>,
}

impl Snake {
    /// A one-cell snake heading right
    pub fn new(head: Position) -> Self {
        Self::from_body(vec![head], Direction::Right)
    }

    /// Build a snake from explicit segments, head first
    pub fn from_body(positions: Vec<Position>, direction: Direction) -> Self {
        assert!(!positions.is_empty(), "a snake needs at least one segment");
        Self {
            target_length: positions.len(),
            positions,
            direction,
            pending_direction: None,
            last_vacated: None,
        }
    }

    pub fn head(&self) -> Position {
        self.positions[0]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remember a turn for the next tick. A later request replaces an earlier one.
    pub fn request_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Apply the pending turn, unless it would fold the head back onto the neck
    ///
    /// Returns true if the heading changed.
    pub fn commit_direction(&mut self) -> bool {
        let Some(next) = self.pending_direction.take() else {
            return false;
        };
        if self.len() > 1 && self.direction.is_opposite(next) {
            return false;
        }
        let changed = next != self.direction;
        self.direction = next;
        changed
    }

    /// Move one cell along the current heading
    ///
    /// The new head is inserted first, checked against the body, and only
    /// then is the tail trimmed down to `target_length`.
    pub fn advance(&mut self, board: &Board, topology: Topology) -> Advance {
        let next = self.head().moved_in_direction(self.direction);
        let new_head = match topology {
            Topology::Wrap => board.wrap(next),
            Topology::Wall if !board.contains(next) => return Advance::HitWall,
            Topology::Wall => next,
        };

        self.positions.insert(0, new_head);
        if self.hits_itself() {
            return Advance::HitSelf;
        }

        self.last_vacated = if self.len() > self.target_length {
            self.positions.pop()
        } else {
            None
        };
        Advance::Moved
    }

    /// Head coincides with a segment past the neck
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.positions
            .get(2..)
            .is_some_and(|body| body.contains(&head))
    }

    /// Lengthen by one, keeping the tail cell that the last move gave up
    pub fn grow(&mut self) {
        self.target_length += 1;
        if let Some(tail) = self.last_vacated.take() {
            self.positions.push(tail);
        }
    }

    /// Back to a single cell at `center`, heading right
    pub fn reset(&mut self, center: Position) {
        self.positions.clear();
        self.positions.push(center);
        self.target_length = 1;
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.last_vacated = None;
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    pub fn occupied(&self) -> HashSet<Position> {
        self.positions.iter().copied().collect()
    }
}

/// The food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// What ended the snake's run on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    /// Apples eaten since the last reset
    pub score: u32,
    pub ticks: u64,
    /// Number of times the snake has been reset
    pub resets: u32,
}

impl GameState {
    pub fn new(snake: Snake, apple: Apple) -> Self {
        Self {
            snake,
            apple,
            score: 0,
            ticks: 0,
            resets: 0,
        }
    }

    /// What the renderer needs for this tick
    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            positions: &self.snake.positions,
            last_vacated: self.snake.last_vacated,
            apple: self.apple.position,
        }
    }
}

/// Borrowed hand-off from the update step to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderView<'a> {
    pub positions: &'a [Position],
    pub last_vacated: Option<Position>,
    pub apple: Position,
}
