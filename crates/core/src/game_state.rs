//! Game state module - manages the complete game state
//!
//! This module ties together the board, the piece catalog, the bag generator and
//! scoring. All mutation goes through the command methods (or [`GameState::apply`]),
//! each of which runs to completion and leaves the state consistent.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{get_shape, get_spawn_shape, rotation_count, Shape};
use crate::rng::BagGenerator;
use crate::scoring::{gravity_interval_ms, line_clear_score, next_level, soft_drop_score};
use crate::types::*;

/// Active falling piece
///
/// Replaced wholesale on every change, so shape, rotation and offsets always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in spawn orientation, centered, with its first occupied
    /// row on board row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = get_spawn_shape(kind);
        Self {
            kind,
            rotation: 0,
            shape,
            x: ((BOARD_WIDTH as usize - shape.width()) / 2) as i8,
            y: -(shape.top_padding() as i8),
        }
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Board cells covered by this piece, as (x, y).
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(r, c)| (self.x + c, self.y + r))
    }

    fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }
}

/// Outcome of a lock, kept until an observer takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Row the piece locked at (may be negative when the lock ended the game).
    pub y: i8,
    pub lines_cleared: u32,
    /// Line clear points awarded by this lock.
    pub points: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    next_queue: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    bag: BagGenerator,
    score: u32,
    level: u32,
    lines: u32,
    phase: Phase,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create an idle game; `seed` makes the piece sequence reproducible.
    pub fn new(seed: Option<u32>) -> Self {
        Self::with_bag(BagGenerator::new(seed))
    }

    /// Create an idle game drawing from the given generator.
    pub fn with_bag(bag: BagGenerator) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            next_queue: ArrayVec::new(),
            bag,
            score: 0,
            level: 0,
            lines: 0,
            phase: Phase::Idle,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A game is in progress (possibly paused)
    pub fn running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next_queue
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Replace the settled stack, e.g. to set up a puzzle position.
    /// The active piece and counters are left alone.
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Overwrite the line and level counters, e.g. to resume a saved game.
    /// The score is left alone.
    pub fn load_counters(&mut self, lines: u32, level: u32) {
        self.lines = lines;
        self.level = level;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Gravity period for the current level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Apply a game command
    pub fn apply(&mut self, command: GameCommand) {
        match command {
            GameCommand::Start => self.start(),
            GameCommand::Pause => self.pause(),
            GameCommand::Reset => self.reset(),
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Hold => self.hold(),
        }
    }

    /// Start a game unless one is already in progress
    pub fn start(&mut self) {
        if self.running() {
            return;
        }
        self.reset();
    }

    /// Toggle pause while a game is in progress
    pub fn pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Throw away the current game and start a fresh one.
    ///
    /// The bag generator keeps its position; only the preview queue is rebuilt.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.active = None;
        self.hold = None;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.last_event = None;
        self.next_queue.clear();
        self.refill_queue();
        self.phase = Phase::Running;
        self.spawn_piece(None);
    }

    pub fn move_left(&mut self) {
        self.shift(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.shift(Direction::Right);
    }

    /// Move one column; blocked moves are dropped silently.
    pub fn shift(&mut self, direction: Direction) {
        let Some(active) = self.playable_piece() else {
            return;
        };
        let moved = active.shifted(direction.dx(), 0);
        if !moved.collides(&self.board) {
            self.active = Some(moved);
        }
    }

    /// Rotate clockwise to the next catalog state, trying horizontal kicks in order.
    pub fn rotate(&mut self) {
        let Some(active) = self.playable_piece() else {
            return;
        };
        let rotation = (active.rotation + 1) % rotation_count(active.kind);
        let shape = get_shape(active.kind, rotation);

        for dx in KICK_OFFSETS {
            let x = active.x + dx;
            if !self.board.collides(&shape, x, active.y) {
                self.active = Some(ActivePiece {
                    rotation,
                    shape,
                    x,
                    ..active
                });
                return;
            }
        }
    }

    /// Drop one row for a point, or lock if the piece is resting.
    pub fn soft_drop(&mut self) {
        let Some(active) = self.playable_piece() else {
            return;
        };
        let lowered = active.shifted(0, 1);
        if lowered.collides(&self.board) {
            self.lock_piece(active);
        } else {
            self.active = Some(lowered);
            self.score = self.score.saturating_add(soft_drop_score(1));
        }
    }

    /// Timer-driven descent; same rules and scoring as a soft drop.
    pub fn gravity_step(&mut self) {
        self.soft_drop();
    }

    /// Drop to the landing row and lock. Awards no per-row points.
    pub fn hard_drop(&mut self) {
        let Some(active) = self.playable_piece() else {
            return;
        };
        let landed = ActivePiece {
            y: self.landing_y(&active),
            ..active
        };
        self.lock_piece(landed);
    }

    /// Stash the active piece, once per spawned piece.
    pub fn hold(&mut self) {
        if !self.can_hold {
            return;
        }
        let Some(active) = self.playable_piece() else {
            return;
        };

        let previous = self.hold.replace(active.kind);
        self.spawn_piece(previous);
        self.can_hold = false;
    }

    /// Landing row of the active piece on a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|active| self.landing_y(&active))
    }

    fn landing_y(&self, piece: &ActivePiece) -> i8 {
        let mut y = piece.y;
        while !self.board.collides(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Active piece if piece commands are currently accepted.
    fn playable_piece(&self) -> Option<ActivePiece> {
        if self.phase != Phase::Running {
            return None;
        }
        self.active
    }

    fn refill_queue(&mut self) {
        while !self.next_queue.is_full() {
            self.next_queue.push(self.bag.draw());
        }
    }

    /// Spawn `kind`, or the queue head when no override is given.
    ///
    /// Spawning never checks for overlap; a blocked stack is only detected
    /// when the piece locks above the board.
    fn spawn_piece(&mut self, kind: Option<PieceKind>) {
        let kind = match kind {
            Some(kind) => kind,
            None => {
                self.refill_queue();
                self.next_queue.remove(0)
            }
        };
        self.refill_queue();

        self.active = Some(ActivePiece::spawn(kind));
        self.can_hold = true;
    }

    /// Merge `piece` at its position, clear lines, score, and spawn the next piece.
    fn lock_piece(&mut self, piece: ActivePiece) {
        if piece.y < 0 {
            self.phase = Phase::GameOver;
            self.active = Some(piece);
            self.last_event = Some(LockEvent {
                kind: piece.kind,
                y: piece.y,
                lines_cleared: 0,
                points: 0,
                level_up: false,
                game_over: true,
            });
            return;
        }

        let merged = self.board.merged(piece.kind, &piece.shape, piece.x, piece.y);
        let (board, cleared) = merged.cleared();
        self.board = board;

        let points = line_clear_score(cleared, self.level);
        let previous_lines = self.lines;
        let previous_level = self.level;
        if cleared > 0 {
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.level = next_level(self.level, previous_lines, self.lines);
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            y: piece.y,
            lines_cleared: cleared as u32,
            points,
            level_up: self.level > previous_level,
            game_over: false,
        });

        self.spawn_piece(None);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Some(1))
    }
}

#[cfg(test)]
impl GameState {
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(Some(seed));
        state.start();
        state
    }

    fn piece_at(kind: PieceKind, rotation: usize, x: i8, y: i8) -> ActivePiece {
        ActivePiece {
            kind,
            rotation,
            shape: get_shape(kind, rotation),
            x,
            y,
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(Some(12345));

        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.running());
        assert!(!state.paused());
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
        assert!(state.hold_piece().is_none());
        assert!(state.next_queue().is_empty());
    }

    #[test]
    fn test_commands_ignored_while_idle() {
        let mut state = GameState::new(Some(12345));
        for command in [
            GameCommand::MoveLeft,
            GameCommand::Rotate,
            GameCommand::SoftDrop,
            GameCommand::HardDrop,
            GameCommand::Hold,
            GameCommand::Pause,
        ] {
            state.apply(command);
        }
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_spawn_position() {
        let mut state = started(12345);
        state.set_active(ActivePiece::spawn(PieceKind::I));
        let i = state.active().unwrap();
        assert_eq!((i.x, i.y, i.rotation), (3, -1, 0));

        let t = ActivePiece::spawn(PieceKind::T);
        assert_eq!((t.x, t.y), (3, 0));

        let o = ActivePiece::spawn(PieceKind::O);
        assert_eq!((o.x, o.y), (4, 0));
    }

    #[test]
    fn test_spawn_takes_queue_head() {
        let mut state = started(12345);
        let next = state.next_queue()[0];
        state.hard_drop();
        assert_eq!(state.active().unwrap().kind, next);
        assert_eq!(state.next_queue().len(), NEXT_QUEUE_LEN);
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut state = started(12345);
        state.soft_drop();
        let score = state.score();
        let active = state.active();
        state.start();
        assert_eq!(state.score(), score);
        assert_eq!(state.active(), active);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::O, 0, 0, 5));
        state.move_left();
        assert_eq!(state.active().unwrap().x, 0);
        state.move_right();
        assert_eq!(state.active().unwrap().x, 1);
    }

    #[test]
    fn test_rotate_advances_state() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::T, 0, 4, 5));
        state.rotate();
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 1);
        assert_eq!(active.shape, get_shape(PieceKind::T, 1));
        assert_eq!(active.x, 4);
    }

    #[test]
    fn test_rotate_two_state_piece_wraps() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::S, 1, 4, 5));
        state.rotate();
        assert_eq!(state.active().unwrap().rotation, 0);
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut state = started(12345);
        // Vertical I in column 9 (matrix column 2 at x = 7).
        state.set_active(piece_at(PieceKind::I, 1, 7, 5));
        state.rotate();
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 0);
        // Horizontal I needs x <= 6.
        assert_eq!(active.x, 6);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let mut state = started(12345);
        // Vertical I in column 0; offsets 0, -1 and +1 all leave the board.
        state.set_active(piece_at(PieceKind::I, 1, -2, 5));
        state.rotate();
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 0);
        assert_eq!(active.x, 0);
    }

    #[test]
    fn test_rotate_kicks_two_left_off_stack() {
        let mut state = started(12345);
        // Horizontal I over columns 6..=9; vertical lands in matrix column 2.
        *state.board_mut() = Board::from_rows(&[
            ".......zzz",
            "..........",
            "..........",
            "..........",
        ]);
        state.set_active(piece_at(PieceKind::I, 0, 6, 13));
        state.rotate();
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 1);
        assert_eq!(active.x, 4);
    }

    #[test]
    fn test_rotate_prefers_left_kick() {
        let mut state = started(12345);
        // Blocks the stem of the rotated T in place; both x-1 and x+1 fit.
        state.board_mut().set(5, 7, Some(PieceKind::Z));
        state.set_active(piece_at(PieceKind::T, 0, 4, 5));
        state.rotate();
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 1);
        assert_eq!(active.x, 3);

        let mut state = started(12345);
        // With x-1 also blocked the +1 kick wins.
        state.board_mut().set(5, 7, Some(PieceKind::Z));
        state.board_mut().set(4, 7, Some(PieceKind::Z));
        state.set_active(piece_at(PieceKind::T, 0, 4, 5));
        state.rotate();
        assert_eq!(state.active().unwrap().x, 5);
    }

    #[test]
    fn test_rotate_rejected_when_no_kick_fits() {
        let mut state = started(12345);
        for y in 0..20 {
            for x in 0..10 {
                if x != 5 {
                    state.board_mut().set(x, y, Some(PieceKind::Z));
                }
            }
        }
        let vertical = piece_at(PieceKind::I, 1, 3, 10);
        state.set_active(vertical);
        state.rotate();
        assert_eq!(state.active(), Some(vertical));
    }

    #[test]
    fn test_soft_drop_scores_one_point() {
        let mut state = started(12345);
        let y = state.active().unwrap().y;
        state.soft_drop();
        assert_eq!(state.active().unwrap().y, y + 1);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_soft_drop_lock_awards_nothing() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::O, 0, 0, 18));
        state.soft_drop();
        assert_eq!(state.score(), 0);
        assert_eq!(state.board().get(0, 19), Some(Some(PieceKind::O)));
        let event = state.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
    }

    #[test]
    fn test_hard_drop_awards_no_drop_points() {
        let mut state = started(12345);
        state.hard_drop();
        assert_eq!(state.score(), 0);
        assert!(!state.board().is_empty());
    }

    #[test]
    fn test_lock_scores_with_pre_lock_level() {
        let mut state = started(12345);
        state.load_counters(9, 0);
        *state.board_mut() = Board::from_rows(&["iiiiiiii.."]);
        state.set_active(piece_at(PieceKind::O, 0, 8, 17));
        state.hard_drop();
        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 100);
        let event = state.take_last_event().unwrap();
        assert!(event.level_up);
        assert_eq!(event.points, 100);
    }

    #[test]
    fn test_level_increment_capped_per_lock() {
        let mut state = started(12345);
        state.load_counters(18, 0);
        *state.board_mut() = Board::from_rows(&[
            "iiiiiiiii.",
            "iiiiiiiii.",
            "iiiiiiiii.",
            "iiiiiiiii.",
        ]);
        state.set_active(piece_at(PieceKind::I, 1, 7, 0));
        state.hard_drop();
        assert_eq!(state.lines(), 22);
        // One threshold crossed, one level gained.
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 800);
    }

    #[test]
    fn test_lock_above_board_ends_game() {
        let mut state = started(12345);
        *state.board_mut() = Board::from_rows(&["z........."; 20]);
        for y in 0..20 {
            state.board_mut().set(4, y, Some(PieceKind::Z));
        }
        let before = state.board().clone();
        state.set_active(piece_at(PieceKind::I, 0, 3, -1));
        state.soft_drop();

        assert!(state.game_over());
        assert!(!state.running());
        assert_eq!(state.board(), &before);
        assert!(state.take_last_event().unwrap().game_over);

        // Terminal: piece commands and pause do nothing.
        state.pause();
        state.hard_drop();
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_start_after_game_over_restarts() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::O, 0, 4, -1));
        state.board_mut().set(4, 1, Some(PieceKind::J));
        state.hard_drop();
        assert!(state.game_over());

        state.start();
        assert_eq!(state.phase(), Phase::Running);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_hold_empty_slot() {
        let mut state = started(12345);
        let current = state.active().unwrap().kind;
        let next = state.next_queue()[0];

        state.hold();
        assert_eq!(state.hold_piece(), Some(current));
        assert_eq!(state.active().unwrap().kind, next);
        assert!(!state.can_hold());
    }

    #[test]
    fn test_hold_twice_is_noop() {
        let mut state = started(12345);
        state.hold();
        let active = state.active();
        let queue = state.next_queue().to_vec();
        state.hold();
        assert_eq!(state.active(), active);
        assert_eq!(state.next_queue(), &queue[..]);
    }

    #[test]
    fn test_hold_swap_respawns_held_kind() {
        let mut state = started(12345);
        let first = state.active().unwrap().kind;
        state.hold();
        state.hard_drop();
        assert!(state.can_hold());

        let second = state.active().unwrap().kind;
        state.soft_drop();
        let queue = state.next_queue().to_vec();
        state.hold();

        let active = state.active().unwrap();
        assert_eq!(active.kind, first);
        assert_eq!(active, ActivePiece::spawn(first));
        assert_eq!(state.hold_piece(), Some(second));
        assert_eq!(state.next_queue(), &queue[..]);
        assert!(!state.can_hold());
    }

    #[test]
    fn test_pause_toggle_blocks_commands() {
        let mut state = started(12345);
        let active = state.active();
        state.pause();
        assert!(state.paused());
        assert!(state.running());
        state.move_left();
        state.soft_drop();
        assert_eq!(state.active(), active);
        state.pause();
        assert!(!state.paused());
    }

    #[test]
    fn test_gravity_step_matches_soft_drop() {
        let mut a = started(99);
        let mut b = started(99);
        for _ in 0..60 {
            a.soft_drop();
            b.gravity_step();
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.board(), b.board());
        assert_eq!(a.active(), b.active());
    }

    #[test]
    fn test_ghost_y() {
        let mut state = started(12345);
        state.set_active(piece_at(PieceKind::O, 0, 4, 0));
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = started(12345);
        state.soft_drop();
        state.hold();
        state.hard_drop();
        state.reset();

        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert!(state.hold_piece().is_none());
        assert!(state.board().is_empty());
        assert!(state.can_hold());
        assert_eq!(state.next_queue().len(), NEXT_QUEUE_LEN);
    }
}
