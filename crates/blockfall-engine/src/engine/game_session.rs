use crate::{
    PieceCollisionError,
    core::{grid::Grid, piece::Piece},
};

use super::{
    FrameInput, FrameTime, GameConfig, GameStats, InputEvent, Millis, PieceGenerator, PieceSeed,
};

/// Lock state of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PiecePhase {
    /// Nothing directly below blocks the piece, or gravity has not noticed yet.
    Falling,
    /// Gravity found the piece resting on something at `landed_at`. The piece
    /// can still be moved; it locks once the grace period has elapsed.
    Grace { landed_at: Millis },
}

impl PiecePhase {
    /// Transition for a gravity step that could not move the piece.
    ///
    /// An already running grace timer keeps its start time.
    #[must_use]
    pub fn landed(self, now: Millis) -> Self {
        match self {
            PiecePhase::Falling => PiecePhase::Grace { landed_at: now },
            grace @ PiecePhase::Grace { .. } => grace,
        }
    }

    /// Transition after re-checking what is below the piece.
    ///
    /// A piece that can fall again is back to [`Falling`](Self::Falling) and
    /// its grace timer is discarded.
    #[must_use]
    pub fn reevaluated(self, can_fall: bool) -> Self {
        if can_fall { PiecePhase::Falling } else { self }
    }

    /// Whether the grace period has run out at `now`.
    #[must_use]
    pub fn lock_due(self, now: Millis, grace_ms: Millis) -> bool {
        match self {
            PiecePhase::Falling => false,
            PiecePhase::Grace { landed_at } => now.saturating_sub(landed_at) >= grace_ms,
        }
    }
}

/// Hard-drop charge driven by the soft-drop key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropCharge {
    Idle,
    /// Soft-drop was pressed at `started_at` and has not been released since.
    Charging { started_at: Millis },
}

impl DropCharge {
    /// Whether a held soft-drop key has charged long enough to fire at `now`.
    #[must_use]
    pub fn ready(self, now: Millis, held: bool, charge_ms: Millis) -> bool {
        match self {
            DropCharge::Idle => false,
            DropCharge::Charging { started_at } => {
                held && now.saturating_sub(started_at) >= charge_ms
            }
        }
    }
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub cleared_lines: usize,
    pub score_delta: usize,
    /// The next piece did not fit, so the grid and score were reset.
    pub game_over: bool,
}

/// Result of one [`GameSession::update`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A quit event was seen; the rest of the frame was skipped.
    pub quit: bool,
    /// Locks that happened during the frame, in order.
    pub locks: Vec<LockReport>,
}

/// A running game: grid, falling piece, score and timers.
///
/// All state is owned here and advanced by [`update`](Self::update), one frame
/// at a time, from the frame's input and clock reading. Single moves are also
/// exposed directly for callers that drive the session without timing.
///
/// # Example
///
/// ```
/// use blockfall_engine::{FrameInput, FrameTime, GameConfig, GameSession, PieceSeed};
///
/// let mut session = GameSession::new(GameConfig::default(), PieceSeed::from(3));
/// let start_y = session.falling_piece().y();
///
/// // One normal gravity interval moves the piece down one row.
/// session.update(&FrameInput::new(), FrameTime::new(200, 200));
/// assert_eq!(session.falling_piece().y(), start_y + 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    falling_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    phase: PiecePhase,
    charge: DropCharge,
    fall_elapsed: Millis,
    game_overs: usize,
}

impl GameSession {
    #[must_use]
    pub fn new(config: GameConfig, seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let falling_piece = Piece::spawn(generator.next_kind());
        Self {
            config,
            grid: Grid::new(),
            falling_piece,
            generator,
            stats: GameStats::new(),
            phase: PiecePhase::Falling,
            charge: DropCharge::Idle,
            fall_elapsed: 0,
            game_overs: 0,
        }
    }

    /// Starts from an existing grid and falling piece.
    ///
    /// Subsequent pieces come from `seed`.
    #[must_use]
    pub fn from_parts(config: GameConfig, grid: Grid, falling_piece: Piece, seed: PieceSeed) -> Self {
        Self {
            config,
            grid,
            falling_piece,
            generator: PieceGenerator::new(seed),
            stats: GameStats::new(),
            phase: PiecePhase::Falling,
            charge: DropCharge::Idle,
            fall_elapsed: 0,
            game_overs: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    #[must_use]
    pub fn charge(&self) -> DropCharge {
        self.charge
    }

    /// Number of times the grid was reset because a new piece did not fit.
    #[must_use]
    pub fn game_overs(&self) -> usize {
        self.game_overs
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Runs one frame.
    ///
    /// Events are applied in order. A quit event ends the frame immediately,
    /// before any timer is looked at. Then, in order: a charged hard drop
    /// fires, the grace period is re-checked, gravity is applied, and an
    /// expired grace period locks the piece.
    pub fn update(&mut self, input: &FrameInput, time: FrameTime) -> FrameReport {
        let mut report = FrameReport::default();

        for event in &input.events {
            match event {
                InputEvent::MoveLeft => _ = self.try_move_left(),
                InputEvent::MoveRight => _ = self.try_move_right(),
                InputEvent::Rotate => _ = self.try_rotate(),
                InputEvent::SoftDropPress => self.press_soft_drop(time.now),
                InputEvent::SoftDropRelease => self.charge = DropCharge::Idle,
                InputEvent::Quit => {
                    report.quit = true;
                    return report;
                }
            }
        }

        if self
            .charge
            .ready(time.now, input.soft_drop_held, self.config.hard_drop_charge_ms)
        {
            self.charge = DropCharge::Idle;
            report.locks.push(self.hard_drop_and_lock());
        }

        self.phase = self.phase.reevaluated(self.can_fall());

        self.apply_gravity(input.soft_drop_held, time);

        if self.phase.lock_due(time.now, self.config.grace_ms) {
            report.locks.push(self.lock_piece());
        }

        report
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.shifted(-1, 0))
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.shifted(1, 0))
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.shifted(0, 1))
    }

    /// Rotates clockwise in place; fails without any kick if the rotated
    /// shape does not fit at the current position.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.rotated())
    }

    /// Drops the piece as far as it goes and locks it immediately.
    pub fn hard_drop_and_lock(&mut self) -> LockReport {
        while self.try_soft_drop().is_ok() {}
        self.lock_piece()
    }

    fn can_fall(&self) -> bool {
        let piece = &self.falling_piece;
        self.grid.is_valid(piece, piece.x(), piece.y() + 1)
    }

    fn try_set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.grid.fits(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// The first press steps the piece down one row and starts charging.
    /// Presses while already charging are ignored.
    fn press_soft_drop(&mut self, now: Millis) {
        if self.charge.is_charging() {
            return;
        }
        _ = self.try_soft_drop();
        self.charge = DropCharge::Charging { started_at: now };
    }

    fn apply_gravity(&mut self, soft_drop_held: bool, time: FrameTime) {
        self.fall_elapsed += time.delta;
        if self.fall_elapsed < self.config.gravity_interval(soft_drop_held) {
            return;
        }
        self.fall_elapsed = 0;
        if self.try_soft_drop().is_err() {
            self.phase = self.phase.landed(time.now);
        }
    }

    /// Merges the piece, scores cleared lines and spawns the next piece.
    ///
    /// If the new piece does not fit, the grid and statistics are reset and
    /// play continues with that piece.
    fn lock_piece(&mut self) -> LockReport {
        self.grid.merge(&self.falling_piece);
        let cleared_lines = self.grid.clear_lines();
        let score_delta = self
            .stats
            .complete_piece_drop(cleared_lines, self.config.score_per_line);
        self.phase = PiecePhase::Falling;

        self.falling_piece = Piece::spawn(self.generator.next_kind());
        let game_over = !self.grid.fits(&self.falling_piece);
        if game_over {
            self.grid.reset();
            self.stats = GameStats::new();
            self.game_overs += 1;
        }

        LockReport {
            cleared_lines,
            score_delta,
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BOARD_HEIGHT, BOARD_WIDTH, Cell, GridRow, PieceKind};

    use super::*;

    const FRAME_MS: Millis = 10;

    fn session_with(grid: Grid, piece: Piece) -> GameSession {
        GameSession::from_parts(GameConfig::default(), grid, piece, PieceSeed::from(11))
    }

    /// Feeds idle frames until `until` (inclusive), returning every lock seen.
    fn run_idle(session: &mut GameSession, clock: &mut Millis, until: Millis) -> Vec<LockReport> {
        let mut locks = vec![];
        while *clock + FRAME_MS <= until {
            *clock += FRAME_MS;
            let report = session.update(&FrameInput::new(), FrameTime::new(*clock, FRAME_MS));
            locks.extend(report.locks);
        }
        locks
    }

    fn row_with_hole(hole: usize) -> GridRow {
        let mut row = [Cell::Filled(PieceKind::J); BOARD_WIDTH];
        row[hole] = Cell::Empty;
        row
    }

    #[test]
    fn test_o_piece_falls_lands_and_locks_after_grace() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 4, 0));
        assert!(session.grid().fits(session.falling_piece()));

        let mut clock = 0;
        // 18 gravity steps of 200ms bring the piece from y=0 to y=18.
        let locks = run_idle(&mut session, &mut clock, 18 * 200);
        assert!(locks.is_empty());
        assert_eq!(session.falling_piece().y(), 18);
        assert!(session.phase().is_falling());

        // Next gravity step is blocked: grace starts.
        let locks = run_idle(&mut session, &mut clock, 19 * 200);
        assert!(locks.is_empty());
        let PiecePhase::Grace { landed_at } = session.phase() else {
            panic!("expected grace, got {:?}", session.phase());
        };

        // Still not locked just before the grace period ends.
        let locks = run_idle(&mut session, &mut clock, landed_at + 499);
        assert!(locks.is_empty());

        let locks = run_idle(&mut session, &mut clock, landed_at + 500 + FRAME_MS);
        assert_eq!(
            locks,
            vec![LockReport {
                cleared_lines: 0,
                score_delta: 0,
                game_over: false,
            }]
        );
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(session.grid().cell(x, y), Some(Cell::Filled(PieceKind::O)));
        }
        assert_eq!(session.grid().occupied_count(), 4);
        assert_eq!(session.score(), 0);
        let next = session.falling_piece();
        assert_eq!(next.y(), 0);
        assert_eq!(*next, Piece::spawn(next.kind()));
        assert!(session.phase().is_falling());
    }

    #[test]
    fn test_completing_row_clears_and_scores() {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        rows[BOARD_HEIGHT - 1] = row_with_hole(9);
        // I rotated to vertical fills the hole in column 9.
        let piece = Piece::at(PieceKind::I, 9, 0).rotated();
        let mut session = session_with(Grid::from_rows(rows), piece);

        let report = session.hard_drop_and_lock();
        assert_eq!(report.cleared_lines, 1);
        assert_eq!(report.score_delta, 100);
        assert_eq!(session.score(), 100);
        // Remaining three I cells shifted down by one row.
        assert_eq!(session.grid().occupied_count(), 3);
        for y in 17..BOARD_HEIGHT {
            assert_eq!(session.grid().cell(9, y), Some(Cell::Filled(PieceKind::I)));
        }
        assert!(session.grid().rows().next().unwrap().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_multi_line_clear_is_linear() {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for row in &mut rows[BOARD_HEIGHT - 4..] {
            *row = row_with_hole(0);
        }
        let piece = Piece::at(PieceKind::I, 0, 0).rotated();
        let mut session = session_with(Grid::from_rows(rows), piece);

        let report = session.hard_drop_and_lock();
        assert_eq!(report.cleared_lines, 4);
        assert_eq!(session.score(), 400);
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_spawn_collision_resets_grid_and_score() {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        // A tower over columns 3..=6 from row 1 down, and a bottom row missing only column 0.
        for row in &mut rows[1..BOARD_HEIGHT - 1] {
            for cell in &mut row[3..7] {
                *cell = Cell::Filled(PieceKind::Z);
            }
        }
        rows[BOARD_HEIGHT - 1] = row_with_hole(0);
        let piece = Piece::at(PieceKind::I, 0, 0).rotated();
        let mut session = session_with(Grid::from_rows(rows), piece);

        let report = session.hard_drop_and_lock();
        assert_eq!(report.cleared_lines, 1);
        assert!(!report.game_over);
        assert_eq!(session.score(), 100);

        // Pieces now pile up on the tower right at the spawn point.
        let mut score_before_reset = None;
        for _ in 0..10 {
            let score = session.score();
            if session.hard_drop_and_lock().game_over {
                score_before_reset = Some(score);
                break;
            }
        }
        assert_eq!(score_before_reset, Some(100));
        assert!(session.grid().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.game_overs(), 1);
        assert!(session.grid().fits(session.falling_piece()));
    }

    #[test]
    fn test_blocked_moves_are_ignored() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 0, 5));
        let before = *session.falling_piece();
        let report = session.update(
            &FrameInput::from_events([InputEvent::MoveLeft]),
            FrameTime::new(FRAME_MS, FRAME_MS),
        );
        assert!(report.locks.is_empty());
        assert_eq!(*session.falling_piece(), before);

        session.update(
            &FrameInput::from_events([InputEvent::MoveRight, InputEvent::MoveRight]),
            FrameTime::new(2 * FRAME_MS, FRAME_MS),
        );
        assert_eq!(session.falling_piece().x(), 2);
    }

    #[test]
    fn test_rotation_fails_near_wall_without_kick() {
        // Vertical I against the right wall cannot turn horizontal.
        let piece = Piece::at(PieceKind::I, 9, 5).rotated();
        let mut session = session_with(Grid::new(), piece);
        assert!(session.try_rotate().is_err());
        assert_eq!(*session.falling_piece(), piece);

        let mut session = session_with(Grid::new(), Piece::at(PieceKind::T, 4, 5));
        session.try_rotate().unwrap();
        assert_eq!(session.falling_piece().shape().width(), 2);
        assert_eq!((session.falling_piece().x(), session.falling_piece().y()), (4, 5));
    }

    #[test]
    fn test_soft_drop_press_steps_once_and_charges() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::T, 4, 0));
        session.update(
            &FrameInput::from_events([InputEvent::SoftDropPress]).held(true),
            FrameTime::new(100, FRAME_MS),
        );
        assert_eq!(session.falling_piece().y(), 1);
        assert_eq!(session.charge(), DropCharge::Charging { started_at: 100 });

        // A repeated press while charging neither moves nor restarts the charge.
        session.update(
            &FrameInput::from_events([InputEvent::SoftDropPress]).held(true),
            FrameTime::new(116, FRAME_MS),
        );
        assert_eq!(session.falling_piece().y(), 1);
        assert_eq!(session.charge(), DropCharge::Charging { started_at: 100 });
    }

    #[test]
    fn test_held_soft_drop_fires_hard_drop() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 4, 0));
        session.update(
            &FrameInput::from_events([InputEvent::SoftDropPress]).held(true),
            FrameTime::new(0, 0),
        );
        let report = session.update(&FrameInput::new().held(true), FrameTime::new(499, 0));
        assert!(report.locks.is_empty());

        let report = session.update(&FrameInput::new().held(true), FrameTime::new(500, 0));
        assert_eq!(report.locks.len(), 1);
        assert!(session.charge().is_idle());
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(session.grid().cell(x, y), Some(Cell::Filled(PieceKind::O)));
        }
    }

    #[test]
    fn test_release_cancels_charge() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 4, 0));
        session.update(
            &FrameInput::from_events([InputEvent::SoftDropPress]).held(true),
            FrameTime::new(0, 0),
        );
        session.update(
            &FrameInput::from_events([InputEvent::SoftDropRelease]),
            FrameTime::new(300, 0),
        );
        assert!(session.charge().is_idle());
        let report = session.update(&FrameInput::new(), FrameTime::new(600, 0));
        assert!(report.locks.is_empty());
        assert!(session.grid().is_empty());
        assert_eq!(session.falling_piece().y(), 1);
    }

    #[test]
    fn test_held_soft_drop_accelerates_gravity() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 4, 0));
        session.update(&FrameInput::new().held(true), FrameTime::new(50, 50));
        assert_eq!(session.falling_piece().y(), 1);
        session.update(&FrameInput::new(), FrameTime::new(100, 50));
        assert_eq!(session.falling_piece().y(), 1);
        session.update(&FrameInput::new(), FrameTime::new(250, 150));
        assert_eq!(session.falling_piece().y(), 2);
    }

    #[test]
    fn test_moving_off_ledge_cancels_grace() {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        // A one-cell ledge under column 4 at row 10.
        rows[10][4] = Cell::Filled(PieceKind::L);
        let mut session = session_with(Grid::from_rows(rows), Piece::at(PieceKind::O, 4, 8));

        session.update(&FrameInput::new(), FrameTime::new(200, 200));
        assert_eq!(session.phase(), PiecePhase::Grace { landed_at: 200 });

        // Slide right off the ledge: nothing below any more.
        session.update(
            &FrameInput::from_events([InputEvent::MoveRight]),
            FrameTime::new(300, 100),
        );
        assert_eq!(session.falling_piece().x(), 5);
        assert!(session.phase().is_falling());

        // Well past the original grace deadline, the piece has not locked.
        let report = session.update(&FrameInput::new(), FrameTime::new(800, 100));
        assert!(report.locks.is_empty());
        assert_eq!(session.grid().occupied_count(), 1);
    }

    #[test]
    fn test_quit_skips_timers() {
        let mut session = session_with(Grid::new(), Piece::at(PieceKind::O, 4, 18));
        session.update(&FrameInput::new(), FrameTime::new(200, 200));
        assert!(session.phase().is_grace());

        let report = session.update(
            &FrameInput::from_events([InputEvent::Quit, InputEvent::MoveLeft]),
            FrameTime::new(1_000, 800),
        );
        assert!(report.quit);
        assert!(report.locks.is_empty());
        assert!(session.grid().is_empty());
        assert_eq!(session.falling_piece().x(), 4);
    }

    #[test]
    fn test_from_parts_draws_first_generated_piece_next() {
        let seed = PieceSeed::from(9);
        let expected: Vec<PieceKind> = {
            let mut generator = PieceGenerator::new(seed);
            (0..3).map(|_| generator.next_kind()).collect()
        };

        let mut session = GameSession::from_parts(
            GameConfig::default(),
            Grid::new(),
            Piece::at(PieceKind::O, 0, 0),
            seed,
        );
        let mut spawned = vec![];
        for _ in 0..3 {
            _ = session.hard_drop_and_lock();
            spawned.push(session.falling_piece().kind());
        }
        assert_eq!(spawned, expected);
        assert_eq!(session.seed(), seed);
    }

    #[test]
    fn test_phase_transitions() {
        let phase = PiecePhase::Falling.landed(10);
        assert_eq!(phase, PiecePhase::Grace { landed_at: 10 });
        assert_eq!(phase.landed(40), phase);
        assert!(!phase.lock_due(509, 500));
        assert!(phase.lock_due(510, 500));
        assert_eq!(phase.reevaluated(false), phase);
        assert_eq!(phase.reevaluated(true), PiecePhase::Falling);
        assert!(!PiecePhase::Falling.lock_due(u64::MAX, 500));
    }

    #[test]
    fn test_charge_ready_requires_hold() {
        let charge = DropCharge::Charging { started_at: 100 };
        assert!(!charge.ready(600, false, 500));
        assert!(!charge.ready(599, true, 500));
        assert!(charge.ready(600, true, 500));
        assert!(!DropCharge::Idle.ready(10_000, true, 500));
    }
}
