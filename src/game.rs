use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::GameOptions;
use crate::connectivity;
use crate::error::{BoardError, GameError};
use crate::history::MoveHistory;
use crate::types::{GameEvent, GameSnapshot, MoveRecord, Player, Position};

/// Pluggable move provider for the computer side. The engine validates
/// whatever it returns like any other move.
pub trait MoveSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position>;
}

/// Picks the first empty cell in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstEmptyCellSelector;

impl MoveSelector for FirstEmptyCellSelector {
    fn select_move(&self, board: &Board, _player: Player) -> Option<Position> {
        board.empty_positions().first().copied()
    }
}

pub type SubscriptionId = u32;

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Whether a placed stone is appended to the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyMode {
    Record,
    Replay,
}

/// Everything that replay rebuilds from scratch.
#[derive(Debug, Clone)]
struct Play {
    board: Board,
    current_player: Player,
    game_over: bool,
    winner: Option<Player>,
    move_count: u32,
    swap_available: bool,
    swap_rule_used: bool,
    opening: Option<Position>,
    winning_path: Vec<Position>,
}

impl Play {
    fn new(options: &GameOptions) -> Result<Self, GameError> {
        let board = Board::new(options.board_size)
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            board,
            current_player: options.first_player,
            game_over: false,
            winner: None,
            move_count: 0,
            swap_available: false,
            swap_rule_used: false,
            opening: None,
            winning_path: Vec::new(),
        })
    }
}

/// Hex game engine: owns the board and the move history, enforces legality,
/// the swap rule and the win condition, and notifies subscribers after
/// every mutation.
///
/// Subscribers only receive a shared event; the engine is not re-entrant.
pub struct GameEngine {
    options: GameOptions,
    play: Play,
    history: MoveHistory,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("options", &self.options)
            .field("play", &self.play)
            .field("history", &self.history)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl GameEngine {
    pub fn new(options: GameOptions) -> Result<Self, GameError> {
        options.validate()?;
        Ok(Self {
            play: Play::new(&options)?,
            options,
            history: MoveHistory::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn with_board_size(size: usize) -> Result<Self, GameError> {
        Self::new(GameOptions::with_board_size(size))
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn board(&self) -> &Board {
        &self.play.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn current_player(&self) -> Player {
        self.play.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.play.game_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.play.winner
    }

    pub fn move_count(&self) -> u32 {
        self.play.move_count
    }

    pub fn swap_available(&self) -> bool {
        self.play.swap_available
    }

    pub fn swap_rule_used(&self) -> bool {
        self.play.swap_rule_used
    }

    /// Winning chain cached when the game ended; empty while in progress.
    pub fn winning_path(&self) -> &[Position] {
        &self.play.winning_path
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player: self.play.current_player,
            game_over: self.play.game_over,
            winner: self.play.winner,
            move_count: self.play.move_count,
            swap_available: self.play.swap_available,
            swap_rule_used: self.play.swap_rule_used,
            history_len: self.history.len(),
            cursor: self.history.cursor(),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Starts over with the current options. Subscribers are kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<GameSnapshot, GameError> {
        self.play = Play::new(&self.options)?;
        self.history.reset();
        debug!(size = self.options.board_size, "new game");
        Ok(self.notify_state())
    }

    /// Takes already validated options; the next reset picks them up.
    pub(crate) fn set_options(&mut self, options: GameOptions) {
        self.options = options;
    }

    /// Replaces the options and starts a new game. On invalid options
    /// nothing changes.
    pub fn reconfigure(&mut self, options: GameOptions) -> Result<GameSnapshot, GameError> {
        options.validate()?;
        self.options = options;
        self.new_game()
    }

    /// Places a stone for the side to move.
    ///
    /// On rejection the engine is untouched.
    #[instrument(skip(self), fields(player = %self.play.current_player))]
    pub fn apply_move(&mut self, pos: Position) -> Result<GameSnapshot, GameError> {
        if self.play.game_over {
            warn!(%pos, "move after game over");
            return Err(GameError::GameOver);
        }

        let index = self.place_stone(pos, ApplyMode::Record).map_err(|e| {
            warn!(error = %e, "move rejected");
            GameError::MoveRejected(e)
        })?;

        if let Some(index) = index {
            let record = *self.history.at(index)?;
            self.notify(GameEvent::MoveAdded { index, record });
        }
        Ok(self.notify_state())
    }

    /// Asks `selector` for a move for the side to move and applies it.
    pub fn apply_selected_move(
        &mut self,
        selector: &dyn MoveSelector,
    ) -> Result<GameSnapshot, GameError> {
        if self.play.game_over {
            return Err(GameError::GameOver);
        }
        let pos = selector
            .select_move(&self.play.board, self.play.current_player)
            .ok_or(GameError::NoMoveAvailable)?;
        self.apply_move(pos)
    }

    /// Pie rule: the side to move takes over the opening stone, mirrored
    /// through the board center. Does not consume a move or pass the turn.
    #[instrument(skip(self), fields(player = %self.play.current_player))]
    pub fn swap_first_move(&mut self) -> Result<GameSnapshot, GameError> {
        if !self.can_swap() {
            return Err(GameError::SwapNotAvailable);
        }
        self.perform_swap(ApplyMode::Record)?;
        Ok(self.notify_state())
    }

    /// Rebuilds the position after history entry `index` without altering
    /// the history, and moves the cursor there.
    #[instrument(skip(self))]
    pub fn replay_to(&mut self, index: usize) -> Result<GameSnapshot, GameError> {
        self.history.at(index)?;
        let records = self.history.moves()[..=index].to_vec();

        let checkpoint = self.play.clone();
        self.play = Play::new(&self.options)?;
        for (i, record) in records.iter().enumerate() {
            if let Err(reason) = self.apply_record(i, record, ApplyMode::Replay) {
                self.play = checkpoint;
                return Err(GameError::InvalidRecord {
                    index: i,
                    applied: i,
                    reason,
                });
            }
        }
        self.history.seek(index)?;

        debug!(index, move_count = self.play.move_count, "replayed history");
        Ok(self.notify_state())
    }

    /// Starts a new game and plays `moves` in order, recording them.
    ///
    /// Stops at the first illegal record and leaves the engine exactly as it
    /// was after the last good one.
    #[instrument(skip(self, moves), fields(len = moves.len()))]
    pub fn load_moves(&mut self, moves: &[MoveRecord]) -> Result<GameSnapshot, GameError> {
        self.play = Play::new(&self.options)?;
        self.history.reset();

        for (i, record) in moves.iter().enumerate() {
            let checkpoint = (self.play.clone(), self.history.clone());
            if let Err(reason) = self.apply_record(i, record, ApplyMode::Record) {
                (self.play, self.history) = checkpoint;
                warn!(index = i, %reason, "stopped loading moves");
                self.notify_state();
                return Err(GameError::InvalidRecord {
                    index: i,
                    applied: i,
                    reason,
                });
            }
        }

        debug!(move_count = self.play.move_count, "loaded moves");
        Ok(self.notify_state())
    }

    fn can_swap(&self) -> bool {
        self.play.swap_available && self.play.move_count == 1 && !self.play.game_over
    }

    /// The one move-application path. Returns the history index when the
    /// move was recorded.
    fn place_stone(&mut self, pos: Position, mode: ApplyMode) -> Result<Option<usize>, BoardError> {
        let player = self.play.current_player;
        self.play.board.place(pos, player)?;

        self.play.move_count += 1;
        if self.play.move_count == 1 {
            self.play.swap_available = true;
            self.play.opening = Some(pos);
        } else {
            self.play.swap_available = false;
        }

        let index = match mode {
            ApplyMode::Record => {
                let record = MoveRecord::new(player, pos, self.play.move_count);
                Some(self.history.append(record))
            }
            ApplyMode::Replay => None,
        };

        if connectivity::is_connected(&self.play.board, player) {
            self.play.game_over = true;
            self.play.winner = Some(player);
            self.play.swap_available = false;
            self.play.winning_path = connectivity::find_path(&self.play.board, player);
            info!(winner = %player, moves = self.play.move_count, "game over");
        } else {
            self.play.current_player = player.opponent();
        }

        Ok(index)
    }

    fn perform_swap(&mut self, mode: ApplyMode) -> Result<(), GameError> {
        let opening = self.play.opening.ok_or(GameError::SwapNotAvailable)?;
        let target = opening.reflected(self.play.board.size());

        if mode == ApplyMode::Record {
            self.history.prune();
            self.history.mark_swap(target)?;
        }

        self.play.board.clear(opening).map_err(GameError::MoveRejected)?;
        let player = self.play.current_player;
        self.play.board.place(target, player).map_err(GameError::MoveRejected)?;

        self.play.swap_rule_used = true;
        self.play.swap_available = false;
        debug!(from = %opening, to = %target, "swap rule applied");
        Ok(())
    }

    /// Applies one stored record, swap included. Errors carry the reason
    /// the record is illegal in the current position.
    fn apply_record(
        &mut self,
        index: usize,
        record: &MoveRecord,
        mode: ApplyMode,
    ) -> Result<(), String> {
        if self.play.game_over {
            return Err("game is already over".to_string());
        }
        if record.swap_used {
            if index != 0 {
                return Err("swap recorded on a move other than the first".to_string());
            }
            let target = record.position.reflected(self.play.board.size());
            if let Some(recorded) = record.swap_new_position
                && recorded != target
            {
                return Err(format!(
                    "swap target {recorded} is not the reflection {target} of the opening"
                ));
            }
        }

        self.place_stone(record.position, mode).map_err(|e| e.to_string())?;

        if record.swap_used {
            if !self.can_swap() {
                return Err("swap is not available after the opening".to_string());
            }
            self.perform_swap(mode).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn notify(&mut self, event: GameEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    fn notify_state(&mut self) -> GameSnapshot {
        let snapshot = self.snapshot();
        self.notify(GameEvent::StateChanged(snapshot));
        snapshot
    }
}
