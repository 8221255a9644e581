use serde::{Deserialize, Serialize};
use steel::*;

use crate::consts::{ENTROPY_DELAY_SLOTS, INTERMISSION_SLOTS};
use crate::error::GameError;
use crate::state::board_pda;

use super::GameAccount;

/// Board is a singleton account pointing at the round currently taking stakes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Board {
    /// The current round number.
    pub round_id: u64,

    /// The slot at which the current round starts accepting stakes.
    pub start_slot: u64,

    /// The slot at which the current round stops accepting stakes.
    pub end_slot: u64,

    /// The slot whose hash seeds the current round.
    pub seed_slot: u64,

    /// Pool waiting to be rolled into the next round.
    pub carryover: u64,
}

impl Board {
    pub fn pda() -> (Pubkey, u8) {
        board_pda()
    }

    pub fn is_open(&self, slot: u64) -> bool {
        slot >= self.start_slot && slot < self.end_slot
    }

    pub fn assert_open(&self, slot: u64) -> Result<(), GameError> {
        if self.is_open(slot) {
            Ok(())
        } else {
            Err(GameError::WindowClosed)
        }
    }

    pub fn assert_closed(&self, slot: u64) -> Result<(), GameError> {
        if slot >= self.end_slot {
            Ok(())
        } else {
            Err(GameError::WindowOpen)
        }
    }

    /// Moves the cursor to the next round after a short intermission.
    pub fn advance(&mut self, slot: u64, duration: u64) -> Result<u64, GameError> {
        self.round_id = self
            .round_id
            .checked_add(1)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.start_slot = slot
            .checked_add(INTERMISSION_SLOTS)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.end_slot = self
            .start_slot
            .checked_add(duration)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.seed_slot = self.end_slot;
        Ok(self.round_id)
    }

    /// Points the seed at a slot not yet produced, once the old one fell out of
    /// the slot history. Stakes stay closed.
    pub fn rearm_seed(&mut self, slot: u64) -> Result<u64, GameError> {
        self.seed_slot = slot
            .checked_add(ENTROPY_DELAY_SLOTS)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(self.seed_slot)
    }

    /// Hands the carried pool to the round being opened.
    pub fn take_carryover(&mut self) -> u64 {
        std::mem::take(&mut self.carryover)
    }
}

account!(GameAccount, Board);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let board = Board {
            round_id: 1,
            start_slot: 100,
            end_slot: 250,
            seed_slot: 250,
            carryover: 0,
        };
        assert_eq!(board.assert_open(99), Err(GameError::WindowClosed));
        assert!(board.assert_open(100).is_ok());
        assert!(board.assert_open(249).is_ok());
        assert_eq!(board.assert_open(250), Err(GameError::WindowClosed));
        assert_eq!(board.assert_closed(249), Err(GameError::WindowOpen));
        assert!(board.assert_closed(250).is_ok());
    }

    #[test]
    fn test_advance() {
        let mut board = Board::zeroed();
        board.round_id = 4;
        board.carryover = 77;
        assert_eq!(board.advance(1_000, 150).unwrap(), 5);
        assert_eq!(board.start_slot, 1_000 + INTERMISSION_SLOTS);
        assert_eq!(board.end_slot, 1_150 + INTERMISSION_SLOTS);
        assert_eq!(board.seed_slot, board.end_slot);
        assert!(!board.is_open(1_000));
        assert_eq!(board.take_carryover(), 77);
        assert_eq!(board.carryover, 0);
    }

    #[test]
    fn test_rearm_keeps_window_closed() {
        let mut board = Board::zeroed();
        board.advance(1_000, 150).unwrap();
        let end = board.end_slot;

        assert_eq!(board.rearm_seed(end + 900).unwrap(), end + 900 + ENTROPY_DELAY_SLOTS);
        assert_eq!(board.end_slot, end);
        assert!(!board.is_open(end + 900));
        assert!(board.assert_closed(end + 900).is_ok());
    }
}
