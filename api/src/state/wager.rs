use serde::{Deserialize, Serialize};
use steel::*;

use crate::error::GameError;

/// Lifecycle of a single wager slot.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum WagerState {
    /// Nothing has ever been placed here (or the slot was recycled).
    Empty = 0,
    /// Placed and waiting for its first roll.
    Open = 1,
    /// Survived at least one roll without resolving.
    Carried = 2,
    /// Resolved (or moved to another slot); amount is zero.
    Cleared = 3,
}

/// How a cleared wager ended.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum WagerOutcome {
    None = 0,
    Won = 1,
    Lost = 2,
    Push = 3,
}

/// A single escrowed bet.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Wager {
    /// Escrowed stake in CRAP units.
    pub amount: u64,

    /// `WagerState` discriminant.
    pub state: u8,

    /// `WagerOutcome` discriminant of the last resolution.
    pub outcome: u8,

    /// Padding for alignment.
    pub _padding: [u8; 6],
}

impl Wager {
    pub fn state(&self) -> WagerState {
        WagerState::try_from(self.state).unwrap_or(WagerState::Empty)
    }

    pub fn outcome(&self) -> WagerOutcome {
        WagerOutcome::try_from(self.outcome).unwrap_or(WagerOutcome::None)
    }

    /// Whether the wager still has stake riding on the dice.
    pub fn is_active(&self) -> bool {
        self.amount > 0 && matches!(self.state(), WagerState::Open | WagerState::Carried)
    }

    /// Adds stake. A wager that already rides keeps its state.
    pub fn add(&mut self, amount: u64) -> Result<(), GameError> {
        let was_active = self.is_active();
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        if !was_active {
            self.state = WagerState::Open.into();
            self.outcome = WagerOutcome::None.into();
        }
        Ok(())
    }

    /// Marks a wager that survived a roll.
    pub fn carry(&mut self) {
        if self.is_active() {
            self.state = WagerState::Carried.into();
        }
    }

    /// Resolves the wager, zeroing its stake.
    pub fn clear(&mut self, outcome: WagerOutcome) {
        self.amount = 0;
        self.state = WagerState::Cleared.into();
        self.outcome = outcome.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wager_lifecycle() {
        let mut wager = Wager::default();
        assert_eq!(wager.state(), WagerState::Empty);
        assert!(!wager.is_active());

        wager.add(100).unwrap();
        assert_eq!(wager.state(), WagerState::Open);
        assert!(wager.is_active());

        wager.carry();
        assert_eq!(wager.state(), WagerState::Carried);

        wager.add(50).unwrap();
        assert_eq!(wager.amount, 150);
        assert_eq!(wager.state(), WagerState::Carried);

        wager.clear(WagerOutcome::Won);
        assert_eq!(wager.amount, 0);
        assert_eq!(wager.state(), WagerState::Cleared);
        assert_eq!(wager.outcome(), WagerOutcome::Won);
        assert!(!wager.is_active());
    }

    #[test]
    fn test_cleared_wager_reopens() {
        let mut wager = Wager::default();
        wager.add(10).unwrap();
        wager.clear(WagerOutcome::Lost);
        wager.add(5).unwrap();
        assert_eq!(wager.state(), WagerState::Open);
        assert_eq!(wager.outcome(), WagerOutcome::None);
    }

    #[test]
    fn test_carry_ignores_idle_slots() {
        let mut wager = Wager::default();
        wager.carry();
        assert_eq!(wager.state(), WagerState::Empty);
    }

    #[test]
    fn test_add_overflow() {
        let mut wager = Wager::default();
        wager.add(u64::MAX).unwrap();
        assert_eq!(wager.add(1), Err(GameError::ArithmeticOverflow));
    }
}
