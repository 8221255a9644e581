use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use steel::*;

use crate::consts::PHASE_LOG_LEN;
use crate::entropy::Roll;
use crate::error::GameError;
use crate::state::craps_game_pda;

use super::{point_to_index, GameAccount};

/// Table phase before a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ComeOut,
    Point(u8),
}

/// What a roll did to the table, as seen by the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Point phase roll that neither made the point nor sevened out.
    None,
    /// Come-out 7 or 11.
    Natural,
    /// Come-out 2, 3 or 12.
    Craps,
    PointEstablished(u8),
    PointMade(u8),
    SevenOut,
}

impl Phase {
    /// Decodes a stored point byte (0 = come-out).
    pub fn from_point(point: u8) -> Result<Self, GameError> {
        match point {
            0 => Ok(Phase::ComeOut),
            p if point_to_index(p).is_some() => Ok(Phase::Point(p)),
            _ => Err(GameError::InvalidPoint),
        }
    }

    pub fn point(&self) -> u8 {
        match self {
            Phase::ComeOut => 0,
            Phase::Point(p) => *p,
        }
    }

    pub fn is_come_out(&self) -> bool {
        matches!(self, Phase::ComeOut)
    }

    /// Applies one dice sum to the phase.
    pub fn transition(self, sum: u8) -> (Phase, PhaseEvent) {
        match self {
            Phase::ComeOut => match sum {
                7 | 11 => (Phase::ComeOut, PhaseEvent::Natural),
                2 | 3 | 12 => (Phase::ComeOut, PhaseEvent::Craps),
                n => (Phase::Point(n), PhaseEvent::PointEstablished(n)),
            },
            Phase::Point(p) if sum == p => (Phase::ComeOut, PhaseEvent::PointMade(p)),
            Phase::Point(_) if sum == 7 => (Phase::ComeOut, PhaseEvent::SevenOut),
            Phase::Point(p) => (Phase::Point(p), PhaseEvent::None),
        }
    }
}

/// What a settle call does with a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleTarget {
    /// Resolve the position's bets against a roll made in this phase.
    Settle(Phase),
    /// Nothing riding; the position just moves up to the round.
    Sync,
}

/// CrapsGame is a singleton account that tracks the shared table.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct CrapsGame {
    /// The last round whose roll was applied to the table (0 = none yet).
    pub epoch_id: u64,

    /// Bumped on every mutation.
    pub version: u64,

    /// The current point (0 = no point/come-out phase, 4/5/6/8/9/10 = established point).
    pub point: u8,

    /// Whether we're in the come-out phase.
    pub is_come_out: u8, // 0 = false, 1 = true

    /// Dice of the last applied roll.
    pub last_die1: u8,
    pub last_die2: u8,

    /// Padding for alignment.
    pub _padding: [u8; 4],

    /// Pre-roll point of each recently applied round, indexed by `round_id % PHASE_LOG_LEN`.
    #[serde(with = "BigArray")]
    pub phase_log: [u8; PHASE_LOG_LEN],

    /// Rolls since the current shooter took the dice.
    pub shooter_rolls: u64,

    /// CRAP available to pay winning bets.
    pub house_bankroll: u64,

    /// Worst-case profit owed to bets still riding.
    pub reserved_payouts: u64,

    /// Total CRAP wagered at the table.
    pub total_wagered: u64,

    /// Total CRAP collected from losing bets.
    pub total_collected: u64,

    /// Total profit paid to winning bets.
    pub total_payouts: u64,
}

impl CrapsGame {
    pub fn pda() -> (Pubkey, u8) {
        craps_game_pda()
    }

    /// Check if we're in come-out phase.
    pub fn is_coming_out(&self) -> bool {
        self.is_come_out == 1
    }

    pub fn phase(&self) -> Result<Phase, GameError> {
        Phase::from_point(self.point)
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.point = phase.point();
        self.is_come_out = if phase.is_come_out() { 1 } else { 0 };
    }

    /// Applies the roll of `round_id` to the table. Rounds must arrive in order.
    pub fn apply_roll(&mut self, round_id: u64, roll: Roll) -> Result<PhaseEvent, GameError> {
        let next = self
            .epoch_id
            .checked_add(1)
            .ok_or(GameError::ArithmeticOverflow)?;
        if round_id != next {
            return Err(GameError::StaleEpoch);
        }

        let before = self.phase()?;
        let (after, event) = before.transition(roll.sum());
        self.phase_log[log_index(round_id)] = before.point();
        self.set_phase(after);
        self.epoch_id = round_id;
        self.last_die1 = roll.die1;
        self.last_die2 = roll.die2;
        self.shooter_rolls = match event {
            PhaseEvent::SevenOut => 0,
            _ => self.shooter_rolls.saturating_add(1),
        };
        self.version = self.version.wrapping_add(1);
        Ok(event)
    }

    /// Applies the roll of `round_id` unless the table already has it.
    pub fn catch_up(&mut self, round_id: u64, roll: Roll) -> Result<Option<PhaseEvent>, GameError> {
        if round_id <= self.epoch_id {
            return Ok(None);
        }
        self.apply_roll(round_id, roll).map(Some)
    }

    /// Decides how a position last settled at `position_epoch` moves to `round_id`.
    ///
    /// The table must already hold the roll. A position with bets can only take
    /// the round right after its own epoch.
    pub fn settle_target(
        &self,
        position_epoch: u64,
        has_bets: bool,
        round_id: u64,
    ) -> Result<SettleTarget, GameError> {
        if round_id > self.epoch_id {
            return Err(GameError::StaleEpoch);
        }
        if position_epoch == round_id {
            return Err(GameError::AlreadySettled);
        }
        if position_epoch.checked_add(1) != Some(round_id) {
            if has_bets || position_epoch > round_id {
                return Err(GameError::StaleEpoch);
            }
            return Ok(SettleTarget::Sync);
        }
        Ok(SettleTarget::Settle(self.phase_before(round_id)?))
    }

    /// The phase the table was in when the roll of `round_id` landed.
    pub fn phase_before(&self, round_id: u64) -> Result<Phase, GameError> {
        if round_id == 0
            || round_id > self.epoch_id
            || self.epoch_id - round_id >= PHASE_LOG_LEN as u64
        {
            return Err(GameError::StaleEpoch);
        }
        Phase::from_point(self.phase_log[log_index(round_id)])
    }

    /// Whether a position last settled at `epoch_id` can no longer be settled.
    pub fn is_beyond_log(&self, epoch_id: u64) -> bool {
        self.epoch_id.saturating_sub(epoch_id) > PHASE_LOG_LEN as u64
    }

    /// Bankroll not yet promised to open bets.
    pub fn available_bankroll(&self) -> u64 {
        self.house_bankroll.saturating_sub(self.reserved_payouts)
    }

    /// Earmarks bankroll for a newly placed bet.
    pub fn reserve(&mut self, stake: u64, max_profit: u64) -> Result<(), GameError> {
        if max_profit > self.available_bankroll() {
            return Err(GameError::InsufficientBankroll);
        }
        self.reserved_payouts = self
            .reserved_payouts
            .checked_add(max_profit)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.total_wagered = self
            .total_wagered
            .checked_add(stake)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Books a resolved settlement: losing stakes join the bankroll, profit leaves it.
    pub fn book_settlement(
        &mut self,
        profit: u64,
        collected: u64,
        released: u64,
    ) -> Result<(), GameError> {
        self.house_bankroll = self
            .house_bankroll
            .checked_add(collected)
            .ok_or(GameError::ArithmeticOverflow)?
            .checked_sub(profit)
            .ok_or(GameError::InsufficientBankroll)?;
        self.reserved_payouts = self
            .reserved_payouts
            .checked_sub(released)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.total_collected = self
            .total_collected
            .checked_add(collected)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.total_payouts = self
            .total_payouts
            .checked_add(profit)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    pub fn fund(&mut self, amount: u64) -> Result<(), GameError> {
        self.house_bankroll = self
            .house_bankroll
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }
}

fn log_index(round_id: u64) -> usize {
    (round_id % PHASE_LOG_LEN as u64) as usize
}

account!(GameAccount, CrapsGame);

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_table() -> CrapsGame {
        let mut game = CrapsGame::zeroed();
        game.set_phase(Phase::ComeOut);
        game
    }

    fn roll(d1: u8, d2: u8) -> Roll {
        Roll::from_dice(d1, d2).unwrap()
    }

    #[test]
    fn test_come_out_transitions() {
        assert_eq!(Phase::ComeOut.transition(7), (Phase::ComeOut, PhaseEvent::Natural));
        assert_eq!(Phase::ComeOut.transition(11), (Phase::ComeOut, PhaseEvent::Natural));
        for craps in [2, 3, 12] {
            assert_eq!(Phase::ComeOut.transition(craps), (Phase::ComeOut, PhaseEvent::Craps));
        }
        for point in [4, 5, 6, 8, 9, 10] {
            assert_eq!(
                Phase::ComeOut.transition(point),
                (Phase::Point(point), PhaseEvent::PointEstablished(point))
            );
        }
    }

    #[test]
    fn test_point_transitions() {
        assert_eq!(Phase::Point(6).transition(6), (Phase::ComeOut, PhaseEvent::PointMade(6)));
        assert_eq!(Phase::Point(6).transition(7), (Phase::ComeOut, PhaseEvent::SevenOut));
        assert_eq!(Phase::Point(6).transition(8), (Phase::Point(6), PhaseEvent::None));
        assert_eq!(Phase::Point(6).transition(11), (Phase::Point(6), PhaseEvent::None));
    }

    #[test]
    fn test_apply_roll_in_order() {
        let mut game = fresh_table();
        assert_eq!(game.apply_roll(2, roll(2, 2)), Err(GameError::StaleEpoch));

        let event = game.apply_roll(1, roll(2, 2)).unwrap();
        assert_eq!(event, PhaseEvent::PointEstablished(4));
        assert_eq!(game.point, 4);
        assert!(!game.is_coming_out());
        assert_eq!(game.epoch_id, 1);
        assert_eq!((game.last_die1, game.last_die2), (2, 2));

        assert_eq!(game.apply_roll(1, roll(3, 4)), Err(GameError::StaleEpoch));

        let event = game.apply_roll(2, roll(3, 4)).unwrap();
        assert_eq!(event, PhaseEvent::SevenOut);
        assert_eq!(game.point, 0);
        assert!(game.is_coming_out());
        assert_eq!(game.shooter_rolls, 0);
    }

    #[test]
    fn test_point_flag_invariant() {
        let mut game = fresh_table();
        let rolls = [(1, 3), (2, 2), (5, 5), (1, 1), (3, 4), (6, 6), (4, 5), (3, 6), (2, 5)];
        for (i, (d1, d2)) in rolls.iter().enumerate() {
            game.apply_roll(i as u64 + 1, roll(*d1, *d2)).unwrap();
            assert_eq!(game.point == 0, game.is_coming_out());
            assert!([0, 4, 5, 6, 8, 9, 10].contains(&game.point));
        }
    }

    #[test]
    fn test_phase_log() {
        let mut game = fresh_table();
        game.apply_roll(1, roll(4, 4)).unwrap();
        game.apply_roll(2, roll(1, 2)).unwrap();
        game.apply_roll(3, roll(6, 2)).unwrap();
        assert_eq!(game.phase_before(1).unwrap(), Phase::ComeOut);
        assert_eq!(game.phase_before(2).unwrap(), Phase::Point(8));
        assert_eq!(game.phase_before(3).unwrap(), Phase::Point(8));
        assert_eq!(game.phase().unwrap(), Phase::ComeOut);
        assert_eq!(game.phase_before(4), Err(GameError::StaleEpoch));
        assert_eq!(game.phase_before(0), Err(GameError::StaleEpoch));
    }

    #[test]
    fn test_phase_log_window() {
        let mut game = fresh_table();
        for id in 1..=(PHASE_LOG_LEN as u64 + 1) {
            game.apply_roll(id, roll(1, 2)).unwrap();
        }
        assert_eq!(game.phase_before(1), Err(GameError::StaleEpoch));
        assert!(game.phase_before(2).is_ok());
        assert!(!game.is_beyond_log(1));
        assert!(game.is_beyond_log(0));
    }

    #[test]
    fn test_roll_applied_once() {
        let mut game = fresh_table();
        assert_eq!(game.catch_up(1, roll(2, 2)), Ok(Some(PhaseEvent::PointEstablished(4))));
        let version = game.version;

        // A second settle of the same round leaves the table alone.
        assert_eq!(game.catch_up(1, roll(2, 2)), Ok(None));
        assert_eq!(game.epoch_id, 1);
        assert_eq!(game.point, 4);
        assert_eq!(game.version, version);

        assert_eq!(game.catch_up(3, roll(3, 4)), Err(GameError::StaleEpoch));
        assert_eq!(game.epoch_id, 1);
    }

    #[test]
    fn test_positions_share_round() {
        let mut game = fresh_table();
        game.catch_up(1, roll(2, 2)).unwrap();

        // Both read the come-out phase even though the table now sits on a point.
        assert_eq!(game.phase().unwrap(), Phase::Point(4));
        assert_eq!(game.settle_target(0, true, 1), Ok(SettleTarget::Settle(Phase::ComeOut)));
        game.catch_up(1, roll(2, 2)).unwrap();
        assert_eq!(game.settle_target(0, true, 1), Ok(SettleTarget::Settle(Phase::ComeOut)));

        game.catch_up(2, roll(5, 5)).unwrap();
        assert_eq!(game.settle_target(1, true, 2), Ok(SettleTarget::Settle(Phase::Point(4))));
    }

    #[test]
    fn test_settle_sequencing() {
        let mut game = fresh_table();
        game.catch_up(1, roll(1, 2)).unwrap();
        game.catch_up(2, roll(4, 4)).unwrap();

        // Repeat.
        assert_eq!(game.settle_target(2, true, 2), Err(GameError::AlreadySettled));
        assert_eq!(game.settle_target(1, false, 1), Err(GameError::AlreadySettled));

        // Skipping a round with bets riding.
        assert_eq!(game.settle_target(0, true, 2), Err(GameError::StaleEpoch));

        // Round not applied yet.
        assert_eq!(game.settle_target(2, true, 3), Err(GameError::StaleEpoch));

        // Empty positions only ever move forward.
        assert_eq!(game.settle_target(0, false, 2), Ok(SettleTarget::Sync));
        assert_eq!(game.settle_target(2, false, 1), Err(GameError::StaleEpoch));
    }

    #[test]
    fn test_reserve_and_book() {
        let mut game = fresh_table();
        game.fund(1_000).unwrap();
        game.reserve(100, 600).unwrap();
        assert_eq!(game.available_bankroll(), 400);
        assert_eq!(game.reserve(100, 401), Err(GameError::InsufficientBankroll));

        // Bet won 300 profit; another bet lost 50.
        game.book_settlement(300, 50, 600).unwrap();
        assert_eq!(game.house_bankroll, 750);
        assert_eq!(game.reserved_payouts, 0);
        assert_eq!(game.total_payouts, 300);
        assert_eq!(game.total_collected, 50);
        assert_eq!(game.total_wagered, 100);
    }
}
