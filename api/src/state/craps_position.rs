use serde::{Deserialize, Serialize};
use steel::*;

use crate::error::GameError;
use crate::state::craps_position_pda;

use super::{GameAccount, Wager};

/// Number of point numbers (4, 5, 6, 8, 9, 10).
pub const NUM_POINTS: usize = 6;

/// Number of hardway bets (hard 4, 6, 8, 10).
pub const NUM_HARDWAYS: usize = 4;

/// Number of dice sums (2..=12).
pub const NUM_SUMS: usize = 11;

/// CrapsPosition tracks every open wager of one player.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct CrapsPosition {
    /// The authority (owner) of this craps position.
    pub authority: Pubkey,

    /// The last round this position was settled against.
    pub epoch_id: u64,

    // ==================== LINE BETS ====================

    /// Pass Line bet.
    pub pass_line: Wager,

    /// Don't Pass bet.
    pub dont_pass: Wager,

    /// Pass Line odds (only with a point).
    pub pass_odds: Wager,

    /// Don't Pass odds (only with a point).
    pub dont_pass_odds: Wager,

    // ==================== COME BETS ====================
    // Fresh come bets wait in the box for one roll, then travel to their number.
    // Index: 0=4, 1=5, 2=6, 3=8, 4=9, 5=10

    /// Come bet waiting for its first roll.
    pub come_box: Wager,

    /// Don't Come bet waiting for its first roll.
    pub dont_come_box: Wager,

    /// Come bets on each point.
    pub come_bets: [Wager; NUM_POINTS],

    /// Come odds on each point.
    pub come_odds: [Wager; NUM_POINTS],

    /// Don't Come bets on each point.
    pub dont_come_bets: [Wager; NUM_POINTS],

    /// Don't Come odds on each point.
    pub dont_come_odds: [Wager; NUM_POINTS],

    // ==================== PLACE BETS ====================

    /// Place bets. Off during come-out rolls.
    pub place_bets: [Wager; NUM_POINTS],

    // ==================== HARDWAYS ====================
    // Index: 0=hard4, 1=hard6, 2=hard8, 3=hard10

    /// Hardway bets.
    pub hardways: [Wager; NUM_HARDWAYS],

    // ==================== SINGLE-ROLL BETS ====================

    /// Field bet (wins on 2,3,4,9,10,11,12).
    pub field_bet: Wager,

    /// Any Seven bet.
    pub any_seven: Wager,

    /// Any Craps bet (2, 3, or 12).
    pub any_craps: Wager,

    /// Yo Eleven bet.
    pub yo_eleven: Wager,

    /// Aces bet (2).
    pub aces: Wager,

    /// Twelve bet.
    pub twelve: Wager,

    // ==================== TRUE ODDS BETS ====================
    // Index: sum - 2. The 7 slot of yes/no is never used.

    /// Yes bets (sum before 7).
    pub yes_bets: [Wager; NUM_SUMS],

    /// No bets (7 before sum).
    pub no_bets: [Wager; NUM_SUMS],

    /// Next bets (one-roll hop on the sum).
    pub next_bets: [Wager; NUM_SUMS],

    // ==================== BONUS BETS ====================

    pub fire_bet: Wager,
    pub small_bet: Wager,
    pub tall_bet: Wager,
    pub all_bet: Wager,
    pub ride_line_bet: Wager,
    pub mugsy_bet: Wager,

    /// Distinct points made since the fire bet went up (bit = point index).
    pub fire_points_mask: u8,

    /// Pass line wins since the ride bet went up.
    pub ride_wins: u8,

    /// Totals rolled since the small bet went up (bit = total - 2).
    pub small_mask: u16,

    /// Totals rolled since the tall bet went up.
    pub tall_mask: u16,

    /// Totals rolled since the all bet went up.
    pub all_mask: u16,

    // ==================== TRACKING ====================

    /// Winnings and returned stakes waiting to be claimed.
    pub pending_winnings: u64,

    /// Lifetime amount wagered.
    pub total_wagered: u64,

    /// Lifetime profit paid on winning bets.
    pub total_won: u64,

    /// Lifetime stake forfeited on losing bets.
    pub total_lost: u64,

    /// Lifetime stake returned on pushes.
    pub total_pushed: u64,
}

impl CrapsPosition {
    pub fn pda(authority: Pubkey) -> (Pubkey, u8) {
        craps_position_pda(authority)
    }

    /// Every wager slot on the position.
    pub fn wagers(&self) -> impl Iterator<Item = &Wager> + '_ {
        [
            &self.pass_line,
            &self.dont_pass,
            &self.pass_odds,
            &self.dont_pass_odds,
            &self.come_box,
            &self.dont_come_box,
            &self.field_bet,
            &self.any_seven,
            &self.any_craps,
            &self.yo_eleven,
            &self.aces,
            &self.twelve,
            &self.fire_bet,
            &self.small_bet,
            &self.tall_bet,
            &self.all_bet,
            &self.ride_line_bet,
            &self.mugsy_bet,
        ]
        .into_iter()
        .chain(self.come_bets.iter())
        .chain(self.come_odds.iter())
        .chain(self.dont_come_bets.iter())
        .chain(self.dont_come_odds.iter())
        .chain(self.place_bets.iter())
        .chain(self.hardways.iter())
        .chain(self.yes_bets.iter())
        .chain(self.no_bets.iter())
        .chain(self.next_bets.iter())
    }

    pub fn has_active_bets(&self) -> bool {
        self.wagers().any(Wager::is_active)
    }

    /// Total stake currently riding on the dice.
    pub fn total_at_risk(&self) -> Result<u64, GameError> {
        self.wagers()
            .filter(|w| w.is_active())
            .try_fold(0u64, |total, w| {
                total
                    .checked_add(w.amount)
                    .ok_or(GameError::ArithmeticOverflow)
            })
    }
}

/// Helper: Convert point number (4,5,6,8,9,10) to array index (0-5).
pub fn point_to_index(point: u8) -> Option<usize> {
    match point {
        4 => Some(0),
        5 => Some(1),
        6 => Some(2),
        8 => Some(3),
        9 => Some(4),
        10 => Some(5),
        _ => None,
    }
}

/// Helper: Convert array index (0-5) to point number (4,5,6,8,9,10).
pub fn index_to_point(index: usize) -> Option<u8> {
    match index {
        0 => Some(4),
        1 => Some(5),
        2 => Some(6),
        3 => Some(8),
        4 => Some(9),
        5 => Some(10),
        _ => None,
    }
}

/// Helper: Convert hardway (4,6,8,10) to array index (0-3).
pub fn hardway_to_index(hardway: u8) -> Option<usize> {
    match hardway {
        4 => Some(0),
        6 => Some(1),
        8 => Some(2),
        10 => Some(3),
        _ => None,
    }
}

/// Helper: Convert dice sum (2..=12) to array index (0-10).
pub fn sum_to_index(sum: u8) -> Option<usize> {
    match sum {
        2..=12 => Some(sum as usize - 2),
        _ => None,
    }
}

account!(GameAccount, CrapsPosition);
