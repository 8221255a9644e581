use rngcraps_api::prelude::*;

/// A payout ratio: a winning stake `s` earns `s * num / den` profit (floored).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Odds {
    pub num: u64,
    pub den: u64,
}

impl Odds {
    pub const fn new(num: u64, den: u64) -> Self {
        Self { num, den }
    }

    /// Profit on a winning stake, not including the stake itself.
    pub fn profit(&self, stake: u64) -> Result<u64, GameError> {
        if self.den == 0 {
            return Err(GameError::ArithmeticOverflow);
        }
        let profit = (stake as u128)
            .checked_mul(self.num as u128)
            .ok_or(GameError::ArithmeticOverflow)?
            / self.den as u128;
        u64::try_from(profit).map_err(|_| GameError::ArithmeticOverflow)
    }
}

pub const EVEN_MONEY: Odds = Odds::new(PASS_LINE_PAYOUT_NUM, PASS_LINE_PAYOUT_DEN);

/// Check if dice sum is a "craps" (2, 3, or 12).
pub fn is_craps(sum: u8) -> bool {
    sum == 2 || sum == 3 || sum == 12
}

/// Check if dice sum is a "natural" (7 or 11).
pub fn is_natural(sum: u8) -> bool {
    sum == 7 || sum == 11
}

/// Check if dice sum is a point number (4, 5, 6, 8, 9, 10).
pub fn is_point_number(sum: u8) -> bool {
    matches!(sum, 4 | 5 | 6 | 8 | 9 | 10)
}

/// Check if dice sum wins a field bet (2, 3, 4, 9, 10, 11, 12).
pub fn is_field_winner(sum: u8) -> bool {
    matches!(sum, 2 | 3 | 4 | 9 | 10 | 11 | 12)
}

/// Check if sum is valid for Yes/No bets (2-12 except 7).
pub fn is_valid_yes_no_sum(sum: u8) -> bool {
    (2..=12).contains(&sum) && sum != 7
}

/// Place bet payout on a point number.
pub fn place_odds(point: u8) -> Result<Odds, GameError> {
    match point {
        4 | 10 => Ok(Odds::new(PLACE_4_10_PAYOUT_NUM, PLACE_4_10_PAYOUT_DEN)),
        5 | 9 => Ok(Odds::new(PLACE_5_9_PAYOUT_NUM, PLACE_5_9_PAYOUT_DEN)),
        6 | 8 => Ok(Odds::new(PLACE_6_8_PAYOUT_NUM, PLACE_6_8_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

/// True odds behind a pass or come bet.
pub fn true_odds(point: u8) -> Result<Odds, GameError> {
    match point {
        4 | 10 => Ok(Odds::new(TRUE_ODDS_4_10_NUM, TRUE_ODDS_4_10_DEN)),
        5 | 9 => Ok(Odds::new(TRUE_ODDS_5_9_NUM, TRUE_ODDS_5_9_DEN)),
        6 | 8 => Ok(Odds::new(TRUE_ODDS_6_8_NUM, TRUE_ODDS_6_8_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

/// Lay odds behind a don't pass or don't come bet.
pub fn lay_odds(point: u8) -> Result<Odds, GameError> {
    match point {
        4 | 10 => Ok(Odds::new(LAY_4_10_PAYOUT_NUM, LAY_4_10_PAYOUT_DEN)),
        5 | 9 => Ok(Odds::new(LAY_5_9_PAYOUT_NUM, LAY_5_9_PAYOUT_DEN)),
        6 | 8 => Ok(Odds::new(LAY_6_8_PAYOUT_NUM, LAY_6_8_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

pub fn hardway_odds(number: u8) -> Result<Odds, GameError> {
    match number {
        4 | 10 => Ok(Odds::new(HARD_4_10_PAYOUT_NUM, HARD_4_10_PAYOUT_DEN)),
        6 | 8 => Ok(Odds::new(HARD_6_8_PAYOUT_NUM, HARD_6_8_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

pub fn yes_odds(sum: u8) -> Result<Odds, GameError> {
    match sum {
        2 | 12 => Ok(Odds::new(YES_2_12_PAYOUT_NUM, YES_2_12_PAYOUT_DEN)),
        3 | 11 => Ok(Odds::new(YES_3_11_PAYOUT_NUM, YES_3_11_PAYOUT_DEN)),
        4 | 10 => Ok(Odds::new(YES_4_10_PAYOUT_NUM, YES_4_10_PAYOUT_DEN)),
        5 | 9 => Ok(Odds::new(YES_5_9_PAYOUT_NUM, YES_5_9_PAYOUT_DEN)),
        6 | 8 => Ok(Odds::new(YES_6_8_PAYOUT_NUM, YES_6_8_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

pub fn no_odds(sum: u8) -> Result<Odds, GameError> {
    match sum {
        2 | 12 => Ok(Odds::new(NO_2_12_PAYOUT_NUM, NO_2_12_PAYOUT_DEN)),
        3 | 11 => Ok(Odds::new(NO_3_11_PAYOUT_NUM, NO_3_11_PAYOUT_DEN)),
        4 | 10 => Ok(Odds::new(NO_4_10_PAYOUT_NUM, NO_4_10_PAYOUT_DEN)),
        5 | 9 => Ok(Odds::new(NO_5_9_PAYOUT_NUM, NO_5_9_PAYOUT_DEN)),
        6 | 8 => Ok(Odds::new(NO_6_8_PAYOUT_NUM, NO_6_8_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

/// One-roll payout for a Next bet on `sum`.
pub fn hop_odds(sum: u8) -> Result<Odds, GameError> {
    match sum {
        2 => Ok(Odds::new(HOP_2_PAYOUT_NUM, HOP_2_PAYOUT_DEN)),
        3 => Ok(Odds::new(HOP_3_PAYOUT_NUM, HOP_3_PAYOUT_DEN)),
        4 => Ok(Odds::new(HOP_4_PAYOUT_NUM, HOP_4_PAYOUT_DEN)),
        5 => Ok(Odds::new(HOP_5_PAYOUT_NUM, HOP_5_PAYOUT_DEN)),
        6 => Ok(Odds::new(HOP_6_PAYOUT_NUM, HOP_6_PAYOUT_DEN)),
        7 => Ok(Odds::new(HOP_7_PAYOUT_NUM, HOP_7_PAYOUT_DEN)),
        8 => Ok(Odds::new(HOP_8_PAYOUT_NUM, HOP_8_PAYOUT_DEN)),
        9 => Ok(Odds::new(HOP_9_PAYOUT_NUM, HOP_9_PAYOUT_DEN)),
        10 => Ok(Odds::new(HOP_10_PAYOUT_NUM, HOP_10_PAYOUT_DEN)),
        11 => Ok(Odds::new(HOP_11_PAYOUT_NUM, HOP_11_PAYOUT_DEN)),
        12 => Ok(Odds::new(HOP_12_PAYOUT_NUM, HOP_12_PAYOUT_DEN)),
        _ => Err(GameError::InvalidPoint),
    }
}

/// Field payout for a winning sum.
pub fn field_odds(sum: u8, twelve_pays_triple: bool) -> Odds {
    match sum {
        2 => Odds::new(FIELD_PAYOUT_2_12_NUM, FIELD_PAYOUT_2_12_DEN),
        12 if twelve_pays_triple => {
            Odds::new(FIELD_PAYOUT_12_TRIPLE_NUM, FIELD_PAYOUT_12_TRIPLE_DEN)
        }
        12 => Odds::new(FIELD_PAYOUT_2_12_NUM, FIELD_PAYOUT_2_12_DEN),
        _ => Odds::new(FIELD_PAYOUT_NORMAL_NUM, FIELD_PAYOUT_NORMAL_DEN),
    }
}

/// Ride the Line payout for a number of pass line wins, if any.
pub fn ride_odds(wins: u8) -> Option<Odds> {
    if wins < RIDE_MIN_WINS {
        return None;
    }
    let index = ((wins - RIDE_MIN_WINS) as usize).min(RIDE_PAYOUT_NUMS.len() - 1);
    Some(Odds::new(RIDE_PAYOUT_NUMS[index], RIDE_PAYOUT_DEN))
}

/// Fire bet payout for a number of distinct points made, if any.
pub fn fire_odds(points_made: u32) -> Option<Odds> {
    match points_made {
        4 => Some(Odds::new(FIRE_4_POINTS_PAYOUT_NUM, FIRE_4_POINTS_PAYOUT_DEN)),
        5 => Some(Odds::new(FIRE_5_POINTS_PAYOUT_NUM, FIRE_5_POINTS_PAYOUT_DEN)),
        n if n >= 6 => Some(Odds::new(FIRE_6_POINTS_PAYOUT_NUM, FIRE_6_POINTS_PAYOUT_DEN)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_craps() {
        assert!(is_craps(2));
        assert!(is_craps(3));
        assert!(is_craps(12));
        assert!(!is_craps(7));
        assert!(!is_craps(11));
    }

    #[test]
    fn test_is_natural() {
        assert!(is_natural(7));
        assert!(is_natural(11));
        assert!(!is_natural(2));
        assert!(!is_natural(6));
    }

    #[test]
    fn test_profit() {
        // 1:1 payout
        assert_eq!(Odds::new(1, 1).profit(100).unwrap(), 100);
        // 2:1 payout
        assert_eq!(Odds::new(2, 1).profit(100).unwrap(), 200);
        // 9:5 payout (place 4/10)
        assert_eq!(Odds::new(9, 5).profit(50).unwrap(), 90);
        // 7:6 payout (place 6/8), floored
        assert_eq!(Odds::new(7, 6).profit(61).unwrap(), 71);
        assert_eq!(
            Odds::new(999, 1).profit(u64::MAX),
            Err(GameError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_yes_no_are_inverse() {
        for sum in (2..=12u8).filter(|s| *s != 7) {
            let yes = yes_odds(sum).unwrap();
            let no = no_odds(sum).unwrap();
            assert_eq!(yes.num * no.num, yes.den * no.den);
        }
        assert!(yes_odds(7).is_err());
        assert!(hop_odds(7).is_ok());
    }

    #[test]
    fn test_field_paytable() {
        assert_eq!(field_odds(2, false), Odds::new(2, 1));
        assert_eq!(field_odds(12, false), Odds::new(2, 1));
        assert_eq!(field_odds(12, true), Odds::new(3, 1));
        assert_eq!(field_odds(9, true), Odds::new(1, 1));
    }

    #[test]
    fn test_bonus_tables() {
        assert_eq!(ride_odds(2), None);
        assert_eq!(ride_odds(3), Some(Odds::new(2, 1)));
        assert_eq!(ride_odds(11), Some(Odds::new(150, 1)));
        assert_eq!(ride_odds(40), Some(Odds::new(150, 1)));
        assert_eq!(fire_odds(3), None);
        assert_eq!(fire_odds(4), Some(Odds::new(24, 1)));
        assert_eq!(fire_odds(6), Some(Odds::new(999, 1)));
    }
}
