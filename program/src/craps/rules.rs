use rngcraps_api::prelude::*;

use super::bets::BetSlot;

/// Adds `amount` to `slot` if the table allows it in `phase`.
///
/// Returns the extra bankroll the house must reserve for the new total.
pub fn place_wager(
    position: &mut CrapsPosition,
    slot: BetSlot,
    amount: u64,
    phase: Phase,
) -> Result<u64, GameError> {
    if amount == 0 || amount > MAX_BET_AMOUNT {
        return Err(GameError::InvalidBetAmount);
    }

    let come_out = phase.is_come_out();
    match slot {
        BetSlot::PassLine | BetSlot::DontPass if !come_out => {
            return Err(GameError::InvalidBetType);
        }
        BetSlot::ComeBox | BetSlot::DontComeBox if come_out => {
            return Err(GameError::InvalidBetType);
        }
        // Box bets travel to their number on their own.
        BetSlot::Come(_) | BetSlot::DontCome(_) => return Err(GameError::InvalidBetType),
        BetSlot::PassOdds => {
            if come_out {
                return Err(GameError::InvalidBetType);
            }
            check_odds(&position.pass_line, &position.pass_odds, amount)?;
        }
        BetSlot::DontPassOdds => {
            if come_out {
                return Err(GameError::InvalidBetType);
            }
            check_odds(&position.dont_pass, &position.dont_pass_odds, amount)?;
        }
        BetSlot::ComeOdds(n) => {
            check_odds(BetSlot::Come(n).wager(position)?, slot.wager(position)?, amount)?;
        }
        BetSlot::DontComeOdds(n) => {
            check_odds(BetSlot::DontCome(n).wager(position)?, slot.wager(position)?, amount)?;
        }
        BetSlot::Fire
        | BetSlot::Small
        | BetSlot::Tall
        | BetSlot::All
        | BetSlot::RideTheLine
        | BetSlot::MugsysCorner => {
            if !come_out || slot.wager(position)?.is_active() {
                return Err(GameError::InvalidBetType);
            }
            match slot {
                BetSlot::Fire => position.fire_points_mask = 0,
                BetSlot::RideTheLine => {
                    if !position.pass_line.is_active() {
                        return Err(GameError::InvalidBetType);
                    }
                    position.ride_wins = 0;
                }
                BetSlot::Small => position.small_mask = 0,
                BetSlot::Tall => position.tall_mask = 0,
                BetSlot::All => position.all_mask = 0,
                _ => {}
            }
        }
        _ => {}
    }

    let wager = slot.wager_mut(position)?;
    let before = if wager.is_active() { wager.amount } else { 0 };
    wager.add(amount)?;
    let after = wager.amount;

    position.total_wagered = position
        .total_wagered
        .checked_add(amount)
        .ok_or(GameError::ArithmeticOverflow)?;

    let reserved_before = slot.max_profit(before)?;
    let reserved_after = slot.max_profit(after)?;
    reserved_after
        .checked_sub(reserved_before)
        .ok_or(GameError::ArithmeticOverflow)
}

/// Odds need a live parent bet and are capped at a multiple of it.
fn check_odds(parent: &Wager, odds: &Wager, amount: u64) -> Result<(), GameError> {
    if !parent.is_active() {
        return Err(GameError::InvalidBetType);
    }
    let current = if odds.is_active() { odds.amount } else { 0 };
    let total = current
        .checked_add(amount)
        .ok_or(GameError::ArithmeticOverflow)?;
    let cap = parent
        .amount
        .checked_mul(MAX_ODDS_MULTIPLE)
        .ok_or(GameError::ArithmeticOverflow)?;
    if total > cap {
        return Err(GameError::InvalidBetAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use steel::Zeroable;

    use super::*;

    #[test]
    fn test_amount_bounds() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::Field, 0, Phase::ComeOut),
            Err(GameError::InvalidBetAmount)
        );
        assert_eq!(
            place_wager(&mut position, BetSlot::Field, MAX_BET_AMOUNT + 1, Phase::ComeOut),
            Err(GameError::InvalidBetAmount)
        );
        assert!(place_wager(&mut position, BetSlot::Field, MAX_BET_AMOUNT, Phase::ComeOut).is_ok());
    }

    #[test]
    fn test_line_bets_need_come_out() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::PassLine, 100, Phase::Point(6)),
            Err(GameError::InvalidBetType)
        );
        assert_eq!(place_wager(&mut position, BetSlot::PassLine, 100, Phase::ComeOut), Ok(100));
        assert_eq!(position.pass_line.amount, 100);
        assert_eq!(position.total_wagered, 100);
    }

    #[test]
    fn test_come_box_needs_point() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::ComeBox, 10, Phase::ComeOut),
            Err(GameError::InvalidBetType)
        );
        assert_eq!(place_wager(&mut position, BetSlot::ComeBox, 10, Phase::Point(5)), Ok(10));
        assert_eq!(
            place_wager(&mut position, BetSlot::Come(5), 10, Phase::Point(5)),
            Err(GameError::InvalidBetType)
        );
    }

    #[test]
    fn test_odds_capped_by_parent() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::PassOdds, 10, Phase::Point(4)),
            Err(GameError::InvalidBetType)
        );
        place_wager(&mut position, BetSlot::PassLine, 10, Phase::ComeOut).unwrap();
        assert_eq!(
            place_wager(&mut position, BetSlot::PassOdds, 10, Phase::ComeOut),
            Err(GameError::InvalidBetType)
        );
        // Reserved at the 2:1 ceiling regardless of the point.
        assert_eq!(place_wager(&mut position, BetSlot::PassOdds, 20, Phase::Point(8)), Ok(40));
        assert_eq!(
            place_wager(&mut position, BetSlot::PassOdds, 11, Phase::Point(8)),
            Err(GameError::InvalidBetAmount)
        );
        assert!(place_wager(&mut position, BetSlot::PassOdds, 10, Phase::Point(8)).is_ok());
    }

    #[test]
    fn test_come_odds_need_come_bet() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::ComeOdds(9), 5, Phase::Point(4)),
            Err(GameError::InvalidBetType)
        );
        position.come_bets[4].add(5).unwrap();
        assert!(place_wager(&mut position, BetSlot::ComeOdds(9), 15, Phase::Point(4)).is_ok());
        assert_eq!(position.come_odds[4].amount, 15);
    }

    #[test]
    fn test_place_reservation_grows_with_stake() {
        let mut position = CrapsPosition::zeroed();
        // 7:6 floors: 6 -> 7, 12 -> 14.
        assert_eq!(place_wager(&mut position, BetSlot::Place(6), 6, Phase::Point(4)), Ok(7));
        assert_eq!(place_wager(&mut position, BetSlot::Place(6), 6, Phase::Point(4)), Ok(7));
        assert_eq!(position.place_bets[2].amount, 12);
    }

    #[test]
    fn test_bonus_bets_come_out_only() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::Fire, 5, Phase::Point(4)),
            Err(GameError::InvalidBetType)
        );
        position.fire_points_mask = 0b11;
        assert!(place_wager(&mut position, BetSlot::Fire, 5, Phase::ComeOut).is_ok());
        assert_eq!(position.fire_points_mask, 0);
        assert_eq!(
            place_wager(&mut position, BetSlot::Fire, 5, Phase::ComeOut),
            Err(GameError::InvalidBetType)
        );
    }

    #[test]
    fn test_ats_bets_start_fresh() {
        let mut position = CrapsPosition::zeroed();
        place_wager(&mut position, BetSlot::Small, 5, Phase::ComeOut).unwrap();
        position.small_mask = 0b101;
        position.tall_mask = 0b111_1100_0000;
        position.all_mask = 0b111_1100_0101;

        place_wager(&mut position, BetSlot::Tall, 5, Phase::ComeOut).unwrap();
        assert_eq!(position.tall_mask, 0);
        assert_eq!(position.small_mask, 0b101);

        place_wager(&mut position, BetSlot::All, 5, Phase::ComeOut).unwrap();
        assert_eq!(position.all_mask, 0);
        assert_eq!(position.small_mask, 0b101);

        assert_eq!(
            place_wager(&mut position, BetSlot::Small, 5, Phase::ComeOut),
            Err(GameError::InvalidBetType)
        );
    }

    #[test]
    fn test_ride_needs_pass_line() {
        let mut position = CrapsPosition::zeroed();
        assert_eq!(
            place_wager(&mut position, BetSlot::RideTheLine, 5, Phase::ComeOut),
            Err(GameError::InvalidBetType)
        );
        place_wager(&mut position, BetSlot::PassLine, 5, Phase::ComeOut).unwrap();
        assert!(place_wager(&mut position, BetSlot::RideTheLine, 5, Phase::ComeOut).is_ok());
    }
}
