use rngcraps_api::prelude::*;

use super::utils::*;

/// Every place a wager can sit on a position. Payloads are the point,
/// hardway or dice sum the slot is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetSlot {
    PassLine,
    DontPass,
    PassOdds,
    DontPassOdds,
    ComeBox,
    DontComeBox,
    Come(u8),
    ComeOdds(u8),
    DontCome(u8),
    DontComeOdds(u8),
    Place(u8),
    Hardway(u8),
    Field,
    AnySeven,
    AnyCraps,
    YoEleven,
    Aces,
    Twelve,
    Yes(u8),
    No(u8),
    Next(u8),
    Fire,
    Small,
    Tall,
    All,
    RideTheLine,
    MugsysCorner,
}

/// What one roll does to one wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Win(Odds),
    Lose,
    Push,
    Carry,
    /// Box bet moves to its number.
    Travel(u8),
}

/// Everything a resolver may look at.
#[derive(Clone, Copy, Debug)]
pub struct RollContext {
    /// Phase before the roll.
    pub phase: Phase,
    pub roll: Roll,
    pub event: PhaseEvent,
    pub field_twelve_triple: bool,
    /// Bonus trackers, already updated with this roll.
    pub fire_points_mask: u8,
    pub small_mask: u16,
    pub tall_mask: u16,
    pub all_mask: u16,
    pub ride_wins: u8,
}

impl RollContext {
    fn sum(&self) -> u8 {
        self.roll.sum()
    }
}

impl BetSlot {
    /// Maps a `PlaceBet` request to its slot.
    pub fn from_request(bet_type: CrapsBetType, target: u8) -> Result<Self, GameError> {
        let point = || point_to_index(target).map(|_| target).ok_or(GameError::InvalidPoint);
        Ok(match bet_type {
            CrapsBetType::PassLine => BetSlot::PassLine,
            CrapsBetType::DontPass => BetSlot::DontPass,
            CrapsBetType::PassOdds => BetSlot::PassOdds,
            CrapsBetType::DontPassOdds => BetSlot::DontPassOdds,
            CrapsBetType::Come => BetSlot::ComeBox,
            CrapsBetType::DontCome => BetSlot::DontComeBox,
            CrapsBetType::ComeOdds => BetSlot::ComeOdds(point()?),
            CrapsBetType::DontComeOdds => BetSlot::DontComeOdds(point()?),
            CrapsBetType::Place => BetSlot::Place(point()?),
            CrapsBetType::Hardway => {
                hardway_to_index(target).ok_or(GameError::InvalidPoint)?;
                BetSlot::Hardway(target)
            }
            CrapsBetType::Field => BetSlot::Field,
            CrapsBetType::AnySeven => BetSlot::AnySeven,
            CrapsBetType::AnyCraps => BetSlot::AnyCraps,
            CrapsBetType::YoEleven => BetSlot::YoEleven,
            CrapsBetType::Aces => BetSlot::Aces,
            CrapsBetType::Twelve => BetSlot::Twelve,
            CrapsBetType::Fire => BetSlot::Fire,
            CrapsBetType::Small => BetSlot::Small,
            CrapsBetType::Tall => BetSlot::Tall,
            CrapsBetType::All => BetSlot::All,
            CrapsBetType::RideTheLine => BetSlot::RideTheLine,
            CrapsBetType::MugsysCorner => BetSlot::MugsysCorner,
            CrapsBetType::Yes | CrapsBetType::No => {
                if !is_valid_yes_no_sum(target) {
                    return Err(GameError::InvalidPoint);
                }
                if bet_type == CrapsBetType::Yes {
                    BetSlot::Yes(target)
                } else {
                    BetSlot::No(target)
                }
            }
            CrapsBetType::Next => {
                sum_to_index(target).ok_or(GameError::InvalidPoint)?;
                BetSlot::Next(target)
            }
        })
    }

    /// All slots in resolution order: props, hardways, yes/no, place,
    /// come, line, bonus.
    pub fn settlement_order() -> Vec<BetSlot> {
        let mut order = vec![
            BetSlot::Field,
            BetSlot::AnySeven,
            BetSlot::AnyCraps,
            BetSlot::YoEleven,
            BetSlot::Aces,
            BetSlot::Twelve,
        ];
        order.extend((2..=12).map(BetSlot::Next));
        order.extend(HARDWAY_NUMBERS.iter().map(|&n| BetSlot::Hardway(n)));
        order.extend((2..=12).filter(|s| *s != 7).map(BetSlot::Yes));
        order.extend((2..=12).filter(|s| *s != 7).map(BetSlot::No));
        order.extend(POINT_NUMBERS.iter().map(|&n| BetSlot::Place(n)));
        order.extend([BetSlot::ComeBox, BetSlot::DontComeBox]);
        for &n in POINT_NUMBERS.iter() {
            order.extend([
                BetSlot::Come(n),
                BetSlot::ComeOdds(n),
                BetSlot::DontCome(n),
                BetSlot::DontComeOdds(n),
            ]);
        }
        order.extend([
            BetSlot::PassLine,
            BetSlot::PassOdds,
            BetSlot::DontPass,
            BetSlot::DontPassOdds,
            BetSlot::Fire,
            BetSlot::Small,
            BetSlot::Tall,
            BetSlot::All,
            BetSlot::RideTheLine,
            BetSlot::MugsysCorner,
        ]);
        order
    }

    pub fn wager<'a>(&self, position: &'a CrapsPosition) -> Result<&'a Wager, GameError> {
        let point = |n: u8| point_to_index(n).ok_or(GameError::InvalidPoint);
        let sum = |n: u8| sum_to_index(n).ok_or(GameError::InvalidPoint);
        Ok(match *self {
            BetSlot::PassLine => &position.pass_line,
            BetSlot::DontPass => &position.dont_pass,
            BetSlot::PassOdds => &position.pass_odds,
            BetSlot::DontPassOdds => &position.dont_pass_odds,
            BetSlot::ComeBox => &position.come_box,
            BetSlot::DontComeBox => &position.dont_come_box,
            BetSlot::Come(n) => &position.come_bets[point(n)?],
            BetSlot::ComeOdds(n) => &position.come_odds[point(n)?],
            BetSlot::DontCome(n) => &position.dont_come_bets[point(n)?],
            BetSlot::DontComeOdds(n) => &position.dont_come_odds[point(n)?],
            BetSlot::Place(n) => &position.place_bets[point(n)?],
            BetSlot::Hardway(n) => {
                &position.hardways[hardway_to_index(n).ok_or(GameError::InvalidPoint)?]
            }
            BetSlot::Field => &position.field_bet,
            BetSlot::AnySeven => &position.any_seven,
            BetSlot::AnyCraps => &position.any_craps,
            BetSlot::YoEleven => &position.yo_eleven,
            BetSlot::Aces => &position.aces,
            BetSlot::Twelve => &position.twelve,
            BetSlot::Yes(n) => &position.yes_bets[sum(n)?],
            BetSlot::No(n) => &position.no_bets[sum(n)?],
            BetSlot::Next(n) => &position.next_bets[sum(n)?],
            BetSlot::Fire => &position.fire_bet,
            BetSlot::Small => &position.small_bet,
            BetSlot::Tall => &position.tall_bet,
            BetSlot::All => &position.all_bet,
            BetSlot::RideTheLine => &position.ride_line_bet,
            BetSlot::MugsysCorner => &position.mugsy_bet,
        })
    }

    pub fn wager_mut<'a>(&self, position: &'a mut CrapsPosition) -> Result<&'a mut Wager, GameError> {
        let point = |n: u8| point_to_index(n).ok_or(GameError::InvalidPoint);
        let sum = |n: u8| sum_to_index(n).ok_or(GameError::InvalidPoint);
        Ok(match *self {
            BetSlot::PassLine => &mut position.pass_line,
            BetSlot::DontPass => &mut position.dont_pass,
            BetSlot::PassOdds => &mut position.pass_odds,
            BetSlot::DontPassOdds => &mut position.dont_pass_odds,
            BetSlot::ComeBox => &mut position.come_box,
            BetSlot::DontComeBox => &mut position.dont_come_box,
            BetSlot::Come(n) => &mut position.come_bets[point(n)?],
            BetSlot::ComeOdds(n) => &mut position.come_odds[point(n)?],
            BetSlot::DontCome(n) => &mut position.dont_come_bets[point(n)?],
            BetSlot::DontComeOdds(n) => &mut position.dont_come_odds[point(n)?],
            BetSlot::Place(n) => &mut position.place_bets[point(n)?],
            BetSlot::Hardway(n) => {
                &mut position.hardways[hardway_to_index(n).ok_or(GameError::InvalidPoint)?]
            }
            BetSlot::Field => &mut position.field_bet,
            BetSlot::AnySeven => &mut position.any_seven,
            BetSlot::AnyCraps => &mut position.any_craps,
            BetSlot::YoEleven => &mut position.yo_eleven,
            BetSlot::Aces => &mut position.aces,
            BetSlot::Twelve => &mut position.twelve,
            BetSlot::Yes(n) => &mut position.yes_bets[sum(n)?],
            BetSlot::No(n) => &mut position.no_bets[sum(n)?],
            BetSlot::Next(n) => &mut position.next_bets[sum(n)?],
            BetSlot::Fire => &mut position.fire_bet,
            BetSlot::Small => &mut position.small_bet,
            BetSlot::Tall => &mut position.tall_bet,
            BetSlot::All => &mut position.all_bet,
            BetSlot::RideTheLine => &mut position.ride_line_bet,
            BetSlot::MugsysCorner => &mut position.mugsy_bet,
        })
    }

    /// Best payout the slot can ever earn. Used to reserve bankroll at
    /// placement and release it at resolution, so it must not depend on
    /// table state.
    pub fn worst_case_odds(&self) -> Result<Odds, GameError> {
        Ok(match *self {
            BetSlot::PassLine
            | BetSlot::DontPass
            | BetSlot::ComeBox
            | BetSlot::DontComeBox
            | BetSlot::Come(_)
            | BetSlot::DontCome(_) => EVEN_MONEY,
            BetSlot::PassOdds => Odds::new(TRUE_ODDS_4_10_NUM, TRUE_ODDS_4_10_DEN),
            BetSlot::DontPassOdds => Odds::new(LAY_6_8_PAYOUT_NUM, LAY_6_8_PAYOUT_DEN),
            BetSlot::ComeOdds(n) => true_odds(n)?,
            BetSlot::DontComeOdds(n) => lay_odds(n)?,
            BetSlot::Place(n) => place_odds(n)?,
            BetSlot::Hardway(n) => hardway_odds(n)?,
            BetSlot::Field => Odds::new(FIELD_PAYOUT_12_TRIPLE_NUM, FIELD_PAYOUT_12_TRIPLE_DEN),
            BetSlot::AnySeven => Odds::new(ANY_SEVEN_PAYOUT_NUM, ANY_SEVEN_PAYOUT_DEN),
            BetSlot::AnyCraps => Odds::new(ANY_CRAPS_PAYOUT_NUM, ANY_CRAPS_PAYOUT_DEN),
            BetSlot::YoEleven => Odds::new(YO_ELEVEN_PAYOUT_NUM, YO_ELEVEN_PAYOUT_DEN),
            BetSlot::Aces => Odds::new(ACES_PAYOUT_NUM, ACES_PAYOUT_DEN),
            BetSlot::Twelve => Odds::new(TWELVE_PAYOUT_NUM, TWELVE_PAYOUT_DEN),
            BetSlot::Yes(n) => yes_odds(n)?,
            BetSlot::No(n) => no_odds(n)?,
            BetSlot::Next(n) => hop_odds(n)?,
            BetSlot::Fire => Odds::new(FIRE_6_POINTS_PAYOUT_NUM, FIRE_6_POINTS_PAYOUT_DEN),
            BetSlot::Small => Odds::new(BONUS_SMALL_PAYOUT_NUM, BONUS_SMALL_PAYOUT_DEN),
            BetSlot::Tall => Odds::new(BONUS_TALL_PAYOUT_NUM, BONUS_TALL_PAYOUT_DEN),
            BetSlot::All => Odds::new(BONUS_ALL_PAYOUT_NUM, BONUS_ALL_PAYOUT_DEN),
            BetSlot::RideTheLine => {
                Odds::new(RIDE_PAYOUT_NUMS[RIDE_PAYOUT_NUMS.len() - 1], RIDE_PAYOUT_DEN)
            }
            BetSlot::MugsysCorner => Odds::new(MUGSY_POINT_7_PAYOUT_NUM, MUGSY_POINT_7_PAYOUT_DEN),
        })
    }

    /// Bankroll reserved for `amount` riding on this slot.
    pub fn max_profit(&self, amount: u64) -> Result<u64, GameError> {
        self.worst_case_odds()?.profit(amount)
    }

    /// Judges one roll against this slot.
    pub fn resolve(&self, ctx: &RollContext) -> Result<Verdict, GameError> {
        let sum = ctx.sum();
        Ok(match *self {
            BetSlot::PassLine => match ctx.phase {
                Phase::ComeOut if is_natural(sum) => Verdict::Win(EVEN_MONEY),
                Phase::ComeOut if is_craps(sum) => Verdict::Lose,
                Phase::ComeOut => Verdict::Carry,
                Phase::Point(p) if sum == p => Verdict::Win(EVEN_MONEY),
                Phase::Point(_) if sum == 7 => Verdict::Lose,
                Phase::Point(_) => Verdict::Carry,
            },
            BetSlot::DontPass => match ctx.phase {
                Phase::ComeOut if is_natural(sum) => Verdict::Lose,
                Phase::ComeOut if sum == 12 => Verdict::Push,
                Phase::ComeOut if is_craps(sum) => Verdict::Win(EVEN_MONEY),
                Phase::ComeOut => Verdict::Carry,
                Phase::Point(_) if sum == 7 => Verdict::Win(EVEN_MONEY),
                Phase::Point(p) if sum == p => Verdict::Lose,
                Phase::Point(_) => Verdict::Carry,
            },
            BetSlot::PassOdds => match ctx.phase {
                // Odds never ride a come-out roll; hand them back.
                Phase::ComeOut => Verdict::Push,
                Phase::Point(p) if sum == p => Verdict::Win(true_odds(p)?),
                Phase::Point(_) if sum == 7 => Verdict::Lose,
                Phase::Point(_) => Verdict::Carry,
            },
            BetSlot::DontPassOdds => match ctx.phase {
                Phase::ComeOut => Verdict::Push,
                Phase::Point(p) if sum == 7 => Verdict::Win(lay_odds(p)?),
                Phase::Point(p) if sum == p => Verdict::Lose,
                Phase::Point(_) => Verdict::Carry,
            },
            BetSlot::ComeBox => match sum {
                s if is_natural(s) => Verdict::Win(EVEN_MONEY),
                s if is_craps(s) => Verdict::Lose,
                s => Verdict::Travel(s),
            },
            BetSlot::DontComeBox => match sum {
                s if is_natural(s) => Verdict::Lose,
                12 => Verdict::Push,
                s if is_craps(s) => Verdict::Win(EVEN_MONEY),
                s => Verdict::Travel(s),
            },
            BetSlot::Come(n) => match sum {
                s if s == n => Verdict::Win(EVEN_MONEY),
                7 => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::ComeOdds(n) => match sum {
                s if s == n && ctx.phase.is_come_out() => Verdict::Push,
                s if s == n => Verdict::Win(true_odds(n)?),
                7 if ctx.phase.is_come_out() => Verdict::Push,
                7 => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::DontCome(n) => match sum {
                7 => Verdict::Win(EVEN_MONEY),
                s if s == n => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::DontComeOdds(n) => match sum {
                7 => Verdict::Win(lay_odds(n)?),
                s if s == n => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::Place(n) => match ctx.phase {
                Phase::ComeOut => Verdict::Carry,
                Phase::Point(_) if sum == n => Verdict::Win(place_odds(n)?),
                Phase::Point(_) if sum == 7 => Verdict::Lose,
                Phase::Point(_) => Verdict::Carry,
            },
            BetSlot::Hardway(n) => match sum {
                s if s == n && ctx.roll.is_hard() => Verdict::Win(hardway_odds(n)?),
                s if s == n || s == 7 => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::Field if is_field_winner(sum) => {
                Verdict::Win(field_odds(sum, ctx.field_twelve_triple))
            }
            BetSlot::AnySeven if sum == 7 => {
                Verdict::Win(Odds::new(ANY_SEVEN_PAYOUT_NUM, ANY_SEVEN_PAYOUT_DEN))
            }
            BetSlot::AnyCraps if is_craps(sum) => {
                Verdict::Win(Odds::new(ANY_CRAPS_PAYOUT_NUM, ANY_CRAPS_PAYOUT_DEN))
            }
            BetSlot::YoEleven if sum == 11 => {
                Verdict::Win(Odds::new(YO_ELEVEN_PAYOUT_NUM, YO_ELEVEN_PAYOUT_DEN))
            }
            BetSlot::Aces if sum == 2 => Verdict::Win(Odds::new(ACES_PAYOUT_NUM, ACES_PAYOUT_DEN)),
            BetSlot::Twelve if sum == 12 => {
                Verdict::Win(Odds::new(TWELVE_PAYOUT_NUM, TWELVE_PAYOUT_DEN))
            }
            BetSlot::Field
            | BetSlot::AnySeven
            | BetSlot::AnyCraps
            | BetSlot::YoEleven
            | BetSlot::Aces
            | BetSlot::Twelve => Verdict::Lose,
            BetSlot::Yes(n) => match sum {
                s if s == n => Verdict::Win(yes_odds(n)?),
                7 => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::No(n) => match sum {
                7 => Verdict::Win(no_odds(n)?),
                s if s == n => Verdict::Lose,
                _ => Verdict::Carry,
            },
            BetSlot::Next(n) if sum == n => Verdict::Win(hop_odds(n)?),
            BetSlot::Next(_) => Verdict::Lose,
            BetSlot::Fire => {
                let made = ctx.fire_points_mask.count_ones();
                match fire_odds(made) {
                    Some(odds) if made >= 6 => Verdict::Win(odds),
                    Some(odds) if ctx.event == PhaseEvent::SevenOut => Verdict::Win(odds),
                    None if ctx.event == PhaseEvent::SevenOut => Verdict::Lose,
                    _ => Verdict::Carry,
                }
            }
            BetSlot::Small => ats_verdict(ctx, ctx.small_mask, BONUS_SMALL_MASK, BetSlot::Small)?,
            BetSlot::Tall => ats_verdict(ctx, ctx.tall_mask, BONUS_TALL_MASK, BetSlot::Tall)?,
            BetSlot::All => ats_verdict(ctx, ctx.all_mask, BONUS_ALL_MASK, BetSlot::All)?,
            BetSlot::RideTheLine => match ctx.event {
                PhaseEvent::SevenOut => match ride_odds(ctx.ride_wins) {
                    Some(odds) => Verdict::Win(odds),
                    None => Verdict::Lose,
                },
                _ => Verdict::Carry,
            },
            BetSlot::MugsysCorner => match ctx.phase {
                Phase::ComeOut if sum == 7 => Verdict::Win(Odds::new(
                    MUGSY_COMEOUT_7_PAYOUT_NUM,
                    MUGSY_COMEOUT_7_PAYOUT_DEN,
                )),
                Phase::ComeOut if is_point_number(sum) => Verdict::Carry,
                Phase::ComeOut => Verdict::Lose,
                Phase::Point(_) if sum == 7 => {
                    Verdict::Win(Odds::new(MUGSY_POINT_7_PAYOUT_NUM, MUGSY_POINT_7_PAYOUT_DEN))
                }
                Phase::Point(_) => Verdict::Lose,
            },
        })
    }
}

fn ats_verdict(
    ctx: &RollContext,
    hits: u16,
    mask: u16,
    slot: BetSlot,
) -> Result<Verdict, GameError> {
    if ctx.sum() == 7 {
        return Ok(Verdict::Lose);
    }
    if hits & mask == mask {
        return Ok(Verdict::Win(slot.worst_case_odds()?));
    }
    Ok(Verdict::Carry)
}
