use rngcraps_api::prelude::*;

use super::bets::{BetSlot, RollContext, Verdict};

/// Table-wide switches that change payouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableRules {
    pub field_twelve_triple: bool,
}

impl TableRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            field_twelve_triple: config.field_pays_triple(),
        }
    }
}

/// Totals of one settlement pass over a position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Stake returned plus profit, added to pending winnings.
    pub credited: u64,
    /// Profit paid by the house.
    pub profit: u64,
    /// Stake forfeited to the house.
    pub lost: u64,
    /// Stake returned on pushes.
    pub pushed: u64,
    /// Bankroll reservations freed.
    pub released: u64,
    /// Wagers that left the table.
    pub resolved: u32,
}

fn accrue(field: &mut u64, amount: u64) -> Result<(), GameError> {
    *field = field.checked_add(amount).ok_or(GameError::ArithmeticOverflow)?;
    Ok(())
}

/// Settles every active wager of `position` against one roll made while the
/// table was in `phase`. Works on a copy; the caller commits the result.
pub fn settle_position(
    position: &CrapsPosition,
    phase: Phase,
    roll: Roll,
    rules: TableRules,
) -> Result<(CrapsPosition, Settlement), GameError> {
    let sum = roll.sum();
    let (_, event) = phase.transition(sum);
    let mut next = *position;
    update_trackers(&mut next, event, sum)?;

    let ctx = RollContext {
        phase,
        roll,
        event,
        field_twelve_triple: rules.field_twelve_triple,
        fire_points_mask: next.fire_points_mask,
        small_mask: next.small_mask,
        tall_mask: next.tall_mask,
        all_mask: next.all_mask,
        ride_wins: next.ride_wins,
    };

    let mut settlement = Settlement::default();
    let mut travels: Vec<(BetSlot, u64)> = Vec::new();
    for slot in BetSlot::settlement_order() {
        let wager = slot.wager(position)?;
        if !wager.is_active() {
            continue;
        }
        let amount = wager.amount;
        match slot.resolve(&ctx)? {
            Verdict::Win(odds) => {
                let profit = odds.profit(amount)?;
                let credited = amount
                    .checked_add(profit)
                    .ok_or(GameError::ArithmeticOverflow)?;
                accrue(&mut settlement.credited, credited)?;
                accrue(&mut settlement.profit, profit)?;
                accrue(&mut settlement.released, slot.max_profit(amount)?)?;
                slot.wager_mut(&mut next)?.clear(WagerOutcome::Won);
                settlement.resolved += 1;
            }
            Verdict::Lose => {
                accrue(&mut settlement.lost, amount)?;
                accrue(&mut settlement.released, slot.max_profit(amount)?)?;
                slot.wager_mut(&mut next)?.clear(WagerOutcome::Lost);
                settlement.resolved += 1;
            }
            Verdict::Push => {
                accrue(&mut settlement.credited, amount)?;
                accrue(&mut settlement.pushed, amount)?;
                accrue(&mut settlement.released, slot.max_profit(amount)?)?;
                slot.wager_mut(&mut next)?.clear(WagerOutcome::Push);
                settlement.resolved += 1;
            }
            Verdict::Carry => slot.wager_mut(&mut next)?.carry(),
            Verdict::Travel(number) => {
                let target = match slot {
                    BetSlot::ComeBox => BetSlot::Come(number),
                    _ => BetSlot::DontCome(number),
                };
                // The reservation moves with the stake; both sides are even money.
                slot.wager_mut(&mut next)?.clear(WagerOutcome::None);
                travels.push((target, amount));
            }
        }
    }

    for (target, amount) in travels {
        let wager = target.wager_mut(&mut next)?;
        wager.add(amount)?;
        wager.carry();
    }

    reset_idle_trackers(&mut next);
    book(&mut next, &settlement)?;
    Ok((next, settlement))
}

/// Forfeits every active wager of a position that fell out of the phase log.
pub fn forfeit_position(position: &CrapsPosition) -> Result<(CrapsPosition, Settlement), GameError> {
    let mut next = *position;
    let mut settlement = Settlement::default();
    for slot in BetSlot::settlement_order() {
        let wager = slot.wager(position)?;
        if !wager.is_active() {
            continue;
        }
        accrue(&mut settlement.lost, wager.amount)?;
        accrue(&mut settlement.released, slot.max_profit(wager.amount)?)?;
        slot.wager_mut(&mut next)?.clear(WagerOutcome::Lost);
        settlement.resolved += 1;
    }
    reset_idle_trackers(&mut next);
    book(&mut next, &settlement)?;
    Ok((next, settlement))
}

fn update_trackers(position: &mut CrapsPosition, event: PhaseEvent, sum: u8) -> Result<(), GameError> {
    if let PhaseEvent::PointMade(point) = event {
        if position.fire_bet.is_active() {
            let index = point_to_index(point).ok_or(GameError::InvalidPoint)?;
            position.fire_points_mask |= 1 << index;
        }
    }
    if sum != 7 {
        let bit = 1u16 << sum_to_index(sum).ok_or(GameError::InvalidPoint)?;
        if position.small_bet.is_active() {
            position.small_mask |= bit;
        }
        if position.tall_bet.is_active() {
            position.tall_mask |= bit;
        }
        if position.all_bet.is_active() {
            position.all_mask |= bit;
        }
    }
    if position.ride_line_bet.is_active()
        && matches!(event, PhaseEvent::Natural | PhaseEvent::PointMade(_))
    {
        position.ride_wins = position.ride_wins.saturating_add(1);
    }
    Ok(())
}

fn reset_idle_trackers(position: &mut CrapsPosition) {
    if !position.fire_bet.is_active() {
        position.fire_points_mask = 0;
    }
    if !position.small_bet.is_active() {
        position.small_mask = 0;
    }
    if !position.tall_bet.is_active() {
        position.tall_mask = 0;
    }
    if !position.all_bet.is_active() {
        position.all_mask = 0;
    }
    if !position.ride_line_bet.is_active() {
        position.ride_wins = 0;
    }
}

fn book(position: &mut CrapsPosition, settlement: &Settlement) -> Result<(), GameError> {
    accrue(&mut position.pending_winnings, settlement.credited)?;
    accrue(&mut position.total_won, settlement.profit)?;
    accrue(&mut position.total_lost, settlement.lost)?;
    accrue(&mut position.total_pushed, settlement.pushed)?;
    Ok(())
}
