use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

use super::engine::{settle_position, TableRules};

/// Settles one position against the roll of a resolved round.
///
/// Anyone may call this for any position. The first settlement of a round
/// also moves the shared table forward.
pub fn process_settle_craps(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info, config_info, craps_game_info, craps_position_info, round_info] = accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let config = config_info
        .has_seeds(&[CONFIG], &rngcraps_api::ID)?
        .as_account::<Config>(&rngcraps_api::ID)?;
    let craps_game = craps_game_info
        .is_writable()?
        .has_seeds(&[CRAPS_GAME], &rngcraps_api::ID)?
        .as_account_mut::<CrapsGame>(&rngcraps_api::ID)?;
    let craps_position = craps_position_info
        .is_writable()?
        .as_account_mut::<CrapsPosition>(&rngcraps_api::ID)?;
    craps_position_info.has_seeds(
        &[CRAPS_POSITION, &craps_position.authority.to_bytes()],
        &rngcraps_api::ID,
    )?;
    let round = round_info.as_account::<Round>(&rngcraps_api::ID)?;
    round_info.has_seeds(&[ROUND, &round.id.to_le_bytes()], &rngcraps_api::ID)?;

    let roll = round.roll()?;
    let round_id = round.id;

    // Apply the roll to the table if nobody has yet.
    if let Some(event) = craps_game.catch_up(round_id, roll)? {
        sol_log(&format!(
            "Table: round={} dice=({}, {}) event={:?} point={}",
            round_id, roll.die1, roll.die2, event, craps_game.point
        ));
    }

    let phase = match craps_game.settle_target(
        craps_position.epoch_id,
        craps_position.has_active_bets(),
        round_id,
    )? {
        SettleTarget::Settle(phase) => phase,
        SettleTarget::Sync => {
            craps_position.epoch_id = round_id;
            sol_log("SettleCraps: empty position synced");
            return Ok(());
        }
    };

    let (settled, settlement) = settle_position(
        craps_position,
        phase,
        roll,
        TableRules::from_config(config),
    )?;
    craps_game.book_settlement(settlement.profit, settlement.lost, settlement.released)?;
    *craps_position = settled;
    craps_position.epoch_id = round_id;

    sol_log(&format!(
        "SettleCraps: round={} resolved={} credited={} profit={} lost={} pushed={}",
        round_id,
        settlement.resolved,
        settlement.credited,
        settlement.profit,
        settlement.lost,
        settlement.pushed
    ));

    Ok(())
}
