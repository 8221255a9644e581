use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Applies a resolved round's roll to the table without settling anyone.
/// A no-op if the roll was already applied.
pub fn process_advance_table(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info, craps_game_info, round_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let craps_game = craps_game_info
        .is_writable()?
        .has_seeds(&[CRAPS_GAME], &rngcraps_api::ID)?
        .as_account_mut::<CrapsGame>(&rngcraps_api::ID)?;
    let round = round_info.as_account::<Round>(&rngcraps_api::ID)?;
    round_info.has_seeds(&[ROUND, &round.id.to_le_bytes()], &rngcraps_api::ID)?;

    let roll = round.roll()?;
    let Some(event) = craps_game.catch_up(round.id, roll)? else {
        return Ok(());
    };
    sol_log(&format!(
        "AdvanceTable: round={} dice=({}, {}) event={:?} point={}",
        round.id, roll.die1, roll.die2, event, craps_game.point
    ));

    Ok(())
}
