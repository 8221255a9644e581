//! Permissionless cleanup for positions nobody settled in time.
//!
//! Once a position's epoch falls out of the table's phase log its bets can no
//! longer be settled, and their reservations would lock house bankroll for
//! good. Anyone may forfeit such a position.

use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

use super::engine::forfeit_position;

pub fn process_force_settle(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info, craps_game_info, craps_position_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
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

    if !craps_position.has_active_bets() || !craps_game.is_beyond_log(craps_position.epoch_id) {
        return Err(GameError::PositionNotStale.into());
    }

    let (forfeited, settlement) = forfeit_position(craps_position)?;
    craps_game.book_settlement(0, settlement.lost, settlement.released)?;
    *craps_position = forfeited;
    craps_position.epoch_id = craps_game.epoch_id;

    sol_log(&format!(
        "ForceSettle: {} forfeited {} across {} bets",
        craps_position.authority, settlement.lost, settlement.resolved
    ));

    Ok(())
}
