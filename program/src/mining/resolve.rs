use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke_signed;
use solana_program::sysvar::slot_hashes;
use steel::*;

use super::{find_slot_hash, SeedLookup};

/// Resolves the round whose window just closed and opens the next one.
/// Permissionless; the caller pays rent for the next round.
pub fn process_resolve(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, board_info, config_info, round_info, next_round_info, treasury_info, vault_rng_ata, fee_collector_ata, rng_mint, slot_hashes_info, system_program, token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let board = board_info
        .is_writable()?
        .has_seeds(&[BOARD], &rngcraps_api::ID)?
        .as_account_mut::<Board>(&rngcraps_api::ID)?;
    board.assert_closed(clock.slot)?;
    let config = config_info
        .has_seeds(&[CONFIG], &rngcraps_api::ID)?
        .as_account::<Config>(&rngcraps_api::ID)?;
    let round = round_info
        .is_writable()?
        .has_seeds(&[ROUND, &board.round_id.to_le_bytes()], &rngcraps_api::ID)?
        .as_account_mut::<Round>(&rngcraps_api::ID)?;
    let next_id = round
        .id
        .checked_add(1)
        .ok_or(GameError::ArithmeticOverflow)?;
    next_round_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[ROUND, &next_id.to_le_bytes()], &rngcraps_api::ID)?;
    let treasury = treasury_info
        .is_writable()?
        .has_address(&TREASURY_ADDRESS)?
        .as_account_mut::<Treasury>(&rngcraps_api::ID)?;
    rng_mint.is_writable()?.has_address(&RNG_MINT_ADDRESS)?;
    slot_hashes_info.has_address(&slot_hashes::ID)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;

    // Only a slot at or after the window close can seed the roll.
    let seed = match find_slot_hash(&slot_hashes_info.try_borrow_data()?, board.seed_slot)? {
        SeedLookup::Found(hash) => hash,
        SeedLookup::Pending => return Err(GameError::EntropyUnavailable.into()),
        SeedLookup::Expired => {
            let seed_slot = board.rearm_seed(clock.slot)?;
            sol_log(&format!(
                "Resolve: round={} seed expired, re-armed at slot {}",
                round.id, seed_slot
            ));
            return Ok(());
        }
    };
    let resolution = round.resolve(seed, config)?;
    treasury.record(&resolution)?;

    let treasury_seeds: &[&[u8]] = &[TREASURY, &[TREASURY_BUMP]];

    // Protocol fee.
    if resolution.fee > 0 {
        vault_rng_ata
            .is_writable()?
            .as_associated_token_account(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS)?;
        fee_collector_ata
            .is_writable()?
            .as_associated_token_account(&config.fee_collector, &RNG_MINT_ADDRESS)?;
        invoke_signed(
            &spl_token::instruction::transfer(
                &spl_token::ID,
                vault_rng_ata.key,
                fee_collector_ata.key,
                treasury_info.key,
                &[],
                resolution.fee,
            )?,
            &[
                vault_rng_ata.clone(),
                fee_collector_ata.clone(),
                treasury_info.clone(),
                token_program.clone(),
            ],
            &[treasury_seeds],
        )?;
    }

    // Unclaimable pool under the burn policy.
    if resolution.burned > 0 {
        vault_rng_ata
            .is_writable()?
            .as_associated_token_account(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS)?;
        invoke_signed(
            &spl_token::instruction::burn(
                &spl_token::ID,
                vault_rng_ata.key,
                rng_mint.key,
                treasury_info.key,
                &[],
                resolution.burned,
            )?,
            &[
                vault_rng_ata.clone(),
                rng_mint.clone(),
                treasury_info.clone(),
                token_program.clone(),
            ],
            &[treasury_seeds],
        )?;
    }

    board.carryover = board
        .carryover
        .checked_add(resolution.carried)
        .ok_or(GameError::ArithmeticOverflow)?;

    sol_log(&format!(
        "Resolve: round={} square={} dice=({}, {}) deployed={} winnings={} fee={} burned={} carried={}",
        round.id,
        round.winning_square,
        round.die1,
        round.die2,
        round.total_deployed,
        round.total_winnings,
        resolution.fee,
        resolution.burned,
        resolution.carried
    ));

    // Open the next window.
    let id = board.advance(clock.slot, config.round_duration)?;
    create_program_account::<Round>(
        next_round_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[ROUND, &id.to_le_bytes()],
    )?;
    let next_round = next_round_info.as_account_mut::<Round>(&rngcraps_api::ID)?;
    let expires_at = board
        .end_slot
        .checked_add(ROUND_EXPIRY_SLOTS)
        .ok_or(GameError::ArithmeticOverflow)?;
    next_round.open(id, board.take_carryover(), expires_at, *signer_info.key);

    #[cfg(feature = "debug")]
    sol_log(&format!(
        "Round {} window [{}, {}) carry_in={}",
        id, board.start_slot, board.end_slot, next_round.carry_in
    ));

    Ok(())
}
