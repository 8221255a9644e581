use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke;
use steel::*;

use super::bets::BetSlot;
use super::rules::place_wager;

/// Places a craps bet for the signer during the open staking window.
pub fn process_place_bet(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse instruction data.
    let args = PlaceBet::try_from_bytes(data)?;
    let amount = u64::from_le_bytes(args.amount);
    let bet_type =
        CrapsBetType::try_from(args.bet_type).map_err(|_| GameError::InvalidBetType)?;
    let slot = BetSlot::from_request(bet_type, args.target)?;

    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, board_info, craps_game_info, craps_position_info, craps_vault_info, signer_crap_ata, vault_crap_ata, crap_mint, system_program, token_program, associated_token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    let board = board_info
        .has_seeds(&[BOARD], &rngcraps_api::ID)?
        .as_account::<Board>(&rngcraps_api::ID)?;
    board.assert_open(clock.slot)?;
    let craps_game = craps_game_info
        .is_writable()?
        .has_seeds(&[CRAPS_GAME], &rngcraps_api::ID)?
        .as_account_mut::<CrapsGame>(&rngcraps_api::ID)?;
    craps_position_info
        .is_writable()?
        .has_seeds(&[CRAPS_POSITION, &signer_info.key.to_bytes()], &rngcraps_api::ID)?;
    craps_vault_info.has_seeds(&[CRAPS_VAULT], &rngcraps_api::ID)?;
    signer_crap_ata.is_writable()?;
    vault_crap_ata.is_writable()?;
    crap_mint.has_address(&CRAP_MINT_ADDRESS)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    // Bets ride on the open round, so the table must have seen every earlier roll.
    let table_epoch = board
        .round_id
        .checked_sub(1)
        .ok_or(GameError::StaleEpoch)?;
    if craps_game.epoch_id != table_epoch {
        sol_log(&format!(
            "Table at epoch {}, open round {}",
            craps_game.epoch_id, board.round_id
        ));
        return Err(GameError::StaleEpoch.into());
    }

    // Load or create the position.
    let craps_position = if craps_position_info.data_is_empty() {
        create_program_account::<CrapsPosition>(
            craps_position_info,
            system_program,
            signer_info,
            &rngcraps_api::ID,
            &[CRAPS_POSITION, &signer_info.key.to_bytes()],
        )?;
        let position = craps_position_info.as_account_mut::<CrapsPosition>(&rngcraps_api::ID)?;
        position.authority = *signer_info.key;
        position.epoch_id = table_epoch;
        position
    } else {
        let position = craps_position_info.as_account_mut::<CrapsPosition>(&rngcraps_api::ID)?;
        if position.authority != *signer_info.key {
            return Err(GameError::InvalidAuthority.into());
        }
        if position.epoch_id != table_epoch {
            if position.has_active_bets() {
                sol_log("Position must be settled before betting");
                return Err(GameError::StaleEpoch.into());
            }
            position.epoch_id = table_epoch;
        }
        position
    };

    // Reserve the worst case before taking the stake.
    let phase = craps_game.phase()?;
    let reservation = place_wager(craps_position, slot, amount, phase)?;
    craps_game.reserve(amount, reservation)?;

    // Create the vault's token account if needed.
    if vault_crap_ata.data_is_empty() {
        create_associated_token_account(
            signer_info,
            craps_vault_info,
            vault_crap_ata,
            crap_mint,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        vault_crap_ata.as_associated_token_account(craps_vault_info.key, &CRAP_MINT_ADDRESS)?;
    }

    invoke(
        &spl_token::instruction::transfer(
            &spl_token::ID,
            signer_crap_ata.key,
            vault_crap_ata.key,
            signer_info.key,
            &[],
            amount,
        )?,
        &[
            signer_crap_ata.clone(),
            vault_crap_ata.clone(),
            signer_info.clone(),
            token_program.clone(),
        ],
    )?;

    sol_log(&format!(
        "PlaceBet: {:?} amount={} reserved={} round={}",
        slot, amount, reservation, board.round_id
    ));

    Ok(())
}
