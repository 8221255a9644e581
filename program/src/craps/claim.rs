use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke_signed;
use steel::*;

/// Pays out a position's pending winnings from the craps vault.
/// The house already booked these at settlement.
pub fn process_claim_winnings(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info, craps_position_info, craps_vault_info, vault_crap_ata, signer_crap_ata, crap_mint, token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    let craps_position = craps_position_info
        .is_writable()?
        .has_seeds(&[CRAPS_POSITION, &signer_info.key.to_bytes()], &rngcraps_api::ID)?
        .as_account_mut::<CrapsPosition>(&rngcraps_api::ID)?;
    if craps_position.authority != *signer_info.key {
        return Err(GameError::InvalidAuthority.into());
    }
    craps_vault_info.has_seeds(&[CRAPS_VAULT], &rngcraps_api::ID)?;
    vault_crap_ata
        .is_writable()?
        .as_associated_token_account(craps_vault_info.key, &CRAP_MINT_ADDRESS)?;
    signer_crap_ata
        .is_writable()?
        .as_associated_token_account(signer_info.key, &CRAP_MINT_ADDRESS)?;
    crap_mint.has_address(&CRAP_MINT_ADDRESS)?;
    token_program.is_program(&spl_token::ID)?;

    let amount = craps_position.pending_winnings;
    if amount == 0 {
        return Err(GameError::NoWinnings.into());
    }

    // Clear before the transfer.
    craps_position.pending_winnings = 0;

    let (_, craps_vault_bump) = craps_vault_pda();
    invoke_signed(
        &spl_token::instruction::transfer(
            &spl_token::ID,
            vault_crap_ata.key,
            signer_crap_ata.key,
            craps_vault_info.key,
            &[],
            amount,
        )?,
        &[
            vault_crap_ata.clone(),
            signer_crap_ata.clone(),
            craps_vault_info.clone(),
            token_program.clone(),
        ],
        &[&[CRAPS_VAULT, &[craps_vault_bump]]],
    )?;

    sol_log(&format!("ClaimWinnings: {} CRAP", amount));

    Ok(())
}
