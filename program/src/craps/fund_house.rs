use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke;
use steel::*;

/// Adds CRAP to the house bankroll. Anyone may fund the house.
pub fn process_fund_house(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse instruction data.
    let args = FundHouse::try_from_bytes(data)?;
    let amount = u64::from_le_bytes(args.amount);

    // Load accounts.
    let [signer_info, craps_game_info, craps_vault_info, signer_crap_ata, vault_crap_ata, crap_mint, system_program, token_program, associated_token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?;
    let craps_game = craps_game_info
        .is_writable()?
        .has_seeds(&[CRAPS_GAME], &rngcraps_api::ID)?
        .as_account_mut::<CrapsGame>(&rngcraps_api::ID)?;
    craps_vault_info.has_seeds(&[CRAPS_VAULT], &rngcraps_api::ID)?;
    signer_crap_ata.is_writable()?;
    vault_crap_ata.is_writable()?;
    crap_mint.has_address(&CRAP_MINT_ADDRESS)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    if amount == 0 {
        return Err(GameError::InvalidBetAmount.into());
    }

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

    craps_game.fund(amount)?;

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
        "FundHouse: +{} bankroll={} reserved={}",
        amount, craps_game.house_bankroll, craps_game.reserved_payouts
    ));

    Ok(())
}
