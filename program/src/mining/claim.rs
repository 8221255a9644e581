use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke_signed;
use steel::*;

/// Pays a miner's winnings for a resolved round and closes its position.
pub fn process_claim_mining(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, round_info, miner_info, treasury_info, vault_rng_ata, signer_rng_ata, token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let miner = miner_info
        .is_writable()?
        .as_account::<MinerPosition>(&rngcraps_api::ID)?
        .assert(|m| m.authority == *signer_info.key)?;
    miner_info.has_seeds(
        &[MINER, &signer_info.key.to_bytes(), &miner.round_id.to_le_bytes()],
        &rngcraps_api::ID,
    )?;
    let round = round_info
        .is_writable()?
        .has_seeds(&[ROUND, &miner.round_id.to_le_bytes()], &rngcraps_api::ID)?
        .as_account_mut::<Round>(&rngcraps_api::ID)?;
    let treasury = treasury_info
        .is_writable()?
        .has_address(&TREASURY_ADDRESS)?
        .as_account_mut::<Treasury>(&rngcraps_api::ID)?;
    token_program.is_program(&spl_token::ID)?;

    if clock.slot > round.expires_at {
        return Err(GameError::RoundExpired.into());
    }

    let payout = round.payout(miner)?;
    let amount = payout.total()?;
    if payout.is_top_miner() {
        round.top_miner = *signer_info.key;
    }
    round.total_claimed = round
        .total_claimed
        .checked_add(amount)
        .ok_or(GameError::ArithmeticOverflow)?;
    treasury.total_claimed = treasury
        .total_claimed
        .checked_add(amount)
        .ok_or(GameError::ArithmeticOverflow)?;

    if amount > 0 {
        vault_rng_ata
            .is_writable()?
            .as_associated_token_account(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS)?;
        signer_rng_ata
            .is_writable()?
            .as_associated_token_account(signer_info.key, &RNG_MINT_ADDRESS)?;
        invoke_signed(
            &spl_token::instruction::transfer(
                &spl_token::ID,
                vault_rng_ata.key,
                signer_rng_ata.key,
                treasury_info.key,
                &[],
                amount,
            )?,
            &[
                vault_rng_ata.clone(),
                signer_rng_ata.clone(),
                treasury_info.clone(),
                token_program.clone(),
            ],
            &[&[TREASURY, &[TREASURY_BUMP]]],
        )?;
    }

    sol_log(&format!(
        "ClaimMining: round={} stake={} share={} top_miner={}",
        round.id, payout.stake_returned, payout.share, payout.top_miner_reward
    ));

    // Close the position; rent goes back to the miner.
    let lamports = miner_info.lamports();
    **miner_info.try_borrow_mut_lamports()? = 0;
    **signer_info.try_borrow_mut_lamports()? = signer_info
        .lamports()
        .checked_add(lamports)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    miner_info.assign(&system_program::ID);
    miner_info.realloc(0, true)?;

    Ok(())
}
