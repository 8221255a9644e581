use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use solana_program::program::invoke;
use steel::*;

/// Stakes RNG on one square of the open round.
pub fn process_stake(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Stake::try_from_bytes(data)?;
    let amount = u64::from_le_bytes(args.amount);
    let square = args.square;

    // Load accounts.
    let clock = Clock::get()?;
    let [signer_info, board_info, round_info, miner_info, treasury_info, signer_rng_ata, vault_rng_ata, rng_mint, system_program, token_program, associated_token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let board = board_info
        .has_seeds(&[BOARD], &rngcraps_api::ID)?
        .as_account::<Board>(&rngcraps_api::ID)?;
    board.assert_open(clock.slot)?;
    let round = round_info
        .is_writable()?
        .has_seeds(&[ROUND, &board.round_id.to_le_bytes()], &rngcraps_api::ID)?
        .as_account_mut::<Round>(&rngcraps_api::ID)?;
    miner_info.is_writable()?.has_seeds(
        &[MINER, &signer_info.key.to_bytes(), &round.id.to_le_bytes()],
        &rngcraps_api::ID,
    )?;
    treasury_info.has_address(&TREASURY_ADDRESS)?;
    signer_rng_ata.is_writable()?;
    vault_rng_ata.is_writable()?;
    rng_mint.has_address(&RNG_MINT_ADDRESS)?;
    system_program.is_program(&system_program::ID)?;
    token_program.is_program(&spl_token::ID)?;
    associated_token_program.is_program(&spl_associated_token_account::ID)?;

    // Open the miner's position for this round on first stake.
    let miner = if miner_info.data_is_empty() {
        create_program_account::<MinerPosition>(
            miner_info,
            system_program,
            signer_info,
            &rngcraps_api::ID,
            &[MINER, &signer_info.key.to_bytes(), &round.id.to_le_bytes()],
        )?;
        let miner = miner_info.as_account_mut::<MinerPosition>(&rngcraps_api::ID)?;
        miner.authority = *signer_info.key;
        miner.round_id = round.id;
        miner
    } else {
        miner_info
            .as_account_mut::<MinerPosition>(&rngcraps_api::ID)?
            .assert_mut(|m| m.authority == *signer_info.key)?
    };

    round.stake(miner, square, amount, args.prediction)?;

    // Create the vault's token account if needed.
    if vault_rng_ata.data_is_empty() {
        create_associated_token_account(
            signer_info,
            treasury_info,
            vault_rng_ata,
            rng_mint,
            system_program,
            token_program,
            associated_token_program,
        )?;
    } else {
        vault_rng_ata.as_associated_token_account(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS)?;
    }

    // Escrow the stake.
    invoke(
        &spl_token::instruction::transfer(
            &spl_token::ID,
            signer_rng_ata.key,
            vault_rng_ata.key,
            signer_info.key,
            &[],
            amount,
        )?,
        &[
            signer_rng_ata.clone(),
            vault_rng_ata.clone(),
            signer_info.clone(),
            token_program.clone(),
        ],
    )?;

    sol_log(&format!(
        "Stake: round={} square={} amount={} prediction={}",
        round.id, square, amount, miner.dice_prediction
    ));

    Ok(())
}
