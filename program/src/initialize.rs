use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Creates the Board, Config, Treasury, Round 1 and the craps table.
/// Admin only; can only succeed once.
pub fn process_initialize(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info, board_info, config_info, treasury_info, round_info, craps_game_info, system_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    signer_info.is_signer()?.has_address(&ADMIN_ADDRESS)?;
    board_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[BOARD], &rngcraps_api::ID)?;
    config_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[CONFIG], &rngcraps_api::ID)?;
    treasury_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[TREASURY], &rngcraps_api::ID)?;
    round_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[ROUND, &1u64.to_le_bytes()], &rngcraps_api::ID)?;
    craps_game_info
        .is_empty()?
        .is_writable()?
        .has_seeds(&[CRAPS_GAME], &rngcraps_api::ID)?;
    system_program.is_program(&system_program::ID)?;

    let clock = Clock::get()?;

    // Board: round 1 opens immediately.
    create_program_account::<Board>(
        board_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[BOARD],
    )?;
    let board = board_info.as_account_mut::<Board>(&rngcraps_api::ID)?;
    board.round_id = 1;
    board.start_slot = clock.slot;
    board.end_slot = clock
        .slot
        .checked_add(DEFAULT_ROUND_DURATION)
        .ok_or(GameError::ArithmeticOverflow)?;
    board.seed_slot = board.end_slot;
    board.carryover = 0;

    create_program_account::<Config>(
        config_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[CONFIG],
    )?;
    let config = config_info.as_account_mut::<Config>(&rngcraps_api::ID)?;
    config.set_defaults(*signer_info.key);

    create_program_account::<Treasury>(
        treasury_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[TREASURY],
    )?;

    create_program_account::<Round>(
        round_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[ROUND, &1u64.to_le_bytes()],
    )?;
    let round = round_info.as_account_mut::<Round>(&rngcraps_api::ID)?;
    let expires_at = board
        .end_slot
        .checked_add(ROUND_EXPIRY_SLOTS)
        .ok_or(GameError::ArithmeticOverflow)?;
    round.open(1, 0, expires_at, *signer_info.key);

    create_program_account::<CrapsGame>(
        craps_game_info,
        system_program,
        signer_info,
        &rngcraps_api::ID,
        &[CRAPS_GAME],
    )?;
    let craps_game = craps_game_info.as_account_mut::<CrapsGame>(&rngcraps_api::ID)?;
    craps_game.set_phase(Phase::ComeOut);

    sol_log(&format!(
        "Initialized: round 1 window [{}, {})",
        board.start_slot, board.end_slot
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(signer: Pubkey) -> ProgramResult {
        let keys = [
            signer,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            system_program::ID,
        ];
        let mut lamports = [0u64; 7];
        let mut data: [Vec<u8>; 7] = Default::default();
        let owner = system_program::ID;
        let accounts: Vec<AccountInfo> = keys
            .iter()
            .zip(lamports.iter_mut())
            .zip(data.iter_mut())
            .enumerate()
            .map(|(i, ((key, lamports), data))| {
                AccountInfo::new(key, i == 0, true, lamports, data.as_mut_slice(), &owner, false, 0)
            })
            .collect();
        process_initialize(&accounts, &[])
    }

    #[test]
    fn test_stranger_cannot_initialize() {
        let stranger = run(Pubkey::new_unique());
        assert!(stranger.is_err());
        // The admin gets past the signer check and fails on the fake PDAs instead.
        let admin = run(ADMIN_ADDRESS);
        assert!(admin.is_err());
        assert_ne!(stranger, admin);
    }
}
