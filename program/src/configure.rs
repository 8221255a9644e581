use rngcraps_api::prelude::*;
use solana_program::log::sol_log;
use steel::*;

/// Updates protocol settings. Admin only.
pub fn process_configure(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = Configure::try_from_bytes(data)?;

    // Load accounts.
    let [signer_info, config_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let config = config_info
        .is_writable()?
        .has_seeds(&[CONFIG], &rngcraps_api::ID)?
        .as_account_mut::<Config>(&rngcraps_api::ID)?;
    if config.admin != *signer_info.key {
        return Err(GameError::InvalidAuthority.into());
    }

    config.update(
        args.admin,
        args.fee_collector,
        u64::from_le_bytes(args.admin_fee_bps),
        u64::from_le_bytes(args.top_miner_bps),
        u64::from_le_bytes(args.dice_bonus_bps),
        u64::from_le_bytes(args.round_duration),
        args.empty_pool_policy,
        args.field_twelve_triple,
    )?;

    sol_log(&format!(
        "Configured: fee={}bps top={}bps bonus={}bps duration={} policy={} triple={}",
        config.admin_fee_bps,
        config.top_miner_bps,
        config.dice_bonus_bps,
        config.round_duration,
        config.empty_pool_policy,
        config.field_twelve_triple
    ));

    Ok(())
}
