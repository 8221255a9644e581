mod configure;
mod craps;
mod initialize;
mod mining;

use configure::*;
use craps::*;
use initialize::*;
use mining::*;

use rngcraps_api::instruction::*;
use steel::*;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let (ix, data) = parse_instruction(&rngcraps_api::ID, program_id, data)?;

    match ix {
        // Admin
        GameInstruction::Initialize => process_initialize(accounts, data)?,
        GameInstruction::Configure => process_configure(accounts, data)?,

        // Miner
        GameInstruction::Stake => process_stake(accounts, data)?,
        GameInstruction::Resolve => process_resolve(accounts, data)?,
        GameInstruction::ClaimMining => process_claim_mining(accounts, data)?,

        // Craps
        GameInstruction::PlaceBet => process_place_bet(accounts, data)?,
        GameInstruction::SettleCraps => process_settle_craps(accounts, data)?,
        GameInstruction::AdvanceTable => process_advance_table(accounts, data)?,
        GameInstruction::ClaimWinnings => process_claim_winnings(accounts, data)?,
        GameInstruction::FundHouse => process_fund_house(accounts, data)?,
        GameInstruction::ForceSettle => process_force_settle(accounts, data)?,
    }

    Ok(())
}

entrypoint!(process_instruction);
