use solana_program::sysvar::slot_hashes;
use spl_associated_token_account::get_associated_token_address;
use steel::*;

use crate::{
    consts::*,
    instruction::*,
    state::*,
};

pub fn initialize(signer: Pubkey) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(BOARD_ADDRESS, false),
            AccountMeta::new(CONFIG_ADDRESS, false),
            AccountMeta::new(TREASURY_ADDRESS, false),
            AccountMeta::new(round_pda(1).0, false),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: Initialize {}.to_bytes(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn configure(
    signer: Pubkey,
    admin: Pubkey,
    fee_collector: Pubkey,
    admin_fee_bps: u64,
    top_miner_bps: u64,
    dice_bonus_bps: u64,
    round_duration: u64,
    empty_pool_policy: PoolPolicy,
    field_twelve_triple: bool,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(CONFIG_ADDRESS, false),
        ],
        data: Configure {
            admin,
            fee_collector,
            admin_fee_bps: admin_fee_bps.to_le_bytes(),
            top_miner_bps: top_miner_bps.to_le_bytes(),
            dice_bonus_bps: dice_bonus_bps.to_le_bytes(),
            round_duration: round_duration.to_le_bytes(),
            empty_pool_policy: empty_pool_policy.into(),
            field_twelve_triple: field_twelve_triple as u8,
        }
        .to_bytes(),
    }
}

pub fn stake(signer: Pubkey, round_id: u64, square: u8, amount: u64, prediction: u8) -> Instruction {
    let signer_rng_ata = get_associated_token_address(&signer, &RNG_MINT_ADDRESS);
    let vault_rng_ata = get_associated_token_address(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new_readonly(BOARD_ADDRESS, false),
            AccountMeta::new(round_pda(round_id).0, false),
            AccountMeta::new(miner_pda(signer, round_id).0, false),
            AccountMeta::new_readonly(TREASURY_ADDRESS, false),
            AccountMeta::new(signer_rng_ata, false),
            AccountMeta::new(vault_rng_ata, false),
            AccountMeta::new_readonly(RNG_MINT_ADDRESS, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: Stake {
            amount: amount.to_le_bytes(),
            square,
            prediction,
        }
        .to_bytes(),
    }
}

pub fn resolve(signer: Pubkey, round_id: u64, fee_collector: Pubkey) -> Instruction {
    let vault_rng_ata = get_associated_token_address(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS);
    let fee_collector_ata = get_associated_token_address(&fee_collector, &RNG_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(BOARD_ADDRESS, false),
            AccountMeta::new_readonly(CONFIG_ADDRESS, false),
            AccountMeta::new(round_pda(round_id).0, false),
            AccountMeta::new(round_pda(round_id + 1).0, false),
            AccountMeta::new(TREASURY_ADDRESS, false),
            AccountMeta::new(vault_rng_ata, false),
            AccountMeta::new(fee_collector_ata, false),
            AccountMeta::new(RNG_MINT_ADDRESS, false),
            AccountMeta::new_readonly(slot_hashes::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: Resolve {}.to_bytes(),
    }
}

pub fn claim_mining(signer: Pubkey, round_id: u64) -> Instruction {
    let signer_rng_ata = get_associated_token_address(&signer, &RNG_MINT_ADDRESS);
    let vault_rng_ata = get_associated_token_address(&TREASURY_ADDRESS, &RNG_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(round_pda(round_id).0, false),
            AccountMeta::new(miner_pda(signer, round_id).0, false),
            AccountMeta::new(TREASURY_ADDRESS, false),
            AccountMeta::new(vault_rng_ata, false),
            AccountMeta::new(signer_rng_ata, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: ClaimMining {}.to_bytes(),
    }
}

pub fn place_bet(signer: Pubkey, bet_type: CrapsBetType, target: u8, amount: u64) -> Instruction {
    let craps_vault = craps_vault_pda().0;
    let signer_crap_ata = get_associated_token_address(&signer, &CRAP_MINT_ADDRESS);
    let vault_crap_ata = get_associated_token_address(&craps_vault, &CRAP_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new_readonly(BOARD_ADDRESS, false),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new(craps_position_pda(signer).0, false),
            AccountMeta::new_readonly(craps_vault, false),
            AccountMeta::new(signer_crap_ata, false),
            AccountMeta::new(vault_crap_ata, false),
            AccountMeta::new_readonly(CRAP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: PlaceBet {
            amount: amount.to_le_bytes(),
            bet_type: bet_type.into(),
            target,
        }
        .to_bytes(),
    }
}

/// Settles `authority`'s position against a resolved round. Anyone may sign.
pub fn settle_craps(signer: Pubkey, authority: Pubkey, round_id: u64) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new_readonly(CONFIG_ADDRESS, false),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new(craps_position_pda(authority).0, false),
            AccountMeta::new_readonly(round_pda(round_id).0, false),
        ],
        data: SettleCraps {}.to_bytes(),
    }
}

pub fn advance_table(signer: Pubkey, round_id: u64) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new_readonly(round_pda(round_id).0, false),
        ],
        data: AdvanceTable {}.to_bytes(),
    }
}

pub fn claim_winnings(signer: Pubkey) -> Instruction {
    let craps_vault = craps_vault_pda().0;
    let signer_crap_ata = get_associated_token_address(&signer, &CRAP_MINT_ADDRESS);
    let vault_crap_ata = get_associated_token_address(&craps_vault, &CRAP_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(craps_position_pda(signer).0, false),
            AccountMeta::new_readonly(craps_vault, false),
            AccountMeta::new(vault_crap_ata, false),
            AccountMeta::new(signer_crap_ata, false),
            AccountMeta::new_readonly(CRAP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: ClaimWinnings {}.to_bytes(),
    }
}

pub fn fund_house(signer: Pubkey, amount: u64) -> Instruction {
    let craps_vault = craps_vault_pda().0;
    let signer_crap_ata = get_associated_token_address(&signer, &CRAP_MINT_ADDRESS);
    let vault_crap_ata = get_associated_token_address(&craps_vault, &CRAP_MINT_ADDRESS);
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new_readonly(craps_vault, false),
            AccountMeta::new(signer_crap_ata, false),
            AccountMeta::new(vault_crap_ata, false),
            AccountMeta::new_readonly(CRAP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
        data: FundHouse {
            amount: amount.to_le_bytes(),
        }
        .to_bytes(),
    }
}

pub fn force_settle(signer: Pubkey, authority: Pubkey) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(craps_game_pda().0, false),
            AccountMeta::new(craps_position_pda(authority).0, false),
        ],
        data: ForceSettle {}.to_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_bet_data() {
        let signer = Pubkey::new_unique();
        let ix = place_bet(signer, CrapsBetType::Hardway, 6, 250);
        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.data[0], GameInstruction::PlaceBet as u8);
        assert_eq!(&ix.data[1..9], &250u64.to_le_bytes());
        assert_eq!(ix.data[9], CrapsBetType::Hardway as u8);
        assert_eq!(ix.data[10], 6);
        assert_eq!(ix.accounts[3].pubkey, craps_position_pda(signer).0);
        assert!(ix.accounts[0].is_signer);
    }

    #[test]
    fn test_stake_data() {
        let signer = Pubkey::new_unique();
        let ix = stake(signer, 9, 14, 1_000, 6);
        assert_eq!(ix.data[0], GameInstruction::Stake as u8);
        assert_eq!(&ix.data[1..9], &1_000u64.to_le_bytes());
        assert_eq!(ix.data[9], 14);
        assert_eq!(ix.data[10], 6);
        assert_eq!(ix.accounts[2].pubkey, round_pda(9).0);
        assert_eq!(ix.accounts[3].pubkey, miner_pda(signer, 9).0);
    }

    #[test]
    fn test_settle_targets_owner_position() {
        let signer = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let ix = settle_craps(signer, owner, 3);
        assert_eq!(ix.data, vec![GameInstruction::SettleCraps as u8]);
        assert_eq!(ix.accounts[3].pubkey, craps_position_pda(owner).0);
        assert_eq!(ix.accounts[4].pubkey, round_pda(3).0);
        assert!(!ix.accounts[4].is_writable);
    }

    #[test]
    fn test_resolve_opens_next_round() {
        let ix = resolve(Pubkey::new_unique(), 4, Pubkey::new_unique());
        assert_eq!(ix.accounts[3].pubkey, round_pda(4).0);
        assert_eq!(ix.accounts[4].pubkey, round_pda(5).0);
        assert_eq!(ix.accounts[9].pubkey, slot_hashes::ID);
    }
}
