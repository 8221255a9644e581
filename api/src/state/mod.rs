mod board;
mod config;
mod craps_game;
mod craps_position;
mod miner;
mod round;
mod treasury;
mod wager;

pub use board::*;
pub use config::*;
pub use craps_game::*;
pub use craps_position::*;
pub use miner::*;
pub use round::*;
pub use treasury::*;
pub use wager::*;

use crate::consts::*;

use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum GameAccount {
    Board = 100,
    Config = 101,
    MinerPosition = 102,
    Round = 103,
    Treasury = 104,
    CrapsGame = 110,
    CrapsPosition = 111,
}

pub fn board_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BOARD], &crate::ID)
}

pub fn config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG], &crate::ID)
}

pub fn miner_pda(authority: Pubkey, round_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[MINER, &authority.to_bytes(), &round_id.to_le_bytes()],
        &crate::ID,
    )
}

pub fn round_pda(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROUND, &id.to_le_bytes()], &crate::ID)
}

pub fn treasury_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY], &crate::ID)
}

pub fn craps_game_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CRAPS_GAME], &crate::ID)
}

pub fn craps_position_pda(authority: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CRAPS_POSITION, &authority.to_bytes()], &crate::ID)
}

pub fn craps_vault_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CRAPS_VAULT], &crate::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_addresses_match_derivation() {
        assert_eq!(board_pda().0, BOARD_ADDRESS);
        assert_eq!(config_pda().0, CONFIG_ADDRESS);
        assert_eq!(treasury_pda(), (TREASURY_ADDRESS, TREASURY_BUMP));
    }

    #[test]
    fn test_account_discriminators() {
        assert_eq!(MinerPosition::discriminator(), GameAccount::MinerPosition as u8);
        assert_eq!(Round::discriminator(), GameAccount::Round as u8);
        assert_eq!(CrapsPosition::discriminator(), GameAccount::CrapsPosition as u8);
    }

    #[test]
    fn test_round_pdas_are_distinct() {
        assert_ne!(round_pda(1).0, round_pda(2).0);
        let authority = Pubkey::new_unique();
        assert_ne!(miner_pda(authority, 1).0, miner_pda(authority, 2).0);
    }
}
