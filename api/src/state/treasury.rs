use serde::{Deserialize, Serialize};
use steel::*;

use crate::error::GameError;
use crate::state::treasury_pda;

use super::{GameAccount, Resolution};

/// Treasury owns the RNG vault and keeps lifetime pool accounting.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Treasury {
    /// Protocol fees sent to the fee collector.
    pub total_fees: u64,

    /// Pools burned because nobody staked the winning square.
    pub total_burned: u64,

    /// Pools carried forward because nobody staked the winning square.
    pub total_carried: u64,

    /// Total paid out to miners.
    pub total_claimed: u64,
}

impl Treasury {
    pub fn pda() -> (Pubkey, u8) {
        treasury_pda()
    }

    pub fn record(&mut self, resolution: &Resolution) -> Result<(), GameError> {
        self.total_fees = self
            .total_fees
            .checked_add(resolution.fee)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.total_burned = self
            .total_burned
            .checked_add(resolution.burned)
            .ok_or(GameError::ArithmeticOverflow)?;
        self.total_carried = self
            .total_carried
            .checked_add(resolution.carried)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }
}

account!(GameAccount, Treasury);
