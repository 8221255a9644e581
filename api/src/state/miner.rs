use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use steel::*;

use crate::consts::BOARD_SIZE;
use crate::error::GameError;
use crate::state::miner_pda;

use super::GameAccount;

/// A miner's stakes in a single round. Closed when the miner claims.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MinerPosition {
    /// The authority of this miner account.
    pub authority: Pubkey,

    /// The round these stakes belong to.
    pub round_id: u64,

    /// The amount of RNG tokens deployed on each square.
    #[serde(with = "BigArray")]
    pub deployed: [u64; BOARD_SIZE],

    /// Stake other miners had on each square before this miner.
    #[serde(with = "BigArray")]
    pub cumulative: [u64; BOARD_SIZE],

    /// The total amount of RNG tokens deployed this round.
    pub total_deployed: u64,

    /// Predicted dice sum (2..=12), or 0 for none.
    pub dice_prediction: u8,

    /// Padding for alignment.
    pub _padding: [u8; 7],
}

impl MinerPosition {
    pub fn pda(&self) -> (Pubkey, u8) {
        miner_pda(self.authority, self.round_id)
    }

    /// Resolves the prediction for a new stake. The first stake of the round fixes it;
    /// later stakes may repeat it or pass 0.
    pub fn fix_prediction(&self, prediction: u8) -> Result<u8, GameError> {
        if prediction != 0 && !(2..=12).contains(&prediction) {
            return Err(GameError::InvalidPrediction);
        }
        if self.total_deployed == 0 {
            return Ok(prediction);
        }
        if prediction == 0 || prediction == self.dice_prediction {
            Ok(self.dice_prediction)
        } else {
            Err(GameError::InvalidPrediction)
        }
    }
}

account!(GameAccount, MinerPosition);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_is_fixed_by_first_stake() {
        let mut miner = MinerPosition::zeroed();
        assert_eq!(miner.fix_prediction(1), Err(GameError::InvalidPrediction));
        assert_eq!(miner.fix_prediction(13), Err(GameError::InvalidPrediction));
        assert_eq!(miner.fix_prediction(9), Ok(9));

        miner.total_deployed = 10;
        miner.dice_prediction = 9;
        assert_eq!(miner.fix_prediction(0), Ok(9));
        assert_eq!(miner.fix_prediction(9), Ok(9));
        assert_eq!(miner.fix_prediction(8), Err(GameError::InvalidPrediction));
    }
}
