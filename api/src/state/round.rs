use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use steel::*;

use crate::consts::{BOARD_SIZE, DENOMINATOR_BPS, NO_SQUARE};
use crate::entropy::{sample, top_miner_sample, Roll};
use crate::error::GameError;
use crate::state::round_pda;

use super::{Config, GameAccount, MinerPosition, PoolPolicy};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Round {
    /// The round number.
    pub id: u64,

    /// The amount of RNG tokens deployed in each square (6x6 grid = 36 dice combinations).
    #[serde(with = "BigArray")]
    pub deployed: [u64; BOARD_SIZE],

    /// Stake on each square whose dice prediction matches the square's sum.
    #[serde(with = "BigArray")]
    pub bonus_deployed: [u64; BOARD_SIZE],

    /// The count of miners on each square.
    #[serde(with = "BigArray")]
    pub count: [u64; BOARD_SIZE],

    /// The slot hash the round was resolved with.
    pub entropy_seed: [u8; 32],

    /// The winning square, or `NO_SQUARE` until resolved.
    pub winning_square: u8,

    /// The dice of the winning square (0 until resolved).
    pub die1: u8,
    pub die2: u8,

    /// Padding for alignment.
    pub _padding: [u8; 5],

    /// The slot at which claims for this round account end.
    pub expires_at: u64,

    /// The account that paid rent for this round.
    pub rent_payer: Pubkey,

    /// The top miner of the round, set when they claim.
    pub top_miner: Pubkey,

    /// Offset into the winning square's stake that picks the top miner.
    pub top_miner_sample: u64,

    /// The amount of RNG tokens reserved for the top miner.
    pub top_miner_reward: u64,

    /// Pool rolled in from earlier rounds whose winning square was empty.
    pub carry_in: u64,

    /// The total amount of RNG tokens deployed in the round.
    pub total_deployed: u64,

    /// The total amount of RNG tokens taken out of the pool (fees, burns).
    pub total_vaulted: u64,

    /// The pool shared by miners on the winning square.
    pub total_winnings: u64,

    /// The amount already paid out to claimants.
    pub total_claimed: u64,

    /// Dice prediction multiplier in effect when the round resolved.
    pub dice_bonus_bps: u64,
}

/// Where a resolved round's pool went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Protocol fee taken from the losing stake.
    pub fee: u64,
    /// Pool destroyed under the burn policy.
    pub burned: u64,
    /// Pool handed to the next round under the carry policy.
    pub carried: u64,
}

/// One miner's claim on a resolved round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinerPayout {
    pub stake_returned: u64,
    pub share: u64,
    pub top_miner_reward: u64,
}

impl MinerPayout {
    pub fn total(&self) -> Result<u64, GameError> {
        self.stake_returned
            .checked_add(self.share)
            .and_then(|t| t.checked_add(self.top_miner_reward))
            .ok_or(GameError::ArithmeticOverflow)
    }

    pub fn is_top_miner(&self) -> bool {
        self.top_miner_reward > 0
    }
}

impl Round {
    pub fn pda(&self) -> (Pubkey, u8) {
        round_pda(self.id)
    }

    /// Fresh, unresolved round.
    pub fn open(&mut self, id: u64, carry_in: u64, expires_at: u64, rent_payer: Pubkey) {
        *self = Round::zeroed();
        self.id = id;
        self.carry_in = carry_in;
        self.expires_at = expires_at;
        self.rent_payer = rent_payer;
        self.winning_square = NO_SQUARE;
    }

    pub fn is_resolved(&self) -> bool {
        self.winning_square != NO_SQUARE
    }

    pub fn roll(&self) -> Result<Roll, GameError> {
        if !self.is_resolved() {
            return Err(GameError::NotResolved);
        }
        Roll::from_square(self.winning_square)
    }

    /// Records a miner's stake on one square. The staking window is checked by the caller.
    pub fn stake(
        &mut self,
        miner: &mut MinerPosition,
        square: u8,
        amount: u64,
        prediction: u8,
    ) -> Result<(), GameError> {
        if self.is_resolved() {
            return Err(GameError::AlreadyResolved);
        }
        let roll = Roll::from_square(square)?;
        let index = square as usize;
        if amount == 0 {
            return Err(GameError::InvalidBetAmount);
        }
        if miner.deployed[index] > 0 {
            return Err(GameError::AlreadyStaked);
        }
        let prediction = miner.fix_prediction(prediction)?;

        let cumulative = self.deployed[index];
        let deployed = cumulative
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        let total_deployed = self
            .total_deployed
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        let bonus = if prediction != 0 && prediction == roll.sum() {
            self.bonus_deployed[index]
                .checked_add(amount)
                .ok_or(GameError::ArithmeticOverflow)?
        } else {
            self.bonus_deployed[index]
        };
        let miner_total = miner
            .total_deployed
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;

        self.deployed[index] = deployed;
        self.bonus_deployed[index] = bonus;
        self.count[index] = self.count[index].saturating_add(1);
        self.total_deployed = total_deployed;
        miner.deployed[index] = amount;
        miner.cumulative[index] = cumulative;
        miner.total_deployed = miner_total;
        miner.dice_prediction = prediction;
        Ok(())
    }

    /// Draws the winning square from `seed` and splits the pool.
    pub fn resolve(&mut self, seed: [u8; 32], config: &Config) -> Result<Resolution, GameError> {
        if self.is_resolved() {
            return Err(GameError::AlreadyResolved);
        }
        let roll = sample(&seed, self.id)?;
        let w = roll.square as usize;

        let losers = self
            .total_deployed
            .checked_sub(self.deployed[w])
            .ok_or(GameError::ArithmeticOverflow)?;
        let pool = losers
            .checked_add(self.carry_in)
            .ok_or(GameError::ArithmeticOverflow)?;

        let mut resolution = Resolution::default();
        if self.deployed[w] == 0 {
            match config.pool_policy() {
                PoolPolicy::Carry => resolution.carried = pool,
                PoolPolicy::Burn => resolution.burned = pool,
            }
            self.top_miner_reward = 0;
            self.total_winnings = 0;
        } else {
            resolution.fee = bps(losers, config.admin_fee_bps)?;
            self.top_miner_reward = bps(losers, config.top_miner_bps)?;
            self.total_winnings = pool
                .checked_sub(resolution.fee)
                .and_then(|p| p.checked_sub(self.top_miner_reward))
                .ok_or(GameError::ArithmeticOverflow)?;
            self.top_miner_sample = top_miner_sample(&seed, self.id, self.deployed[w])?;
        }

        self.entropy_seed = seed;
        self.winning_square = roll.square;
        self.die1 = roll.die1;
        self.die2 = roll.die2;
        self.dice_bonus_bps = config.dice_bonus_bps;
        self.total_vaulted = resolution
            .fee
            .checked_add(resolution.burned)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(resolution)
    }

    /// Weight of all stake on the winning square, bonus included.
    fn total_weight(&self, w: usize) -> Result<u128, GameError> {
        let extra = (self.bonus_deployed[w] as u128)
            .checked_mul(self.dice_bonus_bps.saturating_sub(DENOMINATOR_BPS) as u128)
            .ok_or(GameError::ArithmeticOverflow)?
            / DENOMINATOR_BPS as u128;
        Ok(self.deployed[w] as u128 + extra)
    }

    /// Computes what a miner is owed.
    pub fn payout(&self, miner: &MinerPosition) -> Result<MinerPayout, GameError> {
        let roll = self.roll()?;
        let w = roll.square as usize;
        let stake = miner.deployed[w];
        if stake == 0 || self.deployed[w] == 0 {
            return Ok(MinerPayout::default());
        }

        let weight = if miner.dice_prediction == roll.sum() {
            (stake as u128)
                .checked_mul(self.dice_bonus_bps as u128)
                .ok_or(GameError::ArithmeticOverflow)?
                / DENOMINATOR_BPS as u128
        } else {
            stake as u128
        };
        let share = (self.total_winnings as u128)
            .checked_mul(weight)
            .ok_or(GameError::ArithmeticOverflow)?
            / self.total_weight(w)?;
        let share = u64::try_from(share).map_err(|_| GameError::ArithmeticOverflow)?;

        let start = miner.cumulative[w];
        let end = start
            .checked_add(stake)
            .ok_or(GameError::ArithmeticOverflow)?;
        let top_miner_reward = if (start..end).contains(&self.top_miner_sample) {
            self.top_miner_reward
        } else {
            0
        };

        Ok(MinerPayout {
            stake_returned: stake,
            share,
            top_miner_reward,
        })
    }
}

fn bps(amount: u64, bps: u64) -> Result<u64, GameError> {
    let value = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(GameError::ArithmeticOverflow)?
        / DENOMINATOR_BPS as u128;
    u64::try_from(value).map_err(|_| GameError::ArithmeticOverflow)
}

account!(GameAccount, Round);

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use solana_program::rent::Rent;

    use super::*;

    fn config(policy: PoolPolicy) -> Config {
        let mut config = Config::zeroed();
        config.admin_fee_bps = 100;
        config.top_miner_bps = 1_000;
        config.dice_bonus_bps = 20_000;
        config.empty_pool_policy = policy.into();
        config
    }

    fn new_round(id: u64) -> Round {
        let mut round = Round::zeroed();
        round.open(id, 0, 1_000, Pubkey::default());
        round
    }

    fn miner() -> MinerPosition {
        MinerPosition::zeroed()
    }

    /// Finds a seed whose draw for `round_id` lands on `square`.
    fn seed_for(round_id: u64, square: u8) -> [u8; 32] {
        let mut seed = [0u8; 32];
        for i in 0..=u32::MAX {
            seed[0..4].copy_from_slice(&i.to_le_bytes());
            if sample(&seed, round_id).unwrap().square == square {
                return seed;
            }
        }
        unreachable!()
    }

    #[test]
    fn test_rent() {
        let size_of_round = 8 + std::mem::size_of::<Round>();
        let required_rent = Rent::default().minimum_balance(size_of_round);
        assert!(required_rent > 0);
    }

    #[test]
    fn test_stake_totals() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut round = new_round(1);
        let mut miners = vec![miner(); 8];
        for _ in 0..200 {
            let m = rng.gen_range(0..miners.len());
            let square = rng.gen_range(0..36u8);
            let amount = rng.gen_range(1..1_000_000u64);
            let _ = round.stake(&mut miners[m], square, amount, 0);
            assert_eq!(round.deployed.iter().sum::<u64>(), round.total_deployed);
        }
        let by_miners: u64 = miners.iter().map(|m| m.total_deployed).sum();
        assert_eq!(by_miners, round.total_deployed);
    }

    #[test]
    fn test_stake_rejections() {
        let mut round = new_round(1);
        let mut m = miner();
        assert_eq!(round.stake(&mut m, 36, 10, 0), Err(GameError::InvalidSquare));
        assert_eq!(round.stake(&mut m, 3, 0, 0), Err(GameError::InvalidBetAmount));
        round.stake(&mut m, 3, 10, 7).unwrap();
        assert_eq!(round.stake(&mut m, 3, 10, 7), Err(GameError::AlreadyStaked));
        assert_eq!(round.stake(&mut m, 4, 10, 8), Err(GameError::InvalidPrediction));
        round.stake(&mut m, 4, 10, 0).unwrap();
        assert_eq!(m.dice_prediction, 7);
        assert_eq!(round.total_deployed, 20);
    }

    #[test]
    fn test_cumulative_ranges_are_contiguous() {
        let mut round = new_round(1);
        let mut a = miner();
        let mut b = miner();
        round.stake(&mut a, 5, 30, 0).unwrap();
        round.stake(&mut b, 5, 70, 0).unwrap();
        assert_eq!(a.cumulative[5], 0);
        assert_eq!(b.cumulative[5], 30);
        assert_eq!(round.count[5], 2);
    }

    #[test]
    fn test_resolve_once() {
        let mut round = new_round(1);
        let mut m = miner();
        round.stake(&mut m, 0, 100, 0).unwrap();
        let config = config(PoolPolicy::Carry);
        round.resolve([9u8; 32], &config).unwrap();
        let square = round.winning_square;
        assert_eq!(round.resolve([1u8; 32], &config), Err(GameError::AlreadyResolved));
        assert_eq!(round.winning_square, square);
        assert_eq!(round.stake(&mut miner(), 1, 5, 0), Err(GameError::AlreadyResolved));
    }

    #[test]
    fn test_payout_requires_resolution() {
        let round = new_round(1);
        assert_eq!(round.payout(&miner()), Err(GameError::NotResolved));
    }

    #[test]
    fn test_pari_mutuel_split() {
        let round_id = 5;
        let seed = seed_for(round_id, 8);
        let mut round = new_round(round_id);
        let mut a = miner();
        let mut b = miner();
        let mut c = miner();
        round.stake(&mut a, 8, 1_000, 0).unwrap();
        round.stake(&mut b, 8, 3_000, 0).unwrap();
        round.stake(&mut c, 20, 10_000, 0).unwrap();

        let resolution = round.resolve(seed, &config(PoolPolicy::Carry)).unwrap();
        assert_eq!(round.winning_square, 8);
        assert_eq!(resolution.fee, 100);
        assert_eq!(round.top_miner_reward, 1_000);
        assert_eq!(round.total_winnings, 8_900);
        assert_eq!(round.total_vaulted, 100);

        let pa = round.payout(&a).unwrap();
        let pb = round.payout(&b).unwrap();
        let pc = round.payout(&c).unwrap();
        assert_eq!(pa.stake_returned, 1_000);
        assert_eq!(pa.share, 2_225);
        assert_eq!(pb.share, 6_675);
        assert_eq!(pc, MinerPayout::default());

        // Exactly one of the two covers the sample.
        assert!(pa.is_top_miner() ^ pb.is_top_miner());
        let paid = pa.total().unwrap() + pb.total().unwrap();
        assert!(paid <= round.total_deployed - resolution.fee);
    }

    #[test]
    fn test_dice_bonus_reweights_without_inflating() {
        let round_id = 3;
        // Square 14 is (3, 3): sum 6.
        let seed = seed_for(round_id, 14);
        let mut round = new_round(round_id);
        let mut a = miner();
        let mut b = miner();
        let mut c = miner();
        round.stake(&mut a, 14, 1_000, 6).unwrap();
        round.stake(&mut b, 14, 1_000, 9).unwrap();
        round.stake(&mut c, 0, 9_000, 0).unwrap();
        assert_eq!(round.bonus_deployed[14], 1_000);

        round.resolve(seed, &config(PoolPolicy::Carry)).unwrap();
        let pa = round.payout(&a).unwrap();
        let pb = round.payout(&b).unwrap();
        assert_eq!(pa.share, 2 * pb.share);
        assert!(pa.share + pb.share <= round.total_winnings);
    }

    #[test]
    fn test_empty_square_carry_and_burn() {
        let round_id = 2;
        let seed = seed_for(round_id, 35);

        let mut round = new_round(round_id);
        round.carry_in = 500;
        round.stake(&mut miner(), 0, 1_000, 0).unwrap();
        let resolution = round.resolve(seed, &config(PoolPolicy::Carry)).unwrap();
        assert_eq!(resolution.carried, 1_500);
        assert_eq!(resolution.fee, 0);
        assert_eq!(round.total_winnings, 0);
        assert_eq!(round.total_vaulted, 0);

        let mut round = new_round(round_id);
        round.stake(&mut miner(), 0, 1_000, 0).unwrap();
        let resolution = round.resolve(seed, &config(PoolPolicy::Burn)).unwrap();
        assert_eq!(resolution.burned, 1_000);
        assert_eq!(round.total_vaulted, 1_000);
    }

    #[test]
    fn test_zero_stake_round_resolves() {
        let mut round = new_round(7);
        let resolution = round.resolve([4u8; 32], &config(PoolPolicy::Carry)).unwrap();
        assert_eq!(resolution, Resolution::default());
        assert!(round.is_resolved());
        assert_eq!(round.payout(&miner()).unwrap(), MinerPayout::default());
    }
}
