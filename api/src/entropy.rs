use solana_program::keccak::hashv;

use crate::consts::{BOARD_SIZE, MAX_ENTROPY_RETRIES};
use crate::error::GameError;

/// Outcome of one round: a board square and the die pair it maps to.
///
/// Square `s` on the 6x6 board is `die1 = s / 6 + 1`, `die2 = s % 6 + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roll {
    pub square: u8,
    pub die1: u8,
    pub die2: u8,
}

impl Roll {
    pub fn from_square(square: u8) -> Result<Self, GameError> {
        if square as usize >= BOARD_SIZE {
            return Err(GameError::InvalidSquare);
        }
        Ok(Self {
            square,
            die1: square / 6 + 1,
            die2: square % 6 + 1,
        })
    }

    pub fn from_dice(die1: u8, die2: u8) -> Result<Self, GameError> {
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(GameError::InvalidSquare);
        }
        Self::from_square((die1 - 1) * 6 + (die2 - 1))
    }

    pub fn sum(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Doubles, i.e. the "hard" way to roll an even number.
    pub fn is_hard(&self) -> bool {
        self.die1 == self.die2
    }
}

/// Draws the winning roll for a round from a finalized seed.
///
/// The first draw hashes `seed || round_id`; rejected draws re-hash the
/// previous digest. Deterministic for a given `(seed, round_id)`.
pub fn sample(seed: &[u8; 32], round_id: u64) -> Result<Roll, GameError> {
    let digest = hashv(&[&seed[..], &round_id.to_le_bytes()[..]]).to_bytes();
    let square = draw(digest, BOARD_SIZE as u64)?;
    Roll::from_square(square as u8)
}

/// Independent draw in `[0, deployed)` used to pick the top miner on the
/// winning square.
pub fn top_miner_sample(seed: &[u8; 32], round_id: u64, deployed: u64) -> Result<u64, GameError> {
    if deployed == 0 {
        return Ok(0);
    }
    let digest = hashv(&[&seed[..], &round_id.to_le_bytes()[..], &b"top"[..]]).to_bytes();
    draw(digest, deployed)
}

/// Rejection-samples `[0, bound)` from a digest chain so every value is
/// equally likely.
fn draw(mut digest: [u8; 32], bound: u64) -> Result<u64, GameError> {
    let limit = (u64::MAX / bound) * bound;
    for _ in 0..=MAX_ENTROPY_RETRIES {
        let x = first_word(&digest);
        if x < limit {
            return Ok(x % bound);
        }
        digest = hashv(&[&digest[..]]).to_bytes();
    }
    Err(GameError::EntropyExhausted)
}

fn first_word(digest: &[u8; 32]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(word)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_square_to_dice() {
        let roll = Roll::from_square(0).unwrap();
        assert_eq!((roll.die1, roll.die2), (1, 1));
        let roll = Roll::from_square(35).unwrap();
        assert_eq!((roll.die1, roll.die2), (6, 6));
        let roll = Roll::from_square(13).unwrap();
        assert_eq!((roll.die1, roll.die2), (3, 2));
        assert_eq!(roll.sum(), 5);
        assert_eq!(Roll::from_square(36), Err(GameError::InvalidSquare));
    }

    #[test]
    fn test_dice_to_square() {
        for square in 0..36u8 {
            let roll = Roll::from_square(square).unwrap();
            assert_eq!(Roll::from_dice(roll.die1, roll.die2).unwrap(), roll);
        }
        assert_eq!(Roll::from_dice(0, 3), Err(GameError::InvalidSquare));
        assert_eq!(Roll::from_dice(4, 7), Err(GameError::InvalidSquare));
    }

    #[test]
    fn test_hard_rolls() {
        assert!(Roll::from_dice(3, 3).unwrap().is_hard());
        assert!(!Roll::from_dice(2, 4).unwrap().is_hard());
        let hard = (0..36u8)
            .filter(|s| Roll::from_square(*s).unwrap().is_hard())
            .count();
        assert_eq!(hard, 6);
    }

    #[test]
    fn test_sample_deterministic() {
        let seed = [7u8; 32];
        assert_eq!(sample(&seed, 42).unwrap(), sample(&seed, 42).unwrap());
    }

    #[test]
    fn test_sample_depends_on_round_id() {
        let mut rng = StdRng::seed_from_u64(11);
        let seed: [u8; 32] = rng.gen();
        let distinct = (0..64u64)
            .map(|id| sample(&seed, id).unwrap().square)
            .collect::<std::collections::BTreeSet<_>>();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_sample_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let draws = 72_000u64;
        let mut counts = [0u64; BOARD_SIZE];
        for i in 0..draws {
            let seed: [u8; 32] = rng.gen();
            let roll = sample(&seed, i).unwrap();
            counts[roll.square as usize] += 1;
        }
        let expected = draws / BOARD_SIZE as u64;
        for (square, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected * 15 / 100,
                "square {} drawn {} times, expected ~{}",
                square,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_sum_distribution() {
        let mut ways = [0u8; 13];
        for square in 0..36u8 {
            ways[Roll::from_square(square).unwrap().sum() as usize] += 1;
        }
        assert_eq!(&ways[2..], &[1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_top_miner_sample_in_range() {
        let seed = [3u8; 32];
        assert_eq!(top_miner_sample(&seed, 1, 0), Ok(0));
        assert_eq!(top_miner_sample(&seed, 1, 1), Ok(0));
        for deployed in [2u64, 17, 1_000_000, u64::MAX / 2 + 2] {
            assert!(top_miner_sample(&seed, 1, deployed).unwrap() < deployed);
        }
    }

    #[test]
    fn test_top_miner_sample_uniform() {
        let mut rng = StdRng::seed_from_u64(77);
        let draws = 30_000u64;
        let mut counts = [0u64; 3];
        for i in 0..draws {
            let seed: [u8; 32] = rng.gen();
            counts[top_miner_sample(&seed, i, 3).unwrap() as usize] += 1;
        }
        for count in counts {
            assert!(count.abs_diff(draws / 3) < draws / 3 / 10);
        }
    }

    #[test]
    fn test_draw_rejects_above_limit() {
        // A digest whose first word is u64::MAX is always above the limit.
        let digest = [0xff; 32];
        let value = draw(digest, 36).unwrap();
        let rehashed = hashv(&[&digest[..]]).to_bytes();
        assert_eq!(value, draw(rehashed, 36).unwrap());
    }
}
