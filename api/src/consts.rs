use const_crypto::ed25519;
use solana_program::{pubkey, pubkey::Pubkey};

/// The authority allowed to initialize the program.
pub const ADMIN_ADDRESS: Pubkey = pubkey!("HBUh9g46wk2X89CvaNN15UmsznP59rh6od1h8JwYAopk");

/// The duration of one minute, in slots.
pub const ONE_MINUTE_SLOTS: u64 = 150;

/// The number of slots in one hour.
pub const ONE_HOUR_SLOTS: u64 = 60 * ONE_MINUTE_SLOTS;

/// The number of slots in one day.
pub const ONE_DAY_SLOTS: u64 = 24 * ONE_HOUR_SLOTS;

/// The number of slots for breather between rounds.
pub const INTERMISSION_SLOTS: u64 = 35;

/// Default length of a staking window.
pub const DEFAULT_ROUND_DURATION: u64 = ONE_MINUTE_SLOTS;

/// Delay between re-arming an expired seed and the slot whose hash replaces it.
pub const ENTROPY_DELAY_SLOTS: u64 = 4;

/// Claims against a round are accepted until this many slots after its window closes.
pub const ROUND_EXPIRY_SLOTS: u64 = ONE_DAY_SLOTS;

/// The seed of the board account PDA.
pub const BOARD: &[u8] = b"board";

/// The seed of the config account PDA.
pub const CONFIG: &[u8] = b"config";

/// The seed of the miner account PDA.
pub const MINER: &[u8] = b"miner";

/// The seed of the round account PDA.
pub const ROUND: &[u8] = b"round";

/// The seed of the treasury account PDA.
pub const TREASURY: &[u8] = b"treasury";

/// Program id for const pda derivations
const PROGRAM_ID: [u8; 32] = unsafe { *(&crate::id() as *const Pubkey as *const [u8; 32]) };

/// The address of the config account.
pub const CONFIG_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[CONFIG], &PROGRAM_ID).0);

/// The address of the board account.
pub const BOARD_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[BOARD], &PROGRAM_ID).0);

/// The address of the treasury account.
pub const TREASURY_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[TREASURY], &PROGRAM_ID).0);

/// The bump of the treasury account.
pub const TREASURY_BUMP: u8 = ed25519::derive_program_address(&[TREASURY], &PROGRAM_ID).1;

// ============================================================================
// TOKENS - RNG (staking) / CRAP (table chips)
// ============================================================================

/// The RNG token mint address. Miners stake RNG on board squares.
///
/// For localnet: vanity address loaded via --account flag
/// For devnet:   created via spl-token
#[cfg(feature = "devnet")]
pub const RNG_MINT_ADDRESS: Pubkey = pubkey!("8HJyJPD4iWD1X9FxZEjDuVpPqSBvNeaJCczXeK2xsShs");
#[cfg(not(feature = "devnet"))]
pub const RNG_MINT_ADDRESS: Pubkey = pubkey!("RNGqnVVhpuFfWBJJbiZ3BtG1MrXF3cvD3mLSXpnPump");

/// The CRAP token mint address. CRAP is the chip wagered at the craps table.
#[cfg(feature = "devnet")]
pub const CRAP_MINT_ADDRESS: Pubkey = pubkey!("7frAenkamJSASBH9YukkzBsSMz9paQdYuSGw4SjWkXrf");
#[cfg(not(feature = "devnet"))]
pub const CRAP_MINT_ADDRESS: Pubkey = pubkey!("CRAPqnVVhpuFfWBJJbiZ3BtG1MrXF3cvD3mLSXpnPump");

/// The decimal precision of the RNG token.
pub const RNG_TOKEN_DECIMALS: u8 = 9;

/// The decimal precision of the CRAP token.
pub const CRAP_TOKEN_DECIMALS: u8 = 9;

/// One RNG token, denominated in indivisible units.
pub const ONE_RNG: u64 = 10u64.pow(RNG_TOKEN_DECIMALS as u32);

/// One CRAP token, denominated in indivisible units.
pub const ONE_CRAP: u64 = 10u64.pow(CRAP_TOKEN_DECIMALS as u32);

// ============================================================================
// MINING
// ============================================================================

/// The number of squares on the board (6x6 grid for dice combinations).
pub const BOARD_SIZE: usize = 36;

/// Marker for a round whose winning square has not been drawn.
pub const NO_SQUARE: u8 = u8::MAX;

/// Rejection-sampling retries before the sampler gives up.
pub const MAX_ENTROPY_RETRIES: u32 = 16;

/// Denominator for fee calculations.
pub const DENOMINATOR_BPS: u64 = 10_000;

/// Default protocol fee on the losing pool (1%).
pub const DEFAULT_ADMIN_FEE_BPS: u64 = 100;

/// Default top miner cut of the losing pool (10%).
pub const DEFAULT_TOP_MINER_BPS: u64 = 1_000;

/// Default weight multiplier for a correct dice-sum prediction (2x).
pub const DEFAULT_DICE_BONUS_BPS: u64 = 20_000;

/// Upper bound for the dice prediction multiplier (10x).
pub const MAX_DICE_BONUS_BPS: u64 = 100_000;

// ============================================================================
// CRAPS GAME CONSTANTS
// ============================================================================

/// The seed of the craps game account PDA.
pub const CRAPS_GAME: &[u8] = b"craps_game";

/// The seed of the craps position account PDA.
pub const CRAPS_POSITION: &[u8] = b"craps_position";

/// The seed of the craps vault PDA (owner of the house CRAP token account).
pub const CRAPS_VAULT: &[u8] = b"craps_vault";

/// Point numbers, in `come_bets`/`place_bets` index order.
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Hardway numbers, in `hardways` index order.
pub const HARDWAY_NUMBERS: [u8; 4] = [4, 6, 8, 10];

/// Number of rounds whose pre-roll phase the table remembers.
pub const PHASE_LOG_LEN: usize = 64;

/// Maximum single bet amount (100 CRAP).
pub const MAX_BET_AMOUNT: u64 = 100 * ONE_CRAP;

/// Odds bets may not exceed this multiple of their flat bet.
pub const MAX_ODDS_MULTIPLE: u64 = 3;

/// Pass Line / Don't Pass / Come / Don't Come payout ratio (1:1).
pub const PASS_LINE_PAYOUT_NUM: u64 = 1;
pub const PASS_LINE_PAYOUT_DEN: u64 = 1;

/// Field bet payout (1:1 for most, 2:1 for 2 and 12).
pub const FIELD_PAYOUT_NORMAL_NUM: u64 = 1;
pub const FIELD_PAYOUT_NORMAL_DEN: u64 = 1;
pub const FIELD_PAYOUT_2_12_NUM: u64 = 2;
pub const FIELD_PAYOUT_2_12_DEN: u64 = 1;

/// Field 12 on a triple-paying table (3:1).
pub const FIELD_PAYOUT_12_TRIPLE_NUM: u64 = 3;
pub const FIELD_PAYOUT_12_TRIPLE_DEN: u64 = 1;

/// Any Seven payout (4:1).
pub const ANY_SEVEN_PAYOUT_NUM: u64 = 4;
pub const ANY_SEVEN_PAYOUT_DEN: u64 = 1;

/// Any Craps payout (7:1).
pub const ANY_CRAPS_PAYOUT_NUM: u64 = 7;
pub const ANY_CRAPS_PAYOUT_DEN: u64 = 1;

/// Yo Eleven payout (15:1).
pub const YO_ELEVEN_PAYOUT_NUM: u64 = 15;
pub const YO_ELEVEN_PAYOUT_DEN: u64 = 1;

/// Aces (2) payout (30:1).
pub const ACES_PAYOUT_NUM: u64 = 30;
pub const ACES_PAYOUT_DEN: u64 = 1;

/// Twelve payout (30:1).
pub const TWELVE_PAYOUT_NUM: u64 = 30;
pub const TWELVE_PAYOUT_DEN: u64 = 1;

/// Place 4 or 10: 9:5
pub const PLACE_4_10_PAYOUT_NUM: u64 = 9;
pub const PLACE_4_10_PAYOUT_DEN: u64 = 5;
/// Place 5 or 9: 7:5
pub const PLACE_5_9_PAYOUT_NUM: u64 = 7;
pub const PLACE_5_9_PAYOUT_DEN: u64 = 5;
/// Place 6 or 8: 7:6
pub const PLACE_6_8_PAYOUT_NUM: u64 = 7;
pub const PLACE_6_8_PAYOUT_DEN: u64 = 6;

/// True odds payouts (pass and come odds).
/// 4 or 10: 2:1
pub const TRUE_ODDS_4_10_NUM: u64 = 2;
pub const TRUE_ODDS_4_10_DEN: u64 = 1;
/// 5 or 9: 3:2
pub const TRUE_ODDS_5_9_NUM: u64 = 3;
pub const TRUE_ODDS_5_9_DEN: u64 = 2;
/// 6 or 8: 6:5
pub const TRUE_ODDS_6_8_NUM: u64 = 6;
pub const TRUE_ODDS_6_8_DEN: u64 = 5;

/// Lay odds payouts (don't pass and don't come odds).
/// 4 or 10: 1:2
pub const LAY_4_10_PAYOUT_NUM: u64 = 1;
pub const LAY_4_10_PAYOUT_DEN: u64 = 2;
/// 5 or 9: 2:3
pub const LAY_5_9_PAYOUT_NUM: u64 = 2;
pub const LAY_5_9_PAYOUT_DEN: u64 = 3;
/// 6 or 8: 5:6
pub const LAY_6_8_PAYOUT_NUM: u64 = 5;
pub const LAY_6_8_PAYOUT_DEN: u64 = 6;

/// Hardway payouts.
/// Hard 4 or 10: 7:1
pub const HARD_4_10_PAYOUT_NUM: u64 = 7;
pub const HARD_4_10_PAYOUT_DEN: u64 = 1;
/// Hard 6 or 8: 9:5
pub const HARD_6_8_PAYOUT_NUM: u64 = 9;
pub const HARD_6_8_PAYOUT_DEN: u64 = 5;

// ============================================================================
// BONUS CRAPS SIDE BETS (Small, Tall, All)
// ============================================================================
// These bets win if all required totals are rolled before a 7.
// - Small: Hit all of 2, 3, 4, 5, 6 before a 7 (30:1)
// - Tall: Hit all of 8, 9, 10, 11, 12 before a 7 (30:1)
// - All: Hit all of 2-6 and 8-12 before a 7 (150:1)

/// Small bet payout (30:1).
pub const BONUS_SMALL_PAYOUT_NUM: u64 = 30;
pub const BONUS_SMALL_PAYOUT_DEN: u64 = 1;

/// Tall bet payout (30:1).
pub const BONUS_TALL_PAYOUT_NUM: u64 = 30;
pub const BONUS_TALL_PAYOUT_DEN: u64 = 1;

/// All bet payout (150:1).
pub const BONUS_ALL_PAYOUT_NUM: u64 = 150;
pub const BONUS_ALL_PAYOUT_DEN: u64 = 1;

/// Totals hit, bit `total - 2`. Bits 0-4 = totals 2..=6.
pub const BONUS_SMALL_MASK: u16 = 0b000_0001_1111;

/// Bits 6-10 = totals 8..=12.
pub const BONUS_TALL_MASK: u16 = 0b111_1100_0000;

/// Every total except 7.
pub const BONUS_ALL_MASK: u16 = BONUS_SMALL_MASK | BONUS_TALL_MASK;

// ============================================================================
// FIRE BET
// ============================================================================
// Wins based on unique points made (4,5,6,8,9,10) before seven-out.

/// Fire Bet - 4 unique points (24:1)
pub const FIRE_4_POINTS_PAYOUT_NUM: u64 = 24;
pub const FIRE_4_POINTS_PAYOUT_DEN: u64 = 1;

/// Fire Bet - 5 unique points (249:1)
pub const FIRE_5_POINTS_PAYOUT_NUM: u64 = 249;
pub const FIRE_5_POINTS_PAYOUT_DEN: u64 = 1;

/// Fire Bet - 6 unique points (999:1)
pub const FIRE_6_POINTS_PAYOUT_NUM: u64 = 999;
pub const FIRE_6_POINTS_PAYOUT_DEN: u64 = 1;

// ============================================================================
// RIDE THE LINE
// ============================================================================
// Pays on seven-out based on pass line wins since the bet was placed.
// Index 0 = 3 wins, index 8 = 11 or more wins.

pub const RIDE_PAYOUT_NUMS: [u64; 9] = [2, 3, 5, 8, 10, 15, 25, 40, 150];
pub const RIDE_PAYOUT_DEN: u64 = 1;

/// Fewest pass line wins that pay.
pub const RIDE_MIN_WINS: u8 = 3;

// ============================================================================
// MUGSY'S CORNER
// ============================================================================

/// Mugsy's Corner - 7 on come-out (2:1)
pub const MUGSY_COMEOUT_7_PAYOUT_NUM: u64 = 2;
pub const MUGSY_COMEOUT_7_PAYOUT_DEN: u64 = 1;

/// Mugsy's Corner - 7 after point established (3:1)
pub const MUGSY_POINT_7_PAYOUT_NUM: u64 = 3;
pub const MUGSY_POINT_7_PAYOUT_DEN: u64 = 1;

// ============================================================================
// NEXT BET (Single-roll true odds on a dice sum)
// ============================================================================

/// Hop 2 (1/36 probability) - true odds 35:1
pub const HOP_2_PAYOUT_NUM: u64 = 35;
pub const HOP_2_PAYOUT_DEN: u64 = 1;

/// Hop 3 (2/36 probability) - true odds 17:1
pub const HOP_3_PAYOUT_NUM: u64 = 17;
pub const HOP_3_PAYOUT_DEN: u64 = 1;

/// Hop 4 (3/36 probability) - true odds 11:1
pub const HOP_4_PAYOUT_NUM: u64 = 11;
pub const HOP_4_PAYOUT_DEN: u64 = 1;

/// Hop 5 (4/36 probability) - true odds 8:1
pub const HOP_5_PAYOUT_NUM: u64 = 8;
pub const HOP_5_PAYOUT_DEN: u64 = 1;

/// Hop 6 (5/36 probability) - true odds 31:5
pub const HOP_6_PAYOUT_NUM: u64 = 31;
pub const HOP_6_PAYOUT_DEN: u64 = 5;

/// Hop 7 (6/36 probability) - true odds 5:1
pub const HOP_7_PAYOUT_NUM: u64 = 5;
pub const HOP_7_PAYOUT_DEN: u64 = 1;

/// Hop 8 (5/36 probability) - true odds 31:5
pub const HOP_8_PAYOUT_NUM: u64 = 31;
pub const HOP_8_PAYOUT_DEN: u64 = 5;

/// Hop 9 (4/36 probability) - true odds 8:1
pub const HOP_9_PAYOUT_NUM: u64 = 8;
pub const HOP_9_PAYOUT_DEN: u64 = 1;

/// Hop 10 (3/36 probability) - true odds 11:1
pub const HOP_10_PAYOUT_NUM: u64 = 11;
pub const HOP_10_PAYOUT_DEN: u64 = 1;

/// Hop 11 (2/36 probability) - true odds 17:1
pub const HOP_11_PAYOUT_NUM: u64 = 17;
pub const HOP_11_PAYOUT_DEN: u64 = 1;

/// Hop 12 (1/36 probability) - true odds 35:1
pub const HOP_12_PAYOUT_NUM: u64 = 35;
pub const HOP_12_PAYOUT_DEN: u64 = 1;

// ============================================================================
// YES / NO BETS (sum before 7, 7 before sum)
// ============================================================================
// Yes pays 6 : ways(sum); No pays ways(sum) : 6. 0% house edge.

/// Yes 2 / 12 (1 way) - pays 6:1
pub const YES_2_12_PAYOUT_NUM: u64 = 6;
pub const YES_2_12_PAYOUT_DEN: u64 = 1;

/// Yes 3 / 11 (2 ways) - pays 3:1
pub const YES_3_11_PAYOUT_NUM: u64 = 3;
pub const YES_3_11_PAYOUT_DEN: u64 = 1;

/// Yes 4 / 10 (3 ways) - pays 2:1
pub const YES_4_10_PAYOUT_NUM: u64 = 2;
pub const YES_4_10_PAYOUT_DEN: u64 = 1;

/// Yes 5 / 9 (4 ways) - pays 3:2
pub const YES_5_9_PAYOUT_NUM: u64 = 3;
pub const YES_5_9_PAYOUT_DEN: u64 = 2;

/// Yes 6 / 8 (5 ways) - pays 6:5
pub const YES_6_8_PAYOUT_NUM: u64 = 6;
pub const YES_6_8_PAYOUT_DEN: u64 = 5;

/// No 2 / 12 - pays 1:6
pub const NO_2_12_PAYOUT_NUM: u64 = 1;
pub const NO_2_12_PAYOUT_DEN: u64 = 6;

/// No 3 / 11 - pays 1:3
pub const NO_3_11_PAYOUT_NUM: u64 = 1;
pub const NO_3_11_PAYOUT_DEN: u64 = 3;

/// No 4 / 10 - pays 1:2
pub const NO_4_10_PAYOUT_NUM: u64 = 1;
pub const NO_4_10_PAYOUT_DEN: u64 = 2;

/// No 5 / 9 - pays 2:3
pub const NO_5_9_PAYOUT_NUM: u64 = 2;
pub const NO_5_9_PAYOUT_DEN: u64 = 3;

/// No 6 / 8 - pays 5:6
pub const NO_6_8_PAYOUT_NUM: u64 = 5;
pub const NO_6_8_PAYOUT_DEN: u64 = 6;
