//! Craps table: bet placement, settlement and the house bankroll.

mod advance_table;
mod bets;
mod claim;
mod engine;
mod force_settle;
mod fund_house;
mod place_bet;
mod rules;
mod settle;
mod utils;

pub use advance_table::*;
pub use bets::*;
pub use claim::*;
pub use engine::*;
pub use force_settle::*;
pub use fund_house::*;
pub use place_bet::*;
pub use rules::*;
pub use settle::*;
pub use utils::*;
