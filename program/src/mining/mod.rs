//! Mining rounds: staking, resolution and claims.

mod claim;
mod entropy;
mod resolve;
mod stake;

pub use claim::*;
pub use entropy::*;
pub use resolve::*;
pub use stake::*;
