pub mod consts;
pub mod entropy;
pub mod error;
pub mod instruction;
pub mod sdk;
pub mod state;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::entropy::*;
    pub use crate::error::*;
    pub use crate::instruction::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
}

use steel::*;

declare_id!("5Ujir85piAjL1tF4nmKEnyWhXv8TarBW8QNpuqUeo4t9");
