//! # shufflegrind-core
//!
//! Minimal proof-of-stake producer selection state machine.
//!
//! The model only carries what matters for shuffle grinding: an ordered
//! validator roster, a decommission queue applied after each block, a
//! tentative next producer drawn uniformly over the roster, and the
//! append-only record of producers.
//!
//! ### Key Submodules:
//! - `validator`: validator identifiers tagged with an explicit role
//! - `shuffle`: the seeded random source behind every producer draw
//! - `state`: `ProtocolState`, the per-round transition logic
//! - `error`: `ProtocolError`

pub mod error;
pub mod shuffle;
pub mod state;
pub mod validator;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::shuffle::*;
    pub use crate::state::*;
    pub use crate::validator::*;
}

pub use error::ProtocolError;
pub use shuffle::{SeededShuffle, ShuffleSource};
pub use state::ProtocolState;
pub use validator::{Role, ValidatorId};
