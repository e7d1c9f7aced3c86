mod error;
mod pacing;
mod report;

pub use self::{
    error::EngineError,
    pacing::{PacingObserver, ProgressReporter, VerbosePacer},
    report::{render_summary, render_yaml},
};

pub mod prelude {
    pub use super::{EngineError, PacingObserver, ProgressReporter, VerbosePacer};
}
