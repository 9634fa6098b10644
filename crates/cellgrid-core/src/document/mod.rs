//! Document state and logic (UI-agnostic).

mod eval;
mod io;
mod ops;
mod state;

pub use eval::{MAX_RECALC_ROUNDS, RecalcOutcome};
pub use io::LoadOutcome;
pub use ops::EditOutcome;
pub use state::Document;
