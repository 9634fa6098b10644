//! Whole-store recalculation by fixed-point iteration.
//!
//! Each round snapshots every cached value, then re-derives every cell in
//! row-major address order. A changed value is written back and also fed
//! into the round's snapshot, so cells later in the order see it in the
//! same round. Iteration stops at the first round with no changes or after
//! [`MAX_RECALC_ROUNDS`]; dependency chains longer than the cap can be left
//! stale.

use super::Document;
use cellgrid_engine::engine::{CellRef, derive_value, snapshot};
use log::{debug, warn};

/// Upper bound on recalculation rounds per pass.
pub const MAX_RECALC_ROUNDS: usize = 10;

/// What a recalculation pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecalcOutcome {
    /// Rounds run, including the final round that found no changes.
    pub rounds: usize,
    /// Cells whose value changed, summed over all rounds.
    pub changed: usize,
    /// False when the round cap was hit before a fixed point.
    pub converged: bool,
}

impl Document {
    /// Re-derive every cell until nothing changes or the round cap is hit.
    pub fn recalculate_all(&mut self) -> RecalcOutcome {
        let mut order: Vec<CellRef> = self.grid.iter().map(|entry| entry.key().clone()).collect();
        order.sort();

        let mut total_changed = 0;
        for round in 1..=MAX_RECALC_ROUNDS {
            let mut values = snapshot(&self.grid);
            let mut changed = 0;

            for cell_ref in &order {
                let Some(mut cell) = self.grid.get_mut(cell_ref) else {
                    continue;
                };
                let candidate = derive_value(&cell.expression, &values);
                if candidate != cell.cached_value {
                    cell.cached_value = candidate.clone();
                    values.insert(cell_ref.clone(), candidate);
                    changed += 1;
                }
            }

            debug!("recalculation round {}: {} cell(s) changed", round, changed);
            total_changed += changed;
            if changed == 0 {
                return RecalcOutcome {
                    rounds: round,
                    changed: total_changed,
                    converged: true,
                };
            }
        }

        warn!(
            "recalculation stopped after {} rounds without reaching a fixed point",
            MAX_RECALC_ROUNDS
        );
        RecalcOutcome {
            rounds: MAX_RECALC_ROUNDS,
            changed: total_changed,
            converged: false,
        }
    }
}
