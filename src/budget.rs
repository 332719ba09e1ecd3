//! Work-list node budgets

use crate::error::{MinimizeError, Stage};
use crate::term::TermSet;

/// Counts work-list pops for one stage and stops it when a limit is reached
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeBudget {
    stage: Stage,
    limit: Option<usize>,
    spent: usize,
}

impl NodeBudget {
    pub(crate) fn new(stage: Stage, limit: Option<usize>) -> Self {
        NodeBudget {
            stage,
            limit,
            spent: 0,
        }
    }

    /// Account for one popped node
    ///
    /// Fails with [`MinimizeError::BudgetExhausted`] carrying a copy of
    /// `partial` once more nodes than the limit have been requested.
    pub(crate) fn spend(&mut self, partial: &TermSet) -> Result<(), MinimizeError> {
        self.spent += 1;
        match self.limit {
            Some(limit) if self.spent > limit => Err(MinimizeError::BudgetExhausted {
                stage: self.stage,
                budget: limit,
                partial: partial.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn spent(&self) -> usize {
        self.spent
    }
}
