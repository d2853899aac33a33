//! Clause chain assembly.
//!
//! Clauses become an ordered list of [`ClauseStep`]s ("try this test, run
//! this body, otherwise try the next step"). The list is rendered in one of
//! two shapes, chosen by [`ChainShape`]:
//!
//! ```text
//! IfElse                          LabeledBlocks
//!
//! if (t1 && g1) body1             _case: {
//! else if (t2) body2                  _case2: { if (!(t1 && g1)) break _case2; body1; break _case; }
//!                                     _case3: { if (!t2) break _case3; body2; break _case; }
//!                                 }
//! ```
//!
//! In both shapes a guard only runs after its pattern test succeeded, at
//! most one body runs, and falling off the end runs nothing.

use case_ir::{ExprId, StmtId};

use crate::lower::Lowerer;
use crate::options::ChainShape;

/// One compiled clause, names already substituted.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ClauseStep {
    pub test: ExprId,
    pub guard: Option<ExprId>,
    pub body: StmtId,
}

impl Lowerer<'_> {
    /// Build the chain for `steps`. An empty clause list has no chain.
    pub(crate) fn assemble_chain(&mut self, steps: &[ClauseStep]) -> Option<StmtId> {
        let (last, earlier) = steps.split_last()?;
        Some(match self.options.chain {
            ChainShape::IfElse => self.if_else_chain(earlier, last),
            ChainShape::LabeledBlocks => self.labeled_chain(steps),
        })
    }

    /// `pattern test && guard`, or just the test when there is no guard.
    fn effective_test(&mut self, step: &ClauseStep) -> ExprId {
        match step.guard {
            Some(guard) => self.and(step.test, guard),
            None => step.test,
        }
    }

    fn if_else_chain(&mut self, earlier: &[ClauseStep], last: &ClauseStep) -> StmtId {
        let test = self.effective_test(last);
        let mut chain = self.if_stmt(test, last.body, None);
        // Built back to front so each `if` owns the remainder as its else.
        for step in earlier.iter().rev() {
            let test = self.effective_test(step);
            chain = self.if_stmt(test, step.body, Some(chain));
        }
        chain
    }

    fn labeled_chain(&mut self, steps: &[ClauseStep]) -> StmtId {
        let options = self.options;
        let hint = options.chain_label_hint.as_str();
        let done = self.names.fresh(self.interner, hint);

        let mut blocks = Vec::with_capacity(steps.len());
        for step in steps {
            let label = self.names.fresh(self.interner, hint);
            let test = self.effective_test(step);
            let failed = self.not(test);
            let skip = self.break_to(label);
            let guard_stmt = self.if_stmt(failed, skip, None);
            let finish = self.break_to(done);
            let inner = self.block(&[guard_stmt, step.body, finish]);
            blocks.push(self.labeled(label, inner));
        }

        let outer = self.block(&blocks);
        self.labeled(done, outer)
    }
}

#[cfg(test)]
mod tests;
