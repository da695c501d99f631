//! Backward chaining over Horn clauses.
//!
//! OR-search proves one goal by trying every clause stored under its
//! predicate, in insertion order. AND-search proves a conjunction left to
//! right, feeding each solution of the first conjunct into the rest. Both
//! produce lazy streams, so the search is depth-first and only advances as
//! far as the consumer pulls.

use crate::core::standardize::{standardize, VarGen};
use crate::core::stream::Stream;
use crate::core::substitution::Substitution;
use crate::core::term::Term;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// Clauses grouped by the predicate symbol of their head.
pub type ClauseIndex = HashMap<Arc<str>, Arc<Vec<Term>>>;

/// One proof search over a fixed set of clauses.
///
/// Cloning a prover is cheap; clones share the clause snapshot and the
/// variable generator, which is how the lazy search keeps fresh names
/// unique across all of its branches.
#[derive(Clone)]
pub struct Prover {
    clauses: Arc<ClauseIndex>,
    vars: VarGen,
}

impl Prover {
    pub fn new(clauses: Arc<ClauseIndex>) -> Self {
        Prover {
            clauses,
            vars: VarGen::new(),
        }
    }

    /// Prove `goal` starting from an empty substitution.
    pub fn prove(&self, goal: &Term) -> Stream<Substitution> {
        self.prove_goal(goal.clone(), Substitution::empty())
    }

    /// OR-search: all extensions of `theta` under which `goal` holds.
    pub fn prove_goal(&self, goal: Term, theta: Substitution) -> Stream<Substitution> {
        let prover = self.clone();
        Stream::suspension(move || prover.or_search(goal, theta))
    }

    /// AND-search: all extensions of `theta` under which every goal holds.
    pub fn prove_all(&self, goals: &[Term], theta: Substitution) -> Stream<Substitution> {
        self.conjunction(goals.to_vec().into(), 0, theta)
    }

    fn or_search(&self, goal: Term, theta: Substitution) -> Stream<Substitution> {
        trace!("prove {} under {:?}", goal, theta);

        if let Some(negated) = goal.as_negation() {
            return self.negation(negated, theta);
        }

        let bucket = goal.predicate().and_then(|p| self.clauses.get(p)).cloned();
        match bucket {
            Some(clauses) => self.try_clauses(goal, theta, clauses, 0),
            None => {
                trace!("no clauses for {}", goal);
                Stream::empty()
            }
        }
    }

    fn try_clauses(
        &self,
        goal: Term,
        theta: Substitution,
        clauses: Arc<Vec<Term>>,
        index: usize,
    ) -> Stream<Substitution> {
        let clause = match clauses.get(index) {
            Some(clause) => standardize(clause, &self.vars),
            None => return Stream::empty(),
        };

        let (head, body) = clause.head_and_body();
        let solutions = match theta.clone().unify(head, &goal) {
            Some(extended) => {
                trace!("{} matches {}", goal, clause);
                self.conjunction(body.to_vec().into(), 0, extended)
            }
            None => Stream::empty(),
        };

        let prover = self.clone();
        solutions.append(move || prover.try_clauses(goal, theta, clauses, index + 1))
    }

    fn conjunction(
        &self,
        goals: Arc<[Term]>,
        first: usize,
        theta: Substitution,
    ) -> Stream<Substitution> {
        let goal = match goals.get(first) {
            Some(goal) => theta.walk_star(goal),
            None => return Stream::singleton(theta),
        };

        let prover = self.clone();
        self.prove_goal(goal, theta).append_map(Arc::new(move |extended: Substitution| {
            prover.conjunction(goals.clone(), first + 1, extended)
        }))
    }

    /// Negation as failure.
    ///
    /// The negated goal is instantiated with `theta` and then proved on its
    /// own, from an empty substitution. Its bindings never flow back. The
    /// sub-proof advances one step at a time inside the outer stream.
    fn negation(&self, negated: &Term, theta: Substitution) -> Stream<Substitution> {
        let check = theta.walk_star(negated);
        trace!("Not({}): searching for a proof", check);
        self.prove(&check).if_empty(Stream::singleton(theta))
    }
}
