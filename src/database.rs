//! The knowledge base: a clause store with `tell`, `retract` and `ask`.

use crate::config::{Interruption, QueryLimits};
use crate::core::stream::{Step, StreamIter};
use crate::core::substitution::Substitution;
use crate::core::term::{Term, Var};
use crate::error::{Error, Result};
use crate::parser::parse;
use crate::resolution::{ClauseIndex, Prover};
use indexmap::IndexMap;
use log::debug;
use std::sync::Arc;
use std::time::Instant;

/// Anything that can be told to or asked of a knowledge base.
pub trait IntoTerm {
    fn into_term(self) -> Result<Term>;
}

impl IntoTerm for Term {
    fn into_term(self) -> Result<Term> {
        Ok(self)
    }
}

impl IntoTerm for &Term {
    fn into_term(self) -> Result<Term> {
        Ok(self.clone())
    }
}

impl IntoTerm for &str {
    fn into_term(self) -> Result<Term> {
        parse(self)
    }
}

impl IntoTerm for String {
    fn into_term(self) -> Result<Term> {
        parse(&self)
    }
}

impl IntoTerm for &String {
    fn into_term(self) -> Result<Term> {
        parse(self)
    }
}

/// Values of the query variables in one solution, in query order.
pub type Bindings = IndexMap<String, Term>;

/// One item of the sequence returned by [`KnowledgeBase::ask`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Answer to a query without variables.
    Truth(bool),
    /// One solution of a query with variables.
    Bindings(Bindings),
}

impl Answer {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Truth(b) => Some(*b),
            Answer::Bindings(_) => None,
        }
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            Answer::Truth(_) => None,
            Answer::Bindings(b) => Some(b),
        }
    }

    /// Value of a query variable in this solution.
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings().and_then(|b| b.get(var))
    }
}

/// A knowledge base of Horn clauses.
///
/// Clauses are stored per predicate symbol in insertion order, which is the
/// order the proof search tries them in. The store is copy-on-write: every
/// `ask` works on a snapshot, so the knowledge base may be changed while
/// earlier answer sequences are still being consumed.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    clauses: Arc<ClauseIndex>,
    limits: QueryLimits,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge base whose queries are bounded by `limits`.
    pub fn with_limits(limits: QueryLimits) -> Self {
        KnowledgeBase {
            clauses: Arc::default(),
            limits,
        }
    }

    pub fn limits(&self) -> QueryLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: QueryLimits) {
        self.limits = limits;
    }

    /// Store a fact or rule. Telling the same clause twice stores it twice.
    pub fn tell(&mut self, clause: impl IntoTerm) -> Result<()> {
        let clause = clause.into_term()?;
        let key: Arc<str> = match clause.clause_key() {
            Some(key) => key.into(),
            None => {
                return Err(Error::InvalidClause {
                    clause: clause.to_string(),
                })
            }
        };
        debug!("tell {}", clause);
        let index = Arc::make_mut(&mut self.clauses);
        Arc::make_mut(index.entry(key).or_default()).push(clause);
        Ok(())
    }

    /// Remove the first clause structurally equal to `clause`.
    ///
    /// Returns whether a clause was removed; retracting an unknown clause is
    /// not an error.
    pub fn retract(&mut self, clause: impl IntoTerm) -> Result<bool> {
        let clause = clause.into_term()?;
        let key = match clause.clause_key() {
            Some(key) => key,
            None => return Ok(false),
        };

        let position = self
            .clauses
            .get(key)
            .and_then(|bucket| bucket.iter().position(|c| c == &clause));
        let position = match position {
            Some(position) => position,
            None => {
                debug!("retract {}: not present", clause);
                return Ok(false);
            }
        };

        debug!("retract {}", clause);
        let index = Arc::make_mut(&mut self.clauses);
        let now_empty = match index.get_mut(key) {
            Some(bucket) => {
                let bucket = Arc::make_mut(bucket);
                bucket.remove(position);
                bucket.is_empty()
            }
            None => false,
        };
        if now_empty {
            index.remove(key);
        }
        Ok(true)
    }

    /// Ask a query, bounded by this knowledge base's limits.
    ///
    /// A query without variables among its arguments yields one
    /// [`Answer::Truth`]. Otherwise every solution yields the bindings of
    /// those variables, lazily and in search order. Only variables that are
    /// direct arguments of the query are reported.
    pub fn ask(&self, query: impl IntoTerm) -> Result<Answers> {
        self.ask_with(query, self.limits)
    }

    /// Ask a query with explicit limits.
    pub fn ask_with(&self, query: impl IntoTerm, limits: QueryLimits) -> Result<Answers> {
        let query = query.into_term()?;
        let vars = query.top_level_vars();
        debug!("ask {} for {:?}", query, vars);

        let prover = Prover::new(self.clauses.clone());
        let projection = if vars.is_empty() {
            Projection::Truth
        } else {
            Projection::Onto(vars)
        };
        Ok(Answers {
            solutions: prover.prove(&query).into_iter(),
            projection,
            limits,
            steps: 0,
            yielded: 0,
            started: None,
            finished: false,
            interruption: None,
        })
    }

    /// `true` if `query` has at least one proof.
    ///
    /// The search is bounded by this knowledge base's step and time limits;
    /// a search cut off before finding a proof counts as `false`.
    pub fn entails(&self, query: impl IntoTerm) -> Result<bool> {
        let limits = QueryLimits {
            max_solutions: None,
            ..self.limits
        };
        let mut answers = self.ask_with(query, limits)?;
        let entailed = match answers.next() {
            Some(Answer::Truth(b)) => b,
            Some(Answer::Bindings(_)) => true,
            None => false,
        };
        if let Some(reason) = answers.interruption() {
            debug!("entailment undecided: {:?}", reason);
        }
        Ok(entailed)
    }

    /// Clauses stored under `predicate`, in insertion order.
    pub fn clauses(&self, predicate: &str) -> &[Term] {
        match self.clauses.get(predicate) {
            Some(bucket) => bucket.as_slice(),
            None => &[],
        }
    }

    pub fn predicates(&self) -> impl Iterator<Item = &str> {
        self.clauses.keys().map(|k| &**k)
    }

    /// Total number of stored clauses.
    pub fn len(&self) -> usize {
        self.clauses.values().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Projection {
    Truth,
    Onto(Vec<Var>),
}

/// Lazy answer sequence of a query.
pub struct Answers {
    solutions: StreamIter<Substitution>,
    projection: Projection,
    limits: QueryLimits,
    steps: usize,
    yielded: usize,
    started: Option<Instant>,
    finished: bool,
    interruption: Option<Interruption>,
}

impl Answers {
    /// Why the sequence ended early, if a limit stopped it.
    pub fn interruption(&self) -> Option<Interruption> {
        self.interruption
    }

    /// Number of search steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn next_solution(&mut self) -> Option<Substitution> {
        let started = *self.started.get_or_insert_with(Instant::now);
        loop {
            match self.solutions.step() {
                Step::Yield(theta) => return Some(theta),
                Step::Done => return None,
                Step::Pending => self.steps += 1,
            }

            let limit = if self.limits.max_steps.map_or(false, |n| self.steps >= n) {
                Some(Interruption::StepLimit)
            } else if self.limits.timeout.map_or(false, |t| started.elapsed() >= t) {
                Some(Interruption::Timeout)
            } else {
                None
            };
            if limit.is_some() {
                debug!("query interrupted after {} steps: {:?}", self.steps, limit);
                self.interruption = limit;
                return None;
            }
        }
    }

    fn project(&self, theta: &Substitution) -> Bindings {
        match &self.projection {
            Projection::Truth => Bindings::new(),
            Projection::Onto(vars) => vars
                .iter()
                .map(|v| (v.to_string(), theta.walk_star(&Term::from(v))))
                .collect(),
        }
    }
}

impl Iterator for Answers {
    type Item = Answer;

    fn next(&mut self) -> Option<Answer> {
        let capped = match self.projection {
            Projection::Truth => false,
            Projection::Onto(_) => self.limits.max_solutions.map_or(false, |n| self.yielded >= n),
        };
        if self.finished || capped {
            self.finished = true;
            return None;
        }

        let solution = self.next_solution();
        let answer = match (&self.projection, solution) {
            (Projection::Truth, Some(_)) => Some(Answer::Truth(true)),
            (Projection::Truth, None) if self.interruption.is_none() => Some(Answer::Truth(false)),
            (Projection::Truth, None) => None,
            (Projection::Onto(_), Some(theta)) => Some(Answer::Bindings(self.project(&theta))),
            (Projection::Onto(_), None) => None,
        };

        if answer.is_none() || matches!(self.projection, Projection::Truth) {
            self.finished = true;
        }
        if answer.is_some() {
            self.yielded += 1;
        }
        answer
    }
}
