//! Backward-chaining inference over a Horn-clause knowledge base.
//!
//! Facts and rules are told to a [`KnowledgeBase`]; queries are answered by
//! depth-first resolution with unification (including the occurs check),
//! per-use renaming of clause variables, and negation as failure.
//!
//! ```
//! use horn_kb::prelude::*;
//!
//! let mut kb = KnowledgeBase::new();
//! kb.tell("Parent(Pam,Bob)").unwrap();
//! kb.tell("Parent(Tom,Bob)").unwrap();
//! kb.tell("Parent(x,y) -> Offspring(y,x)").unwrap();
//!
//! let parents: Vec<_> = kb
//!     .ask("Offspring(Bob,x)")
//!     .unwrap()
//!     .filter_map(|answer| answer.get("x").cloned())
//!     .collect();
//! assert_eq!(parents, vec![Term::constant("Pam"), Term::constant("Tom")]);
//! ```
//!
//! Recursive predicates without a reachable base case make the search run
//! forever. Answers are produced lazily, so callers can stop pulling at any
//! point or bound a query with [`QueryLimits`].

pub mod config;
pub mod core;
pub mod database;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod resolution;

#[cfg(test)]
mod testing;

pub use crate::config::{Interruption, QueryLimits};
pub use crate::core::term::{Term, Var};
pub use crate::database::{Answer, Answers, Bindings, IntoTerm, KnowledgeBase};
pub use crate::error::{Error, Result};
pub use crate::parser::parse;
