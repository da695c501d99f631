//! Renaming clause variables apart.

use crate::core::term::{Compound, Term, Var};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Source of fresh variable generations.
///
/// Each query owns one generator and hands clones of it down the search.
/// Clones share the counter, so every standardization within one query gets
/// its own generation while separate queries never see each other's numbers.
#[derive(Clone, Debug)]
pub struct VarGen {
    next: Rc<Cell<usize>>,
}

impl Default for VarGen {
    fn default() -> Self {
        Self::new()
    }
}

impl VarGen {
    pub fn new() -> Self {
        // generation 0 belongs to the variables of the source text
        VarGen {
            next: Rc::new(Cell::new(1)),
        }
    }

    /// Mint a new generation.
    pub fn fresh(&self) -> usize {
        let g = self.next.get();
        self.next.set(g + 1);
        g
    }

    /// Number of generations minted so far.
    pub fn minted(&self) -> usize {
        self.next.get() - 1
    }
}

/// Rename every variable of `term` to a fresh one.
///
/// Repeated occurrences of one variable map to the same fresh variable;
/// the counter only advances when a new name is minted.
pub fn standardize(term: &Term, gen: &VarGen) -> Term {
    let mut renaming = HashMap::new();
    rename(term, gen, &mut renaming)
}

fn rename(term: &Term, gen: &VarGen, renaming: &mut HashMap<Var, Var>) -> Term {
    match term {
        Term::Var(v) => Term::Var(
            renaming
                .entry(v.clone())
                .or_insert_with(|| v.renamed(gen.fresh()))
                .clone(),
        ),
        Term::Const(_) => term.clone(),
        Term::Compound(c) => Term::Compound(Arc::new(Compound {
            functor: c.functor.clone(),
            args: c.args.iter().map(|arg| rename(arg, gen, renaming)).collect(),
        })),
    }
}
