//! Substitutions map variables to terms.
//!
//! Bindings are kept in triangular form: a variable may be bound to another
//! variable, so lookups have to be chased with [`Substitution::walk`].

use crate::core::term::{Compound, Term, Var};
use std::collections::HashMap;
use std::fmt::Formatter;
use std::sync::Arc;

/// Mapping of variables to terms.
#[derive(Clone, PartialEq, Eq)]
pub struct Substitution {
    pub(crate) subs: HashMap<Var, Term>,
}

impl Default for Substitution {
    fn default() -> Self {
        Self::empty()
    }
}

impl Substitution {
    /// Initialize an empty substitution
    pub fn empty() -> Self {
        Substitution {
            subs: HashMap::new(),
        }
    }

    /// Get number of substituted variables
    pub fn n_subs(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// The term `var` is bound to, without chasing.
    pub fn lookup(&self, var: &Var) -> Option<&Term> {
        self.subs.get(var)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.subs.iter()
    }

    /// Recursively attempt to resolve the value of a variable.
    ///
    /// If `t` is no variable or a variable that cannot be
    /// resolved (i.e. it is not substituted), `t` is returned.
    pub fn walk<'a>(&'a self, t: &'a Term) -> &'a Term {
        let mut t = t;
        while let Term::Var(var) = t {
            match self.subs.get(var) {
                Some(next) => t = next,
                None => break,
            }
        }
        t
    }

    /// Replace every variable in `t` by its fully resolved value.
    ///
    /// Constants and operators are kept; compound arguments are
    /// substituted recursively.
    pub fn walk_star(&self, t: &Term) -> Term {
        match self.walk(t) {
            Term::Compound(c) => Term::Compound(Arc::new(Compound {
                functor: c.functor.clone(),
                args: c.args.iter().map(|arg| self.walk_star(arg)).collect(),
            })),
            other => other.clone(),
        }
    }

    /// Extend substitution with a variable => term mapping.
    ///
    /// Returns `None` if the insertion would result in a
    /// cyclic substitution.
    pub fn extend(mut self, x: Var, t: Term) -> Option<Self> {
        if self.occurs(&x, &t) {
            None
        } else {
            self.subs.insert(x, t);
            Some(self)
        }
    }

    /// Returns `true` if `t` contains a variable that is equivalent
    /// to `x` under this substitution.
    pub fn occurs(&self, x: &Var, t: &Term) -> bool {
        match self.walk(t) {
            Term::Var(v) => v == x,
            Term::Const(_) => false,
            Term::Compound(c) => c.args.iter().any(|arg| self.occurs(x, arg)),
        }
    }

    /// Attempt to unify terms `u` and `v` under this substitution.
    pub fn unify(self, u: &Term, v: &Term) -> Option<Self> {
        if u == v {
            return Some(self);
        }

        let u = self.walk(u).clone();
        let v = self.walk(v).clone();

        match (&u, &v) {
            _ if u == v => Some(self),
            (Term::Var(x), t) | (t, Term::Var(x)) => self.extend(x.clone(), t.clone()),
            (Term::Compound(a), Term::Compound(b)) => {
                if a.functor != b.functor {
                    return None;
                }
                self.unify_args(&a.args, &b.args)
            }
            _ => None,
        }
    }

    /// Unify two argument lists position by position, left to right.
    pub fn unify_args(self, us: &[Term], vs: &[Term]) -> Option<Self> {
        if us.len() != vs.len() {
            return None;
        }
        us.iter()
            .zip(vs)
            .try_fold(self, |s, (u, v)| s.unify(u, v))
    }
}

impl std::fmt::Debug for Substitution {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut entries: Vec<_> = self.subs.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        write!(f, "{{")?;
        let mut iter = entries.into_iter();
        if let Some((var, val)) = iter.next() {
            write!(f, "{:?}: {:?}", var, val)?;
        }
        for (var, val) in iter {
            write!(f, ", {:?}: {:?}", var, val)?;
        }
        write!(f, "}}")
    }
}

/// Construct a substitution
#[cfg(test)]
macro_rules! substitution {
    () => { $crate::core::substitution::Substitution::empty() };

    ($($var:ident : $val:expr),*) => {{
        let mut s = $crate::core::substitution::Substitution::empty();
        $(
            s.subs.insert($var.clone(), $crate::core::term::Term::from($val.clone()));
        )*
        s
    }}
}
