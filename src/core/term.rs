//! Terms: variables, constants and compound expressions.
//!
//! The kind of every term is fixed when it is constructed. Whether a name
//! *looks* like a variable is only ever decided by the parser.

use std::fmt;
use std::sync::Arc;

/// Operator of a rule term: `args[0]` is the head, `args[1..]` the body.
pub const RULE_OP: &str = "<-";

/// Operator of a negated goal, proved by failure of its single argument.
pub const NOT_OP: &str = "Not";

/// Named logic variable.
///
/// Variables written by the user carry generation `0`. Standardization mints
/// copies with the same name and a non-zero generation, so a renamed variable
/// never equals any variable of the source text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    name: Arc<str>,
    generation: usize,
}

impl Var {
    /// Create a variable as it appears in source text.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Var {
            name: name.into(),
            generation: 0,
        }
    }

    /// Create a renamed copy of `self` belonging to the given generation.
    pub fn renamed(&self, generation: usize) -> Self {
        Var {
            name: self.name.clone(),
            generation,
        }
    }

    /// Return the variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// `true` for variables produced by standardization.
    pub fn is_renamed(&self) -> bool {
        self.generation != 0
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Var::new(name)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_renamed() {
            write!(f, "{}_{}", self.name, self.generation)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Operator applied to an ordered list of arguments.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Compound {
    pub functor: Arc<str>,
    pub args: Vec<Term>,
}

/// A first-order term.
///
/// `Compound` doubles as the encoding of clauses: an operator of [`RULE_OP`]
/// is a rule, an operator of [`NOT_OP`] with one argument is a negated goal,
/// anything else is a predicate application.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Var(Var),
    Const(Arc<str>),
    Compound(Arc<Compound>),
}

impl Term {
    pub fn var(name: impl Into<Arc<str>>) -> Self {
        Term::Var(Var::new(name))
    }

    pub fn constant(name: impl Into<Arc<str>>) -> Self {
        Term::Const(name.into())
    }

    /// Apply `functor` to `args`.
    pub fn compound(functor: impl Into<Arc<str>>, args: Vec<Term>) -> Self {
        Term::Compound(Arc::new(Compound {
            functor: functor.into(),
            args,
        }))
    }

    /// Build the rule `body[0] & body[1] & ... -> head`.
    pub fn rule(head: Term, body: Vec<Term>) -> Self {
        let mut args = Vec::with_capacity(body.len() + 1);
        args.push(head);
        args.extend(body);
        Term::compound(RULE_OP, args)
    }

    /// Build the negated goal `Not(goal)`.
    pub fn not(goal: Term) -> Self {
        Term::compound(NOT_OP, vec![goal])
    }

    pub fn try_as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn try_as_compound(&self) -> Option<&Compound> {
        match self {
            Term::Compound(c) => Some(&**c),
            _ => None,
        }
    }

    /// Split a rule into its head and body conjuncts.
    pub fn as_rule(&self) -> Option<(&Term, &[Term])> {
        match self.try_as_compound() {
            Some(c) if &*c.functor == RULE_OP && !c.args.is_empty() => {
                Some((&c.args[0], &c.args[1..]))
            }
            _ => None,
        }
    }

    /// The goal under a `Not(...)`.
    pub fn as_negation(&self) -> Option<&Term> {
        match self.try_as_compound() {
            Some(c) if &*c.functor == NOT_OP && c.args.len() == 1 => Some(&c.args[0]),
            _ => None,
        }
    }

    /// Split a clause into head and body. Facts have an empty body.
    pub fn head_and_body(&self) -> (&Term, &[Term]) {
        match self.as_rule() {
            Some(split) => split,
            None => (self, &[]),
        }
    }

    /// Predicate symbol of a goal: the functor of a compound or the name of
    /// a propositional constant. Variables have none.
    pub fn predicate(&self) -> Option<&str> {
        match self {
            Term::Var(_) => None,
            Term::Const(name) => Some(&**name),
            Term::Compound(c) => Some(&*c.functor),
        }
    }

    /// Symbol under which a clause is stored: the head's predicate for rules,
    /// the clause's own predicate otherwise.
    pub fn clause_key(&self) -> Option<&str> {
        self.head_and_body().0.predicate()
    }

    /// Arguments of a compound; empty for anything else.
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound(c) => &c.args,
            _ => &[],
        }
    }

    /// Check if `var` occurs anywhere inside this term.
    pub fn occurs(&self, var: &Var) -> bool {
        match self {
            Term::Var(v) => v == var,
            Term::Const(_) => false,
            Term::Compound(c) => c.args.iter().any(|arg| arg.occurs(var)),
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::Compound(c) => c.args.iter().all(Term::is_ground),
        }
    }

    /// Variables of this term in order of first occurrence.
    pub fn variables(&self) -> Vec<Var> {
        fn collect(t: &Term, out: &mut Vec<Var>) {
            match t {
                Term::Var(v) => {
                    if !out.contains(v) {
                        out.push(v.clone())
                    }
                }
                Term::Const(_) => {}
                Term::Compound(c) => c.args.iter().for_each(|arg| collect(arg, out)),
            }
        }
        let mut out = vec![];
        collect(self, &mut out);
        out
    }

    /// Variables appearing directly as arguments of this term, in order.
    ///
    /// Nested compounds are not searched; queries project their answers onto
    /// exactly these variables.
    pub fn top_level_vars(&self) -> Vec<Var> {
        let mut out: Vec<Var> = vec![];
        for v in self.args().iter().filter_map(Term::try_as_var) {
            if !out.contains(v) {
                out.push(v.clone());
            }
        }
        out
    }
}

impl From<Var> for Term {
    fn from(v: Var) -> Self {
        Term::Var(v)
    }
}

impl From<&Var> for Term {
    fn from(v: &Var) -> Self {
        Term::Var(v.clone())
    }
}

fn write_args(f: &mut fmt::Formatter, args: &[Term], sep: &str) -> fmt::Result {
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        write!(f, "{}", arg)?;
    }
    for arg in iter {
        write!(f, "{}{}", sep, arg)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Const(name) => write!(f, "{}", name),
            Term::Compound(c) if &*c.functor == RULE_OP && !c.args.is_empty() => {
                write_args(f, &c.args[1..], " & ")?;
                write!(f, " -> {}", c.args[0])
            }
            Term::Compound(c) => {
                write!(f, "{}(", c.functor)?;
                write_args(f, &c.args, ",")?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
