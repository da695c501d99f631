pub use crate::{
    config::{Interruption, QueryLimits},
    core::{
        standardize::{standardize, VarGen},
        stream::Stream,
        substitution::Substitution,
        term::{Term, Var},
    },
    database::{Answer, Answers, Bindings, IntoTerm, KnowledgeBase},
    error::Error,
    parser::parse,
    resolution::Prover,
};
