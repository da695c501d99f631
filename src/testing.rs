use crate::core::term::Term;
use crate::database::{Answer, KnowledgeBase};

/// Build a knowledge base from clauses in text form.
pub fn kb_of(clauses: &[&str]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for clause in clauses {
        kb.tell(*clause).unwrap();
    }
    kb
}

/// Assert that a ground query is answered with `true`
pub fn entailed(kb: &KnowledgeBase, query: &str) {
    let answers: Vec<_> = kb.ask(query).unwrap().collect();
    assert_eq!(answers, vec![Answer::Truth(true)], "{} should hold", query);
}

/// Assert that a ground query is answered with `false`
pub fn not_entailed(kb: &KnowledgeBase, query: &str) {
    let answers: Vec<_> = kb.ask(query).unwrap().collect();
    assert_eq!(answers, vec![Answer::Truth(false)], "{} should not hold", query);
}

/// Values of `var` over all answers to `query`, in order.
pub fn solutions_for(kb: &KnowledgeBase, query: &str, var: &str) -> Vec<String> {
    kb.ask(query)
        .unwrap()
        .map(|answer| match answer.get(var) {
            Some(value) => value.to_string(),
            None => panic!("{} is not a variable of {}", var, query),
        })
        .collect()
}

pub fn has_unique_solution(mut solutions: impl Iterator<Item = Answer>, var: &str, expected: Term) {
    assert_eq!(solutions.next().and_then(|a| a.get(var).cloned()), Some(expected));
    assert_eq!(solutions.next(), None);
}
