//! End-to-end queries against small knowledge bases.

use horn_kb::{Answer, Interruption, KnowledgeBase, QueryLimits, Term};

fn kb_of(clauses: &[&str]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for clause in clauses {
        kb.tell(*clause).unwrap();
    }
    kb
}

fn holds(kb: &KnowledgeBase, query: &str) -> bool {
    let answers: Vec<_> = kb.ask(query).unwrap().collect();
    assert_eq!(answers.len(), 1, "{} should answer once", query);
    answers[0].as_bool().expect("ground query answers with a boolean")
}

/// Every answer rendered as the values of `vars`, joined by spaces.
fn rows(kb: &KnowledgeBase, query: &str, vars: &[&str]) -> Vec<String> {
    kb.ask(query)
        .unwrap()
        .map(|answer| {
            vars.iter()
                .map(|v| answer.get(v).unwrap().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn family() -> KnowledgeBase {
    kb_of(&[
        "Parent(Pam,Bob)",
        "Parent(Tom,Bob)",
        "Parent(Tom,Liz)",
        "Parent(Bob,Ann)",
        "Parent(Bob,Pat)",
        "Parent(Pat,Jim)",
        "Not(Male(x)) -> Female(x)",
        "Male(Tom)",
        "Male(Bob)",
        "Male(Jim)",
        "Parent(x,y) -> Offspring(y,x)",
        "Parent(x,y) & Female(x) -> Mother(x,y)",
        "Parent(y,x) & Parent(z,y) -> Grandparent(z,x)",
        "Parent(x,y) & Male(x) -> Father(x,y)",
        "Offspring(x,y) -> Descendant(x,y)",
        "Offspring(z,y) & Descendant(x,z) -> Descendant(x,y)",
        "Parent(z,x) & Parent(z,y) & Female(x) -> Sister(x,y)",
        "Father(x,y) & Father(y,z) -> Grandfather(x,z)",
    ])
}

#[test]
fn family_facts_and_simple_rules() {
    let kb = family();
    assert!(holds(&kb, "Parent(Pam,Bob)"));
    assert!(!holds(&kb, "Parent(Bob,Pam)"));
    assert_eq!(rows(&kb, "Parent(x,Bob)", &["x"]), vec!["Pam", "Tom"]);
    assert_eq!(rows(&kb, "Father(x,Bob)", &["x"]), vec!["Tom"]);
    assert_eq!(rows(&kb, "Father(Bob,x)", &["x"]), vec!["Ann", "Pat"]);
    assert_eq!(
        rows(&kb, "Offspring(y,x)", &["y", "x"]),
        vec!["Bob Pam", "Bob Tom", "Liz Tom", "Ann Bob", "Pat Bob", "Jim Pat"]
    );
}

#[test]
fn family_negation_as_failure() {
    let kb = family();
    assert!(holds(&kb, "Female(Pam)"));
    assert!(holds(&kb, "Female(Liz)"));
    assert!(!holds(&kb, "Female(Jim)"));
    assert_eq!(rows(&kb, "Mother(x,y)", &["x", "y"]), vec!["Pam Bob", "Pat Jim"]);

    // with x unbound the negated goal asks whether anyone is male
    assert!(rows(&kb, "Female(x)", &["x"]).is_empty());
}

#[test]
fn family_conjunctive_rules() {
    let kb = family();
    assert_eq!(
        rows(&kb, "Grandparent(x,y)", &["x", "y"]),
        vec!["Pam Ann", "Tom Ann", "Pam Pat", "Tom Pat", "Bob Jim"]
    );
    assert_eq!(
        rows(&kb, "Sister(x,y)", &["x", "y"]),
        vec!["Liz Bob", "Liz Liz", "Ann Ann", "Ann Pat", "Pat Ann", "Pat Pat"]
    );
    assert_eq!(
        rows(&kb, "Grandfather(x,y)", &["x", "y"]),
        vec!["Tom Ann", "Tom Pat"]
    );
}

#[test]
fn family_recursive_descendants() {
    let kb = family();
    assert_eq!(
        rows(&kb, "Descendant(x,Pam)", &["x"]),
        vec!["Bob", "Ann", "Pat", "Jim"]
    );
    assert!(holds(&kb, "Descendant(Jim,Tom)"));
    assert!(!holds(&kb, "Descendant(Tom,Jim)"));
}

fn weapons() -> KnowledgeBase {
    kb_of(&[
        "American(x) & Weapon(y) & Hostile(z) & Sells(x,y,z) -> Criminal(x)",
        "NewYorker(x) -> American(x)",
        "American(West)",
        "Weapon(Missile)",
        "Hostile(Nono)",
        "Sells(West,Missile,Nono)",
        "Sells(East,Missile,Nono)",
        "NewYorker(East)",
        "American(North)",
    ])
}

#[test]
fn weapons_sales_criminals() {
    let mut kb = weapons();
    assert!(holds(&kb, "Criminal(West)"));
    assert!(holds(&kb, "Criminal(East)"));
    assert!(!holds(&kb, "Criminal(North)"));
    assert_eq!(rows(&kb, "Criminal(x)", &["x"]), vec!["East", "West"]);

    assert!(kb.retract("NewYorker(East)").unwrap());
    assert!(!holds(&kb, "Criminal(East)"));
    assert_eq!(rows(&kb, "Criminal(x)", &["x"]), vec!["West"]);
}

#[test]
fn weapons_sales_with_all_arguments_open() {
    let kb = weapons();
    assert_eq!(
        rows(&kb, "Sells(x,Missile,z)", &["x", "z"]),
        vec!["West Nono", "East Nono"]
    );
}

#[test]
fn liking_cats() {
    let kb = kb_of(&["Likes(Adam,Cats)", "Likes(x,x)", "Likes(Jonas,x)"]);
    assert_eq!(rows(&kb, "Likes(x,Cats)", &["x"]), vec!["Adam", "Cats", "Jonas"]);
    assert!(holds(&kb, "Likes(Jonas,Dogs)"));
    assert!(!holds(&kb, "Likes(Adam,Dogs)"));

    // the second clause leaves both variables unbound but equal
    let answers: Vec<_> = kb.ask("Likes(a,b)").unwrap().collect();
    assert_eq!(answers.len(), 3);
    assert_eq!(answers[1].get("a"), answers[1].get("b"));
    assert_eq!(answers[2].get("a"), Some(&Term::constant("Jonas")));
}

#[test]
fn infinite_answers_with_limits() {
    let mut kb = kb_of(&["Nat(Zero)", "Nat(x) -> Nat(S(x))"]);
    let answers: Vec<_> = kb
        .ask_with("Nat(n)", QueryLimits::unbounded().with_max_solutions(3))
        .unwrap()
        .collect();
    assert_eq!(answers.len(), 3);

    kb.tell("Nat(x) & Never(x) -> Odd(x)").unwrap();
    kb.set_limits(QueryLimits::unbounded().with_max_steps(100));
    let mut odd = kb.ask("Odd(n)").unwrap();
    assert_eq!(odd.next(), None);
    assert_eq!(odd.interruption(), Some(Interruption::StepLimit));
}

#[test]
fn propositional_clauses() {
    let kb = kb_of(&["Raining", "Raining -> Wet", "Wet & Not(Sunny) -> Umbrella"]);
    let answers: Vec<_> = kb.ask("Umbrella").unwrap().collect();
    assert_eq!(answers, vec![Answer::Truth(true)]);
}
