//! Text syntax for clauses and queries.
//!
//! ```text
//! Parent(Pam,Bob)                                   fact or goal
//! Parent(x,y) & Female(x) -> Mother(x,y)            rule, head on the right
//! Not(Male(x)) -> Female(x)                         negation as failure
//! ```
//!
//! In argument position an identifier starting with a lowercase letter is a
//! variable and any other identifier is a constant. This is the only place
//! where that naming convention is looked at.

use crate::core::term::{Term, NOT_OP};
use crate::error::{Error, Result};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    LParen,
    RParen,
    Comma,
    And,
    Implies,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("'{}'", name),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
            Token::Comma => "','".into(),
            Token::And => "'&'".into(),
            Token::Implies => "'->'".into(),
            Token::Eof => "end of input".into(),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let mut tokens = vec![];
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '&' => Token::And,
            '-' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '>')) => Token::Implies,
                    _ => return Err(Error::syntax(offset, "expected '->'")),
                }
            }
            c if is_ident_char(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                tokens.push((Token::Ident(name), offset));
                continue;
            }
            other => {
                return Err(Error::syntax(
                    offset,
                    format!("unexpected character '{}'", other),
                ))
            }
        };
        chars.next();
        tokens.push((token, offset));
    }

    tokens.push((Token::Eof, input.len()));
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    position: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Parser {
            tokens: tokenize(input)?,
            position: 0,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.position].1
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].0.clone();
        if token != Token::Eof {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if *self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.describe()))
        }
    }

    fn unexpected(&self, wanted: &str) -> Error {
        Error::syntax(
            self.offset(),
            format!("expected {}, found {}", wanted, self.peek().describe()),
        )
    }

    fn ident(&mut self) -> Result<String> {
        if let Token::Ident(name) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// clause := literal ("&" literal)* "->" literal | literal
    fn clause(&mut self) -> Result<Term> {
        let mut literals = vec![self.literal()?];
        while *self.peek() == Token::And {
            self.advance();
            literals.push(self.literal()?);
        }

        let clause = if *self.peek() == Token::Implies {
            self.advance();
            let head_offset = self.offset();
            let head = self.literal()?;
            if head.as_negation().is_some() {
                return Err(Error::syntax(head_offset, "rule head cannot be negated"));
            }
            Term::rule(head, literals)
        } else if literals.len() > 1 {
            return Err(self.unexpected("'->' after conjunction"));
        } else {
            literals.remove(0)
        };

        if *self.peek() != Token::Eof {
            return Err(self.unexpected("end of input"));
        }
        Ok(clause)
    }

    /// literal := "Not" "(" literal ")" | atom
    fn literal(&mut self) -> Result<Term> {
        let offset = self.offset();
        let name = self.ident()?;

        if *self.peek() == Token::LParen {
            self.advance();
            if name == NOT_OP {
                let goal = self.literal()?;
                self.expect(Token::RParen)?;
                return Ok(Term::not(goal));
            }
            let args = self.args()?;
            return Ok(Term::compound(name, args));
        }

        if starts_lowercase(&name) {
            Err(Error::syntax(
                offset,
                format!("variable '{}' cannot stand as a goal", name),
            ))
        } else {
            Ok(Term::constant(name))
        }
    }

    /// term := IDENT [ "(" args ")" ]
    fn term(&mut self) -> Result<Term> {
        let name = self.ident()?;
        if *self.peek() == Token::LParen {
            self.advance();
            let args = self.args()?;
            Ok(Term::compound(name, args))
        } else if starts_lowercase(&name) {
            Ok(Term::var(name))
        } else {
            Ok(Term::constant(name))
        }
    }

    /// args := [term ("," term)*] ")"
    fn args(&mut self) -> Result<Vec<Term>> {
        let mut args = vec![];
        if *self.peek() == Token::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.term()?);
            match self.peek() {
                Token::Comma => {
                    self.advance();
                }
                Token::RParen => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }
    }
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().map_or(false, char::is_lowercase)
}

/// Parse a fact, rule or goal.
pub fn parse(text: &str) -> Result<Term> {
    Parser::new(text)?.clause()
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(functor: &str, args: Vec<Term>) -> Term {
        Term::compound(functor, args)
    }

    fn offset_of(err: Error) -> usize {
        match err {
            Error::Syntax { offset, .. } => offset,
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn parses_facts() {
        assert_eq!(
            parse("Parent(Pam,Bob)").unwrap(),
            atom("Parent", vec![Term::constant("Pam"), Term::constant("Bob")])
        );
    }

    #[test]
    fn lowercase_arguments_are_variables() {
        assert_eq!(
            parse(" Likes( x , Cats ) ").unwrap(),
            atom("Likes", vec![Term::var("x"), Term::constant("Cats")])
        );
    }

    #[test]
    fn parses_rules_with_head_on_the_right() {
        let rule = parse("American(x) & Weapon(y) & Sells(x,y,z) -> Criminal(x)").unwrap();
        let (head, body) = rule.head_and_body();
        assert_eq!(head, &atom("Criminal", vec![Term::var("x")]));
        assert_eq!(
            body,
            &[
                atom("American", vec![Term::var("x")]),
                atom("Weapon", vec![Term::var("y")]),
                atom("Sells", vec![Term::var("x"), Term::var("y"), Term::var("z")]),
            ][..]
        );
    }

    #[test]
    fn parses_negation() {
        let rule = parse("Not(Male(x)) -> Female(x)").unwrap();
        let (_, body) = rule.head_and_body();
        assert_eq!(
            body[0].as_negation(),
            Some(&atom("Male", vec![Term::var("x")]))
        );
    }

    #[test]
    fn parses_nested_compounds_and_propositions() {
        assert_eq!(
            parse("Nat(S(S(Zero)))").unwrap(),
            atom(
                "Nat",
                vec![atom("S", vec![atom("S", vec![Term::constant("Zero")])])]
            )
        );
        assert_eq!(parse("Raining").unwrap(), Term::constant("Raining"));
        assert_eq!(parse("Tick()").unwrap(), atom("Tick", vec![]));
    }

    #[test]
    fn display_matches_source() {
        for src in &[
            "Parent(Pam,Bob)",
            "Parent(x,y) & Female(x) -> Mother(x,y)",
            "Not(Male(x)) -> Female(x)",
        ] {
            assert_eq!(format!("{}", parse(src).unwrap()), *src);
        }
    }

    #[test]
    fn term_implements_from_str() {
        let t: Term = "Male(Tom)".parse().unwrap();
        assert_eq!(t, atom("Male", vec![Term::constant("Tom")]));
    }

    #[test]
    fn malformed_text_is_a_syntax_error() {
        for src in &[
            "",
            "Parent(Pam,Bob",
            "Parent(Pam,,Bob)",
            "Parent(Pam) Bob",
            "A(x) & B(x)",
            "A(x) -> B(x) -> C(x)",
            "A(x) & -> B(x)",
            "A(x) -> Not(B(x))",
            "x",
            "A(x) - B(x)",
            "A(#)",
        ] {
            assert!(
                matches!(parse(src), Err(Error::Syntax { .. })),
                "{:?} should not parse",
                src
            );
        }
    }

    #[test]
    fn syntax_errors_report_the_offset() {
        assert_eq!(offset_of(parse("Parent(Pam,Bob").unwrap_err()), 14);
        assert_eq!(offset_of(parse("A(#)").unwrap_err()), 2);
    }
}
