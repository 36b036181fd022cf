//! Grammar tables
//!
//! Grammar is data, not code: each language lists its productions as [`Rule`] trees and the
//! engine interprets them. Lookahead sets are spelled out next to the rule that branches on them
//! (they are the FIRST sets of the alternatives), which keeps every decision point visible in the
//! table.
//!
//! The helper constructors ([`expect`], [`call`], [`repeat`], ...) exist so grammar tables read
//! close to the EBNF they encode:
//!
//! ```text
//! block := '{' statement* '}'
//! ```
//!
//! ```rust,ignore
//! production("block", vec![
//!     expect(BlockBegin),
//!     repeat(STATEMENT_START, vec![call("statement")]),
//!     expect(BlockEnd),
//! ])
//! ```

use crate::labparse::error::GrammarError;
use std::collections::HashMap;

/// One step of a production body.
#[derive(Debug, Clone)]
pub enum Rule<K: 'static> {
    /// Consume a terminal of this kind, or raise `Expected`.
    Expect(K),
    /// Consume the lookahead, whatever it is. Used after the lookahead was already checked.
    Advance,
    /// Run another production.
    Call(&'static str),
    /// Run `body` while the lookahead is in the set.
    Repeat {
        lookahead: &'static [K],
        body: Vec<Rule<K>>,
    },
    /// Run `body` once if the lookahead is in the set.
    Optional {
        lookahead: &'static [K],
        body: Vec<Rule<K>>,
    },
    /// Run the first arm accepting the lookahead; raise `InvalidProduction` naming `name` if none does.
    Choice { name: &'static str, arms: Vec<Arm<K>> },
    /// Raise `Forbidden` with `message` if the lookahead is in the set. Never consumes.
    Forbid {
        lookahead: &'static [K],
        message: &'static str,
    },
}

/// An alternative of a [`Rule::Choice`].
#[derive(Debug, Clone)]
pub struct Arm<K: 'static> {
    pub lookahead: &'static [K],
    pub body: Vec<Rule<K>>,
}

#[derive(Debug, Clone)]
pub struct Production<K: 'static> {
    pub name: &'static str,
    pub body: Vec<Rule<K>>,
}

/// A validated set of productions with a start symbol.
#[derive(Debug, Clone)]
pub struct Grammar<K: 'static> {
    start: &'static str,
    productions: Vec<Production<K>>,
    by_name: HashMap<&'static str, usize>,
}

impl<K: 'static> Grammar<K> {
    /// Assemble a grammar, checking that names are unique and every call has a target.
    pub fn new(start: &'static str, productions: Vec<Production<K>>) -> Result<Self, GrammarError> {
        let mut by_name = HashMap::with_capacity(productions.len());
        for (idx, production) in productions.iter().enumerate() {
            if by_name.insert(production.name, idx).is_some() {
                return Err(GrammarError::DuplicateProduction(production.name));
            }
        }

        if !by_name.contains_key(start) {
            return Err(GrammarError::MissingStart(start));
        }

        for production in &productions {
            let mut callees = Vec::new();
            collect_calls(&production.body, &mut callees);
            if let Some(callee) = callees.into_iter().find(|c| !by_name.contains_key(c)) {
                return Err(GrammarError::UndefinedProduction {
                    caller: production.name,
                    callee,
                });
            }
        }

        Ok(Self {
            start,
            productions,
            by_name,
        })
    }

    pub fn start(&self) -> &'static str {
        self.start
    }

    pub fn production(&self, name: &str) -> Option<&Production<K>> {
        self.by_name.get(name).map(|&idx| &self.productions[idx])
    }

    /// Productions in declaration order.
    pub fn productions(&self) -> impl Iterator<Item = &Production<K>> {
        self.productions.iter()
    }
}

fn collect_calls<K: 'static>(rules: &[Rule<K>], out: &mut Vec<&'static str>) {
    for rule in rules {
        match rule {
            Rule::Call(name) => out.push(*name),
            Rule::Repeat { body, .. } | Rule::Optional { body, .. } => collect_calls(body, out),
            Rule::Choice { arms, .. } => {
                for arm in arms {
                    collect_calls(&arm.body, out);
                }
            }
            Rule::Expect(_) | Rule::Advance | Rule::Forbid { .. } => {}
        }
    }
}

pub fn production<K: 'static>(name: &'static str, body: Vec<Rule<K>>) -> Production<K> {
    Production { name, body }
}

pub fn expect<K: 'static>(kind: K) -> Rule<K> {
    Rule::Expect(kind)
}

pub fn advance<K: 'static>() -> Rule<K> {
    Rule::Advance
}

pub fn call<K: 'static>(name: &'static str) -> Rule<K> {
    Rule::Call(name)
}

pub fn repeat<K: 'static>(lookahead: &'static [K], body: Vec<Rule<K>>) -> Rule<K> {
    Rule::Repeat { lookahead, body }
}

pub fn optional<K: 'static>(lookahead: &'static [K], body: Vec<Rule<K>>) -> Rule<K> {
    Rule::Optional { lookahead, body }
}

pub fn choice<K: 'static>(name: &'static str, arms: Vec<Arm<K>>) -> Rule<K> {
    Rule::Choice { name, arms }
}

pub fn arm<K: 'static>(lookahead: &'static [K], body: Vec<Rule<K>>) -> Arm<K> {
    Arm { lookahead, body }
}

pub fn forbid<K: 'static>(lookahead: &'static [K], message: &'static str) -> Rule<K> {
    Rule::Forbid { lookahead, message }
}

/// One level of a binary-operator ladder:
///
/// ```text
/// name := higher (operator operand higher)*
/// ```
///
/// `higher` is the next tighter-binding level and `operand` the production parsed right after
/// each operator.
pub fn operator_tail<K: 'static>(
    name: &'static str,
    operators: &'static [K],
    operand: &'static str,
    higher: &'static str,
) -> Production<K> {
    production(
        name,
        vec![
            call(higher),
            repeat(operators, vec![advance(), call(operand), call(higher)]),
        ],
    )
}
