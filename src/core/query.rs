use serde::Serialize;

use crate::core::types::Operator;
use crate::matching::normalize::normalize;

/// A structured ingredient query: terms joined positionally by operators.
///
/// `operators[i]` joins `terms[i]` and `terms[i + 1]`. Construction always
/// succeeds: terms are normalized, blank terms are dropped along with the
/// operator that joined them to the previous term, missing operators are
/// padded with [`Operator::And`] and surplus operators are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientQuery {
    terms: Vec<String>,
    operators: Vec<Operator>,
}

impl IngredientQuery {
    pub fn new<S: AsRef<str>>(terms: &[S], operators: &[Operator]) -> Self {
        let mut kept_terms: Vec<String> = Vec::with_capacity(terms.len());
        let mut kept_operators: Vec<Operator> = Vec::new();

        for (i, raw) in terms.iter().enumerate() {
            let term = normalize(raw.as_ref());
            if term.is_empty() {
                continue;
            }
            if !kept_terms.is_empty() {
                // Operator joining this term to its predecessor in the input
                let op = i
                    .checked_sub(1)
                    .and_then(|j| operators.get(j))
                    .copied()
                    .unwrap_or_default();
                kept_operators.push(op);
            }
            kept_terms.push(term);
        }

        Self {
            terms: kept_terms,
            operators: kept_operators,
        }
    }

    /// Query where every term is joined by the same operator
    pub fn uniform<S: AsRef<str>>(terms: &[S], op: Operator) -> Self {
        let operators = vec![op; terms.len().saturating_sub(1)];
        Self::new(terms, &operators)
    }

    /// Parse an expression such as `"rice and urad dal or chicken"`.
    ///
    /// The words `and`/`or` (and `&`, `|`) separate terms; commas behave like
    /// `and`. Consecutive operators collapse, with the last one winning.
    pub fn parse_expression(expr: &str) -> Self {
        let mut terms: Vec<String> = Vec::new();
        let mut operators: Vec<Operator> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut pending: Option<Operator> = None;

        let spaced = expr.replace(',', " , ");
        for word in spaced.split_whitespace() {
            let op = if word == "," {
                Some(Operator::And)
            } else {
                Operator::parse(word)
            };

            match op {
                Some(op) => {
                    if !current.is_empty() {
                        terms.push(current.join(" "));
                        current.clear();
                    }
                    pending = Some(op);
                }
                None => {
                    if current.is_empty() && !terms.is_empty() {
                        operators.push(pending.unwrap_or_default());
                    }
                    pending = None;
                    current.push(word);
                }
            }
        }
        if !current.is_empty() {
            terms.push(current.join(" "));
        }

        Self::new(&terms, &operators)
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Partition the terms into required groups.
    ///
    /// Consecutive terms joined by AND share a group; OR starts a new one.
    /// An empty query has no groups.
    #[must_use]
    pub fn required_groups(&self) -> Vec<Vec<&str>> {
        let mut groups: Vec<Vec<&str>> = Vec::new();
        for (i, term) in self.terms.iter().enumerate() {
            let starts_group = i == 0 || self.operators[i - 1] == Operator::Or;
            match groups.last_mut() {
                Some(group) if !starts_group => group.push(term.as_str()),
                _ => groups.push(vec![term.as_str()]),
            }
        }
        groups
    }
}

impl std::fmt::Display for IngredientQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operators[i - 1])?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
