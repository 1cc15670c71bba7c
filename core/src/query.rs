//! Single-operator Boolean queries.
//!
//! Operator keywords are detected on the lowercased raw query in a fixed
//! order: `" and "`, then `" or "`, then `" not "`. The first keyword found
//! governs the whole query and its operands are never split further, so
//! `"a and b or c"` is an AND of `"a"` and `"b or c"`. Operands are looked up
//! whole as single index keys. A query with no keyword is tokenized and its
//! words are OR-ed together.

use crate::index::{InvertedIndex, ResultSet};
use crate::tokenizer::words;

const AND: &str = " and ";
const OR: &str = " or ";
const NOT: &str = " not ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Intersection of every operand's documents.
    And(Vec<String>),
    /// Union of every operand's documents.
    Or(Vec<String>),
    /// Documents of `include` that are not documents of `exclude`.
    Not { include: String, exclude: String },
    /// `" not "` present but splitting did not give exactly two parts.
    MalformedNot,
    /// No operator keyword: union of the query's words.
    Terms(Vec<String>),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let query = raw.to_lowercase();
        if query.contains(AND) {
            Query::And(split_operands(&query, AND))
        } else if query.contains(OR) {
            Query::Or(split_operands(&query, OR))
        } else if query.contains(NOT) {
            match split_operands(&query, NOT).as_slice() {
                [include, exclude] => Query::Not { include: include.clone(), exclude: exclude.clone() },
                _ => Query::MalformedNot,
            }
        } else {
            Query::Terms(words(&query))
        }
    }

    pub fn evaluate(&self, index: &InvertedIndex) -> ResultSet {
        match self {
            Query::And(operands) => {
                let mut iter = operands.iter();
                let mut result = match iter.next() {
                    Some(first) => index.lookup(first),
                    None => return ResultSet::new(),
                };
                for operand in iter {
                    match index.get(operand) {
                        Some(docs) => result.retain(|d| docs.contains(d)),
                        None => result.clear(),
                    }
                }
                result
            }
            Query::Or(operands) | Query::Terms(operands) => {
                let mut result = ResultSet::new();
                for operand in operands {
                    if let Some(docs) = index.get(operand) {
                        result.extend(docs.iter().cloned());
                    }
                }
                result
            }
            Query::Not { include, exclude } => {
                let mut result = index.lookup(include);
                if let Some(docs) = index.get(exclude) {
                    result.retain(|d| !docs.contains(d));
                }
                result
            }
            Query::MalformedNot => ResultSet::new(),
        }
    }

    /// Name of the operator governing the query.
    pub fn operator(&self) -> &'static str {
        match self {
            Query::And(_) => "and",
            Query::Or(_) => "or",
            Query::Not { .. } | Query::MalformedNot => "not",
            Query::Terms(_) => "terms",
        }
    }
}

fn split_operands(query: &str, keyword: &str) -> Vec<String> {
    query.split(keyword).map(|s| s.trim().to_string()).collect()
}

/// Parse and evaluate `query` against `index`. Never fails; "no match" is the
/// empty set.
pub fn evaluate(index: &InvertedIndex, query: &str) -> ResultSet {
    let parsed = Query::parse(query);
    let result = parsed.evaluate(index);
    tracing::debug!(operator = parsed.operator(), hits = result.len(), "evaluated query");
    result
}
