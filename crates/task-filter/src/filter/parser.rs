//! Recursive descent parser for filter expressions.

use chrono::{DateTime, SecondsFormat, Utc};
use strsim::levenshtein;

use super::ast::{FilterExpression, FilterOperator, FilterValue, FilterableField};
use super::error::{FilterError, FilterResult};
use super::lexer::{tokenize, Token};

/// Maximum Levenshtein distance for suggesting a field name.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Maximum depth of nested parentheses.
pub const MAX_NESTING: usize = 64;

/// Maximum number of conditions in one query.
///
/// Connective chains become tree depth, which evaluation walks recursively.
pub const MAX_CONDITIONS: usize = 512;

/// Parser for filter expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= and_term ("||" expression)?
/// and_term   ::= operand ("&&" condition)*
/// operand    ::= "(" expression ")" | condition
/// condition  ::= FIELD OPERATOR value
/// value      ::= literal | literal ("," literal)*   (lists only for in / not in)
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `&&` - binary, left-associative
/// 2. `||` - binary, groups to the right
///
/// Only a condition may follow `&&`; a group must lead its term.
/// Parentheses nest at most [`MAX_NESTING`] deep and a query holds at most
/// [`MAX_CONDITIONS`] conditions.
///
/// # Example
///
/// ```
/// use task_filter_rs::filter::{FilterParser, FilterExpression};
///
/// let expr = FilterParser::parse("priority = high && done = false").unwrap();
/// assert!(matches!(expr, Some(FilterExpression::Logical { .. })));
///
/// // An empty query means "no filter"
/// assert!(FilterParser::parse("   ").unwrap().is_none());
/// ```
pub struct FilterParser {
    tokens: Vec<Token>,
    /// ISO-8601 rendering of the instant `now` resolves to.
    now: String,
}

impl FilterParser {
    /// Parses a filter expression, resolving `now` to the current instant.
    ///
    /// Returns `Ok(None)` for an empty or whitespace-only query, meaning
    /// "no filter".
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] encountered; the parser never
    /// recovers or returns a partial expression.
    pub fn parse(input: &str) -> FilterResult<Option<FilterExpression>> {
        Self::parse_at(input, Utc::now())
    }

    /// Parses a filter expression with `now` pinned to the given instant.
    ///
    /// `now` is resolved once here, at parse time, not when the expression
    /// is evaluated.
    pub fn parse_at(input: &str, now: DateTime<Utc>) -> FilterResult<Option<FilterExpression>> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Ok(None);
        }

        let parser = Self {
            tokens,
            now: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let result = parser.parse_all();
        match &result {
            Ok(expr) => tracing::debug!(%expr, "parsed filter"),
            Err(e) => tracing::debug!(position = e.position(), error = %e, "filter rejected"),
        }
        result.map(Some)
    }

    /// Parses the whole token stream and checks that nothing is left over.
    fn parse_all(&self) -> FilterResult<FilterExpression> {
        let mut connectives = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is("&&") || t.is("||"));
        if let Some((position, _)) = connectives.nth(MAX_CONDITIONS - 1) {
            return Err(FilterError::TooManyConditions {
                position,
                limit: MAX_CONDITIONS,
            });
        }

        let (expr, next) = self.parse_expression(0, 0)?;
        if let Some(token) = self.tokens.get(next) {
            return Err(FilterError::unexpected_token(&token.text, next));
        }
        Ok(expr)
    }

    /// Returns the token at `index` without consuming it.
    fn peek(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Checks if the token at `index` is the unquoted `symbol`.
    fn check(&self, index: usize, symbol: &str) -> bool {
        self.peek(index).is_some_and(|t| t.is(symbol))
    }

    /// Parses `and_term ("||" expression)?` starting at `start`.
    ///
    /// Returns the expression and the index just past the consumed tokens.
    /// Terms joined by `||` are collected in a loop and folded to the right.
    fn parse_expression(
        &self,
        start: usize,
        depth: usize,
    ) -> FilterResult<(FilterExpression, usize)> {
        let (first, mut index) = self.parse_and_term(start, depth)?;

        let mut rest = Vec::new();
        while self.check(index, "||") {
            let (term, next) = self.parse_and_term(index + 1, depth)?;
            rest.push(term);
            index = next;
        }

        let expr = match rest.pop() {
            None => first,
            Some(last) => {
                let tail = rest
                    .into_iter()
                    .rev()
                    .fold(last, |acc, term| FilterExpression::or(term, acc));
                FilterExpression::or(first, tail)
            }
        };
        Ok((expr, index))
    }

    /// Parses `operand ("&&" condition)*`, folding to the left.
    fn parse_and_term(
        &self,
        start: usize,
        depth: usize,
    ) -> FilterResult<(FilterExpression, usize)> {
        let (mut expr, mut index) = self.parse_operand(start, depth)?;

        while self.check(index, "&&") {
            let (right, next) = self.parse_condition(index + 1)?;
            expr = FilterExpression::and(expr, right);
            index = next;
        }

        Ok((expr, index))
    }

    /// Parses `"(" expression ")" | condition`.
    fn parse_operand(&self, start: usize, depth: usize) -> FilterResult<(FilterExpression, usize)> {
        if self.check(start, "(") {
            if depth >= MAX_NESTING {
                return Err(FilterError::TooDeep {
                    position: start,
                    limit: MAX_NESTING,
                });
            }
            let (inner, next) = self.parse_expression(start + 1, depth + 1)?;
            if !self.check(next, ")") {
                return Err(FilterError::UnclosedParenthesis { position: next });
            }
            return Ok((inner, next + 1));
        }

        self.parse_condition(start)
    }

    /// Parses `FIELD OPERATOR value`.
    fn parse_condition(&self, start: usize) -> FilterResult<(FilterExpression, usize)> {
        let Some(field_token) = self.peek(start) else {
            // Only reachable after `(`, `&&` or `||` at the end of input
            return Err(FilterError::UnexpectedEnd { position: start });
        };

        let field = FilterableField::from_name(&field_token.text).ok_or_else(|| {
            FilterError::unknown_field(
                &field_token.text,
                start,
                suggest_field(&field_token.text),
            )
        })?;

        let (operator, value_start) = self.parse_operator(field, start + 1)?;

        if operator.is_list() {
            let (items, next) = self.parse_list(value_start);
            if items.is_empty() {
                return Err(FilterError::missing_value(field, operator, value_start));
            }
            let expr = FilterExpression::condition(field, operator, FilterValue::List(items));
            return Ok((expr, next));
        }

        let value_token = self
            .peek(value_start)
            .filter(|t| !is_structural(t))
            .ok_or_else(|| FilterError::missing_value(field, operator, value_start))?;
        let value = self.coerce(value_token);

        Ok((
            FilterExpression::condition(field, operator, value),
            value_start + 1,
        ))
    }

    /// Parses the operator at `index`, returning it and the index of the value.
    ///
    /// `not in` spans two tokens.
    fn parse_operator(
        &self,
        field: FilterableField,
        index: usize,
    ) -> FilterResult<(FilterOperator, usize)> {
        let token = self
            .peek(index)
            .ok_or_else(|| FilterError::missing_operator(field, index))?;

        if token.is("not") && self.check(index + 1, "in") {
            return Ok((FilterOperator::NotIn, index + 2));
        }

        match FilterOperator::from_symbol(&token.text) {
            Some(op) if !token.quoted && op != FilterOperator::NotIn => Ok((op, index + 1)),
            _ => Err(FilterError::unknown_operator(&token.text, index)),
        }
    }

    /// Collects list items until `&&`, `||`, `)` or the end of input.
    fn parse_list(&self, start: usize) -> (Vec<String>, usize) {
        let mut items = Vec::new();
        let mut index = start;

        while let Some(token) = self.peek(index) {
            if token.is("&&") || token.is("||") || token.is(")") {
                break;
            }
            if token.quoted {
                items.push(token.text.clone());
            } else {
                items.extend(
                    token
                        .text
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from),
                );
            }
            index += 1;
        }

        (items, index)
    }

    /// Converts a value token to a typed literal.
    ///
    /// Quoted literals are always strings.
    fn coerce(&self, token: &Token) -> FilterValue {
        if token.quoted {
            return FilterValue::String(token.text.clone());
        }

        match token.text.as_str() {
            "true" => FilterValue::Bool(true),
            "false" => FilterValue::Bool(false),
            "now" => FilterValue::String(self.now.clone()),
            text => match text.parse::<f64>() {
                Ok(n) if n.is_finite() => FilterValue::Number(n),
                _ => FilterValue::String(text.to_string()),
            },
        }
    }
}

/// Returns true for parentheses and connectives, which can never be values.
fn is_structural(token: &Token) -> bool {
    ["(", ")", "&&", "||"].iter().any(|symbol| token.is(symbol))
}

/// Finds the closest valid field name to a misspelled identifier.
fn suggest_field(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    let (best, distance) = FilterableField::ALL
        .iter()
        .map(|field| (field.as_str(), levenshtein(&lower, &field.as_str().to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if distance <= MAX_SUGGESTION_DISTANCE && best != name {
        Some(best.to_string())
    } else {
        None
    }
}

/// Parses a filter query.
///
/// `Ok(None)` means the query was empty and every record should be shown.
pub fn parse_filter_query(query: &str) -> FilterResult<Option<FilterExpression>> {
    FilterParser::parse(query)
}
