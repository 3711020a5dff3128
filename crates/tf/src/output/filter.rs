//! Filter expression output formatting (check command, error reports).

use owo_colors::OwoColorize;
use serde::Serialize;
use task_filter_rs::filter::{FilterError, FilterExpression, Token};

/// JSON output for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub query: &'a str,
    pub valid: bool,
    /// The fully parenthesized form of the expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    pub expression: Option<&'a FilterExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenOutput<'a>>>,
}

/// JSON output for a single token.
#[derive(Serialize)]
pub struct TokenOutput<'a> {
    pub index: usize,
    pub text: &'a str,
    pub quoted: bool,
}

/// Converts tokens to their JSON form.
pub fn tokens_output(tokens: &[Token]) -> Vec<TokenOutput<'_>> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, t)| TokenOutput {
            index,
            text: &t.text,
            quoted: t.quoted,
        })
        .collect()
}

/// Formats an expression as an indented tree.
///
/// ```text
/// ||
/// ├── priority = "high"
/// └── &&
///     ├── priority = "medium"
///     └── done = false
/// ```
pub fn format_expression_tree(expr: &FilterExpression, use_colors: bool) -> String {
    let mut output = String::new();
    write_node(expr, "", None, use_colors, &mut output);
    output
}

/// Writes one node; `last` is `None` for the root.
fn write_node(
    expr: &FilterExpression,
    prefix: &str,
    last: Option<bool>,
    use_colors: bool,
    out: &mut String,
) {
    let (branch, child_prefix) = match last {
        None => ("", prefix.to_string()),
        Some(true) => ("└── ", format!("{prefix}    ")),
        Some(false) => ("├── ", format!("{prefix}│   ")),
    };

    match expr {
        FilterExpression::Condition(_) => {
            out.push_str(&format!("{prefix}{branch}{expr}\n"));
        }
        FilterExpression::Logical { op, left, right } => {
            let label = if use_colors {
                op.as_str().cyan().bold().to_string()
            } else {
                op.as_str().to_string()
            };
            out.push_str(&format!("{prefix}{branch}{label}\n"));
            write_node(left, &child_prefix, Some(false), use_colors, out);
            write_node(right, &child_prefix, Some(true), use_colors, out);
        }
    }
}

/// Formats a token listing, one token per line with its index.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();
    for (index, token) in tokens.iter().enumerate() {
        if token.quoted {
            output.push_str(&format!("{index:>3}  {:?} (quoted)\n", token.text));
        } else {
            output.push_str(&format!("{index:>3}  {}\n", token.text));
        }
    }
    output
}

/// Formats a filter error with a marker under the offending token.
pub fn format_filter_error(err: &FilterError, tokens: &[Token], use_colors: bool) -> String {
    let message = format!("{} (at token {})", err, err.position());
    let message = if use_colors {
        message.red().to_string()
    } else {
        message
    };
    format!(
        "{message}\n{}",
        format_error_marker(err.position(), tokens, use_colors)
    )
}

/// Re-renders the query token by token with a `^` under `position`.
///
/// Positions count tokens, not characters; a position past the last token
/// points just after the end.
pub fn format_error_marker(position: usize, tokens: &[Token], use_colors: bool) -> String {
    let mut line = String::new();
    let mut marker_col = None;

    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            line.push(' ');
        }
        if index == position {
            marker_col = Some(line.chars().count());
        }
        if token.quoted {
            line.push_str(&format!("{:?}", token.text));
        } else {
            line.push_str(&token.text);
        }
    }

    let col = marker_col.unwrap_or_else(|| {
        let len = line.chars().count();
        if len == 0 {
            0
        } else {
            len + 1
        }
    });
    let marker = format!("{}^", " ".repeat(col));

    if use_colors {
        format!("  {}\n  {}\n", line, marker.red().bold())
    } else {
        format!("  {line}\n  {marker}\n")
    }
}
