//! Check command implementation.
//!
//! Parses a filter without touching any tasks and shows how it groups.

use task_filter_rs::filter::{tokenize, FilterParser};

use super::{CommandContext, CommandError, Result};
use crate::output::{
    format_error_marker, format_expression_tree, format_tokens, tokens_output, CheckOutput,
};

/// Options for the check command.
#[derive(Debug)]
pub struct CheckOptions {
    /// Filter expression.
    pub expression: String,
    /// Also print the token stream.
    pub tokens: bool,
}

/// Executes the check command.
///
/// # Errors
///
/// Returns `CommandError::Filter` if the expression does not parse.
pub fn execute(ctx: &CommandContext, opts: &CheckOptions) -> Result<()> {
    let tokens = tokenize(&opts.expression);
    let parsed = FilterParser::parse_at(&opts.expression, ctx.now);

    if ctx.json_output {
        // Errors are reported by main in the usual JSON error shape
        let expr = parsed?;
        let output = CheckOutput {
            query: &opts.expression,
            valid: true,
            normalized: expr.as_ref().map(|e| e.to_string()),
            expression: expr.as_ref(),
            tokens: opts.tokens.then(|| tokens_output(&tokens)),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if opts.tokens && !ctx.quiet {
        println!("Tokens:");
        print!("{}", format_tokens(&tokens));
        println!();
    }

    match parsed {
        Ok(Some(expr)) => {
            if !ctx.quiet {
                print!("{}", format_expression_tree(&expr, ctx.use_colors));
            }
            Ok(())
        }
        Ok(None) => {
            if !ctx.quiet {
                println!("(empty filter: matches every task)");
            }
            Ok(())
        }
        Err(err) => {
            // main prints the message itself
            if !ctx.quiet {
                eprint!(
                    "{}",
                    format_error_marker(err.position(), &tokens, ctx.use_colors)
                );
            }
            Err(CommandError::Filter(err))
        }
    }
}
