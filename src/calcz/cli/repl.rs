//! The interactive loop.
//!
//! Each input line is parsed into a [`ReplCommand`] and dispatched to the
//! API. Operation names come from the registry, so operations registered
//! at runtime are usable without touching this module. Errors from a single
//! command are printed and the loop keeps going; only `exit` or end of
//! input stops it.

use super::AppContext;
use super::print::{print_error, print_help, print_history, print_messages};
use calcz::error::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Enter command: ";
const CANCEL: &str = "cancel";

#[derive(Debug, PartialEq)]
pub(super) enum ReplCommand {
    /// An operation, with operands when they were given inline.
    Evaluate {
        operation: String,
        operands: Option<(String, String)>,
    },
    History,
    Clear,
    Undo,
    Redo,
    Save,
    Load,
    Help,
    Exit,
    Empty,
    Usage(String),
    Unknown(String),
}

/// Parse one input line. `is_operation` decides which words name operations.
pub(super) fn parse_line(line: &str, is_operation: impl Fn(&str) -> bool) -> ReplCommand {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return ReplCommand::Empty;
    };
    let command = first.to_lowercase();
    let rest: Vec<&str> = words.collect();

    let builtin = match command.as_str() {
        "history" => Some(ReplCommand::History),
        "clear" => Some(ReplCommand::Clear),
        "undo" => Some(ReplCommand::Undo),
        "redo" => Some(ReplCommand::Redo),
        "save" => Some(ReplCommand::Save),
        "load" => Some(ReplCommand::Load),
        "help" => Some(ReplCommand::Help),
        "exit" | "quit" => Some(ReplCommand::Exit),
        _ => None,
    };
    if let Some(cmd) = builtin {
        return cmd;
    }

    if !is_operation(&command) {
        return ReplCommand::Unknown(command);
    }
    match rest.as_slice() {
        [] => ReplCommand::Evaluate {
            operation: command,
            operands: None,
        },
        [a, b] => ReplCommand::Evaluate {
            operation: command,
            operands: Some((a.to_string(), b.to_string())),
        },
        _ => ReplCommand::Usage(format!("Usage: {} <a> <b>", command)),
    }
}

pub(super) fn run(ctx: &mut AppContext) -> Result<()> {
    println!("Calculator started. Type 'help' for commands.");
    let restored = ctx.api.restore_on_startup();
    print_messages(&restored.messages);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(line) = prompt(PROMPT, &mut lines)? else {
            println!();
            exit(ctx);
            return Ok(());
        };

        let command = parse_line(&line, |name| ctx.api.is_operation(name));
        if command == ReplCommand::Exit {
            exit(ctx);
            return Ok(());
        }
        dispatch(ctx, command, &mut lines)?;
    }
}

fn dispatch<I>(ctx: &mut AppContext, command: ReplCommand, lines: &mut I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let outcome = match command {
        ReplCommand::Evaluate {
            operation,
            operands,
        } => {
            let operands = match operands {
                Some(pair) => Some(pair),
                None => read_operands(lines)?,
            };
            match operands {
                Some((a, b)) => ctx.api.evaluate_input(&operation, &a, &b),
                None => {
                    println!("{}", "Operation cancelled.".dimmed());
                    return Ok(());
                }
            }
        }
        ReplCommand::History => ctx.api.get_history().inspect(|r| print_history(&r.listed_records)),
        ReplCommand::Clear => ctx.api.clear_history(),
        ReplCommand::Undo => ctx.api.undo(),
        ReplCommand::Redo => ctx.api.redo(),
        ReplCommand::Save => ctx.api.save_history(),
        ReplCommand::Load => ctx.api.load_history(),
        ReplCommand::Help => ctx.api.operations().inspect(|r| print_help(&r.operations)),
        ReplCommand::Empty => return Ok(()),
        ReplCommand::Usage(usage) => {
            println!("{}", usage.yellow());
            return Ok(());
        }
        ReplCommand::Unknown(cmd) => {
            println!("{}", format!("Unknown command: {}", cmd).red());
            return Ok(());
        }
        ReplCommand::Exit => return Ok(()),
    };

    match outcome {
        Ok(result) => print_messages(&result.messages),
        Err(e) => print_error(&e),
    }
    Ok(())
}

/// Prompt for both operands. `None` means the user cancelled or input ended.
fn read_operands<I>(lines: &mut I) -> Result<Option<(String, String)>>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("Enter numbers (or '{}' to abort):", CANCEL);
    let Some(a) = read_operand("First number: ", lines)? else {
        return Ok(None);
    };
    let Some(b) = read_operand("Second number: ", lines)? else {
        return Ok(None);
    };
    Ok(Some((a, b)))
}

fn read_operand<I>(label: &str, lines: &mut I) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    Ok(prompt(label, lines)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.eq_ignore_ascii_case(CANCEL)))
}

fn prompt<I>(label: &str, lines: &mut I) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", label);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn exit(ctx: &mut AppContext) {
    match ctx.api.save_history() {
        Ok(_) => println!("Goodbye!"),
        Err(e) => println!(
            "{}",
            format!("Warning: Failed to save history: {}", e).yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(name: &str) -> bool {
        matches!(name, "add" | "power" | "int_divide")
    }

    #[test]
    fn inline_operands() {
        assert_eq!(
            parse_line("add 5 3", ops),
            ReplCommand::Evaluate {
                operation: "add".into(),
                operands: Some(("5".into(), "3".into())),
            }
        );
    }

    #[test]
    fn bare_operation_prompts() {
        assert_eq!(
            parse_line("  POWER ", ops),
            ReplCommand::Evaluate {
                operation: "power".into(),
                operands: None,
            }
        );
    }

    #[test]
    fn wrong_operand_count_is_usage() {
        assert_eq!(
            parse_line("add 1", ops),
            ReplCommand::Usage("Usage: add <a> <b>".into())
        );
        assert!(matches!(parse_line("add 1 2 3", ops), ReplCommand::Usage(_)));
    }

    #[test]
    fn builtin_commands() {
        assert_eq!(parse_line("history", ops), ReplCommand::History);
        assert_eq!(parse_line("Undo", ops), ReplCommand::Undo);
        assert_eq!(parse_line("redo", ops), ReplCommand::Redo);
        assert_eq!(parse_line("quit", ops), ReplCommand::Exit);
        assert_eq!(parse_line("   ", ops), ReplCommand::Empty);
    }

    #[test]
    fn unknown_words() {
        assert_eq!(
            parse_line("sqrt 4 2", ops),
            ReplCommand::Unknown("sqrt".into())
        );
    }

    #[test]
    fn cancel_aborts_operand_entry() {
        let mut input = vec![Ok("4".to_string()), Ok("Cancel".to_string())].into_iter();
        assert_eq!(read_operands(&mut input).unwrap(), None);

        let mut input = vec![Ok(" 4 ".to_string()), Ok("2".to_string())].into_iter();
        assert_eq!(
            read_operands(&mut input).unwrap(),
            Some(("4".to_string(), "2".to_string()))
        );
    }

    #[test]
    fn end_of_input_during_operand_entry_cancels() {
        let mut input = vec![Ok("4".to_string())].into_iter();
        assert_eq!(read_operands(&mut input).unwrap(), None);
    }
}
