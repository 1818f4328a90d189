use calcz::api::{CmdMessage, MessageLevel, OperationInfo};
use calcz::error::CalcError;
use calcz::model::CalculationRecord;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;

/// REPL commands that are not operations, in help order.
const REPL_COMMANDS: &[(&str, &str)] = &[
    ("history", "Show calculation history"),
    ("clear", "Clear calculation history"),
    ("undo", "Undo the last change"),
    ("redo", "Redo the last undone change"),
    ("save", "Save calculation history to file"),
    ("load", "Load calculation history from file"),
    ("help", "Show this help"),
    ("exit", "Save history and exit"),
];

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(err: &CalcError) {
    match err {
        CalcError::NothingToUndo | CalcError::NothingToRedo => {
            println!("{}", format!("{}.", err).yellow())
        }
        _ => println!("{}", format!("Error: {}", err).red()),
    }
}

pub(super) fn print_history(records: &[CalculationRecord]) {
    if records.is_empty() {
        return;
    }

    println!("{}", "Calculation History:".bold());
    for (i, record) in records.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let entry = truncate_to_width(&record.to_string(), available);
        let padding = available.saturating_sub(entry.width());

        println!(
            "{}{}{}{}",
            idx_str.yellow(),
            entry,
            " ".repeat(padding),
            format_time_ago(record.timestamp()).dimmed()
        );
    }
}

pub(super) fn print_operations(operations: &[OperationInfo]) {
    for op in operations {
        println!(
            "  {:<12} {}",
            op.name.green(),
            describe(op).dimmed()
        );
    }
}

pub(super) fn print_help(operations: &[OperationInfo]) {
    print!("{}", render_help(operations));
}

/// Help text for the REPL, built from whatever operations are registered.
pub(super) fn render_help(operations: &[OperationInfo]) -> String {
    let mut output = String::new();
    output.push_str("Operations (enter `<op> a b`, or just `<op>` to be prompted):\n");
    for op in operations {
        output.push_str(&format!("  {:<12} {}\n", op.name, describe(op)));
    }
    output.push('\n');
    output.push_str("Commands:\n");
    for (name, about) in REPL_COMMANDS {
        output.push_str(&format!("  {:<12} {}\n", name, about));
    }
    output
}

fn describe(op: &OperationInfo) -> String {
    if op.description.is_empty() {
        op.display_name.clone()
    } else {
        format!("{} - {}", op.display_name, op.description)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
