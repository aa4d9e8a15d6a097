//! Terminal output helpers.
//!
//! Documents are written to stdout as JSON so they can be piped; everything
//! meant for a human (status lines, errors, hints) follows the same
//! colored-symbol layout. Errors go to stderr. Colors are only emitted when
//! the stream supports them or `--color always` forces them.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream, Style};
use serde_json::Value;

fn hint_style() -> Style {
    Style::new().cyan().dimmed()
}

/// Print a JSON document on stdout.
pub fn document(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Print a success line.
pub fn success(message: &str) {
    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green()),
        message
    );
}

/// Print an error line on stderr.
pub fn error(message: &str) {
    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |s| s.red()),
        message
    );
}

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!(
        "  {:<12} {}",
        label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        value
    );
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    println!(
        "  {}: {}",
        "hint".if_supports_color(Stream::Stdout, |s| s.style(hint_style())),
        message.if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
}

/// Print a hint on stderr, next to an error.
pub fn error_hint(message: &str) {
    eprintln!(
        "  {}: {}",
        "hint".if_supports_color(Stream::Stderr, |s| s.style(hint_style())),
        message.if_supports_color(Stream::Stderr, |s| s.dimmed())
    );
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |s| s.cyan()))
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |s| s.dimmed()))
}
