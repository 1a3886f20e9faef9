//! Styled message output shared by the commands.
//!
//! Colour is only applied when the caller says the destination supports it.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use super::theme::{ThemeEntry, ThemeMap};

/// `text` coloured per `entry`, or unchanged when colour is off.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match (enable_colors, theme.get(&entry).and_then(|s| s.fg.as_ref())) {
        (true, Some(color)) => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

fn print_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{} {}", styled(tag, entry, theme, enable_colors), message)
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_tagged(writer, "[INFO]", message, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_tagged(writer, "[WARN]", message, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_tagged(writer, "Error:", message, ThemeEntry::Error, theme, enable_colors)
}

/// Prints an error to stderr, coloured when stderr is a terminal.
pub fn error_msg(message: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = print_error_message(&mut io::stderr(), message.as_ref(), theme, color);
}

pub fn warn_msg(message: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = print_warn_message(&mut io::stderr(), message.as_ref(), theme, color);
}

pub fn info_msg(message: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = print_info_message(&mut io::stderr(), message.as_ref(), theme, color);
}
