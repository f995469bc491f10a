//! Terminal output helpers
//!
//! `colored` honours NO_COLOR, CLICOLOR and CLICOLOR_FORCE; `color = false`
//! in the settings switches colors off as well.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::MoveRequested;

/// Red bold `error:` line on stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// `<label>: <msg>` with a green label
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// New collapsed state of an organization after a toggle.
pub fn toggled(trading_name: &str, collapsed: bool) {
    let state = if collapsed { "collapsed" } else { "expanded" };
    action("toggle", &format!("{} {}", trading_name, state.bold()));
}

/// Move request notice, e.g. `✓ You moved Acct1 to HQ`.
pub fn moved(event: &MoveRequested) {
    println!("{} {}", "✓".green(), event);
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Uncolored data (trees, JSON, TOML)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
