//! Textual interaction scripts
//!
//! One interaction per line:
//!
//! ```text
//! # comment
//! toggle <organization>
//! drag <account>
//! hover <organization>
//! leave
//! drop
//! cancel
//! expand-all
//! collapse-all
//! render
//! ```
//!
//! Names run to the end of the line, so they may contain spaces.

use std::fmt;
use std::str::FromStr;

use crate::application::{ApplicationError, ApplicationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Toggle(String),
    Drag(String),
    Hover(String),
    Leave,
    Drop,
    Cancel,
    ExpandAll,
    CollapseAll,
    Render,
}

impl FromStr for Interaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = match s.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (s, ""),
        };

        let named = |make: fn(String) -> Interaction| {
            if rest.is_empty() {
                Err(format!("'{}' needs a name", verb))
            } else {
                Ok(make(rest.to_string()))
            }
        };
        let bare = |interaction: Interaction| {
            if rest.is_empty() {
                Ok(interaction)
            } else {
                Err(format!("'{}' takes no argument", verb))
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "toggle" => named(Interaction::Toggle),
            "drag" => named(Interaction::Drag),
            "hover" => named(Interaction::Hover),
            "leave" => bare(Interaction::Leave),
            "drop" => bare(Interaction::Drop),
            "cancel" => bare(Interaction::Cancel),
            "expand-all" => bare(Interaction::ExpandAll),
            "collapse-all" => bare(Interaction::CollapseAll),
            "render" => bare(Interaction::Render),
            other => Err(format!("unknown interaction '{}'", other)),
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Toggle(name) => write!(f, "toggle {}", name),
            Interaction::Drag(name) => write!(f, "drag {}", name),
            Interaction::Hover(name) => write!(f, "hover {}", name),
            Interaction::Leave => write!(f, "leave"),
            Interaction::Drop => write!(f, "drop"),
            Interaction::Cancel => write!(f, "cancel"),
            Interaction::ExpandAll => write!(f, "expand-all"),
            Interaction::CollapseAll => write!(f, "collapse-all"),
            Interaction::Render => write!(f, "render"),
        }
    }
}

/// Parse a whole script; returns interactions with their 1-based line numbers.
pub fn parse_script(content: &str) -> ApplicationResult<Vec<(usize, Interaction)>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            text.parse::<Interaction>()
                .map(|interaction| (line, interaction))
                .map_err(|message| ApplicationError::InvalidInteraction { line, message })
        })
        .collect()
}
