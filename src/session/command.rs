//! Parsing of the single-character interactive commands.

/// A parsed interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter the numbered child (1-indexed as displayed).
    Enter(usize),
    /// Move to the filesystem parent.
    Up,
    /// Move to the next sibling.
    Next,
    /// Move to the previous sibling.
    Previous,
    /// Recursively scan the current subtree.
    RecursiveScan,
    /// Delete artifacts in the current folder only.
    CleanCurrent,
    /// Delete every artifact in the current subtree.
    WipeTree,
    /// Skip to the next sibling; ends the session at the start directory.
    Skip,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one line of user input. `None` means unrecognized input and
    /// the caller re-prompts without any state change.
    pub fn parse(input: &str) -> Option<Command> {
        let token = input.trim();
        if token.is_empty() {
            return None;
        }

        if let Ok(n) = token.parse::<usize>() {
            return Some(Command::Enter(n));
        }

        match token.to_ascii_lowercase().as_str() {
            "u" => Some(Command::Up),
            "n" => Some(Command::Next),
            "p" => Some(Command::Previous),
            "r" => Some(Command::RecursiveScan),
            "c" => Some(Command::CleanCurrent),
            "w" => Some(Command::WipeTree),
            "s" => Some(Command::Skip),
            "q" => Some(Command::Quit),
            _ => None,
        }
    }
}
