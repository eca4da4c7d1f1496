//! Interactive read-eval loop over a directory tree.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cleaner::{
    clean, format_size, scan, CleanOutcome, ScanMode, ScanResult, Scope,
};
use crate::session::command::Command;
use crate::session::cursor::Cursor;

/// Running totals for one session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionStats {
    /// Total bytes freed by all cleanups this session.
    pub bytes_freed: u64,
    /// Number of artifact directories deleted.
    pub deleted_count: usize,
}

/// Interactive session: renders the current folder, reads one command per
/// line, dispatches, and repeats until quit.
///
/// Generic over the input/output streams so tests can drive it with
/// in-memory buffers; the binary passes locked stdin/stdout.
pub struct Session {
    cursor: Cursor,
    start: PathBuf,
    stats: SessionStats,
    /// Result of the last recursive scan, displayed until the cursor
    /// moves or a cleanup invalidates its sizes.
    recursive: Option<ScanResult>,
}

impl Session {
    pub fn new(start: PathBuf) -> Self {
        Self {
            cursor: Cursor::new(start.clone()),
            start,
            stats: SessionStats::default(),
            recursive: None,
        }
    }

    /// Run the blocking read-eval loop until quit or EOF on input.
    pub fn run<R: BufRead, W: Write>(
        mut self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<SessionStats> {
        loop {
            // A shallow listing is cheap and always re-derived, so the
            // display never shows stale artifacts.
            let shallow = scan(self.cursor.path(), ScanMode::Shallow);
            let children = self.cursor.children();
            self.render(output, &shallow, &children)?;

            write!(output, "Choice: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break; // EOF behaves like quit
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(output, "Unrecognized command. Try again.")?;
                continue;
            };

            match command {
                Command::Quit => break,

                Command::Skip => {
                    if self.cursor.path() == self.start {
                        break;
                    }
                    if self.cursor.next() {
                        self.recursive = None;
                    } else {
                        writeln!(output, "No more folders at this level.")?;
                    }
                }

                Command::Enter(index) => match self.cursor.enter(index, &children) {
                    Ok(()) => self.recursive = None,
                    Err(err) => writeln!(output, "{err}")?,
                },

                Command::Up => {
                    if self.cursor.up() {
                        self.recursive = None;
                    } else {
                        writeln!(output, "Already at the top.")?;
                    }
                }

                Command::Next => {
                    if self.cursor.next() {
                        self.recursive = None;
                    } else {
                        writeln!(output, "No more folders at this level.")?;
                    }
                }

                Command::Previous => {
                    if self.cursor.previous() {
                        self.recursive = None;
                    } else {
                        writeln!(output, "Already at the first folder.")?;
                    }
                }

                Command::RecursiveScan => {
                    writeln!(output, "Scanning all subfolders...")?;
                    let result = scan(self.cursor.path(), ScanMode::Recursive);
                    if result.is_empty() {
                        writeln!(output, "No cleanable items found in this tree.")?;
                        self.recursive = None;
                    } else {
                        writeln!(
                            output,
                            "Found {} cleanable item(s) totaling {}",
                            result.artifacts.len(),
                            format_size(result.total_bytes)
                        )?;
                        self.recursive = Some(result);
                    }
                }

                Command::CleanCurrent => {
                    if shallow.is_empty() {
                        writeln!(output, "Nothing to clean in this folder.")?;
                    } else {
                        let outcome = clean(Scope::CurrentOnly, &shallow, self.cursor.path());
                        self.report_outcome(output, &outcome)?;
                        self.recursive = None;
                    }
                }

                Command::WipeTree => {
                    writeln!(output, "Wiping all packages in this tree...")?;
                    let result = scan(self.cursor.path(), ScanMode::Recursive);
                    if result.is_empty() {
                        writeln!(output, "Nothing to clean in this tree.")?;
                    } else {
                        let outcome = clean(Scope::WholeTree, &result, self.cursor.path());
                        self.report_outcome(output, &outcome)?;
                    }
                    self.recursive = None;
                }
            }
        }

        self.summary(output)?;
        Ok(self.stats)
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        shallow: &ScanResult,
        children: &[PathBuf],
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Current: {}", self.cursor.path().display())?;
        writeln!(out, "{}", "=".repeat(60))?;

        if shallow.is_empty() {
            writeln!(out, "No cleanable items in this folder.")?;
        } else {
            writeln!(out, "Cleanable items:")?;
            for artifact in &shallow.artifacts {
                writeln!(
                    out,
                    "  {} ({}) - {}",
                    rel_name(self.cursor.path(), &artifact.path),
                    artifact.kind,
                    format_size(artifact.size)
                )?;
            }
            writeln!(out, "  Subtotal: {}", format_size(shallow.total_bytes))?;
        }

        if let Some(recursive) = &self.recursive {
            writeln!(
                out,
                "Recursive scan: {} item(s) in this tree ({})",
                recursive.artifacts.len(),
                format_size(recursive.total_bytes)
            )?;
        }

        if children.is_empty() {
            writeln!(out, "No subdirectories.")?;
        } else {
            writeln!(out, "Subdirectories ({}):", children.len())?;
            for (idx, child) in children.iter().enumerate() {
                writeln!(out, "  {}. {}", idx + 1, rel_name(self.cursor.path(), child))?;
            }
        }

        writeln!(out, "{}", "-".repeat(60))?;
        writeln!(
            out,
            "Commands: 1-N enter subdir, u up, n next, p previous, r recursive scan,"
        )?;
        writeln!(out, "          c clean here, w wipe tree, s skip, q quit")?;
        writeln!(
            out,
            "Freed this session: {}",
            format_size(self.stats.bytes_freed)
        )?;
        Ok(())
    }

    fn report_outcome<W: Write>(&mut self, out: &mut W, outcome: &CleanOutcome) -> io::Result<()> {
        for artifact in &outcome.deleted {
            writeln!(
                out,
                "  Deleted {} ({})",
                rel_name(self.cursor.path(), &artifact.path),
                format_size(artifact.size)
            )?;
        }
        for (path, reason) in &outcome.failures {
            writeln!(out, "  Failed to delete {}: {}", path.display(), reason)?;
        }
        if !outcome.failures.is_empty() {
            writeln!(
                out,
                "{} item(s) could not be deleted.",
                outcome.failures.len()
            )?;
        }
        writeln!(out, "Freed {}", format_size(outcome.bytes_freed))?;

        self.stats.bytes_freed += outcome.bytes_freed;
        self.stats.deleted_count += outcome.deleted.len();
        Ok(())
    }

    fn summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Session summary:")?;
        writeln!(out, "  Deleted: {} directories", self.stats.deleted_count)?;
        writeln!(out, "  Freed:   {}", format_size(self.stats.bytes_freed))?;
        Ok(())
    }
}

/// Display a path relative to `base`, falling back to the full path.
fn rel_name(base: &Path, path: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
