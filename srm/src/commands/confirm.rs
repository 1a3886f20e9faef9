// srm/src/commands/confirm.rs
//! The pre-flight confirmation prompt.
//!
//! The pipeline never prompts; this is the CLI's job. Input and output are
//! injected so the prompt can be driven from tests.

use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;
use walkdir::WalkDir;

/// What the operator is about to lose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetCount {
    pub files: usize,
    pub dirs: usize,
}

/// Counts files and top-level directories among `paths`. With `recursive`,
/// files beneath each directory are counted too.
pub fn count_targets<P: AsRef<Path>>(paths: &[P], recursive: bool) -> TargetCount {
    let mut count = TargetCount::default();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            count.dirs += 1;
            if recursive {
                count.files += WalkDir::new(path)
                    .follow_links(false)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .count();
            }
        } else if path.is_file() {
            count.files += 1;
        }
    }
    count
}

pub fn warning_message(count: TargetCount) -> String {
    let mut parts = Vec::with_capacity(2);
    if count.files > 0 || count.dirs == 0 {
        parts.push(format!("{} file(s)", count.files));
    }
    if count.dirs > 0 {
        parts.push(format!("{} directory(ies)", count.dirs));
    }
    format!("WARNING: This will PERMANENTLY delete {}.", parts.join(" and "))
}

/// `y` or `yes`, any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints the warning to `warn_out`, asks on `prompt_out` and reads one
/// line from `input`. End of input counts as "no".
pub fn confirm_deletion<R, W, E>(count: TargetCount, input: &mut R, prompt_out: &mut W, warn_out: &mut E) -> Result<bool>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    writeln!(warn_out, "{}", warning_message(count))?;
    write!(prompt_out, "Are you sure? (yes/no): ")?;
    prompt_out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation input.")?;
    let confirmed = is_affirmative(&answer);
    debug!("Confirmation answer accepted: {}", confirmed);
    Ok(confirmed)
}
