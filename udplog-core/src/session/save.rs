use crate::session::error::SaveError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The session file was copied byte for byte.
    Copied { from: PathBuf, bytes: u64 },
    /// No session file existed; the visible lines were written instead.
    Dumped { lines: usize },
}

/// Save to `dest`.
///
/// Prefers copying `source` verbatim. When there is no source file, the
/// visible lines are written as text ending with a newline.
pub fn save_log<S: AsRef<str>>(
    dest: &Path,
    source: Option<&Path>,
    visible_lines: &[S],
) -> Result<SaveOutcome, SaveError> {
    if let Some(from) = source.filter(|p| p.exists()) {
        let bytes = fs::copy(from, dest).map_err(|source| SaveError::Copy {
            from: from.to_path_buf(),
            to: dest.to_path_buf(),
            source,
        })?;

        tracing::info!(from = %from.display(), path = %dest.display(), bytes, "saved (copied)");
        return Ok(SaveOutcome::Copied {
            from: from.to_path_buf(),
            bytes,
        });
    }

    let mut content = visible_lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    if !content.ends_with('\n') {
        content.push('\n');
    }

    fs::write(dest, content).map_err(|source| SaveError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %dest.display(), lines = visible_lines.len(), "saved visible lines");
    Ok(SaveOutcome::Dumped {
        lines: visible_lines.len(),
    })
}
