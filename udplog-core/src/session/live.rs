use crate::session::error::LiveLogError;
use crate::session::paths::{live_file_name, session_stamp};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How many `_N` suffixes are tried before giving up on a name collision.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// One open per-connection logfile.
pub struct LiveLogSession {
    path: PathBuf,
    writer: BufWriter<Box<dyn Write + Send>>,
    /// Second handle on the same file, used to sync it to disk.
    file: Option<File>,
    bytes_written: u64,
}

impl fmt::Debug for LiveLogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveLogSession")
            .field("path", &self.path)
            .field("bytes_written", &self.bytes_written)
            .finish_non_exhaustive()
    }
}

impl LiveLogSession {
    /// Create `udp_live_<stamp>.txt` in `dir` and write the header line.
    ///
    /// An existing file is never truncated; a second session started within
    /// the same second gets a numeric suffix instead.
    pub fn open(dir: &Path, started: DateTime<Local>) -> Result<Self, LiveLogError> {
        fs::create_dir_all(dir).map_err(|source| LiveLogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let (path, file) = create_unique(dir, &live_file_name(started))?;
        let sync_handle = file.try_clone().map_err(|source| LiveLogError::Create {
            path: path.clone(),
            source,
        })?;
        let mut session = Self {
            path,
            writer: BufWriter::new(Box::new(file)),
            file: Some(sync_handle),
            bytes_written: 0,
        };

        session.write_line(&format!(
            "# UDP Log Viewer live session — {}",
            session_stamp(started)
        ))?;
        session.flush()?;

        Ok(session)
    }

    /// A session over an arbitrary writer. Nothing is created on disk and
    /// no header is written.
    #[cfg(test)]
    pub(crate) fn with_writer(path: &Path, writer: Box<dyn Write + Send>) -> Self {
        Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(writer),
            file: None,
            bytes_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes handed to the writer so far, header included.
    pub fn size(&self) -> u64 {
        self.bytes_written
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), LiveLogError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|source| LiveLogError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LiveLogError> {
        self.writer.flush().map_err(|source| LiveLogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Flush and push the file contents to disk.
    pub fn sync(&mut self) -> Result<(), LiveLogError> {
        self.flush()?;
        let Some(file) = self.file.as_ref() else {
            return Ok(());
        };
        file.sync_all().map_err(|source| LiveLogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Flush and close, returning the path of the finished file.
    pub fn close(mut self) -> (PathBuf, Result<(), LiveLogError>) {
        let flushed = self.flush();
        (self.path, flushed)
    }
}

fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File), LiveLogError> {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (file_name, String::new()),
    };

    let mut candidate = dir.join(file_name);
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                candidate = dir.join(format!("{stem}_{attempt}{ext}"));
            }
            Err(source) => {
                return Err(LiveLogError::Create {
                    path: candidate,
                    source,
                });
            }
        }
    }

    Err(LiveLogError::Create {
        path: candidate,
        source: io::Error::from(io::ErrorKind::AlreadyExists),
    })
}

/// Live-file state across connections.
///
/// Holds the open session, if any, and remembers the path of the most
/// recently closed one so a later save can still copy it.
#[derive(Debug, Default)]
pub struct LiveLog {
    session: Option<LiveLogSession>,
    last_session: Option<PathBuf>,
}

impl LiveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open session and start a new one.
    pub fn open(&mut self, dir: &Path, started: DateTime<Local>) -> Result<&Path, LiveLogError> {
        self.close();

        let session = LiveLogSession::open(dir, started)?;
        tracing::info!(path = %session.path().display(), "live logfile opened");

        Ok(self.session.insert(session).path())
    }

    /// Adopt an already open session, closing any current one.
    #[cfg(test)]
    pub(crate) fn attach(&mut self, session: LiveLogSession) {
        self.close();
        self.session = Some(session);
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.session.as_ref().map(LiveLogSession::path)
    }

    pub fn last_session_path(&self) -> Option<&Path> {
        self.last_session.as_deref()
    }

    pub fn size(&self) -> Option<u64> {
        self.session.as_ref().map(LiveLogSession::size)
    }

    /// Append one line. A no-op when no session is open.
    ///
    /// On failure the session is closed and stays closed; the error is
    /// returned once so the caller can surface it.
    pub fn write(&mut self, line: &str) -> Result<(), LiveLogError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if let Err(e) = session.write_line(line) {
            tracing::error!(path = %session.path().display(), error = %e.io(), "live logfile write failed");
            self.close();
            return Err(e);
        }
        Ok(())
    }

    /// Flush buffered lines; closes the session on failure.
    pub fn flush(&mut self) -> Result<(), LiveLogError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if let Err(e) = session.flush() {
            tracing::error!(path = %session.path().display(), error = %e.io(), "live logfile flush failed");
            self.close();
            return Err(e);
        }
        Ok(())
    }

    /// Flush and close the open session. Its path becomes the last session.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        let (path, flushed) = session.close();
        if let Err(e) = flushed {
            tracing::warn!(path = %path.display(), error = %e.io(), "final flush of live logfile failed");
        }
        tracing::info!(path = %path.display(), "live logfile closed");
        self.last_session = Some(path);
    }

    /// Path to copy on save, if any.
    ///
    /// An open session is synced to disk first. Without one, the last closed
    /// session is offered until [`Self::mark_saved`] consumes it.
    pub fn save_source(&mut self) -> Option<PathBuf> {
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.sync() {
                tracing::warn!(path = %session.path().display(), error = %e.io(), "sync before save failed");
            }
            return Some(session.path().to_path_buf());
        }

        self.last_session.clone().filter(|p| p.exists())
    }

    /// Record a successful save. The last closed session is only offered to
    /// one save; an open session stays the source for later ones.
    pub fn mark_saved(&mut self) {
        if self.session.is_none() {
            self.last_session = None;
        }
    }
}
