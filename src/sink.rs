//! Output serialization.
//!
//! Every record is written followed by CRLF, the LDraw line ending, whatever
//! the host platform. File output goes through a temporary file in the
//! destination directory that replaces the destination only once everything
//! was written. The temporary file gets the permissions of the file it
//! replaces, or the usual umask-filtered 0666 for a new file.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::config::OutputTarget;
use crate::error::{Result, StepperError};
use crate::record::{LINE_ENDING, Record};

/// Writes records as CRLF-terminated lines.
pub struct StepWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> StepWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.inner.write_all(record.as_bytes())?;
        self.inner.write_all(LINE_ENDING.as_bytes())?;
        self.lines += 1;
        Ok(())
    }

    pub fn write_records<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Write `records` to `target`.
pub fn write_output(records: &[Record], target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => write_stdout(records),
        OutputTarget::File(path) => write_file(records, path),
    }
}

fn write_stdout(records: &[Record]) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = StepWriter::new(BufWriter::new(stdout.lock()));
    writer
        .write_records(records)
        .map_err(|e| StepperError::write("stdout", e))?;
    writer
        .finish()
        .map_err(|e| StepperError::write("stdout", e))?;
    Ok(())
}

fn write_file(records: &[Record], path: &Path) -> Result<()> {
    let target = format!("'{}'", path.display());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StepperError::write(target.as_str(), e))?;

    let tmp = temp_file_for(dir, path).map_err(|e| StepperError::write(target.as_str(), e))?;
    let mut writer = StepWriter::new(BufWriter::new(tmp));
    writer
        .write_records(records)
        .map_err(|e| StepperError::write(target.as_str(), e))?;
    let tmp = writer
        .finish()
        .and_then(|buffered| buffered.into_inner().map_err(|e| e.into_error()))
        .map_err(|e| StepperError::write(target.as_str(), e))?;

    tmp.persist(path)
        .map_err(|e| StepperError::write(target, e.error))?;
    Ok(())
}

/// Temporary file in `dir` carrying the permissions `dest` should end up with.
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".ldr-stepper");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the umask at open time, like File::create.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(dest) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(tmp)
}
