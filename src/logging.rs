//! Logger setup: every record goes to stderr and to a log file.

use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Writer duplicating everything to stderr and a file
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Initialize the global logger.
///
/// The default filter is `info`; `RUST_LOG` overrides it. The log file is created if
/// missing and appended to otherwise.
pub fn init_logging(log_file: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .write_style(WriteStyle::Never)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
