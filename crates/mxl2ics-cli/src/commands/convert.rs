//! One-shot file conversion.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use mxl2ics_core::{CalendarDocument, Clock, build_document};

use crate::error::{CliError, CliResult};

/// Reads the feed at `input` and converts it.
///
/// Invalid UTF-8 in the file is replaced rather than rejected.
pub fn read_feed(input: &Path, clock: &dyn Clock) -> CliResult<CalendarDocument> {
    let bytes = std::fs::read(input).map_err(|e| CliError::file(input, e))?;
    debug!(path = %input.display(), bytes = bytes.len(), "Read feed");

    let xml = String::from_utf8_lossy(&bytes);
    Ok(build_document(&xml, clock)?)
}

/// Converts `input` and writes the calendar to `output`.
///
/// `None` or `-` writes to stdout. Nothing is written unless the whole
/// conversion succeeded.
pub fn run(input: &Path, output: Option<&Path>, clock: &dyn Clock) -> CliResult<()> {
    let document = read_feed(input, clock)?;
    let ics = document.to_ics();

    match output.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            std::fs::write(path, &ics).map_err(|e| CliError::file(path, e))?;
            info!(
                input = %input.display(),
                output = %path.display(),
                events = document.event_count(),
                "Wrote calendar"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(ics.as_bytes())?;
            stdout.flush()?;
            info!(
                input = %input.display(),
                events = document.event_count(),
                "Wrote calendar to stdout"
            );
        }
    }

    Ok(())
}
