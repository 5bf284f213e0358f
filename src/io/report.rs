use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::IoError;
use crate::domain::Accumulator;

const RULE: &str = "========================";

/// Receives finished accumulators for display
pub trait ReportSink: Send + Sync {
    fn report(&self, title: &str, accumulator: &Accumulator) -> Result<(), IoError>;
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn report(&self, title: &str, accumulator: &Accumulator) -> Result<(), IoError> {
        (**self).report(title, accumulator)
    }
}

/// Render store totals, month totals and the grand total as text
pub fn render_report(title: &str, accumulator: &Accumulator) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, title, accumulator);
    out
}

/// Write a report into any formatter sink
///
/// Stores are listed by ascending id and months by `MM-YY` key.
pub fn write_report(
    out: &mut impl fmt::Write,
    title: &str,
    accumulator: &Accumulator,
) -> fmt::Result {
    writeln!(out, "{}:", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "[ Store-Wide Total Sales ]")?;
    for (store_id, amount) in accumulator.by_store() {
        writeln!(out, "Store ID {}: ${}", store_id, amount)?;
    }

    writeln!(out, "\n[ Month-Wise Total Sales ]")?;
    for (month, amount) in accumulator.by_month() {
        writeln!(out, "{}: ${}", month, amount)?;
    }

    writeln!(out, "\nTotal: ${}", accumulator.total())?;
    writeln!(out, "{}\n", RULE)
}

/// Plain-text report written to any `Write`
///
/// Each report is rendered up front and written under a lock, so reports
/// from concurrent consumers never interleave.
pub struct TextReport<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> ReportSink for TextReport<W> {
    fn report(&self, title: &str, accumulator: &Accumulator) -> Result<(), IoError> {
        let text = render_report(title, accumulator);

        let mut writer = self.writer.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
