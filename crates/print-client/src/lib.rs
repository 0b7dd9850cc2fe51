//! Send ZPL labels to network printers.
//!
//! Labels go out over the printer's RAW TCP port (9100 unless told
//! otherwise). Everything here is blocking `std::net`; no async runtime is
//! involved.
mod addr;
mod config;
mod error;
mod retry;
#[cfg(feature = "tcp")]
mod tcp;

pub use addr::{DEFAULT_PORT, resolve_printer_addr};
pub use config::{PrinterConfig, PrinterTimeouts, RetryConfig};
pub use error::PrintError;
pub use retry::{ReconnectRetryPrinter, RetryPrinter};
#[cfg(feature = "tcp")]
pub use tcp::TcpPrinter;

use std::ops::ControlFlow;

// ─── Traits ─────────────────────────────────────────────────────────────────

/// Something label bytes can be written to.
pub trait Printer: Send {
    /// Write `data` unchanged.
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError>;

    /// Write ZPL text.
    fn send_zpl(&mut self, zpl: &str) -> Result<(), PrintError> {
        self.send_raw(zpl.as_bytes())
    }
}

/// A transport that can drop its connection and open a fresh one.
///
/// [`ReconnectRetryPrinter`] calls this between attempts.
pub trait Reconnectable {
    /// Close the current connection, if any, and open a new one.
    fn reconnect(&mut self) -> Result<(), PrintError>;
}

// ─── Multi-form sending ─────────────────────────────────────────────────────

/// Reported after each form is written.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormProgress {
    /// Forms written so far.
    pub sent: usize,
    /// Forms in the job.
    pub total: usize,
}

/// Outcome of [`send_forms`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SendSummary {
    /// Forms written.
    pub sent: usize,
    /// Forms in the job.
    pub total: usize,
}

impl SendSummary {
    /// Whether the callback stopped the job before every form was written.
    pub fn stopped_early(&self) -> bool {
        self.sent < self.total
    }
}

/// Write `forms` one at a time, in order.
///
/// `on_progress` runs after every successful write; returning
/// `ControlFlow::Break(())` ends the job without sending the rest. A write
/// error ends it too and is returned as-is.
pub fn send_forms<P, F>(
    printer: &mut P,
    forms: &[impl AsRef<str>],
    mut on_progress: F,
) -> Result<SendSummary, PrintError>
where
    P: Printer + ?Sized,
    F: FnMut(FormProgress) -> ControlFlow<()>,
{
    let total = forms.len();
    for (i, form) in forms.iter().enumerate() {
        printer.send_zpl(form.as_ref())?;
        let sent = i + 1;
        if on_progress(FormProgress { sent, total }).is_break() {
            return Ok(SendSummary { sent, total });
        }
    }
    Ok(SendSummary { sent: total, total })
}
