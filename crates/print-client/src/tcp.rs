//! RAW-port TCP transport.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};

use crate::addr::resolve_printer_addr;
use crate::{PrintError, Printer, PrinterConfig, Reconnectable};

/// Idle time before keepalive probes start.
const KEEPALIVE: Duration = Duration::from_secs(60);

/// A blocking connection to a printer's RAW port.
///
/// Label bytes are written as-is; nothing is read back. The socket is shut
/// down when the printer is dropped.
#[derive(Debug)]
pub struct TcpPrinter {
    stream: TcpStream,
    addr: SocketAddr,
    config: PrinterConfig,
}

impl TcpPrinter {
    /// Resolve `addr` (see [`resolve_printer_addr`]) and connect to it.
    pub fn connect(addr: &str, config: PrinterConfig) -> Result<Self, PrintError> {
        let addr = resolve_printer_addr(addr)?;
        let stream = open(addr, &config)?;
        Ok(Self {
            stream,
            addr,
            config,
        })
    }

    /// The resolved peer address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Settings the connection was opened with.
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }
}

impl Printer for TcpPrinter {
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        self.stream
            .write_all(data)
            .and_then(|()| self.stream.flush())
            .map_err(PrintError::WriteFailed)
    }
}

impl Reconnectable for TcpPrinter {
    fn reconnect(&mut self) -> Result<(), PrintError> {
        let _ = self.stream.shutdown(Shutdown::Both);
        self.stream = open(self.addr, &self.config)?;
        Ok(())
    }
}

impl Drop for TcpPrinter {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

// ─── Socket setup ───────────────────────────────────────────────────────────

fn open(addr: SocketAddr, config: &PrinterConfig) -> Result<TcpStream, PrintError> {
    let connect = config.timeouts.connect;
    let stream = TcpStream::connect_timeout(&addr, connect).map_err(|source| {
        let addr = addr.to_string();
        match source.kind() {
            io::ErrorKind::ConnectionRefused => PrintError::ConnectionRefused { addr, source },
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                PrintError::ConnectionTimeout {
                    addr,
                    timeout: connect,
                    source,
                }
            }
            _ => PrintError::ConnectionFailed { addr, source },
        }
    })?;

    tune(&stream, config).map_err(|source| PrintError::ConnectionFailed {
        addr: addr.to_string(),
        source,
    })?;
    Ok(stream)
}

/// Disable Nagle, enable keepalive and apply the write timeout.
fn tune(stream: &TcpStream, config: &PrinterConfig) -> io::Result<()> {
    stream.set_nodelay(true)?;

    let keepalive = TcpKeepalive::new().with_time(KEEPALIVE);
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    let keepalive = keepalive.with_interval(KEEPALIVE);
    SockRef::from(stream).set_tcp_keepalive(&keepalive)?;

    stream.set_write_timeout(Some(config.timeouts.write))
}
