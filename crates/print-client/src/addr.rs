//! Printer address parsing.
//!
//! Printers are named as `IP`, `IP:PORT`, `host` or `host:PORT`; a missing
//! port means the RAW port.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::PrintError;

/// RAW (JetDirect) port most label printers listen on.
pub const DEFAULT_PORT: u16 = 9100;

/// Turn a printer address into a socket address.
///
/// Literal addresses are used as-is. Host names go through the system
/// resolver and the first address returned wins.
pub fn resolve_printer_addr(input: &str) -> Result<SocketAddr, PrintError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PrintError::InvalidAddress(input.to_string()));
    }

    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    // `host:port` first, then the bare host on the default port.
    let explicit = input.to_socket_addrs().ok().and_then(|mut it| it.next());
    let defaulted = || {
        (input, DEFAULT_PORT)
            .to_socket_addrs()
            .ok()
            .and_then(|mut it| it.next())
    };
    explicit
        .or_else(defaulted)
        .ok_or_else(|| PrintError::NoAddressFound(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_ipv4() {
        let addr = resolve_printer_addr("10.1.2.3:6101").unwrap();
        assert_eq!(addr.to_string(), "10.1.2.3:6101");

        let addr = resolve_printer_addr("10.1.2.3").unwrap();
        assert_eq!(addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn literal_ipv6() {
        assert_eq!(resolve_printer_addr("[::1]:9200").unwrap().port(), 9200);
        let addr = resolve_printer_addr("::1").unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn localhost_gets_default_port() {
        let addr = resolve_printer_addr("localhost").unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let addr = resolve_printer_addr("  127.0.0.1:9100 \n").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9100");
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(
            resolve_printer_addr("   "),
            Err(PrintError::InvalidAddress(_))
        ));
    }

    #[test]
    fn unknown_host_reports_the_input() {
        match resolve_printer_addr("label-printer.invalid") {
            Err(PrintError::NoAddressFound(host)) => assert_eq!(host, "label-printer.invalid"),
            other => panic!("expected NoAddressFound, got {other:?}"),
        }
    }
}
