//! Peer address parsing.
//!
//! Request sources arrive as `host:port` text (`203.0.113.7:51234`,
//! `[2001:db8::1]:443`). The host half must be a literal IP address;
//! hostnames are rejected since no DNS resolution is performed.

use crate::domain::errors::AddressFormatError;
use std::net::IpAddr;

/// Split `host:port` into its halves.
///
/// Bracketed IPv6 hosts lose their brackets. The port is returned as-is
/// and may be empty or non-numeric; only the host matters here.
pub fn split_host_port(addr: &str) -> Result<(&str, &str), AddressFormatError> {
    let err = |make: fn(String) -> AddressFormatError| Err(make(addr.to_string()));

    let Some(colon) = addr.rfind(':') else {
        return err(AddressFormatError::MissingPort);
    };

    // Positions before which no '[' resp. ']' may appear.
    let (host, open_from, close_from) = if addr.starts_with('[') {
        let Some(end) = addr.find(']') else {
            return err(AddressFormatError::MissingBracket);
        };
        if end + 1 == addr.len() {
            return err(AddressFormatError::MissingPort);
        }
        if end + 1 != colon {
            if addr.as_bytes()[end + 1] == b':' {
                return err(AddressFormatError::TooManyColons);
            }
            return err(AddressFormatError::MissingPort);
        }
        (&addr[1..end], 1, end + 1)
    } else {
        let host = &addr[..colon];
        if host.contains(':') {
            return err(AddressFormatError::TooManyColons);
        }
        (host, 0, 0)
    };

    if addr[open_from..].contains('[') || addr[close_from..].contains(']') {
        return err(AddressFormatError::UnexpectedBracket);
    }

    Ok((host, &addr[colon + 1..]))
}

/// Parse a literal IP address.
///
/// IPv4-mapped IPv6 addresses (`::ffff:198.51.100.1`) come back as plain
/// IPv4 so they resolve like the address they stand for.
pub fn parse_ip(host: &str) -> Result<IpAddr, AddressFormatError> {
    host.parse::<IpAddr>()
        .map(|ip| ip.to_canonical())
        .map_err(|_| AddressFormatError::InvalidIp(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    // ===== split_host_port Tests =====

    #[test]
    fn test_split_ipv4() {
        assert_eq!(
            split_host_port("203.0.113.7:51234").unwrap(),
            ("203.0.113.7", "51234")
        );
    }

    #[test]
    fn test_split_bracketed_ipv6() {
        assert_eq!(
            split_host_port("[2001:db8::1]:443").unwrap(),
            ("2001:db8::1", "443")
        );
    }

    #[test]
    fn test_split_empty_host_and_port() {
        assert_eq!(split_host_port(":80").unwrap(), ("", "80"));
        assert_eq!(split_host_port("10.0.0.1:").unwrap(), ("10.0.0.1", ""));
        assert_eq!(split_host_port("[::1]:").unwrap(), ("::1", ""));
    }

    #[test]
    fn test_split_hostname_is_not_rejected_here() {
        assert_eq!(
            split_host_port("localhost:8080").unwrap(),
            ("localhost", "8080")
        );
    }

    #[test]
    fn test_split_missing_port() {
        let tests = vec!["", "203.0.113.7", "not-an-address", "[::1]", "[::1]x"];

        for input in tests {
            assert!(
                matches!(
                    split_host_port(input),
                    Err(AddressFormatError::MissingPort(_))
                ),
                "Failed for input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_split_bare_ipv6_has_too_many_colons() {
        assert!(matches!(
            split_host_port("2001:db8::1"),
            Err(AddressFormatError::TooManyColons(_))
        ));
        assert!(matches!(
            split_host_port("[::1]:80:90"),
            Err(AddressFormatError::TooManyColons(_))
        ));
    }

    #[test]
    fn test_split_missing_bracket() {
        assert!(matches!(
            split_host_port("[::1:80"),
            Err(AddressFormatError::MissingBracket(_))
        ));
    }

    #[test]
    fn test_split_unexpected_bracket() {
        assert!(matches!(
            split_host_port("1.2.3.4]:80"),
            Err(AddressFormatError::UnexpectedBracket(_))
        ));
        assert!(matches!(
            split_host_port("[::1]:[80"),
            Err(AddressFormatError::UnexpectedBracket(_))
        ));
    }

    #[test]
    fn test_split_error_keeps_address() {
        let err = split_host_port("garbage").unwrap_err();
        assert_eq!(err.to_string(), "address garbage: missing port in address");
    }

    // ===== parse_ip Tests =====

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(
            parse_ip("198.51.100.1").unwrap(),
            IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1))
        );
    }

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(
            parse_ip("2001:db8::1").unwrap(),
            IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_parse_ipv4_mapped_is_canonical() {
        assert_eq!(
            parse_ip("::ffff:198.51.100.1").unwrap(),
            IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1))
        );
    }

    #[test]
    fn test_parse_rejects_non_literals() {
        let tests = vec!["", "localhost", "256.0.0.1", "[::1]", "fe80::1%eth0", "1.2.3"];

        for input in tests {
            assert_eq!(
                parse_ip(input),
                Err(AddressFormatError::InvalidIp(input.to_string())),
                "Failed for input: {:?}",
                input
            );
        }
    }
}
