//! Address codec
//!
//! Converts textual IP addresses into integers that compare in address order:
//! `u32` for IPv4 and `u128` for IPv6. Classification is purely syntactic,
//! any text containing `':'` is treated as IPv6 even when it is malformed.
//!
//! # IPv6 elision
//!
//! Only an elision (`::`) at the very start or end of the text is accepted:
//!
//! ```rust
//! use ip2country::codec::parse_v6;
//!
//! assert_eq!(parse_v6("::").unwrap(), 0);
//! assert_eq!(parse_v6("::ff").unwrap(), 0xff);
//! assert_eq!(parse_v6("fec0::").unwrap(), 0xfec0u128 << 112);
//! assert!(parse_v6("2001:db8::1").is_err());
//! ```

use crate::error::{Ip2CountryError, Result};
use serde::Serialize;

/// Number of 16-bit groups in an IPv6 address
const V6_GROUPS: usize = 8;

/// Address family (keyspace) of a textual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    /// 32-bit keyspace
    V4,
    /// 128-bit keyspace
    V6,
}

/// Decide which keyspace an address text belongs to
#[inline]
pub fn classify(text: &str) -> AddressFamily {
    if text.contains(':') {
        AddressFamily::V6
    } else {
        AddressFamily::V4
    }
}

/// Parse dotted-quad IPv4 text into a big-endian `u32`
///
/// Exactly four decimal components are required and each must fit in a byte.
pub fn parse_v4(text: &str) -> Result<u32> {
    let mut result = 0u32;
    let mut count = 0usize;

    for part in text.split('.') {
        count += 1;
        if count > 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Ip2CountryError::InvalidIpv4(text.to_string()));
        }
        let octet: u8 = part
            .parse()
            .map_err(|_| Ip2CountryError::InvalidIpv4(text.to_string()))?;
        result = (result << 8) | octet as u32;
    }

    if count != 4 {
        return Err(Ip2CountryError::InvalidIpv4(text.to_string()));
    }

    Ok(result)
}

/// Parse IPv6 text into a `u128`, most significant group first
pub fn parse_v6(text: &str) -> Result<u128> {
    let invalid = || Ip2CountryError::InvalidIpv6(text.to_string());

    let leading = text.starts_with("::");
    let trailing = text.len() > 2 && text.ends_with("::");
    if text.contains(":::")
        || (text.starts_with(':') && !leading)
        || (text.ends_with(':') && !text.ends_with("::"))
    {
        return Err(invalid());
    }

    // Whatever remains between the edges must not hold another elision
    let inner = text.trim_start_matches(':').trim_end_matches(':');
    if inner.contains("::") {
        return Err(invalid());
    }

    let groups: Vec<&str> = text.split(':').filter(|s| !s.is_empty()).collect();
    if groups.is_empty() {
        return if leading { Ok(0) } else { Err(invalid()) };
    }

    let elided = match (leading, trailing) {
        (true, true) => return Err(invalid()),
        (false, false) => false,
        _ => true,
    };
    // An elision stands for at least one zero group
    if (elided && groups.len() >= V6_GROUPS) || (!elided && groups.len() != V6_GROUPS) {
        return Err(invalid());
    }

    // Leading elision right-aligns the groups, otherwise they start at the top
    let offset = if leading {
        V6_GROUPS - groups.len()
    } else {
        0
    };

    let mut result = 0u128;
    for (i, group) in groups.iter().enumerate() {
        let value = parse_group(group).ok_or_else(invalid)?;
        let shift = (V6_GROUPS - 1 - (offset + i)) * 16;
        result |= (value as u128) << shift;
    }

    Ok(result)
}

/// Parse a single 1-4 digit hex group
fn parse_group(group: &str) -> Option<u16> {
    if group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::net::Ipv6Addr;

    #[test]
    fn test_classify() {
        assert_eq!(classify("1.2.3.4"), AddressFamily::V4);
        assert_eq!(classify("::1"), AddressFamily::V6);
        // Purely syntactic
        assert_eq!(classify("not:an:address"), AddressFamily::V6);
        assert_eq!(classify("garbage"), AddressFamily::V4);
    }

    #[test]
    fn test_v4_boundaries() {
        assert_eq!(parse_v4("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_v4("0.0.0.255").unwrap(), 255);
        assert_eq!(parse_v4("0.0.1.255").unwrap(), 511);
        assert_eq!(parse_v4("255.0.0.0").unwrap(), 4278190080);
        assert_eq!(parse_v4("255.255.255.255").unwrap(), 4294967295);
    }

    #[test]
    fn test_v4_rejects_malformed() {
        for text in [
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.x",
            "1.2..4",
            "",
            "256.0.0.1",
            "1.2.3.-4",
            "+1.2.3.4",
            " 1.2.3.4",
        ] {
            let err = parse_v4(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIpv4, "{:?} should fail", text);
        }
    }

    #[test]
    fn test_v6_full_form() {
        assert_eq!(
            parse_v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff").unwrap(),
            u128::MAX
        );
        assert_eq!(
            parse_v6("0000:0000:0000:0000:0000:0000:0000:00ff").unwrap(),
            0xff
        );
        assert_eq!(
            parse_v6("0fff:1fff:2fff:3fff:4fff:5fff:ffff:ffff").unwrap(),
            u128::from("0fff:1fff:2fff:3fff:4fff:5fff:ffff:ffff".parse::<Ipv6Addr>().unwrap())
        );
    }

    #[test]
    fn test_v6_edge_elision() {
        assert_eq!(parse_v6("::").unwrap(), 0);
        assert_eq!(parse_v6("::0000").unwrap(), 0);
        assert_eq!(parse_v6("fec0::").unwrap(), 0xfec0u128 << 112);
        assert_eq!(parse_v6("::ffff").unwrap(), 0xffff);
        assert_eq!(
            parse_v6("2001:db8::").unwrap(),
            u128::from("2001:db8::".parse::<Ipv6Addr>().unwrap())
        );
        assert_eq!(
            parse_v6("::1:2").unwrap(),
            u128::from("::1:2".parse::<Ipv6Addr>().unwrap())
        );
    }

    #[test]
    fn test_v6_rejects_malformed() {
        for text in [
            "2001:db8::1",
            "::1::",
            "1:2:3",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7:8::",
            "fffff::",
            "ghij::",
            "::ffff:1.2.3.4",
            ":",
            ":::",
            ":1:2:3:4:5:6:7:8",
        ] {
            let err = parse_v6(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIpv6, "{:?} should fail", text);
        }
    }
}
