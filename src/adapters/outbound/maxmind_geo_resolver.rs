//! MaxMind GeoIP Resolver
//!
//! Implements GeoResolver using a MaxMind DB file (GeoLite2-Country,
//! GeoIP2-Country or any City edition).

use crate::domain::errors::ResolutionError;
use crate::domain::ports::GeoResolver;
use crate::domain::value_objects::CountryCode;
use maxminddb::{MaxMindDBError, Reader};
use parking_lot::RwLock;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Country {
    iso_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryResp {
    country: Option<Country>,
}

impl CountryResp {
    /// Records without a country (anonymous proxies, satellite providers,
    /// reserved ranges) resolve to an empty code.
    fn into_code(self) -> CountryCode {
        self.country
            .and_then(|c| c.iso_code)
            .map(CountryCode::new)
            .unwrap_or_else(|| CountryCode::new(""))
    }
}

/// MaxMind GeoIP resolver.
///
/// The reader is immutable once opened and safe to query from many threads,
/// so lookups only take the shared side of the lock. The exclusive side is
/// used once, by [`GeoResolver::close`].
pub struct MaxMindGeoResolver {
    reader: RwLock<Option<Reader<Vec<u8>>>>,
}

impl MaxMindGeoResolver {
    /// Load a GeoIP database from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MaxMindDBError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self::with_reader(reader))
    }

    /// Load a GeoIP database already read into memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MaxMindDBError> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self::with_reader(reader))
    }

    fn with_reader(reader: Reader<Vec<u8>>) -> Self {
        Self {
            reader: RwLock::new(Some(reader)),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.read().is_none()
    }
}

impl GeoResolver for MaxMindGeoResolver {
    fn lookup(&self, ip: IpAddr) -> Result<CountryCode, ResolutionError> {
        let guard = self.reader.read();
        let reader = guard.as_ref().ok_or(ResolutionError::Closed)?;

        match reader.lookup::<CountryResp>(ip) {
            Ok(resp) => Ok(resp.into_code()),
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(CountryCode::new("")),
            Err(e) => Err(ResolutionError::Lookup(e.to_string())),
        }
    }

    fn close(&self) {
        if self.reader.write().take().is_some() {
            tracing::debug!("GeoIP database closed");
        }
    }
}

/// Hand-encoded MaxMind DB fixtures.
#[cfg(test)]
pub(crate) mod fixture {
    fn utf8(s: &str) -> Vec<u8> {
        assert!(s.len() < 29);
        let mut out = vec![0x40 | s.len() as u8];
        out.extend_from_slice(s.as_bytes());
        out
    }

    /// IPv4 database with a single search-tree node: addresses whose first
    /// bit is set (128.0.0.0/1) resolve to `{"country": {"iso_code": iso}}`,
    /// the lower half is not found.
    pub(crate) fn country_db(iso: &str) -> Vec<u8> {
        let mut db = Vec::new();

        // Search tree: 24-bit records. Left = node_count (not found),
        // right = node_count + 16 (first byte of the data section).
        db.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x00, 0x11]);
        db.extend_from_slice(&[0u8; 16]);

        db.push(0xE1);
        db.extend(utf8("country"));
        db.push(0xE1);
        db.extend(utf8("iso_code"));
        db.extend(utf8(iso));

        db.extend_from_slice(b"\xAB\xCD\xEFMaxMind.com");
        db.push(0xE9);
        db.extend(utf8("binary_format_major_version"));
        db.extend_from_slice(&[0xA1, 0x02]);
        db.extend(utf8("binary_format_minor_version"));
        db.push(0xA0);
        db.extend(utf8("build_epoch"));
        db.extend_from_slice(&[0x00, 0x02]);
        db.extend(utf8("database_type"));
        db.extend(utf8("Test-Country"));
        db.extend(utf8("description"));
        db.push(0xE0);
        db.extend(utf8("ip_version"));
        db.extend_from_slice(&[0xA1, 0x04]);
        db.extend(utf8("languages"));
        db.extend_from_slice(&[0x00, 0x04]);
        db.extend(utf8("node_count"));
        db.extend_from_slice(&[0xC1, 0x01]);
        db.extend(utf8("record_size"));
        db.extend_from_slice(&[0xA1, 0x18]);

        db
    }
}
