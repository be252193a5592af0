mod maxmind_geo_resolver;

pub use maxmind_geo_resolver::MaxMindGeoResolver;

#[cfg(test)]
pub(crate) use maxmind_geo_resolver::fixture;
