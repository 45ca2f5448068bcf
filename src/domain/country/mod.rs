//! Country reference data

pub mod registry;

pub use registry::{normalize_code, CountryRegistry, IsoCountryRegistry};
