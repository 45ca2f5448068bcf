//! Tariff search provider adapters

pub mod memory;

pub use memory::InMemorySearchProvider;
