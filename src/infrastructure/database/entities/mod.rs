//! Database entities module

pub mod product_price;
