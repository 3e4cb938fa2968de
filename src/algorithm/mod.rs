//! Data processing algorithms

pub mod surveillance;
