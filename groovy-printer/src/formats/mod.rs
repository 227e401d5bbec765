//! Format implementations

pub mod groovy;
