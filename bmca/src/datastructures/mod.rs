//! General datastructures as defined by IEEE 1588

pub mod common;
