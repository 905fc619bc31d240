//! Shared utilities for the USL grammar engine

pub mod scan;
