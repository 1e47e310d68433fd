// src/output/mod.rs

pub mod factor_writer;

pub use factor_writer::FactorWriter;
