// src/output/factor_writer.rs

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::core::error::Result;
use crate::factor::FactorList;

/// Collects `(value, factor)` pairs and writes them as `value: f1*f2*...` lines.
pub struct FactorWriter {
    bound: u64,
    factors: BTreeMap<u64, Vec<u64>>,
}

impl FactorWriter {
    pub fn new(bound: u64) -> Self {
        FactorWriter {
            bound,
            factors: BTreeMap::new(),
        }
    }

    pub fn add_factor(&mut self, value: u64, factor: u64) {
        self.factors.entry(value).or_default().push(factor);
    }

    pub fn add_list(&mut self, list: &FactorList) {
        let entry = self.factors.entry(list.value()).or_default();
        entry.extend_from_slice(list.factors());
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// File name used inside the output directory.
    pub fn file_name(&self) -> String {
        format!("factors_{}.txt", self.bound)
    }

    /// Writes every collected value, ascending, into `dir` and returns the file path.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(self.file_name());
        let mut out = BufWriter::new(fs::File::create(&path)?);
        for (value, factors) in &self.factors {
            let mut sorted = factors.clone();
            sorted.sort_unstable();
            let joined: Vec<String> = sorted.iter().map(|f| f.to_string()).collect();
            writeln!(out, "{}: {}", value, joined.join("*"))?;
        }
        out.flush()?;
        info!("Wrote factors of {} values to {}", self.factors.len(), path.display());
        Ok(path)
    }
}
