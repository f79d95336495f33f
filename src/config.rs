use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::cost::CostPolicy;
use crate::error::{Error, Result};

/** parameters of one instance generation */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// cost policy (and its parameters)
    #[serde(default)]
    pub cost: CostPolicy,
    /// maximum number of costed pairs (0: unbounded)
    #[serde(default)]
    pub max_candidates: usize,
    /// fixed number of colors written as `#const k = K.`
    #[serde(default)]
    pub color_count: Option<usize>,
}

impl GeneratorConfig {
    /// reads a configuration from a JSON file
    pub fn from_file(filename:&Path) -> Result<Self> {
        let s = fs::read_to_string(filename).map_err(|e| Error::io(filename, e))?;
        let res:Self = serde_json::from_str(&s).map_err(|e| Error::Config(
            format!("{}: {}", filename.display(), e)
        ))?;
        res.validate()?;
        Ok(res)
    }

    /// checks the policy parameters and the color count
    pub fn validate(&self) -> Result<()> {
        self.cost.validate()?;
        if self.color_count == Some(0) {
            return Err(Error::Config("the color count must be positive".to_string()));
        }
        Ok(())
    }

    /// same configuration with another color count
    pub fn with_color_count(&self, color_count:Option<usize>) -> Self {
        Self { color_count, ..self.clone() }
    }
}

/// reads a seed. "-1", "unseeded" and "none" mean no seed.
pub fn parse_seed(s:&str) -> Result<Option<u64>> {
    match s.trim() {
        "-1" | "unseeded" | "none" => Ok(None),
        v => v.parse::<u64>().map(Some).map_err(|_| Error::Config(
            format!("invalid seed \"{}\" (expected an integer or \"unseeded\")", v)
        )),
    }
}

/** color counts to try for each graph (graph name -> (lower, upper)) */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorBounds {
    bounds: HashMap<String, (usize, usize)>,
}

impl ColorBounds {
    /// reads bounds from a JSON object: `{"myciel3": [3, 4], ...}`
    pub fn from_file(filename:&Path) -> Result<Self> {
        let s = fs::read_to_string(filename).map_err(|e| Error::io(filename, e))?;
        let res:Self = serde_json::from_str(&s).map_err(|e| Error::Config(
            format!("{}: {}", filename.display(), e)
        ))?;
        res.validate()?;
        Ok(res)
    }

    /// builds bounds from (name, lower, upper) triples
    pub fn from_pairs<'a, I>(pairs:I) -> Result<Self>
    where I: IntoIterator<Item=(&'a str, usize, usize)> {
        let res = Self {
            bounds: pairs.into_iter().map(|(name,lo,hi)| (name.to_string(), (lo,hi))).collect()
        };
        res.validate()?;
        Ok(res)
    }

    fn validate(&self) -> Result<()> {
        for (name,(lo,hi)) in &self.bounds {
            if *lo == 0 || lo > hi {
                return Err(Error::Config(format!(
                    "invalid color bounds for {}: ({},{})", name, lo, hi
                )));
            }
        }
        Ok(())
    }

    /// bounds of a graph, if any
    pub fn get(&self, name:&str) -> Option<(usize, usize)> {
        self.bounds.get(name).copied()
    }

    /// distinct color counts to generate for a graph (empty if unknown)
    pub fn color_counts(&self, name:&str) -> Vec<usize> {
        match self.get(name) {
            None => Vec::new(),
            Some((lo,hi)) if lo == hi => vec![lo],
            Some((lo,hi)) => vec![lo, hi],
        }
    }

    /// number of graphs with bounds
    pub fn len(&self) -> usize { self.bounds.len() }

    /// true iff no graph has bounds
    pub fn is_empty(&self) -> bool { self.bounds.is_empty() }
}
