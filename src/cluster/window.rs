use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimilarityWindow {
    min: f64,
    max: f64,
}

impl SimilarityWindow {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        check_threshold(min)?;
        check_threshold(max)?;
        check_order(min, max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_min(&mut self, min: f64) -> Result<()> {
        check_threshold(min)?;
        check_order(min, self.max)?;
        self.min = min;
        Ok(())
    }

    pub fn set_max(&mut self, max: f64) -> Result<()> {
        check_threshold(max)?;
        check_order(self.min, max)?;
        self.max = max;
        Ok(())
    }

    pub fn contains(&self, similarity: f64) -> bool {
        similarity >= self.min && similarity <= self.max
    }
}

fn check_threshold(value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(value))
    }
}

fn check_order(min: f64, max: f64) -> Result<()> {
    if min > max {
        return Err(Error::Config(format!(
            "minimum similarity {min} exceeds maximum {max}"
        )));
    }
    Ok(())
}
