use std::{io, path::Path};

use nalgebra as na;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ProfilerError {
    #[error("{0} measurement(s), at least 2 are required to fit the beam divergence")]
    InsufficientData(usize),
    #[error("{distances} distances for {radii} radii")]
    LengthMismatch { distances: usize, radii: usize },
    #[error("all the radii are measured at the same distance")]
    Degenerate,
    #[error("Failed to read the beam profile CSV file")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, ProfilerError>;

#[derive(Deserialize, Debug)]
struct Record {
    #[serde(rename = "Distance [mm]")]
    distance: f64,
    #[serde(rename = "Radius [mm]")]
    radius: f64,
}

/// Estimates the beam divergence half-angle [rd]
///
/// The half-angle is the arc tangent of the slope of the least-squares line fitted to
/// the radii versus the distances. Both must have the same unit.
pub fn estimate(distances: &[f64], radii: &[f64]) -> Result<f64> {
    if distances.len() != radii.len() {
        return Err(ProfilerError::LengthMismatch {
            distances: distances.len(),
            radii: radii.len(),
        });
    }
    if distances.len() < 2 {
        return Err(ProfilerError::InsufficientData(distances.len()));
    }
    let x = na::DVector::from_column_slice(distances);
    let y = na::DVector::from_column_slice(radii);
    let x_c = x.add_scalar(-x.mean());
    let y_c = y.add_scalar(-y.mean());
    let sxx = x_c.norm_squared();
    if sxx == 0. {
        return Err(ProfilerError::Degenerate);
    }
    Ok((x_c.dot(&y_c) / sxx).atan())
}

/// `n` evenly spaced samples in `[start,stop]`
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Beam radii measured along the optical axis
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Profile {
    distances: Vec<f64>,
    radii: Vec<f64>,
}
impl Profile {
    pub fn new(distances: Vec<f64>, radii: Vec<f64>) -> Result<Self> {
        if distances.len() != radii.len() {
            return Err(ProfilerError::LengthMismatch {
                distances: distances.len(),
                radii: radii.len(),
            });
        }
        Ok(Self { distances, radii })
    }
    /// Profile of a beam with the given half-angle [rd] and a zero waist
    ///
    /// The beam radius is sampled `samples` times from 0 to `max_distance`.
    pub fn synthetic(max_distance: f64, samples: usize, half_angle: f64) -> Self {
        let distances = linspace(0., max_distance, samples);
        let radii = distances.iter().map(|d| d * half_angle.tan()).collect();
        Self { distances, radii }
    }
    /// Loads a profile from a CSV file with the columns `Distance [mm]` and `Radius [mm]`
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::info!("Loading {:?}...", path.as_ref());
        let rdr = csv::Reader::from_path(path)?;
        Self::from_csv_reader(rdr)
    }
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }
    fn from_csv_reader<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut this = Self::default();
        for result in rdr.deserialize() {
            let record: Record = result?;
            this.distances.push(record.distance);
            this.radii.push(record.radius);
        }
        log::debug!("{} beam radii", this.len());
        Ok(this)
    }
    pub fn len(&self) -> usize {
        self.distances.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }
    /// Returns the beam divergence half-angle [rd]
    pub fn half_angle(&self) -> Result<f64> {
        estimate(&self.distances, &self.radii)
    }
}
