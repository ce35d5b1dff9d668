use rayon::prelude::*;

use crate::{telescope::PropagationError, BeamVector, Configurations, Telescope};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("failed to propagate the beam")]
    Propagation(#[from] PropagationError),
    #[error("{results} beams for {configurations} telescopes")]
    Lockstep {
        results: usize,
        configurations: usize,
    },
}
type Result<T> = std::result::Result<T, FilterError>;

/// Output beam tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max_radius: f64,
    /// radians
    pub max_half_angle: f64,
    pub min_radius: f64,
}
impl Bounds {
    /// Bounds on the radius in `[0,max_radius]` and on the half-angle magnitude
    pub fn new(max_radius: f64, max_half_angle: f64) -> Self {
        Self {
            max_radius,
            max_half_angle,
            min_radius: 0.,
        }
    }
    pub fn min_radius(self, min_radius: f64) -> Self {
        Self { min_radius, ..self }
    }
    pub fn accepts(&self, beam: &BeamVector) -> bool {
        (self.min_radius..=self.max_radius).contains(&beam.radius)
            && beam.half_angle.abs() <= self.max_half_angle
    }
}

/// Propagates the input beam through all the telescopes
///
/// The beams are returned in the order of the telescopes.
/// If several telescopes have a zero focal length, the error is for the first one.
pub fn propagate_all(input: &BeamVector, configs: &Configurations) -> Result<Vec<BeamVector>> {
    let telescopes: &[Telescope] = configs;
    let outputs: Vec<_> = telescopes.par_iter().map(|t| t.propagate(input)).collect();
    Ok(outputs
        .into_iter()
        .collect::<std::result::Result<Vec<_>, PropagationError>>()?)
}

/// Keeps the beams within bounds together with their telescopes
pub fn filter_all(
    results: Vec<BeamVector>,
    configs: Configurations,
    bounds: &Bounds,
) -> Result<(Vec<BeamVector>, Configurations)> {
    if results.len() != configs.len() {
        return Err(FilterError::Lockstep {
            results: results.len(),
            configurations: configs.len(),
        });
    }
    let (results, telescopes): (Vec<_>, Vec<_>) = results
        .into_iter()
        .zip(configs)
        .filter(|(beam, _)| bounds.accepts(beam))
        .unzip();
    Ok((results, telescopes.into()))
}

/// Propagates the input beam through all the telescopes and keeps the ones within bounds
pub fn evaluate(
    input: &BeamVector,
    configs: Configurations,
    bounds: &Bounds,
) -> Result<(Vec<BeamVector>, Configurations)> {
    let results = propagate_all(input, &configs)?;
    log::debug!("{} beams propagated", results.len());
    filter_all(results, configs, bounds)
}
