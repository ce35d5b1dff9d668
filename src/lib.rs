//! Two-lens telescope selection
//!
//! Finds the pairs of lenses, and their separation, that bring a laser beam within
//! given radius and divergence half-angle tolerances.
//! Lengths are in the caller unit (mm for the lens stock) and angles in radians.

mod beam;
pub use beam::BeamVector;
pub mod configs;
pub use configs::{enumerate, Configurations};
mod doctor;
pub use doctor::{doctor, BeamDoctor, Prescription, Prescriptions};
mod error;
pub use error::{Error, Result};
pub mod filter;
pub use filter::{evaluate, Bounds, FilterError};
mod lens;
pub use lens::{LensCatalog, LensStock, CONCAVE, CONVEX};
pub mod profiler;
pub use profiler::{estimate, Profile, ProfilerError};
pub mod telescope;
pub use telescope::{propagate, PropagationError, Telescope};
