use nalgebra as na;

/// Beam state at one position along the optical axis
///
/// The radius and the half-angle share the length unit chosen by the caller,
/// the half-angle is in radians and is negative for a converging beam.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BeamVector {
    pub radius: f64,
    pub half_angle: f64,
}
impl BeamVector {
    pub fn new(radius: f64, half_angle: f64) -> Self {
        Self { radius, half_angle }
    }
    /// Collimated beam of the given radius
    pub fn collimated(radius: f64) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
    /// Returns the half-angle in degrees
    pub fn half_angle_degrees(&self) -> f64 {
        self.half_angle.to_degrees()
    }
}
impl From<na::Vector2<f64>> for BeamVector {
    fn from(v: na::Vector2<f64>) -> Self {
        Self {
            radius: v[0],
            half_angle: v[1],
        }
    }
}
impl From<&BeamVector> for na::Vector2<f64> {
    fn from(beam: &BeamVector) -> Self {
        na::Vector2::new(beam.radius, beam.half_angle)
    }
}
