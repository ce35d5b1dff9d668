use nalgebra as na;

use crate::BeamVector;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    #[error("zero focal length in telescope (f1={f1}, f2={f2})")]
    ZeroFocalLength { f1: f64, f2: f64 },
}
type Result<T> = std::result::Result<T, PropagationError>;

/// Two thin lenses telescope
///
/// The first lens of focal length `f1` is followed by a second lens of focal length `f2`
/// at a distance `separation`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Telescope {
    pub f1: f64,
    pub f2: f64,
    pub separation: f64,
}
impl Telescope {
    pub fn new(f1: f64, f2: f64, separation: f64) -> Self {
        Self { f1, f2, separation }
    }
    /// Telescope with the lenses `f1+f2` apart
    pub fn afocal(f1: f64, f2: f64) -> Self {
        Self::new(f1, f2, f1 + f2)
    }
    /// Returns the matrix mapping the input `[radius, half-angle]` to the output beam
    pub fn ray_transfer_matrix(&self) -> Result<na::Matrix2<f64>> {
        let &Self { f1, f2, separation: d } = self;
        if f1 == 0. || f2 == 0. {
            return Err(PropagationError::ZeroFocalLength { f1, f2 });
        }
        Ok(na::Matrix2::new(
            (f1 - d) / f1,
            d,
            (f1 + f2 - d) / (f1 * f2),
            (f2 - d) / f2,
        ))
    }
    /// Propagates a beam through the telescope
    ///
    /// The output radius is always positive: a negative radius only means that the beam
    /// went through a focus.
    pub fn propagate(&self, input: &BeamVector) -> Result<BeamVector> {
        let output = self.ray_transfer_matrix()? * na::Vector2::<f64>::from(input);
        Ok(BeamVector::new(output[0].abs(), output[1]))
    }
}

/// Propagates `input` through lenses `f1` and `f2` separated by `d`
pub fn propagate(f1: f64, f2: f64, d: f64, input: &BeamVector) -> Result<BeamVector> {
    Telescope::new(f1, f2, d).propagate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn collimated_afocal() {
        let output = propagate(100., 100., 200., &BeamVector::new(2., 0.)).unwrap();
        assert!((output.radius - 2.).abs() < 1e-12);
        assert!(output.half_angle.abs() < 1e-12);
    }

    #[test]
    fn expander() {
        // 2x Keplerian expander: radius doubles
        let output = Telescope::afocal(50., 100.)
            .propagate(&BeamVector::collimated(1.))
            .unwrap();
        assert!((output.radius - 2.).abs() < 1e-12);
        assert!(output.half_angle.abs() < 1e-12);
    }

    #[test]
    fn diverging_input() {
        let input = BeamVector::new(2., 0.01);
        let output = propagate(100., -50., 30., &input).unwrap();
        let r = ((100. - 30.) / 100.) * 2. + 30. * 0.01;
        let theta = ((100. - 50. - 30.) / (100. * -50.)) * 2. + ((-50. - 30.) / -50.) * 0.01;
        assert!((output.radius - r).abs() < 1e-12);
        assert!((output.half_angle - theta).abs() < 1e-12);
    }

    #[test]
    fn positive_radius() {
        // raw radius: (100-300)/100 * 2 = -4
        let output = propagate(100., 200., 300., &BeamVector::collimated(2.)).unwrap();
        assert!((output.radius - 4.).abs() < 1e-12);

        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let f1 = rng.gen_range(1f64..1000.) * if rng.gen_bool(0.5) { 1. } else { -1. };
            let f2 = rng.gen_range(1f64..1000.) * if rng.gen_bool(0.5) { 1. } else { -1. };
            let d = rng.gen_range(-2000f64..2000.);
            let input = BeamVector::new(rng.gen_range(0f64..10.), rng.gen_range(-0.1..0.1));
            assert!(propagate(f1, f2, d, &input).unwrap().radius >= 0.);
        }
    }

    #[test]
    fn zero_focal_length() {
        assert_eq!(
            propagate(0., 100., 100., &BeamVector::collimated(2.)),
            Err(PropagationError::ZeroFocalLength { f1: 0., f2: 100. })
        );
        assert!(propagate(100., 0., 100., &BeamVector::collimated(2.)).is_err());
    }
}
