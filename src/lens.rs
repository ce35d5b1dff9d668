use std::ops::Deref;

use strum_macros::{Display, EnumIter, EnumString};

/// Thorlabs cylindrical convex lenses focal lengths [mm]
pub const CONVEX: [f64; 10] = [50., 75., 100., 150., 200., 250., 300., 400., 500., 1000.];
/// Thorlabs cylindrical concave lenses focal lengths [mm]
pub const CONCAVE: [f64; 7] = [-50., -75., -100., -150., -200., -400., -1000.];

/// Lens stock
#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum LensStock {
    /// Converging lenses
    Convex,
    /// Diverging lenses
    Concave,
}
impl LensStock {
    /// Returns the stock focal lengths [mm]
    pub fn focal_lengths(&self) -> &'static [f64] {
        match self {
            LensStock::Convex => &CONVEX,
            LensStock::Concave => &CONCAVE,
        }
    }
}

/// Ordered list of lens focal lengths
///
/// Focal lengths are positive for converging lenses and negative for diverging ones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LensCatalog(Vec<f64>);
impl Deref for LensCatalog {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<f64>> for LensCatalog {
    fn from(focal_lengths: Vec<f64>) -> Self {
        Self(focal_lengths)
    }
}
impl From<&[f64]> for LensCatalog {
    fn from(focal_lengths: &[f64]) -> Self {
        Self(focal_lengths.to_vec())
    }
}
impl From<LensStock> for LensCatalog {
    fn from(stock: LensStock) -> Self {
        stock.focal_lengths().into()
    }
}
impl FromIterator<f64> for LensCatalog {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl FromIterator<LensStock> for LensCatalog {
    fn from_iter<T: IntoIterator<Item = LensStock>>(iter: T) -> Self {
        iter.into_iter()
            .flat_map(|stock| stock.focal_lengths().iter().cloned())
            .collect()
    }
}
