use std::ops::Deref;

use itertools::iproduct;

use crate::{LensCatalog, Telescope};

/// Number of separations tried around `f1+f2` when the separation is jittered
pub const N_OFFSET: usize = 11;
/// Minimum ratio of the lens separation to either focal length
pub const MIN_SEPARATION_RATIO: f64 = 0.2;

/// Telescope configurations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Configurations(Vec<Telescope>);
impl Deref for Configurations {
    type Target = [Telescope];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<Telescope>> for Configurations {
    fn from(telescopes: Vec<Telescope>) -> Self {
        Self(telescopes)
    }
}
impl FromIterator<Telescope> for Configurations {
    fn from_iter<T: IntoIterator<Item = Telescope>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl IntoIterator for Configurations {
    type Item = Telescope;
    type IntoIter = std::vec::IntoIter<Telescope>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns the offsets added to the nominal separation `f1+f2`
///
/// A zero `jitter` gives the nominal separation only, otherwise [N_OFFSET] evenly spaced
/// offsets in `[-|jitter|,|jitter|]`, both ends included, in ascending order.
pub fn separation_offsets(jitter: f64) -> Vec<f64> {
    if jitter == 0. {
        return vec![0.];
    }
    let jitter = jitter.abs();
    let step = 2. * jitter / (N_OFFSET - 1) as f64;
    (0..N_OFFSET)
        .map(|i| {
            if i == N_OFFSET - 1 {
                jitter
            } else {
                -jitter + i as f64 * step
            }
        })
        .collect()
}

/// Lenses far enough apart with respect to both focal lengths
fn is_plausible(f1: f64, f2: f64, separation: f64) -> bool {
    separation >= MIN_SEPARATION_RATIO * f1 && separation >= MIN_SEPARATION_RATIO * f2
}

/// Enumerates all the telescopes made of a lens from `f1s` followed by a lens from `f2s`
///
/// The lenses are set `f1+f2` apart, give or take the separation offsets for the given `jitter`.
/// Configurations are ordered by `f1s`, then `f2s`, then ascending offsets.
pub fn enumerate(f1s: &LensCatalog, f2s: &LensCatalog, jitter: f64) -> Configurations {
    let offsets = separation_offsets(jitter);
    iproduct!(f1s.iter(), f2s.iter(), offsets.iter())
        .map(|(&f1, &f2, &offset)| Telescope::new(f1, f2, f1 + f2 + offset))
        .filter(|t| is_plausible(t.f1, t.f2, t.separation))
        .collect()
}
