use std::{fmt, ops::Deref, path::Path};

use serde::Serialize;

use crate::{
    enumerate, evaluate, BeamVector, Bounds, Configurations, FilterError, LensCatalog, LensStock,
    Profile, Telescope,
};

/// A telescope and the beam it delivers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prescription {
    pub beam: BeamVector,
    pub telescope: Telescope,
}

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Radius [mm]")]
    radius: f64,
    #[serde(rename = "Theta [deg]")]
    theta: f64,
    #[serde(rename = "f1 [mm]")]
    f1: f64,
    #[serde(rename = "f2 [mm]")]
    f2: f64,
    #[serde(rename = "d [mm]")]
    d: f64,
}
impl From<&Prescription> for Row {
    fn from(p: &Prescription) -> Self {
        Self {
            radius: p.beam.radius,
            theta: p.beam.half_angle_degrees(),
            f1: p.telescope.f1,
            f2: p.telescope.f2,
            d: p.telescope.separation,
        }
    }
}

/// Telescopes meeting the beam tolerances
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Prescriptions(Vec<Prescription>);
impl Deref for Prescriptions {
    type Target = [Prescription];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<(Vec<BeamVector>, Configurations)> for Prescriptions {
    fn from((beams, telescopes): (Vec<BeamVector>, Configurations)) -> Self {
        Self(
            beams
                .into_iter()
                .zip(telescopes)
                .map(|(beam, telescope)| Prescription { beam, telescope })
                .collect(),
        )
    }
}
impl Prescriptions {
    /// Returns the (beam, telescope) pairs
    pub fn into_pairs(self) -> Vec<(BeamVector, Telescope)> {
        self.0
            .into_iter()
            .map(|Prescription { beam, telescope }| (beam, telescope))
            .collect()
    }
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        for prescription in self.iter() {
            wtr.serialize(Row::from(prescription))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
impl fmt::Display for Prescriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("+{}+", vec!["-".repeat(13); 5].join("+"));
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "|{:^13}|{:^13}|{:^13}|{:^13}|{:^13}|",
            "Radius [mm]", "Theta [deg]", "f1 [mm]", "f2 [mm]", "d [mm]"
        )?;
        writeln!(f, "{}", rule)?;
        for Prescription { beam, telescope } in self.iter() {
            // lengths are truncated like printf "%d"
            writeln!(
                f,
                "|{:^13.3}|{:^13.3}|{:^13}|{:^13}|{:^13}|",
                beam.radius,
                beam.half_angle_degrees(),
                telescope.f1.trunc() as i64,
                telescope.f2.trunc() as i64,
                telescope.separation.trunc() as i64
            )?;
        }
        write!(f, "{}", rule)
    }
}

/// Finds the telescopes that bring the input beam within the tolerances
///
/// The telescopes are made of a lens from `f1s` followed by a lens from `f2s`,
/// with the separations given by [enumerate] for the `jitter`.
/// The output beam radius must be in `[r_min,r_max]` and the magnitude of its
/// half-angle must not exceed `theta_max` [rd].
pub fn doctor(
    input: &BeamVector,
    f1s: &LensCatalog,
    f2s: &LensCatalog,
    r_max: f64,
    theta_max: f64,
    jitter: f64,
    r_min: f64,
) -> Result<Prescriptions, FilterError> {
    BeamDoctor::default()
        .first_lenses(f1s.clone())
        .second_lenses(f2s.clone())
        .max_radius(r_max)
        .max_half_angle(theta_max)
        .min_radius(r_min)
        .jitter(jitter)
        .treat(input)
}

/// Two-lens telescope finder
pub struct BeamDoctor {
    f1s: LensCatalog,
    f2s: LensCatalog,
    bounds: Bounds,
    jitter: f64,
}
impl Default for BeamDoctor {
    fn default() -> Self {
        Self {
            f1s: LensStock::Convex.into(),
            f2s: LensStock::Concave.into(),
            bounds: Bounds::new(3., 1.5f64.to_radians()),
            jitter: 0.,
        }
    }
}
impl BeamDoctor {
    pub fn first_lenses<C: Into<LensCatalog>>(self, f1s: C) -> Self {
        Self {
            f1s: f1s.into(),
            ..self
        }
    }
    pub fn second_lenses<C: Into<LensCatalog>>(self, f2s: C) -> Self {
        Self {
            f2s: f2s.into(),
            ..self
        }
    }
    pub fn max_radius(self, max_radius: f64) -> Self {
        Self {
            bounds: Bounds {
                max_radius,
                ..self.bounds
            },
            ..self
        }
    }
    /// Sets the maximum half-angle [rd]
    pub fn max_half_angle(self, max_half_angle: f64) -> Self {
        Self {
            bounds: Bounds {
                max_half_angle,
                ..self.bounds
            },
            ..self
        }
    }
    pub fn min_radius(self, min_radius: f64) -> Self {
        Self {
            bounds: self.bounds.min_radius(min_radius),
            ..self
        }
    }
    /// Sets how far on either side of `f1+f2` the second lens may be moved
    pub fn jitter(self, jitter: f64) -> Self {
        Self { jitter, ..self }
    }
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    pub fn configurations(&self) -> Configurations {
        enumerate(&self.f1s, &self.f2s, self.jitter)
    }
    /// Returns the telescopes that bring the input beam within bounds
    pub fn treat(&self, input: &BeamVector) -> Result<Prescriptions, FilterError> {
        let configs = self.configurations();
        log::info!(
            "{} telescopes from {}x{} lenses",
            configs.len(),
            self.f1s.len(),
            self.f2s.len()
        );
        let prescriptions: Prescriptions = evaluate(input, configs, &self.bounds)?.into();
        log::info!("{} telescopes within bounds", prescriptions.len());
        Ok(prescriptions)
    }
    /// Returns the telescopes for a beam of the given radius and of the profile divergence
    pub fn treat_profile(&self, radius: f64, profile: &Profile) -> crate::Result<Prescriptions> {
        let half_angle = profile.half_angle()?;
        log::info!(
            "beam half-angle: {:.3}deg ({} radii)",
            half_angle.to_degrees(),
            profile.len()
        );
        Ok(self.treat(&BeamVector::new(radius, half_angle))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{telescope::PropagationError, Error};

    #[test]
    fn script_trial() {
        let profile = Profile::synthetic(1000., 25, 1f64.to_radians());
        let prescriptions = BeamDoctor::default()
            .jitter(200.)
            .treat_profile(2., &profile)
            .unwrap();
        let bounds = *BeamDoctor::default().bounds();
        assert!(prescriptions
            .iter()
            .all(|p| bounds.accepts(&p.beam) && p.telescope.f1 > 0. && p.telescope.f2 < 0.));
    }

    #[test]
    fn doctor_matches_builder() {
        let input = BeamVector::new(2., 1f64.to_radians());
        let f1s: LensCatalog = LensStock::Convex.into();
        let f2s: LensCatalog = LensStock::Convex.into();
        let theta_max = 1.5f64.to_radians();
        let prescriptions = doctor(&input, &f1s, &f2s, 3., theta_max, 200., 0.).unwrap();
        assert!(!prescriptions.is_empty());
        let configs = enumerate(&f1s, &f2s, 200.);
        let (beams, telescopes) = evaluate(&input, configs, &Bounds::new(3., theta_max)).unwrap();
        let pairs = prescriptions.into_pairs();
        assert_eq!(pairs.len(), beams.len());
        assert!(pairs
            .iter()
            .zip(beams.iter().zip(telescopes.iter()))
            .all(|((b, t), (b0, t0))| b == b0 && t == t0));
    }

    #[test]
    fn afocal_telescope_prescribed() {
        let f = LensCatalog::from(vec![100.]);
        let input = BeamVector::collimated(2.);
        let prescriptions = doctor(&input, &f, &f, 2.5, 1e-6, 0., 1.5).unwrap();
        assert_eq!(prescriptions.len(), 1);
        assert_eq!(prescriptions[0].telescope, Telescope::afocal(100., 100.));
    }

    #[test]
    fn zero_focal_length() {
        let f1s = LensCatalog::from(vec![0.]);
        let f2s = LensCatalog::from(vec![100.]);
        assert_eq!(
            doctor(&BeamVector::collimated(2.), &f1s, &f2s, 3., 0.1, 0., 0.),
            Err(FilterError::Propagation(
                PropagationError::ZeroFocalLength { f1: 0., f2: 100. }
            ))
        );
    }

    #[test]
    fn insufficient_profile() {
        let profile = Profile::new(vec![0.], vec![2.]).unwrap();
        assert!(matches!(
            BeamDoctor::default().treat_profile(2., &profile),
            Err(Error::Profiler(_))
        ));
    }

    #[test]
    fn table() {
        let prescriptions: Prescriptions = (
            vec![BeamVector::new(1.23456, -0.5f64.to_radians())],
            Configurations::from(vec![Telescope::new(150., -75.9, 74.1)]),
        )
            .into();
        let table = prescriptions.to_string();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("Radius [mm]") && lines[1].contains("d [mm]"));
        let cells: Vec<_> = lines[3].split('|').map(str::trim).collect();
        assert_eq!(cells[1..6], ["1.235", "-0.500", "150", "-75", "74"]);
    }

    #[test]
    fn csv_prescriptions() {
        let input = BeamVector::new(2., 1f64.to_radians());
        let f: LensCatalog = LensStock::Convex.into();
        let prescriptions = doctor(&input, &f, &f, 3., 1.5f64.to_radians(), 200., 0.).unwrap();
        assert!(!prescriptions.is_empty());
        let path = std::env::temp_dir().join(format!("prescriptions-{}.csv", std::process::id()));
        prescriptions.to_csv(&path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ["Radius [mm]", "Theta [deg]", "f1 [mm]", "f2 [mm]", "d [mm]"]);
        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rows.len(), prescriptions.len());
        for (row, p) in rows.iter().zip(prescriptions.iter()) {
            let values: Vec<f64> = row.iter().map(|x| x.parse().unwrap()).collect();
            assert_eq!(
                values,
                [
                    p.beam.radius,
                    p.beam.half_angle_degrees(),
                    p.telescope.f1,
                    p.telescope.f2,
                    p.telescope.separation
                ]
            );
        }
    }

    #[test]
    fn empty_table() {
        let table = Prescriptions::default().to_string();
        assert_eq!(table.lines().count(), 4);
    }
}
