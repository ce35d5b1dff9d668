use beam_doctor::{BeamDoctor, LensCatalog, LensStock, Profile};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "beam-doctor",
    about = "Two-lens telescopes for laser beam correction"
)]
struct Opt {
    /// Input beam radius [mm]
    #[structopt(short, long, default_value = "2")]
    radius: f64,
    /// CSV file with the measured beam radii (columns: "Distance [mm]", "Radius [mm]")
    #[structopt(long)]
    profile: Option<String>,
    /// Input beam half-angle [deg] of the synthetic profile used without measurements
    #[structopt(long, default_value = "1")]
    half_angle: f64,
    /// Stock of the first lens: convex or concave
    #[structopt(long, default_value = "convex")]
    first: LensStock,
    /// Stock of the second lens: convex or concave
    #[structopt(long, default_value = "concave")]
    second: LensStock,
    /// First lens focal lengths [mm], supersedes the stock
    #[structopt(long = "f1", use_delimiter = true, allow_hyphen_values = true)]
    f1s: Option<Vec<f64>>,
    /// Second lens focal lengths [mm], supersedes the stock
    #[structopt(long = "f2", use_delimiter = true, allow_hyphen_values = true)]
    f2s: Option<Vec<f64>>,
    /// Maximum output beam radius [mm]
    #[structopt(long, default_value = "3")]
    r_max: f64,
    /// Minimum output beam radius [mm]
    #[structopt(long, default_value = "0")]
    r_min: f64,
    /// Maximum output beam half-angle [deg]
    #[structopt(long, default_value = "1.5")]
    theta_max: f64,
    /// Lens separation range on either side of f1+f2 [mm]
    #[structopt(short, long, default_value = "0")]
    jitter: f64,
    /// Save the telescopes to a CSV file
    #[structopt(long)]
    csv: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let profile = match &opt.profile {
        Some(path) => Profile::from_csv(path)?,
        None => Profile::synthetic(1000., 25, opt.half_angle.to_radians()),
    };
    let f1s: LensCatalog = opt.f1s.map_or_else(|| opt.first.into(), Into::into);
    let f2s: LensCatalog = opt.f2s.map_or_else(|| opt.second.into(), Into::into);

    let prescriptions = BeamDoctor::default()
        .first_lenses(f1s)
        .second_lenses(f2s)
        .max_radius(opt.r_max)
        .min_radius(opt.r_min)
        .max_half_angle(opt.theta_max.to_radians())
        .jitter(opt.jitter)
        .treat_profile(opt.radius, &profile)?;
    println!("{}", prescriptions);

    if let Some(filename) = opt.csv {
        prescriptions.to_csv(filename)?;
    }

    Ok(())
}
