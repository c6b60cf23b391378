use clap::Parser;
use climate_sim_core::{
    ClimateSimulation, GridShape, Joules, Meters, RadiationPolicy, Seconds, SimulationConfig, Watts,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Climate simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "climate-sim-demo")]
#[command(about = "Planetary climate simulation demo", long_about = None)]
struct Args {
    /// Number of ticks to run
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Integration step in seconds
    #[arg(long, default_value_t = 0.01, value_parser = parse_positive)]
    time_delta: f64,

    /// Grid cells along x
    #[arg(long, default_value_t = 8)]
    nx: usize,

    /// Grid cells along y
    #[arg(long, default_value_t = 8)]
    ny: usize,

    /// Grid cells along z
    #[arg(long, default_value_t = 2)]
    nz: usize,

    /// Sun power output in watts
    #[arg(long, default_value_t = 1.3e17, value_parser = parse_non_negative)]
    sun_output: f64,

    /// Finite sun energy reserve in joules (omit for an inexhaustible sun)
    #[arg(long, value_parser = parse_non_negative)]
    sun_reserve: Option<f64>,

    /// Sun-earth distance in meters
    #[arg(long, default_value_t = 1.496e11, value_parser = parse_positive)]
    earth_distance: f64,

    /// Earth radius in meters
    #[arg(long, default_value_t = 6.371e6, value_parser = parse_positive)]
    earth_radius: f64,

    /// Rescale radiation shares so the full emission lands on receivers
    #[arg(long)]
    renormalize: bool,

    /// RNG seed for the sampled surface grid
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 1_000)]
    report_interval: u64,
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is negative"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = SimulationConfig {
        time_delta: Seconds::new(args.time_delta),
        grid_shape: GridShape::new(args.nx, args.ny, args.nz),
        sun_output: Watts::new(args.sun_output),
        sun_reserve: args.sun_reserve.map(Joules::new),
        earth_radius: Meters::new(args.earth_radius),
        earth_distance: Meters::new(args.earth_distance),
        radiation_policy: if args.renormalize {
            RadiationPolicy::Renormalize
        } else {
            RadiationPolicy::PerReceiver
        },
        seed: args.seed,
        ..SimulationConfig::default()
    };

    let mut sim = ClimateSimulation::from_config(&config)?;
    info!(
        cells = config.grid_shape.len(),
        ticks = args.ticks,
        "starting run"
    );

    let report_every = args.report_interval.max(1);
    let mut remaining = args.ticks;
    while remaining > 0 {
        let batch = remaining.min(report_every);
        sim.run_for(batch)?;
        remaining -= batch;

        let stats = sim.stats()?;
        println!(
            "tick {:>8}  t={:>10.2} s  mean T = {}  mean CO2 = {}  grid E = {}",
            stats.ticks,
            *stats.elapsed,
            stats.mean_surface_temperature,
            stats.mean_co2,
            stats.grid_energy,
        );
        if let Some(reserve) = stats.sun_reserve {
            println!("             sun reserve: {reserve}");
        }
    }

    let stats = sim.stats()?;
    println!("\n=== Run complete ===");
    println!("ticks:              {}", stats.ticks);
    println!("simulated time:     {}", stats.elapsed);
    println!("mean surface temp:  {}", stats.mean_surface_temperature);
    println!("mean CO2:           {}", stats.mean_co2);
    println!("total grid energy:  {}", stats.grid_energy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_flags_are_rejected_before_construction() {
        assert!(Args::try_parse_from(["demo", "--time-delta=-1"]).is_err());
        assert!(Args::try_parse_from(["demo", "--sun-output=-5"]).is_err());
        assert!(Args::try_parse_from(["demo", "--earth-radius=0"]).is_err());
        assert!(Args::try_parse_from(["demo", "--sun-reserve=-1e9"]).is_err());
    }

    #[test]
    fn valid_flags_parse() {
        let args =
            Args::try_parse_from(["demo", "--time-delta", "0.5", "--sun-reserve", "1e20"]).unwrap();
        assert!((args.time_delta - 0.5).abs() < f64::EPSILON);
        assert_eq!(args.sun_reserve, Some(1e20));
    }
}
