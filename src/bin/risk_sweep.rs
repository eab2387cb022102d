//! Rainfall Sensitivity Sweep
//!
//! Prints how the deterministic base score and the jitter envelope move as
//! rainfall goes from 0 to 200 mm, holding the other inputs fixed.
//!
//! Usage:
//!   cargo run --bin risk_sweep
//!   cargo run --bin risk_sweep -- --duration 48 --soil 80 --river 65 --no-historical

use clap::Parser;

use flood_risk_service::alert::band;
use flood_risk_service::model::PredictionInput;
use flood_risk_service::scoring::{base_score, score_with_draw};

#[derive(Debug, Parser)]
#[command(name = "risk_sweep", about = "Rainfall sensitivity sweep")]
struct Args {
    #[arg(long, default_value_t = 24.0)]
    duration: f64,
    #[arg(long, default_value_t = 30.0)]
    soil: f64,
    #[arg(long, default_value_t = 40.0)]
    river: f64,
    #[arg(long, default_value_t = false)]
    no_historical: bool,
    /// Rainfall increment in millimeters
    #[arg(long, default_value_t = 25)]
    step: u32,
}

fn main() {
    flood_risk_service::init_logging();
    let args = Args::parse();
    let step = args.step.max(1);

    println!("📈 Rainfall Sensitivity Sweep");
    println!("=============================\n");
    println!(
        "duration {} hrs, soil {}%, river {}%, historical {}\n",
        args.duration, args.soil, args.river, !args.no_historical
    );
    println!(
        "{:>9}  {:>6}  {:>6}  {:>6}  {:<9}  {:<9}",
        "rain (mm)", "base", "min", "max", "band@min", "band@max"
    );

    for rainfall in (0..=200u32).step_by(step as usize) {
        let input = PredictionInput::new(
            rainfall as f64,
            args.duration,
            args.soil,
            args.river,
            !args.no_historical,
        );
        let low = score_with_draw(&input, 0.0);
        let high = score_with_draw(&input, 1.0);

        println!(
            "{:>9}  {:>6.3}  {:>6.3}  {:>6.3}  {:<9}  {:<9}",
            rainfall,
            base_score(&input),
            low,
            high,
            band(low).to_string(),
            band(high).to_string(),
        );
    }

    tracing::debug!(step, "sweep complete");
}
