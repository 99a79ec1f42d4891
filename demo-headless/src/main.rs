use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use units_core::presets::{build_hep_system, HepUnits};
use units_core::{DimensionalSystem, MeasurementSystem, Prefix, Quantity};

/// Preset measurement systems over LTM
#[derive(ValueEnum, Clone, Copy, Debug)]
enum SystemChoice {
    /// Metre, second, kilogram
    Si,
    /// `GeV`, `c`, `hbar`
    Hep,
}

impl SystemChoice {
    fn pick(self, hep: &HepUnits) -> &Arc<MeasurementSystem> {
        match self {
            SystemChoice::Si => &hep.si.system,
            SystemChoice::Hep => &hep.system,
        }
    }
}

/// Convert a quantity between the SI and HEP measurement systems
#[derive(Parser, Debug)]
#[command(name = "units-demo")]
#[command(about = "Dimensional analysis and unit conversion demo", long_about = None)]
struct Args {
    /// System the input is expressed in
    #[arg(short, long, value_enum, default_value_t = SystemChoice::Si)]
    from: SystemChoice,

    /// System to convert into
    #[arg(short, long, value_enum, default_value_t = SystemChoice::Hep)]
    to: SystemChoice,

    /// Magnitude in units of the source system
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    value: f64,

    /// Comma separated exponents over the source system's base units (e.g. 1,-2,0)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = "1,0,0"
    )]
    dimension: Vec<f64>,

    /// Metric prefix applied to the input value (name or symbol, e.g. "kilo" or "k")
    #[arg(short, long)]
    prefix: Option<Prefix>,

    /// Print the transfer matrices of both systems
    #[arg(long)]
    show_matrix: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    debug!(?args, "Parsed arguments");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> units_core::Result<()> {
    println!("=== Unit Conversion Demo ===\n");

    let hep = build_hep_system()?;
    let source = args.from.pick(&hep);
    let target = args.to.pick(&hep);

    if args.show_matrix {
        for system in [source, target] {
            println!(
                "Transfer matrix of {} (det {:.6e}):{}",
                system.name(),
                system.transfer().determinant(),
                system.transfer().matrix()
            );
        }
    }

    let mut input = source.quantity(args.value, args.dimension.clone())?;
    if let Some(prefix) = args.prefix {
        input = prefix.apply(&input)?;
        println!("Applied prefix {} ({})", prefix.name(), prefix.symbol());
    }

    let converted = input.to_system(target)?;
    let underlying = input.to_underlying()?;

    println!("Input:      {}", render(&input));
    println!("Converted:  {}", render(&converted));
    println!("Underlying: {}", render(&underlying));

    if converted.is_dimensionless() {
        println!("\nThe quantity is dimensionless in {}", target.name());
    }

    Ok(())
}

/// `value [system] unit^exp ...`, skipping zero exponents
fn render<S: DimensionalSystem>(quantity: &Quantity<S>) -> String {
    let units: Vec<String> = quantity
        .system()
        .base()
        .iter()
        .zip(quantity.dimension().exponents())
        .filter(|(_, exp)| **exp != 0.0)
        .map(|(base, exp)| {
            if *exp == 1.0 {
                base.unit.clone()
            } else {
                format!("{}^{}", base.unit, exp)
            }
        })
        .collect();

    format!(
        "{:.9e} [{}] {}",
        quantity.value(),
        quantity.system().name(),
        units.join(" ")
    )
}
