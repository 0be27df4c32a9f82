use agora_sim::{SimConfig, SimulationReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Agora market simulation - limit order book with trading agents

USAGE:
    agora-sim [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --ticks <N>         Override the number of ticks to run
    --seed <N>          Override the noise trader base seed
    --json <PATH>       Write the full report as JSON to PATH
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

EXAMPLES:
    # Run with defaults
    agora-sim

    # Short deterministic run with a JSON report
    agora-sim --ticks 200 --seed 42 --json report.json
"#
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut json_path: Option<String> = None;
    let mut ticks_override: Option<u64> = None;
    let mut seed_override: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                config_path = Some(required_value(&args, i, "--config")?);
            }
            "--json" => {
                i += 1;
                json_path = Some(required_value(&args, i, "--json")?);
            }
            "--ticks" => {
                i += 1;
                ticks_override = Some(required_value(&args, i, "--ticks")?.parse()?);
            }
            "--seed" => {
                i += 1;
                seed_override = Some(required_value(&args, i, "--seed")?.parse()?);
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => {
            tracing::info!("loading configuration from {path}");
            SimConfig::from_file(path)?
        }
        None => SimConfig::default(),
    };
    if let Some(ticks) = ticks_override {
        config.simulation.ticks = ticks;
    }
    if let Some(seed) = seed_override {
        config.noise.seed = Some(seed);
    }

    tracing::info!(
        name = %config.name,
        ticks = config.simulation.ticks,
        noise_traders = config.noise_traders,
        seed_orders = config.seed_orders.len(),
        "starting simulation"
    );

    let mut runner = config.build_runner()?;
    runner.run();

    let report = SimulationReport::capture(&config.name, &runner);
    println!("{}", report.render_console());

    if let Some(path) = json_path {
        report.write_json(&path)?;
        tracing::info!("report written to {path}");
    }

    Ok(())
}

fn required_value(args: &[String], index: usize, flag: &str) -> anyhow::Result<String> {
    args.get(index)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}
