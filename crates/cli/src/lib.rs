pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "agriconform",
    about = "Agricultural environmental compliance CLI",
    long_about = "Assess planned spraying, fertilization and irrigation operations against buffer-zone, water and seasonal rules.",
    after_help = "Examples:\n  agriconform assess --input request.json\n  agriconform znt --base 20 --drift 3-star --vegetation\n  agriconform water-body --category permanent_stream"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run a full compliance assessment from a JSON request (`-` reads stdin)")]
    Assess {
        #[arg(long, help = "Path to the JSON assessment request")]
        input: PathBuf,
        #[arg(long, help = "JSON product registry, overriding registry.path")]
        registry: Option<PathBuf>,
    },
    #[command(about = "List the catalog regulations that apply to a practice")]
    Catalog {
        #[arg(long, help = "Practice type, e.g. spraying|fertilization|irrigation")]
        practice: String,
    },
    #[command(about = "Describe one water body category, or all of them")]
    WaterBody {
        #[arg(long, help = "Water body category, e.g. permanent_stream")]
        category: Option<String>,
    },
    #[command(about = "Compute a single buffer-zone requirement")]
    Znt {
        #[arg(long, help = "Legal base distance in meters")]
        base: f64,
        #[arg(long, help = "Drift reduction class: none|1-star|3-star|5-star")]
        drift: Option<String>,
        #[arg(long, help = "A permanent vegetated strip borders the water")]
        vegetation: bool,
        #[arg(long, help = "Water body category")]
        category: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Assess { input, registry } => commands::assess::run(&input, registry),
        Command::Catalog { practice } => commands::catalog::run(&practice),
        Command::WaterBody { category } => commands::water_body::run(category.as_deref()),
        Command::Znt { base, drift, vegetation, category } => {
            commands::znt::run(&commands::znt::ZntArgs { base, drift, vegetation, category })
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
