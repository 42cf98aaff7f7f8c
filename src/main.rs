//! fixturegen CLI: list, build and inspect the fixture generators.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fixturegen::config::FixtureConfig;
use fixturegen::io::write_bodies;
use fixturegen::parts::PartKind;
use fixturegen::parts::adjustable_arm::ArmGeometry;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fixturegen")]
#[command(about = "Parametric 3D-printable fixture generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available parts
    List,
    /// Build one part (or `all`) and write its bodies as STL
    Build {
        /// Part name, dashes or underscores, or `all`
        part: String,
        /// TOML file with resolution, export and per-part overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output directory (overrides the config)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write ASCII instead of binary STL
        #[arg(long)]
        ascii: bool,
        /// Segments per full circle (overrides the config)
        #[arg(long)]
        segments: Option<usize>,
    },
    /// Print derived dimensions of a part
    Dims {
        part: DimsPart,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DimsPart {
    AdjustableArm,
}

fn load_config(path: Option<&PathBuf>) -> Result<FixtureConfig> {
    match path {
        Some(path) => FixtureConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(FixtureConfig::default()),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List => {
            for kind in PartKind::ALL {
                println!("{:<26} {}", kind.name(), kind.summary());
            }
        },
        Commands::Build {
            part,
            config,
            out,
            ascii,
            segments,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(out) = out {
                config.export.out_dir = out;
            }
            if ascii {
                config.export.ascii = true;
            }
            if let Some(segments) = segments {
                config.resolution.segments = segments;
            }
            let kinds = if part == "all" {
                PartKind::ALL.to_vec()
            } else {
                vec![part.parse::<PartKind>()?]
            };
            build(&config, &kinds)?;
        },
        Commands::Dims { part, config } => {
            let config = load_config(config.as_ref())?;
            match part {
                DimsPart::AdjustableArm => {
                    let geometry = ArmGeometry::derive(&config.parts.adjustable_arm)?;
                    print!("{geometry}");
                },
            }
        },
    }
    Ok(())
}

fn build(config: &FixtureConfig, kinds: &[PartKind]) -> Result<()> {
    let format = config.export.format();
    for &kind in kinds {
        let bodies = kind
            .build(&config.parts, &config.resolution)
            .with_context(|| format!("building {kind}"))?;
        let paths = write_bodies(&config.export.out_dir, kind.name(), &bodies, format)
            .with_context(|| format!("exporting {kind}"))?;
        for path in paths {
            info!(part = %kind, path = %path.display(), "exported");
            println!("{}", path.display());
        }
    }
    Ok(())
}
