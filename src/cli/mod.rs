//! Command-line interface
//! ======================
//!
//! `assemble` reads k-mers (one per line) and prints the assembled sequence.
//! `simulate` runs the round-trip harness: random sequence → shuffled k-mers →
//! assembly → comparison against the truth.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::assembly::{ConstructionMethod, KmerAssembler};
use crate::utils::configuration::AssemblerConfig;
use crate::utils::sequence::{random_dna_sequence, same_composition, shuffled_kmers_of};

#[derive(Parser)]
#[command(name = "kmer-assembler")]
#[command(about = "Assemble a sequence from its k-mers via de Bruijn graphs and Eulerian paths")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble k-mers read from a file ("-" for stdin), one per line
    Assemble {
        /// Input file with one k-mer per line
        input: PathBuf,

        /// Construction method: "k-mer pairwise comparison" or "k-mer hashing"
        #[arg(short, long)]
        method: Option<String>,

        /// Write the de Bruijn graph in DOT format
        #[arg(long, value_name = "FILE")]
        dot: Option<PathBuf>,

        /// Skip the weak-connectivity check
        #[arg(long)]
        allow_disconnected: bool,

        /// Print a JSON report instead of the bare sequence
        #[arg(long)]
        json: bool,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Assemble shuffled k-mers of random sequences and compare with the truth
    Simulate {
        /// k-mer length
        #[arg(short, default_value_t = 10)]
        k: usize,

        /// Minimum random sequence length
        #[arg(long, default_value_t = 10)]
        min_length: usize,

        /// Maximum random sequence length
        #[arg(long, default_value_t = 10_000)]
        max_length: usize,

        /// Number of sequences per method
        #[arg(long, default_value_t = 1)]
        rounds: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Construction method, or "all"
        #[arg(short, long, default_value = "all")]
        method: String,
    },
}

/// How an assembled sequence relates to the sequence it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationOutcome {
    /// Identical to the original
    Exact,
    /// Different string with the same length and k-mer composition
    SameComposition,
    Mismatch,
}

impl SimulationOutcome {
    pub fn classify(assembled: &str, truth: &str, k: usize) -> Self {
        if assembled == truth {
            SimulationOutcome::Exact
        } else if same_composition(assembled, truth, k) {
            SimulationOutcome::SameComposition
        } else {
            SimulationOutcome::Mismatch
        }
    }

    pub fn passed(&self) -> bool {
        !matches!(self, SimulationOutcome::Mismatch)
    }
}

impl Cli {
    /// Initialize logging
    pub fn init_logging(&self) {
        let level = if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .with(
                EnvFilter::builder()
                    .with_default_directive(level.into())
                    .from_env_lossy(),
            )
            .init();
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config = AssemblerConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Assemble {
                input,
                method,
                dot,
                allow_disconnected,
                json,
                output,
            } => {
                let mut config = config;
                if let Some(method) = method {
                    config.method = method.parse()?;
                }
                if dot.is_some() {
                    config.dot_output = dot;
                }
                if allow_disconnected {
                    config.require_connected = false;
                }
                run_assemble(config, &input, json, output.as_deref())
            }
            Commands::Simulate {
                k,
                min_length,
                max_length,
                rounds,
                seed,
                method,
            } => {
                let methods = if method == "all" {
                    ConstructionMethod::ALL.to_vec()
                } else {
                    vec![method.parse()?]
                };
                let settings = SimulationSettings {
                    k,
                    min_length,
                    max_length,
                    rounds,
                    seed: seed.unwrap_or_else(rand::random),
                };
                run_simulation(config, &methods, &settings)
            }
        }
    }
}

fn run_assemble(config: AssemblerConfig, input: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let kmers = if input == Path::new("-") {
        read_kmers(io::stdin().lock())?
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open k-mer file: {}", input.display()))?;
        read_kmers(BufReader::new(file))?
    };
    info!("📁 Read {} k-mers from {}", kmers.len(), input.display());

    let report = KmerAssembler::new(config).assemble_with_report(&kmers)?;
    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.sequence.clone()
    };

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{rendered}")?;
            info!("💾 Wrote result to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// One k-mer per line; blank lines and `#` comments are skipped
pub fn read_kmers<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut kmers = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_number + 1))?;
        let kmer = line.trim();
        if kmer.is_empty() || kmer.starts_with('#') {
            continue;
        }
        kmers.push(kmer.to_string());
    }
    Ok(kmers)
}

/// Parameters of a `simulate` run
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub k: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub rounds: usize,
    pub seed: u64,
}

/// Assemble the shuffled k-mers of one random sequence
pub fn simulate_once<R: Rng>(
    assembler: &KmerAssembler,
    rng: &mut R,
    settings: &SimulationSettings,
) -> Result<SimulationOutcome> {
    let truth = random_dna_sequence(rng, settings.min_length, settings.max_length);
    let kmers = shuffled_kmers_of(&truth, settings.k, rng);
    let assembled = assembler.assemble(&kmers)?;
    Ok(SimulationOutcome::classify(&assembled, &truth, settings.k))
}

fn run_simulation(
    config: AssemblerConfig,
    methods: &[ConstructionMethod],
    settings: &SimulationSettings,
) -> Result<()> {
    if settings.k < 2 {
        bail!("k must be at least 2, got {}", settings.k);
    }
    if settings.min_length.min(settings.max_length) < settings.k {
        bail!(
            "sequence lengths must be at least k = {} (got {}..={})",
            settings.k,
            settings.min_length,
            settings.max_length
        );
    }

    info!("🎲 Simulation seed: {}", settings.seed);
    let mut failures = 0usize;

    for &method in methods {
        let assembler = KmerAssembler::new(AssemblerConfig {
            method,
            ..config.clone()
        });
        let mut rng = StdRng::seed_from_u64(settings.seed);
        info!("🧬 Testing k-assembler by {}", method);

        for round in 0..settings.rounds {
            let started = Instant::now();
            match simulate_once(&assembler, &mut rng, settings) {
                Ok(SimulationOutcome::Exact) => info!(
                    "   ✅ Round {round}: assembled the original sequence ({:.3}s)",
                    started.elapsed().as_secs_f64()
                ),
                Ok(SimulationOutcome::SameComposition) => info!(
                    "   ✅ Round {round}: assembled a sequence with the original composition ({:.3}s)",
                    started.elapsed().as_secs_f64()
                ),
                Ok(SimulationOutcome::Mismatch) => {
                    warn!("   ❌ Round {round}: assembled sequence does not match");
                    failures += 1;
                }
                Err(e) => {
                    error!("   ❌ Round {round}: {e:#}");
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} simulation round(s) failed (seed {})", settings.seed);
    }
    println!("All simulation rounds passed (seed {})", settings.seed);
    Ok(())
}
