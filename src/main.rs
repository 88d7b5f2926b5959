use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use intsynth::canon;
use intsynth::cfg::Grammar;
use intsynth::interp;
use intsynth::parse;
use intsynth::synth::{BottomUpSynth, DivideConquerSynth, SynthResult, Synthesizer, TopDownSynth};

/// Synthesize a program over x, y, z from input/output examples.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Example file: one `x=_, y=_, z=_ -> _` record per line.
    file: PathBuf,

    /// Search strategy.
    #[arg(long, value_enum, default_value_t = Strategy::DivideConquer)]
    strategy: Strategy,

    /// Wall-clock budget in seconds for the pool-growing strategies.
    #[arg(long)]
    timeout: Option<u64>,

    /// Queue capacity for the top-down strategy.
    #[arg(long)]
    queue_limit: Option<usize>,

    /// Canonicalize the found program before printing it.
    #[arg(long)]
    simplify: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    TopDown,
    BottomUp,
    DivideConquer,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::TopDown => write!(f, "top-down"),
            Strategy::BottomUp => write!(f, "bottom-up"),
            Strategy::DivideConquer => write!(f, "divide-conquer"),
        }
    }
}

fn main() -> ExitCode {
    colog::init();
    let args = Args::parse();

    let examples = match parse::load_examples(&args.file) {
        Ok(examples) => examples,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };
    info!(
        "loaded {} examples from {}",
        examples.len(),
        args.file.display()
    );

    let cfg = Grammar::arith();
    let timeout = args.timeout.map(Duration::from_secs);
    let mut synth: Box<dyn Synthesizer> = match args.strategy {
        Strategy::TopDown => {
            let mut synth = TopDownSynth::new();
            if let Some(limit) = args.queue_limit {
                synth = synth.with_queue_limit(limit);
            }
            Box::new(synth)
        }
        Strategy::BottomUp => {
            let mut synth = BottomUpSynth::new();
            if let Some(timeout) = timeout {
                synth = synth.with_time_limit(timeout);
            }
            Box::new(synth)
        }
        Strategy::DivideConquer => {
            let mut synth = DivideConquerSynth::new();
            if let Some(timeout) = timeout {
                synth = synth.with_time_limit(timeout);
            }
            Box::new(synth)
        }
    };

    match synth.synthesize(&cfg, &examples) {
        SynthResult::Found(program) => {
            let sound = examples
                .iter()
                .all(|ex| interp::evaluate(&program, &ex.input) == ex.output);
            if !sound {
                // this firing would be a search bug, not a user error
                warn!("found program fails verification: {program}");
                return ExitCode::from(2);
            }
            let root = if args.simplify {
                canon::simplify(program.root())
            } else {
                program.root().clone()
            };
            println!("PROGRAM: {root}");
            ExitCode::SUCCESS
        }
        SynthResult::Infeasible => {
            println!("INFEASIBLE: no program can satisfy these examples");
            ExitCode::from(1)
        }
        SynthResult::GaveUp => {
            println!("NO RESULT: search budget exhausted");
            ExitCode::from(2)
        }
    }
}
