//! Command-line front end: divergence error accumulation and trajectory
//! traces for the double pendulum.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use dpend::prelude::*;
use dpend::{read_toml, RunConfig};

#[derive(Parser)]
#[command(name = "dpend", about = "Double pendulum chaos: fixed-step RK4 vs RK5")]
struct Cli {
    /// Optional TOML run configuration
    #[arg(long, short)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Accumulate RK4-vs-RK5 divergence over the horizon and write the
    /// absolute and relative error logs
    Error {
        /// Absolute error log
        #[arg(long, default_value = "error1.txt")]
        abs_file: PathBuf,
        /// Relative error log
        #[arg(long, default_value = "error2.txt")]
        rel_file: PathBuf,
    },
    /// Step both pendulums with one method and write a per-step trace of
    /// time, state, and bob positions
    Trace {
        /// Integration method
        #[arg(value_enum, default_value = "rk4")]
        method: Method,
        /// Trace output file
        #[arg(long, default_value = "trace.txt")]
        file: PathBuf,
        /// Number of steps
        #[arg(long, default_value_t = 1000)]
        steps: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Rk4,
    Rk5,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().format_timestamp_secs().init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            read_toml(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    match cli.mode {
        Mode::Error { abs_file, rel_file } => run_error(&config, &abs_file, &rel_file),
        Mode::Trace {
            method,
            file,
            steps,
        } => run_trace(&config, method, &file, steps),
    }
}

fn run_error(config: &RunConfig, abs_file: &Path, rel_file: &Path) -> anyhow::Result<()> {
    let pendulum = DoublePendulum::new(config.params);
    let args = DivergenceArgs::builder()
        .dt(config.dt)
        .horizon(config.horizon)
        .build();

    // Both integrators start from the first pendulum's initial conditions.
    let report = run_divergence(&pendulum, config.initial1, config.initial1, args)?;
    info!(
        "{} steps, {} derivative evaluations",
        report.nstep, report.nfev
    );

    write_samples(abs_file, &report.abs_samples)
        .with_context(|| format!("writing {}", abs_file.display()))?;
    write_samples(rel_file, &report.rel_samples)
        .with_context(|| format!("writing {}", rel_file.display()))?;

    println!("{}: absolute errors", abs_file.display());
    println!("{}: relative errors", rel_file.display());
    print_totals(abs_file, &report.abs_totals);
    print_totals(rel_file, &report.rel_totals);
    Ok(())
}

fn write_samples(path: &Path, samples: &[ErrorSample]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for sample in samples {
        writeln!(out, "{}", sample)?;
    }
    out.flush()
}

fn print_totals(path: &Path, totals: &[Float; 4]) {
    println!("total error for {}:", path.display());
    println!("  theta1: {}", totals[0]);
    println!("  theta2: {}", totals[1]);
    println!("  omega1: {}", totals[2]);
    println!("  omega2: {}", totals[3]);
}

fn run_trace(config: &RunConfig, method: Method, file: &Path, steps: usize) -> anyhow::Result<()> {
    let pendulum = DoublePendulum::new(config.params);
    let step: fn(&DoublePendulum, Float, &[Float], Float, &mut [Float]) = match method {
        Method::Rk4 => rk4_step,
        Method::Rk5 => rk5_step,
    };

    let mut out = BufWriter::new(
        File::create(file).with_context(|| format!("creating {}", file.display()))?,
    );
    writeln!(
        out,
        "# time  th1 th2 om1 om2 x1 y1 x2 y2  (pendulum 1, then pendulum 2)"
    )?;

    let mut y1 = config.initial1.to_array();
    let mut y2 = config.initial2.to_array();
    let mut yt = [0.0; 4];
    let dt = config.dt;

    for n in 0..=steps {
        let time = n as Float * dt;
        write_trace_row(&mut out, &pendulum, time, &y1, &y2)?;
        if n == steps {
            break;
        }
        // The two pendulums are independent; step them sequentially.
        step(&pendulum, time, &y1, dt, &mut yt);
        y1 = yt;
        step(&pendulum, time, &y2, dt, &mut yt);
        y2 = yt;
    }
    out.flush()?;
    info!("wrote {} rows to {}", steps + 1, file.display());
    Ok(())
}

fn write_trace_row(
    out: &mut impl std::io::Write,
    pendulum: &DoublePendulum,
    time: Float,
    y1: &[Float; 4],
    y2: &[Float; 4],
) -> std::io::Result<()> {
    write!(out, "{}", time)?;
    for y in [y1, y2] {
        let state = State::from_array(*y);
        let (x1, py1, x2, py2) = pendulum.bob_positions(&state);
        write!(
            out,
            " {} {} {} {} {} {} {} {}",
            state.theta1, state.theta2, state.omega1, state.omega2, x1, py1, x2, py2
        )?;
    }
    writeln!(out)
}
