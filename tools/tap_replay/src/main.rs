mod trace_file;

use std::{convert::Infallible, path::PathBuf, process};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use log::LevelFilter;
use tapscope::{tap_engine::config::SamplingConfig, MotionSensor, TapSession};

use trace_file::{load_expected, load_trace, tap_line, trace_line, TraceBatch};

#[derive(Debug, Parser)]
#[command(name = "tap_replay")]
#[command(about = "Replay recorded accelerometer batches through a tap session")]
struct Cli {
    /// Trace file of `batch_ms x,y,z ...` lines.
    trace: PathBuf,
    /// File of `tap,ms,strength,x,y` lines the replay must reproduce exactly.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long, default_value_t = 144)]
    width: u16,
    #[arg(long, default_value_t = 168)]
    height: u16,
    /// Print the detector state for every sample.
    #[arg(long)]
    trace_states: bool,
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

/// Trace files stand in for the sensor service.
struct RecordedSensor;

impl MotionSensor for RecordedSensor {
    type Error = Infallible;

    fn subscribe(&mut self, _sampling: &SamplingConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn unsubscribe(&mut self) {}
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Library logs go to stderr so they never mix with the tap CSV on stdout.
    let _ = env_logger::Builder::new()
        .filter_level(cli.log_level)
        .target(env_logger::Target::Stderr)
        .try_init();

    let batches = load_trace(&cli.trace)?;
    let Replay { taps, states } = replay(&batches, cli.width, cli.height, cli.trace_states)?;

    for line in &states {
        println!("{line}");
    }
    println!("tap,ms,strength,x,y");
    for line in &taps {
        println!("{line}");
    }

    if let Some(expect_path) = cli.expect {
        let expected = load_expected(&expect_path)?;
        if taps != expected {
            eprintln!("expected taps: {}", expected.join(" "));
            eprintln!("actual taps:   {}", taps.join(" "));
            bail!("tap sequence mismatch");
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Replay {
    taps: Vec<String>,
    /// One line per sample, only with `--trace-states`.
    states: Vec<String>,
}

/// Runs every batch through a fresh session and collects the committed taps as lines.
fn replay(batches: &[TraceBatch], width: u16, height: u16, trace_states: bool) -> Result<Replay> {
    let mut sensor = RecordedSensor;
    let mut session =
        TapSession::start(&mut sensor, width, height).map_err(|err| anyhow!("{err}"))?;

    let mut out = Replay::default();
    for batch in batches {
        session.handle_batch_traced(&batch.samples, batch.batch_ms, |output| {
            if trace_states {
                out.states.push(trace_line(&output.trace));
            }
            if let Some(tap) = &output.tap {
                out.taps.push(tap_line(tap));
            }
        });
    }

    let snapshot = session.stop(&mut sensor);
    log::info!(
        "replay done batches={} samples={} taps={} shakes={}",
        snapshot.batches,
        snapshot.samples,
        snapshot.taps_committed,
        snapshot.shakes_discarded
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn fixture_reproduces_expected_taps() {
        let batches = load_trace(&fixture("two_knocks.trace")).expect("fixture parses");
        let replayed = replay(&batches, 144, 168, false).expect("replay runs");
        let expected = load_expected(&fixture("two_knocks.expect")).expect("expect parses");
        assert_eq!(replayed.taps, expected);
        assert!(replayed.states.is_empty());
    }

    #[test]
    fn trace_states_cover_every_sample_of_long_batches() {
        let batches = vec![TraceBatch {
            batch_ms: 0,
            samples: vec![tapscope::RawSample::new(0, 0, 0); 40],
        }];
        let replayed = replay(&batches, 144, 168, true).expect("replay runs");

        assert_eq!(replayed.states.len(), 40);
        assert!(replayed.states[0].starts_with("trace,0,"));
        assert!(replayed.states[39].starts_with("trace,390,"));
        assert!(replayed.taps.is_empty());
    }

    #[test]
    fn empty_display_is_an_error() {
        let err = replay(&[], 0, 168, false).expect_err("no display area");
        assert!(err.to_string().contains("no drawable area"));
    }

    #[test]
    fn cli_accepts_expectation_and_size() {
        let cli = Cli::try_parse_from([
            "tap_replay",
            "knock.trace",
            "--expect",
            "knock.expect",
            "--width",
            "200",
            "--log-level",
            "debug",
        ])
        .expect("valid args");
        assert_eq!(cli.width, 200);
        assert_eq!(cli.height, 168);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert_eq!(cli.expect, Some(PathBuf::from("knock.expect")));
    }
}
