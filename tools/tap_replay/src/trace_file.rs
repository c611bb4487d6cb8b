use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use tapscope::{DetectorTraceSample, RawSample, Tap};

/// One recorded sensor delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceBatch {
    pub batch_ms: u64,
    pub samples: Vec<RawSample>,
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceBatch>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_trace(&text).with_context(|| format!("invalid trace {}", path.display()))
}

/// Parses `batch_ms x,y,z x,y,z ...` lines. Blank lines and `#` comments are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<TraceBatch>> {
    let mut batches = Vec::new();
    let mut last_ms: Option<u64> = None;
    for (line_no, line) in numbered_lines(text) {
        let mut fields = line.split_whitespace();
        let Some(ms_field) = fields.next() else {
            continue;
        };
        let batch_ms: u64 = ms_field
            .parse()
            .with_context(|| format!("line {line_no}: invalid batch_ms {ms_field:?}"))?;
        if last_ms.is_some_and(|prev| batch_ms < prev) {
            bail!("line {line_no}: batch_ms {batch_ms} goes backwards");
        }
        last_ms = Some(batch_ms);

        let samples = fields
            .map(|field| parse_sample(field).with_context(|| format!("line {line_no}")))
            .collect::<Result<Vec<_>>>()?;
        batches.push(TraceBatch { batch_ms, samples });
    }
    Ok(batches)
}

fn parse_sample(field: &str) -> Result<RawSample> {
    let axes: Vec<&str> = field.split(',').collect();
    let [x, y, z] = axes.as_slice() else {
        bail!("sample {field:?} must be x,y,z");
    };
    let axis = |value: &str, name: &str| -> Result<i16> {
        value
            .trim()
            .parse()
            .with_context(|| format!("sample {field:?}: invalid {name}"))
    };
    Ok(RawSample::new(
        axis(*x, "x")?,
        axis(*y, "y")?,
        axis(*z, "z")?,
    ))
}

pub fn tap_line(tap: &Tap) -> String {
    format!("tap,{},{},{},{}", tap.timestamp_ms, tap.strength, tap.x, tap.y)
}

pub fn trace_line(sample: &DetectorTraceSample) -> String {
    format!(
        "trace,{},{},{},{},{},{},{}",
        sample.at_ms,
        sample.state_id.as_u8(),
        sample.decision.as_u8(),
        sample.proxy,
        sample.diff,
        sample.duration,
        sample.quiet_run
    )
}

pub fn load_expected(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_expected(&text).with_context(|| format!("invalid expectation {}", path.display()))
}

/// Expected tap lines, whitespace-normalized so hand-written files compare cleanly.
pub fn parse_expected(text: &str) -> Result<Vec<String>> {
    numbered_lines(text)
        .map(|(line_no, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 5 || fields[0] != "tap" {
                bail!("line {line_no}: expected tap,ms,strength,x,y");
            }
            Ok(fields.join(","))
        })
        .collect()
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
