use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::ast::Val;
use crate::interp::Env;
use crate::synth::Example;

impl FromStr for Example {
    type Err = String;

    /// One record of the benchmark format: `x=1, y=-2, z=3 -> 5`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (bindings, output) = line
            .split_once("->")
            .ok_or_else(|| format!("missing `->` in example record `{line}`"))?;
        let output: Val = output
            .trim()
            .parse()
            .map_err(|_| format!("bad output value `{}`", output.trim()))?;

        let mut input = Env::new();
        for binding in bindings.split(',') {
            let binding = binding.trim();
            let (name, value) = binding
                .split_once('=')
                .ok_or_else(|| format!("bad binding `{binding}`, expected `name=value`"))?;
            let value: Val = value
                .trim()
                .parse()
                .map_err(|_| format!("bad value in binding `{binding}`"))?;
            input.insert(name.trim().to_owned(), value);
        }
        Ok(Example::new(input, output))
    }
}

/// Parse a whole example listing, one record per line. Blank lines are
/// skipped; errors carry the offending line number.
pub fn parse_examples(text: &str) -> Result<Vec<Example>, String> {
    let mut examples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let example = line
            .parse()
            .map_err(|err| format!("line {}: {err}", idx + 1))?;
        examples.push(example);
    }
    Ok(examples)
}

pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<Example>, String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    parse_examples(&text).map_err(|err| format!("{}: {err}", path.display()))
}
