use crate::plan::GenerationRequest;
use clap::{CommandFactory, Parser};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "sfmt-gen")]
#[command(about = "Emit pseudo-random integers from the SFMT generator", long_about = None)]
pub struct Args {
    /// Number of values to produce
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    pub count: usize,

    /// Output width in bits (32 or 64)
    #[arg(short = 'b', long = "bit", default_value_t = 32)]
    pub bit: u32,

    /// Scalar seed (defaults to 0); negative values wrap, so -1 is 4294967295
    #[arg(short = 's', long = "seed", allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Seed from a fixed 4-word seed array instead of a scalar
    #[arg(long = "seed-array")]
    pub seed_array: bool,

    /// Draw each value with its own engine call instead of one block fill
    #[arg(short = 'e', long = "each")]
    pub each: bool,

    /// Mersenne exponent of the SFMT parameter set (607 or 19937)
    #[arg(short = 'm', long = "mexp", default_value_t = 19937)]
    pub mexp: u32,
}

impl Args {
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            count: self.count,
            width_bits: self.bit,
            // Truncating cast, like passing an int seed as uint32_t
            seed: self.seed.map(|s| s as u32),
            seed_array: self.seed_array,
            per_value: self.each,
        }
    }
}

/// Split a raw command line into the tokens `Args` understands and the
/// options it does not.
///
/// The first token (program name) is always kept. Values following a known
/// option that takes one are kept with it, so `-b 64` stays together.
/// Unknown options and stray positional tokens end up in the second list.
pub fn split_unknown_options<I>(raw: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let cmd = Args::command();
    let mut known = Vec::new();
    let mut unknown = Vec::new();

    let mut tokens = raw.into_iter();
    if let Some(program) = tokens.next() {
        known.push(program);
    }

    while let Some(token) = tokens.next() {
        let lookup = if let Some(long) = token.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            if name == "help" || name == "version" {
                Some(false)
            } else {
                cmd.get_arguments()
                    .find(|a| a.get_long() == Some(name))
                    .map(|a| a.get_action().takes_values() && !inline_value)
            }
        } else if let Some(short) = token.strip_prefix('-') {
            let mut chars = short.chars();
            match chars.next() {
                Some('h') => Some(false),
                Some(c) => cmd
                    .get_arguments()
                    .find(|a| a.get_short() == Some(c))
                    .map(|a| a.get_action().takes_values() && chars.as_str().is_empty()),
                None => None,
            }
        } else {
            None
        };

        match lookup {
            Some(needs_value) => {
                known.push(token);
                if needs_value {
                    if let Some(value) = tokens.next() {
                        known.push(value);
                    }
                }
            }
            None => unknown.push(token),
        }
    }

    (known, unknown)
}

/// Print one warning line per ignored option.
pub fn report_unknown_options<W: Write>(unknown: &[String], err: &mut W) -> io::Result<()> {
    for option in unknown {
        writeln!(err, "warning: unknown option '{}' ignored", option)?;
    }
    Ok(())
}
