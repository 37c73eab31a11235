use clap::Parser;
use env_logger::Env;
use log::debug;
use sfmt::Sfmt;
use sfmt_gen::{
    engine_params, min_array_size, report_unknown_options, resolve, run, split_unknown_options,
    Args, GenError,
};
use std::io::{self, BufWriter, Write};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let (known, unknown) = split_unknown_options(std::env::args());
    // Best effort: a closed stderr must not stop generation
    let _ = report_unknown_options(&unknown, &mut io::stderr());
    let args = Args::parse_from(known);

    if let Err(e) = generate(&args) {
        if e.is_capacity() {
            eprintln!("error: {} (computed/required words)", e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}

fn generate(args: &Args) -> Result<(), GenError> {
    let params = engine_params(args.mexp)?;
    let plan = resolve(&args.to_request(), |w| min_array_size(params, w))?;
    debug!("resolved plan: {:?}", plan);

    let mut engine = Sfmt::new(params);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let emitted = run(&plan, &mut engine, &mut out)?;
    out.flush()?;

    debug!("emitted {} values", emitted);
    Ok(())
}
