//! sieve — generate and screen random SpookyMix-style mixer functions,
//! emitting C benchmark code for every one that passes the avalanche
//! test.

use std::io::{self, BufWriter, Write};
use std::process;

use sieve_avalanche::test_mixer;
use sieve_codegen::{emit_mixer, emit_postamble, emit_preamble};
use sieve_mixer::{generate_random, Rng, DEFAULT_SEED};

fn parse_count() -> usize {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => 3,
        2 => match args[1].parse::<i64>() {
            Ok(n) if n > 0 => n as usize,
            _ => {
                eprintln!("error: N must be a positive integer, got {:?}", args[1]);
                eprintln!("usage: sieve [N]");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("usage: sieve [N]");
            process::exit(1);
        }
    }
}

fn driver(seed: u64, count: usize, out: &mut impl Write) -> io::Result<()> {
    let mut rng = Rng::seeded(seed);
    emit_preamble(out)?;

    let mut accepted = 0;
    while accepted < count {
        let program = generate_random(&mut rng);
        if test_mixer(&program, &mut rng).is_some() {
            emit_mixer(out, &program, accepted)?;
            accepted += 1;
        }
    }

    emit_postamble(out, count)?;
    Ok(())
}

fn main() {
    let count = parse_count();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = driver(DEFAULT_SEED, count, &mut out) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
