use sfmt::{Sfmt, SfmtParams, SFMT_19937};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1234);
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let params = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .and_then(SfmtParams::from_mexp)
        .unwrap_or(&SFMT_19937);

    let mut rng = Sfmt::with_seed(params, seed);

    println!("{}", rng.id_string());
    for _ in 0..count {
        println!("{}", rng.next_u32());
    }
}
