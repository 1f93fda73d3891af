#![no_main]
use deflate_conformance::{run_inflate_round_trip, Fixtures, MinizCandidate, Options, Strategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, bool, Vec<u8>)| {
    let (level, strategy, raw, data) = input;
    let level = i32::from(level % 11);
    let options = if raw {
        Options::raw(level)
    } else {
        Options::zlib(level)
    }
    .with_strategy(Strategy::ALL[strategy as usize % Strategy::ALL.len()]);

    let samples: Fixtures = [("fuzz", data)].into_iter().collect();
    if let Err(err) = run_inflate_round_trip(&MinizCandidate, &samples, &options) {
        panic!("{} with {}", err, options);
    }
});
