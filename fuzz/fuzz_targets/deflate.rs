#![no_main]
use deflate_conformance::{
    run_deflate_trial, Flate2Reference, MinizCandidate, Options, Representation, Trial,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, bool, Vec<u8>)| {
    let (level, raw, data) = input;
    let level = i32::from(level % 10);
    let options = if raw {
        Options::raw(level)
    } else {
        Options::zlib(level)
    };

    for representation in Representation::ALL {
        let trial = Trial {
            name: "fuzz",
            data: &data,
            options: &options,
            representation,
        };
        if let Err(err) = run_deflate_trial(&Flate2Reference, &MinizCandidate, &trial) {
            panic!("{} with {}", err, options);
        }
    }
});
