//! Whole-corpus conformance runs.
//!
//! Both suites stop at the first failing trial and return its error; nothing after it runs.

use simd_adler32::Adler32;

use crate::candidate::Candidate;
use crate::compare::compare;
use crate::error::{Check, Error, Result};
use crate::fixtures::Fixtures;
use crate::options::{Format, Options, Representation};
use crate::reference::Reference;
use crate::trial::{run_deflate_trial, trials};

/// Compresses every fixture with both `reference` and `candidate` and requires identical output.
///
/// Each fixture is tried untyped, then typed, before moving on to the next fixture.
pub fn run_deflate_conformance<R, C>(
    reference: &R,
    candidate: &C,
    samples: &Fixtures,
    options: &Options,
) -> Result<()>
where
    R: Reference + ?Sized,
    C: Candidate + ?Sized,
{
    let mut count = 0;
    for trial in trials(samples, options) {
        log::debug!(
            "deflate {:?} ({}) with {}",
            trial.name,
            trial.representation,
            options
        );
        run_deflate_trial(reference, candidate, &trial)?;
        count += 1;
    }

    log::info!("deflate conformance: {} trials passed ({})", count, options);
    Ok(())
}

/// Compresses every fixture with `candidate` and requires that decompressing gives it back.
///
/// Compression uses the default representation; the result is then decompressed untyped and
/// typed. Zlib streams must also end with the Adler-32 checksum of the fixture.
pub fn run_inflate_round_trip<C>(candidate: &C, samples: &Fixtures, options: &Options) -> Result<()>
where
    C: Candidate + ?Sized,
{
    for (name, data) in samples {
        let candidate_error = |representation, source| Error::Candidate {
            fixture: name.to_owned(),
            representation,
            source,
        };
        let mismatch_error = |representation, check, mismatch| Error::Mismatch {
            fixture: name.to_owned(),
            representation,
            check,
            mismatch,
        };

        let compressed = candidate
            .compress(data, options, Representation::default())
            .map_err(|source| candidate_error(Representation::default(), source))?;

        if options.format() == Format::Zlib {
            let mut checksum = Adler32::new();
            checksum.write(data);
            let trailer = &compressed[compressed.len().saturating_sub(4)..];
            compare(&checksum.finish().to_be_bytes(), trailer).map_err(|mismatch| {
                mismatch_error(Representation::default(), Check::Checksum, mismatch)
            })?;
        }

        for representation in Representation::ALL {
            log::debug!("inflate {:?} ({}) with {}", name, representation, options);
            let inflated = candidate
                .decompress(&compressed, options, representation)
                .map_err(|source| candidate_error(representation, source))?;
            compare(&inflated, data).map_err(|mismatch| {
                log::debug!("{:?} ({}): {}", name, representation, mismatch);
                mismatch_error(representation, Check::Inflate, mismatch)
            })?;
        }
    }

    log::info!(
        "inflate round trip: {} fixtures passed ({})",
        samples.len(),
        options
    );
    Ok(())
}
