use crate::candidate::Candidate;
use crate::compare::compare;
use crate::error::{Check, Error, Result};
use crate::fixtures::Fixtures;
use crate::options::{Options, Representation};
use crate::reference::{Reference, ReferenceStream};

/// One fixture compressed under one set of options and one representation.
#[derive(Debug, Clone, Copy)]
pub struct Trial<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    pub options: &'a Options,
    pub representation: Representation,
}

/// Lazily yields the trials for every fixture, untyped before typed.
pub fn trials<'a>(
    fixtures: &'a Fixtures,
    options: &'a Options,
) -> impl Iterator<Item = Trial<'a>> + 'a {
    fixtures.iter().flat_map(move |(name, data)| {
        Representation::ALL.into_iter().map(move |representation| Trial {
            name,
            data,
            options,
            representation,
        })
    })
}

/// Checks that `candidate` compresses the trial's fixture to the same bytes as `reference`.
///
/// The reference runs first, fed the whole fixture in one write. The candidate only runs once the
/// reference stream has ended successfully.
pub fn run_deflate_trial<R, C>(reference: &R, candidate: &C, trial: &Trial<'_>) -> Result<()>
where
    R: Reference + ?Sized,
    C: Candidate + ?Sized,
{
    let reference_options = trial.options.for_reference();
    let reference_error = |source| Error::Reference {
        fixture: trial.name.to_owned(),
        representation: trial.representation,
        source,
    };

    let mut stream = reference.open(&reference_options).map_err(reference_error)?;
    stream.write(trial.data).map_err(reference_error)?;
    let chunks = stream.end().map_err(reference_error)?;
    log::trace!(
        "{:?}: reference emitted {} chunks",
        trial.name,
        chunks.len()
    );
    let expected = chunks.concat();

    let actual = candidate
        .compress(trial.data, trial.options, trial.representation)
        .map_err(|source| Error::Candidate {
            fixture: trial.name.to_owned(),
            representation: trial.representation,
            source,
        })?;

    compare(&expected, &actual).map_err(|mismatch| {
        log::debug!(
            "{:?} ({}): reference {} bytes, candidate {} bytes, {}",
            trial.name,
            trial.representation,
            expected.len(),
            actual.len(),
            mismatch
        );
        Error::Mismatch {
            fixture: trial.name.to_owned(),
            representation: trial.representation,
            check: Check::Deflate,
            mismatch,
        }
    })
}
