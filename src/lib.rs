//! Differential conformance harness for deflate implementations.
//!
//! Compresses a corpus of fixture files with a trusted streaming [`Reference`] and with a
//! [`Candidate`] under test, and requires byte-for-byte identical output. A second suite checks
//! that the candidate decompresses its own output back to the original fixture.
//!
//! Every candidate call takes a [`Representation`] saying how the candidate should hold bytes in
//! memory. Trials cover both representations; neither may change the output.
//!
//! ```no_run
//! use deflate_conformance::{
//!     load_fixtures, run_deflate_conformance, run_inflate_round_trip, Flate2Reference,
//!     MinizCandidate, Options,
//! };
//!
//! let samples = load_fixtures("tests/fixtures")?;
//! for options in [Options::zlib(6), Options::raw(9)] {
//!     run_deflate_conformance(&Flate2Reference, &MinizCandidate, &samples, &options)?;
//!     run_inflate_round_trip(&MinizCandidate, &samples, &options)?;
//! }
//! # Ok::<(), deflate_conformance::Error>(())
//! ```

mod candidate;
mod compare;
mod error;
mod fixtures;
mod options;
mod reference;
mod suite;
mod trial;

pub use candidate::{Candidate, MinizCandidate};
pub use compare::{cmp_buf, compare, Mismatch};
pub use error::{Check, CodecError, Error, Result};
pub use fixtures::{default_dir, load_fixtures, Fixtures, Iter, FIXTURES_ENV, SKIP_PREFIX};
pub use options::{
    level_sweep, strategy_sweep, window_sweep, Format, Options, ReferenceOptions, Representation,
    Strategy, DEFAULT_LEVEL, MAX_WINDOW_BITS, MIN_WINDOW_BITS,
};
pub use reference::{ChunkSink, Flate2Reference, Flate2Stream, Reference, ReferenceStream};
pub use suite::{run_deflate_conformance, run_inflate_round_trip};
pub use trial::{run_deflate_trial, trials, Trial};
