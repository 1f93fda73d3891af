//! One-shot implementations under test.

use miniz_oxide::{
    deflate::core::{
        compress, compress_to_output, create_comp_flags_from_zip_params, CompressorOxide,
        TDEFLFlush, TDEFLStatus,
    },
    inflate::{
        self,
        stream::{inflate, InflateState},
    },
    DataFormat, MZError, MZFlush, MZStatus,
};

use crate::error::CodecError;
use crate::options::{
    Format, Options, Representation, DEFAULT_LEVEL, MAX_WINDOW_BITS, MIN_WINDOW_BITS,
};

/// Size of the scratch buffer used by the untyped inflate path.
const UNTYPED_CHUNK_SIZE: usize = 16 * 1024;

/// Level that [`DEFAULT_LEVEL`] stands for. miniz would otherwise treat `-1` as a greedy level.
const RESOLVED_DEFAULT_LEVEL: i32 = 6;

/// A compression library whose output is checked for conformance.
pub trait Candidate {
    /// Compresses `data` in one call.
    fn compress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError>;

    /// Decompresses `data` in one call. `options` selects the container format.
    fn decompress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError>;
}

impl<C: Candidate + ?Sized> Candidate for &C {
    fn compress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError> {
        (**self).compress(data, options, representation)
    }

    fn decompress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError> {
        (**self).decompress(data, options, representation)
    }
}

/// Candidate backed by the `miniz_oxide` compressor and inflater.
///
/// [`Representation::Typed`] compresses into a pre-sized output slice and inflates with
/// `decompress_to_vec*`. [`Representation::Untyped`] collects compressor output through a
/// callback and inflates in fixed chunks appended to a growable buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinizCandidate;

impl MinizCandidate {
    fn flags(options: &Options) -> Result<u32, CodecError> {
        if !(-1..=10).contains(&options.level) {
            return Err(CodecError::InvalidOptions(format!(
                "unsupported level {}",
                options.level
            )));
        }
        check_window_bits(options)?;
        let level = match options.level {
            DEFAULT_LEVEL => RESOLVED_DEFAULT_LEVEL,
            level => level,
        };
        Ok(create_comp_flags_from_zip_params(
            level,
            options.window_bits,
            options.strategy as i32,
        ))
    }

    fn compress_typed(flags: u32, mut input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut compressor = CompressorOxide::new(flags);
        let mut output = vec![0; (input.len() / 2).max(2)];
        let mut out_pos = 0;

        loop {
            let (status, bytes_in, bytes_out) = compress(
                &mut compressor,
                input,
                &mut output[out_pos..],
                TDEFLFlush::Finish,
            );
            out_pos += bytes_out;

            match status {
                TDEFLStatus::Done => {
                    output.truncate(out_pos);
                    return Ok(output);
                }
                TDEFLStatus::Okay => {
                    input = &input[bytes_in..];
                    if output.len() - out_pos < 30 {
                        output.resize(output.len() * 2, 0);
                    }
                }
                status => {
                    return Err(CodecError::Compress(format!(
                        "unexpected status {:?}",
                        status
                    )))
                }
            }
        }
    }

    fn compress_untyped(flags: u32, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut compressor = CompressorOxide::new(flags);
        let mut output = Vec::new();

        let (status, bytes_in) =
            compress_to_output(&mut compressor, input, TDEFLFlush::Finish, |chunk| {
                output.extend_from_slice(chunk);
                true
            });

        match status {
            TDEFLStatus::Done if bytes_in == input.len() => Ok(output),
            status => Err(CodecError::Compress(format!(
                "unexpected status {:?} after {} of {} bytes",
                status,
                bytes_in,
                input.len()
            ))),
        }
    }

    fn decompress_untyped(format: Format, mut input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut state = InflateState::new_boxed(match format {
            Format::Zlib => DataFormat::Zlib,
            Format::Raw => DataFormat::Raw,
        });
        let mut chunk = vec![0; UNTYPED_CHUNK_SIZE];
        let mut output = Vec::new();

        loop {
            let result = inflate(&mut state, input, &mut chunk, MZFlush::None);
            input = &input[result.bytes_consumed..];
            output.extend_from_slice(&chunk[..result.bytes_written]);

            let progress = result.bytes_consumed > 0 || result.bytes_written > 0;
            match result.status {
                Ok(MZStatus::StreamEnd) => return Ok(output),
                Ok(MZStatus::Ok) | Err(MZError::Buf) if progress => {}
                Ok(MZStatus::Ok) | Err(MZError::Buf) => {
                    return Err(CodecError::CorruptData(if input.is_empty() {
                        "unexpected end of input".to_owned()
                    } else {
                        "cannot make progress".to_owned()
                    }))
                }
                Ok(MZStatus::NeedDict) => {
                    return Err(CodecError::CorruptData(
                        "stream requires a preset dictionary".to_owned(),
                    ))
                }
                Err(err) => return Err(CodecError::CorruptData(format!("{:?}", err))),
            }
        }
    }
}

impl Candidate for MinizCandidate {
    fn compress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError> {
        let flags = Self::flags(options)?;
        match representation {
            Representation::Typed => Self::compress_typed(flags, data),
            Representation::Untyped => Self::compress_untyped(flags, data),
        }
    }

    fn decompress(
        &self,
        data: &[u8],
        options: &Options,
        representation: Representation,
    ) -> Result<Vec<u8>, CodecError> {
        check_window_bits(options)?;
        let format = options.format();
        match representation {
            Representation::Typed => match format {
                Format::Zlib => inflate::decompress_to_vec_zlib(data),
                Format::Raw => inflate::decompress_to_vec(data),
            }
            .map_err(|err| CodecError::CorruptData(format!("{:?}", err.status))),
            Representation::Untyped => Self::decompress_untyped(format, data),
        }
    }
}

fn check_window_bits(options: &Options) -> Result<(), CodecError> {
    let bits = options.window_bits.unsigned_abs();
    if (MIN_WINDOW_BITS as u32..=MAX_WINDOW_BITS as u32).contains(&bits) {
        Ok(())
    } else {
        Err(CodecError::InvalidOptions(format!(
            "unsupported window bits {}",
            options.window_bits
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Strategy;
    use rand::Rng;

    fn roundtrip(data: &[u8], options: &Options) {
        for representation in Representation::ALL {
            let compressed = MinizCandidate
                .compress(data, options, representation)
                .unwrap();
            for inflate_representation in Representation::ALL {
                let decompressed = MinizCandidate
                    .decompress(&compressed, options, inflate_representation)
                    .unwrap();
                assert_eq!(&decompressed, data, "{} {}", options, representation);
            }
        }
    }

    #[test]
    fn it_works() {
        roundtrip(b"Hello world!", &Options::default());
        roundtrip(b"Hello world!", &Options::raw(1));
    }

    #[test]
    fn empty() {
        roundtrip(b"", &Options::zlib(6));
        roundtrip(b"", &Options::raw(0));
    }

    #[test]
    fn constant() {
        for strategy in Strategy::ALL {
            let options = Options::zlib(9).with_strategy(strategy);
            roundtrip(&vec![0; 2048], &options);
            roundtrip(&vec![5; 2048], &options);
            roundtrip(&vec![128; 2048], &options);
            roundtrip(&vec![254; 2048], &options);
        }
    }

    #[test]
    fn random() {
        let mut rng = rand::thread_rng();
        let mut data = vec![0; 100_000];
        for level in 0..=10 {
            for byte in &mut data {
                *byte = rng.gen();
            }
            roundtrip(&data, &Options::zlib(level));
        }
    }

    #[test]
    fn representations_agree() {
        let mut rng = rand::thread_rng();
        let data: Vec<u8> = (0..50_000).map(|_| rng.gen_range(0..16)).collect();
        for options in [Options::zlib(1), Options::zlib(6), Options::raw(9)] {
            let typed = MinizCandidate
                .compress(&data, &options, Representation::Typed)
                .unwrap();
            let untyped = MinizCandidate
                .compress(&data, &options, Representation::Untyped)
                .unwrap();
            assert_eq!(typed, untyped, "{}", options);
        }
    }

    #[test]
    fn default_level_is_six() {
        let data = b"Hello world! Hello world! Hello world!".repeat(50);
        for representation in Representation::ALL {
            let default = MinizCandidate
                .compress(&data, &Options::default(), representation)
                .unwrap();
            let six = MinizCandidate
                .compress(&data, &Options::zlib(6), representation)
                .unwrap();
            assert_eq!(default, six);
        }
    }

    #[test]
    fn invalid_options() {
        let data = b"data";
        for options in [
            Options::zlib(11),
            Options::zlib(-2),
            Options::zlib(6).with_window_bits(7),
            Options::raw(6).with_window_bits(16),
            Options {
                window_bits: i32::MIN,
                ..Options::default()
            },
        ] {
            assert!(matches!(
                MinizCandidate.compress(data, &options, Representation::Typed),
                Err(CodecError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn corrupt_input() {
        let mut compressed = MinizCandidate
            .compress(&vec![3; 1000], &Options::zlib(6), Representation::Typed)
            .unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xff;

        for representation in Representation::ALL {
            assert!(matches!(
                MinizCandidate.decompress(&compressed, &Options::zlib(6), representation),
                Err(CodecError::CorruptData(_))
            ));
        }
    }

    #[test]
    fn truncated_input() {
        let compressed = MinizCandidate
            .compress(b"Hello world! Hello world!", &Options::raw(6), Representation::Typed)
            .unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        for representation in Representation::ALL {
            assert!(MinizCandidate
                .decompress(truncated, &Options::raw(6), representation)
                .is_err());
        }
    }
}
