//! Streaming reference compressors.

use std::io::{self, Write};

use flate2::{
    write::{DeflateEncoder, ZlibEncoder},
    Compression,
};

use crate::options::{Format, ReferenceOptions, Strategy, DEFAULT_LEVEL, MAX_WINDOW_BITS};

/// A trusted compressor that produces output as a stream of chunks.
pub trait Reference {
    type Stream: ReferenceStream;

    /// Opens a new compression session. Options the implementation cannot honor are rejected here.
    fn open(&self, options: &ReferenceOptions) -> io::Result<Self::Stream>;
}

/// One compression session of a [`Reference`].
pub trait ReferenceStream {
    /// Feeds input to the compressor.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Signals end of input and returns every emitted chunk, in emission order.
    fn end(self) -> io::Result<Vec<Vec<u8>>>;
}

/// Records each write as a separate chunk.
#[derive(Debug, Default)]
pub struct ChunkSink {
    chunks: Vec<Vec<u8>>,
}

impl ChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_chunks(self) -> Vec<Vec<u8>> {
        self.chunks
    }
}

impl Write for ChunkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.chunks.push(buf.to_vec());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reference backed by `flate2`'s streaming encoders.
///
/// Only the parameters `flate2` exposes are supported: levels 0 to 9 (or the default level), a
/// 32 KiB window and the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flate2Reference;

pub enum Flate2Stream {
    Zlib(ZlibEncoder<ChunkSink>),
    Raw(DeflateEncoder<ChunkSink>),
}

impl Reference for Flate2Reference {
    type Stream = Flate2Stream;

    fn open(&self, options: &ReferenceOptions) -> io::Result<Flate2Stream> {
        let level = match options.level {
            DEFAULT_LEVEL => Compression::default(),
            level @ 0..=9 => Compression::new(level as u32),
            level => return Err(invalid_input(format!("unsupported level {}", level))),
        };
        if options.window_bits != MAX_WINDOW_BITS as u32 {
            return Err(invalid_input(format!(
                "unsupported window bits {}",
                options.window_bits
            )));
        }
        if options.strategy != Strategy::Default {
            return Err(invalid_input(format!(
                "unsupported strategy {:?}",
                options.strategy
            )));
        }

        Ok(match options.format {
            Format::Zlib => Flate2Stream::Zlib(ZlibEncoder::new(ChunkSink::new(), level)),
            Format::Raw => Flate2Stream::Raw(DeflateEncoder::new(ChunkSink::new(), level)),
        })
    }
}

impl ReferenceStream for Flate2Stream {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            Flate2Stream::Zlib(encoder) => encoder.write_all(data),
            Flate2Stream::Raw(encoder) => encoder.write_all(data),
        }
    }

    fn end(self) -> io::Result<Vec<Vec<u8>>> {
        let sink = match self {
            Flate2Stream::Zlib(encoder) => encoder.finish()?,
            Flate2Stream::Raw(encoder) => encoder.finish()?,
        };
        Ok(sink.into_chunks())
    }
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
