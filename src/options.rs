use std::fmt;

/// Default compression level of zlib-compatible libraries (maps to level 6).
pub const DEFAULT_LEVEL: i32 = -1;

/// Largest window supported by deflate, 32 KiB.
pub const MAX_WINDOW_BITS: i32 = 15;

/// Smallest window size accepted by zlib-compatible libraries.
pub const MIN_WINDOW_BITS: i32 = 8;

/// Container format of a deflate stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Deflate data wrapped in a zlib header and Adler-32 trailer.
    Zlib,
    /// Bare deflate data without any framing.
    Raw,
}

/// Match-finding strategy, numbered like zlib's `Z_*` strategy constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Default = 0,
    Filtered = 1,
    HuffmanOnly = 2,
    Rle = 3,
    Fixed = 4,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Default,
        Strategy::Filtered,
        Strategy::HuffmanOnly,
        Strategy::Rle,
        Strategy::Fixed,
    ];
}

/// How the candidate holds bytes in memory while it works.
///
/// This is passed to every candidate call; it must never change the bytes that come out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Generic growable containers fed through callbacks or chunked streaming.
    Untyped,
    /// Fixed-width, pre-sized byte buffers.
    #[default]
    Typed,
}

impl Representation {
    /// Both modes, in the order trials are run.
    pub const ALL: [Representation; 2] = [Representation::Untyped, Representation::Typed];
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::Untyped => "untyped",
            Representation::Typed => "typed",
        })
    }
}

/// Compression parameters shared by the reference and the candidate.
///
/// `window_bits` follows the zlib convention: a negative value selects a raw deflate stream with a
/// window of `-window_bits` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    pub level: i32,
    pub window_bits: i32,
    pub strategy: Strategy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            window_bits: MAX_WINDOW_BITS,
            strategy: Strategy::Default,
        }
    }
}

impl Options {
    pub fn zlib(level: i32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn raw(level: i32) -> Self {
        Self {
            level,
            window_bits: -MAX_WINDOW_BITS,
            ..Self::default()
        }
    }

    /// Sets the window size in bits, keeping the current format.
    pub fn with_window_bits(mut self, bits: u8) -> Self {
        let bits = i32::from(bits);
        self.window_bits = match self.format() {
            Format::Zlib => bits,
            Format::Raw => -bits,
        };
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn format(&self) -> Format {
        if self.window_bits < 0 {
            Format::Raw
        } else {
            Format::Zlib
        }
    }

    /// Translates into the reference's encoding, which selects raw mode explicitly instead of
    /// through the sign of the window size.
    pub fn for_reference(&self) -> ReferenceOptions {
        ReferenceOptions {
            level: self.level,
            window_bits: self.window_bits.unsigned_abs(),
            format: self.format(),
            strategy: self.strategy,
        }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level={} windowBits={} strategy={:?}",
            self.level, self.window_bits, self.strategy
        )
    }
}

/// [`Options`] as handed to a reference stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceOptions {
    pub level: i32,
    pub window_bits: u32,
    pub format: Format,
    pub strategy: Strategy,
}

/// Every compression level from 0 to 9 with the default window and strategy.
pub fn level_sweep(format: Format) -> Vec<Options> {
    (0..=9).map(|level| with_format(level, format)).collect()
}

/// Every window size from 8 to 15 bits at the default level.
pub fn window_sweep(format: Format) -> Vec<Options> {
    (MIN_WINDOW_BITS..=MAX_WINDOW_BITS)
        .map(|bits| with_format(DEFAULT_LEVEL, format).with_window_bits(bits as u8))
        .collect()
}

/// Every strategy at the default level.
pub fn strategy_sweep(format: Format) -> Vec<Options> {
    Strategy::ALL
        .iter()
        .map(|&strategy| with_format(DEFAULT_LEVEL, format).with_strategy(strategy))
        .collect()
}

fn with_format(level: i32, format: Format) -> Options {
    match format {
        Format::Zlib => Options::zlib(level),
        Format::Raw => Options::raw(level),
    }
}
