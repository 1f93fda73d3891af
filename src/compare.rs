use std::fmt;

/// First difference found between two byte sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The sequences have different lengths. Contents were not inspected.
    Length { left: usize, right: usize },
    /// Both sequences have the same length but differ at `position`.
    Byte { position: usize, left: u8, right: u8 },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mismatch::Length { left, right } => {
                write!(f, "length {} != {}", left, right)
            }
            Mismatch::Byte {
                position,
                left,
                right,
            } => write!(f, "pos: {} - {:02x}/{:02x}", position, left, right),
        }
    }
}

/// Compares two byte sequences, reporting where they first diverge.
///
/// Any storage works on either side (`Vec<u8>`, arrays, boxed slices or borrowed views), only the
/// logical sequence of values is compared.
pub fn compare<A, B>(a: &A, b: &B) -> Result<(), Mismatch>
where
    A: AsRef<[u8]> + ?Sized,
    B: AsRef<[u8]> + ?Sized,
{
    let (a, b) = (a.as_ref(), b.as_ref());
    if a.len() != b.len() {
        return Err(Mismatch::Length {
            left: a.len(),
            right: b.len(),
        });
    }

    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(position) => Err(Mismatch::Byte {
            position,
            left: a[position],
            right: b[position],
        }),
        None => Ok(()),
    }
}

/// Returns whether two byte sequences are equal.
pub fn cmp_buf<A, B>(a: &A, b: &B) -> bool
where
    A: AsRef<[u8]> + ?Sized,
    B: AsRef<[u8]> + ?Sized,
{
    compare(a, b).is_ok()
}
