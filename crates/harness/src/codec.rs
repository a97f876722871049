//! Conversions between hex reference vectors and evaluator bit vectors.
//!
//! Reference vectors are written as hex strings and decode most significant
//! bit first.  The evaluator numbers register bits the other way round, so
//! every reference vector goes through [`reverse_bits`] exactly once before it
//! is fed to or compared against the evaluator.  [`to_evaluator_order`] is the
//! one place that does this.

use bitvec::slice::BitSlice;
use ecetb_types::BitVector;

use crate::error::HarnessError;

const NIBBLE_BITS: usize = 4;

/// Decodes a hex string into `4 * hex.len()` bits, most significant bit of
/// each nibble first, nibbles in string order.
pub fn hex_to_bits(hex: &str) -> Result<BitVector, HarnessError> {
    let mut bits = BitVector::with_capacity(hex.len() * NIBBLE_BITS);
    for (pos, ch) in hex.chars().enumerate() {
        let nibble = ch.to_digit(16).ok_or_else(|| HarnessError::InvalidHex {
            what: format!("{hex:?}"),
            pos,
            ch,
        })?;
        for shift in (0..NIBBLE_BITS).rev() {
            bits.push((nibble >> shift) & 1 == 1);
        }
    }
    Ok(bits)
}

/// Encodes bits as lower-case hex, the inverse of [`hex_to_bits`].
///
/// A trailing partial nibble is padded with zeros in its low bits.
pub fn bits_to_hex(bits: &BitSlice) -> String {
    bits.chunks(NIBBLE_BITS)
        .map(|chunk| {
            let nibble = chunk
                .iter()
                .by_vals()
                .chain(std::iter::repeat(false))
                .take(NIBBLE_BITS)
                .fold(0u32, |acc, b| (acc << 1) | b as u32);
            char::from_digit(nibble, 16).unwrap_or('0')
        })
        .collect()
}

/// Mirrors the bit order between the reference-vector convention and the
/// evaluator's register convention.  Applying it twice is the identity.
pub fn reverse_bits(bits: &mut BitSlice) {
    bits.reverse();
}

/// Decodes a reference vector, checks it against the width the program
/// declares and puts it in evaluator order.
///
/// Bit 0 of the result is the least significant bit of the last hex digit,
/// so `"80"` becomes `0000_0001`.
///
/// A width disagreement is fatal: running anyway would test a different shape
/// than the program has.
pub fn to_evaluator_order(
    hex: &str,
    expected_width: usize,
    what: &str,
) -> Result<BitVector, HarnessError> {
    let mut bits = hex_to_bits(hex)?;
    if bits.len() != expected_width {
        return Err(HarnessError::WidthMismatch {
            what: what.to_owned(),
            expected: expected_width,
            actual: bits.len(),
        });
    }
    reverse_bits(&mut bits);
    Ok(bits)
}

/// Turns evaluator-order bits back into a reference hex string.
pub fn to_reference_hex(bits: &BitSlice) -> String {
    let mut bits = bits.to_bitvec();
    reverse_bits(&mut bits);
    bits_to_hex(&bits)
}

/// Renders `width` bit positions highest index first.  Positions past the end
/// of `bits` show as `-` so two vectors of different lengths stay aligned.
pub fn render_msb_first(bits: &BitSlice, width: usize) -> String {
    (0..width)
        .rev()
        .map(|idx| match bits.get(idx).map(|b| *b) {
            Some(true) => '1',
            Some(false) => '0',
            None => '-',
        })
        .collect()
}
