//! D8 flow direction codes (power-of-two encoding)
//!
//! Each cell holds one of eight codes naming the neighbor it drains into:
//! ```text
//!   32  64  128
//!   16   0    1
//!    8   4    2
//! ```
//! 0 = sink (no outflow). Any other value, including the nodata sentinel,
//! also has no outflow.

/// Sentinel for nodata pixels, distinguishable from all direction codes.
pub const NODATA: u8 = u8::MAX;

/// The eight direction codes in the fixed enumeration order
/// E, SE, S, SW, W, NW, N, NE.
///
/// This order is the tie-break order of the sequential algorithms:
/// upstream neighbors are enumerated code by code, so the neighbor
/// draining east is always seen before the neighbor draining west.
pub const CODES: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Offsets matching [`CODES`]: (row_offset, col_offset)
pub const OFFSETS: [(isize, isize); 8] = [
    (0, 1),   // 1: E
    (1, 1),   // 2: SE
    (1, 0),   // 4: S
    (1, -1),  // 8: SW
    (0, -1),  // 16: W
    (-1, -1), // 32: NW
    (-1, 0),  // 64: N
    (-1, 1),  // 128: NE
];

/// The (row, col) offset a cell holding `code` drains along,
/// or `None` for sinks, nodata and malformed codes.
pub fn delta(code: u8) -> Option<(isize, isize)> {
    match code {
        1 => Some((0, 1)),
        2 => Some((1, 1)),
        4 => Some((1, 0)),
        8 => Some((1, -1)),
        16 => Some((0, -1)),
        32 => Some((-1, -1)),
        64 => Some((-1, 0)),
        128 => Some((-1, 1)),
        _ => None,
    }
}

/// Whether `value` is one of the eight direction codes.
pub fn is_code(value: u8) -> bool {
    delta(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_offsets_agree() {
        for (i, &code) in CODES.iter().enumerate() {
            assert_eq!(delta(code), Some(OFFSETS[i]));
        }
    }

    #[test]
    fn test_non_codes_have_no_delta() {
        for value in [0u8, 3, 5, 7, 9, 100, 129, NODATA] {
            assert_eq!(delta(value), None, "value {} should not drain", value);
        }
    }

    #[test]
    fn test_enumeration_order_starts_east() {
        assert_eq!(CODES[0], 1);
        assert_eq!(OFFSETS[0], (0, 1));
        assert_eq!(CODES[7], 128);
    }
}
