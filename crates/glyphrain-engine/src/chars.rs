//! Character constants for the rain.

use rand::{Rng, seq::SliceRandom};

/// Glyph shown in cells no drop has written yet.
pub const BLANK: char = ' ';

/// Glyphs a drop head can write: digits, letters and a handful of symbols.
pub const GLYPHS: [char; 80] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z', '@', '#', '$', '%', '&', '*', '+', '-', '=', '?', '!', '|', '/', ';',
    '.', ',', '`', '^',
];

/// The glyph set in a random order.
pub fn shuffled_palette<R: Rng>(rng: &mut R) -> Vec<char> {
    let mut palette = GLYPHS.to_vec();
    palette.shuffle(rng);
    palette
}
