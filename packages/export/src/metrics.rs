//! Glyph advances of the built-in Helvetica faces, from the Adobe AFM files,
//! in 1/1000 em. Only the printable ASCII range is tabled; everything else in
//! WinAnsi is measured as a full em so a line never comes out wider than its
//! measurement.

/// Advances of U+0020..=U+007E in Helvetica.
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Advances of U+0020..=U+007E in Helvetica-Bold.
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

const FALLBACK: u16 = 1000;

/// Characters of the WinAnsi code page outside Latin-1 (the 0x80..0x9F block).
const WIN_ANSI_EXTRA: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Advance of `c` in 1/1000 em.
pub fn glyph_advance(c: char, bold: bool) -> u16 {
    let table = if bold { &BOLD } else { &REGULAR };
    match c as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        _ => FALLBACK,
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_advance(c, bold))).sum();
    units as f32 / 1000.0 * font_size * crate::layout::PT_TO_MM
}

/// Whether the built-in fonts can draw `c`.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || WIN_ANSI_EXTRA.contains(c)
}
