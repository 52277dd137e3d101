//! Categorical colour schemes (ColorBrewer / d3) used by the figures.

use plotters::style::RGBColor;

pub const PASTEL1: &[RGBColor] = &[
    RGBColor(0xfb, 0xb4, 0xae),
    RGBColor(0xb3, 0xcd, 0xe3),
    RGBColor(0xcc, 0xeb, 0xc5),
    RGBColor(0xde, 0xcb, 0xe4),
    RGBColor(0xfe, 0xd9, 0xa6),
    RGBColor(0xff, 0xff, 0xcc),
    RGBColor(0xe5, 0xd8, 0xbd),
    RGBColor(0xfd, 0xda, 0xec),
    RGBColor(0xf2, 0xf2, 0xf2),
];

pub const SET1: &[RGBColor] = &[
    RGBColor(0xe4, 0x1a, 0x1c),
    RGBColor(0x37, 0x7e, 0xb8),
    RGBColor(0x4d, 0xaf, 0x4a),
    RGBColor(0x98, 0x4e, 0xa3),
    RGBColor(0xff, 0x7f, 0x00),
    RGBColor(0xff, 0xff, 0x33),
    RGBColor(0xa6, 0x56, 0x28),
    RGBColor(0xf7, 0x81, 0xbf),
    RGBColor(0x99, 0x99, 0x99),
];

pub const CATEGORY20B: &[RGBColor] = &[
    RGBColor(0x39, 0x3b, 0x79),
    RGBColor(0x52, 0x54, 0xa3),
    RGBColor(0x6b, 0x6e, 0xcf),
    RGBColor(0x9c, 0x9e, 0xde),
    RGBColor(0x63, 0x79, 0x39),
    RGBColor(0x8c, 0xa2, 0x52),
    RGBColor(0xb5, 0xcf, 0x6b),
    RGBColor(0xce, 0xdb, 0x9c),
    RGBColor(0x8c, 0x6d, 0x31),
    RGBColor(0xbd, 0x9e, 0x39),
    RGBColor(0xe7, 0xba, 0x52),
    RGBColor(0xe7, 0xcb, 0x94),
    RGBColor(0x84, 0x3c, 0x39),
    RGBColor(0xad, 0x49, 0x4a),
    RGBColor(0xd6, 0x61, 0x6b),
    RGBColor(0xe7, 0x96, 0x9c),
    RGBColor(0x7b, 0x41, 0x73),
    RGBColor(0xa5, 0x51, 0x94),
    RGBColor(0xce, 0x6d, 0xbd),
    RGBColor(0xde, 0x9e, 0xd6),
];

/// Reference box outline around centromeres.
pub const CENTROMERE_GREY: RGBColor = RGBColor(128, 128, 128);

/// Colour for category `index`, wrapping around once the scheme is exhausted.
pub fn pick(palette: &[RGBColor], index: usize) -> RGBColor {
    if palette.is_empty() {
        return RGBColor(128, 128, 128);
    }
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_wrap_around_the_scheme() {
        assert_eq!(pick(SET1, 0), pick(SET1, SET1.len()));
        assert_eq!(pick(CATEGORY20B, 21), CATEGORY20B[1]);
        assert_eq!(pick(&[], 3), RGBColor(128, 128, 128));
    }
}
