//! The two base-14 faces the default theme uses. Readers ship these fonts, so
//! nothing is embedded; we only need their advance widths (from the Adobe AFM
//! files, in 1/1000 em) to measure text, and the WinAnsi code page to encode it.

use crate::units::Pt;

/// A PDF standard Type1 font
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

/// Advance widths of U+0020..=U+007E
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Width used for WinAnsi characters outside the ASCII table
const FALLBACK_WIDTH: u16 = 556;

impl StandardFont {
    /// The `/BaseFont` name
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, StandardFont::HelveticaBold)
    }

    /// Advance width of a character in 1/1000 em. Characters that WinAnsi
    /// cannot encode are drawn as `?` and measured as such.
    pub fn glyph_width(self, ch: char) -> u16 {
        let ascii = match self {
            StandardFont::Helvetica => &HELVETICA_ASCII,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_ASCII,
        };
        let bold = self.is_bold();
        match ch {
            ' '..='~' => ascii[ch as usize - 0x20],
            '\u{a0}' => ascii[0],
            '•' => 350,
            '–' | '€' => 556,
            '—' | '…' | '‰' | '™' => 1000,
            '‘' | '’' | '‚' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' | '„' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            _ if winansi(ch).is_some() => FALLBACK_WIDTH,
            _ => ascii[(b'?' - 0x20) as usize],
        }
    }

    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(self, text: &str, size: Pt) -> Pt {
        let units: u32 = text.chars().map(|ch| self.glyph_width(ch) as u32).sum();
        size * (units as f32 / 1000.0)
    }
}

/// Map a character to its WinAnsiEncoding (Windows-1252) code
pub fn winansi(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8a),
            '‹' => Some(0x8b),
            'Œ' => Some(0x8c),
            'Ž' => Some(0x8e),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9a),
            '›' => Some(0x9b),
            'œ' => Some(0x9c),
            'ž' => Some(0x9e),
            'Ÿ' => Some(0x9f),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_with_afm_widths() {
        // H=722 e=556 l=222 l=222 o=556
        let width = StandardFont::Helvetica.width_of_text("Hello", Pt(10.0));
        assert!((width.0 - 22.78).abs() < 1e-3);
    }

    #[test]
    fn bold_is_wider() {
        let regular = StandardFont::Helvetica.width_of_text("plan", Pt(11.0));
        let bold = StandardFont::HelveticaBold.width_of_text("plan", Pt(11.0));
        assert!(bold > regular);
    }

    #[test]
    fn unencodable_characters_measure_as_question_marks() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.glyph_width('漢'), font.glyph_width('?'));
        assert_eq!(winansi('漢'), None);
        assert_eq!(winansi('•'), Some(0x95));
        assert_eq!(winansi('é'), Some(0xe9));
    }
}
