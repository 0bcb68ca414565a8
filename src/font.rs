use crate::{
    refs::{ObjectReferences, RefType},
    standard_font::{winansi, StandardFont},
    PDFError, Pt,
};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Weight of a run of text. The layout engine only distinguishes these two.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

/// The font a span of text is set in: a style of the document's family at a size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub style: FontStyle,
    pub size: Pt,
}

impl SpanFont {
    pub fn regular(size: Pt) -> SpanFont {
        SpanFont {
            style: FontStyle::Regular,
            size,
        }
    }

    pub fn bold(size: Pt) -> SpanFont {
        SpanFont {
            style: FontStyle::Bold,
            size,
        }
    }
}

/// A parsed TrueType / OpenType font. The font is embedded in its entirety in
/// the generated PDF as a CID-keyed Type0 font, so large fonts noticeably
/// increase the size of the output.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed or cannot map unicode characters to glyphs
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let has_unicode_cmap = face
            .as_face_ref()
            .tables()
            .cmap
            .map(|cmap| cmap.subtables.into_iter().any(|table| table.is_unicode()))
            .unwrap_or(false);
        if !has_unicode_cmap {
            return Err(PDFError::MissingCmap);
        }
        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`, falling back to U+FFFD, then `?`, then .notdef
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| self.glyph_id_or_replacement(ch))
            .map(|gid| {
                scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(GlyphId(gid))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    /// Every (glyph, character) pair reachable through a unicode cmap, sorted by glyph id
    fn glyph_ids(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Write the font program and its descriptor, returning the descriptor's ref
    fn write_descriptor(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let name = name.replace(' ', "");

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let bbox = face.global_bounding_box();
        let mut descriptor = writer.font_descriptor(id);
        descriptor
            .name(Name(name.as_bytes()))
            .flags(flags)
            .bbox(pdf_writer::Rect {
                x1: bbox.x_min as f32 * scaling,
                y1: bbox.y_min as f32 * scaling,
                x2: bbox.x_max as f32 * scaling,
                y2: bbox.y_max as f32 * scaling,
            })
            .italic_angle(if face.is_italic() { -12.0 } else { 0.0 })
            .ascent(face.ascender() as f32 * scaling)
            .descent(face.descender() as f32 * scaling)
            .cap_height(
                face.capital_height()
                    .map(|h| h as f32 * scaling)
                    .unwrap_or(face.ascender() as f32 * scaling),
            )
            .stem_v(if face.is_bold() { 120.0 } else { 80.0 })
            .font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let id = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(id);
        cid_font
            .subtype(CidFontType::Type2)
            .base_font(Name(format!("F{font_index}").as_bytes()))
            .system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            })
            .font_descriptor(descriptor_id)
            .default_width(1000.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));

        // group runs of consecutive glyph ids into one width array each
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for gid in self.glyph_ids().into_keys() {
            let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => run.push(advance),
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(advance);
                }
                None => {
                    run_start = Some(gid);
                    run.push(advance);
                }
            }
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();
        cid_font.finish();

        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        for block in ids.chunks(100) {
            let _ = writeln!(map, "{} beginbfchar", block.len());
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                let _ = writeln!(map, "<{gid:04x}> <{hex}>");
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer.stream(id, compressed.as_slice()).filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        writer
            .type0_font(font_id)
            .base_font(Name(format!("F{font_index}").as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);
    }
}

/// Either a built-in standard font or an embedded font file
pub enum Typeface {
    Standard(StandardFont),
    Embedded(Font),
}

impl Typeface {
    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match self {
            Typeface::Standard(font) => font.width_of_text(text, size),
            Typeface::Embedded(font) => font.width_of_text(text, size),
        }
    }

    /// Hex-encode `text` the way this face's encoding expects, for use in a
    /// `<...> Tj` operator. Returns the number of characters that had to be
    /// substituted alongside the string.
    pub(crate) fn encode_hex(&self, text: &str) -> (String, usize) {
        let mut out = String::with_capacity(text.len() * 4);
        let mut substituted = 0;
        match self {
            Typeface::Standard(_) => {
                for ch in text.chars() {
                    let code = winansi(ch).unwrap_or_else(|| {
                        substituted += 1;
                        b'?'
                    });
                    let _ = write!(out, "{code:02x}");
                }
            }
            Typeface::Embedded(font) => {
                for ch in text.chars() {
                    let gid = font.glyph_id(ch).unwrap_or_else(|| {
                        substituted += 1;
                        font.glyph_id_or_replacement(ch)
                    });
                    let _ = write!(out, "{gid:04x}");
                }
            }
        }
        (out, substituted)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Typeface::Standard(font) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Typeface::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

/// The regular and bold faces a document is set in
pub struct FontFamily {
    pub regular: Typeface,
    pub bold: Typeface,
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::helvetica()
    }
}

impl FontFamily {
    /// Helvetica and Helvetica-Bold; nothing gets embedded
    pub fn helvetica() -> FontFamily {
        FontFamily {
            regular: Typeface::Standard(StandardFont::Helvetica),
            bold: Typeface::Standard(StandardFont::HelveticaBold),
        }
    }

    /// Embed a pair of font files
    pub fn load(regular: Vec<u8>, bold: Vec<u8>) -> Result<FontFamily, PDFError> {
        Ok(FontFamily {
            regular: Typeface::Embedded(Font::load(regular)?),
            bold: Typeface::Embedded(Font::load(bold)?),
        })
    }

    pub fn face(&self, style: FontStyle) -> &Typeface {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    /// Resource index of a style; `/F0` is regular, `/F1` bold
    pub fn index(style: FontStyle) -> usize {
        match style {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
        }
    }

    pub fn width_of_text(&self, text: &str, font: SpanFont) -> Pt {
        self.face(font.style).width_of_text(text, font.size)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        for style in [FontStyle::Regular, FontStyle::Bold] {
            self.face(style).write(refs, FontFamily::index(style), writer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_faces_encode_winansi() {
        let family = FontFamily::helvetica();
        let (hex, substituted) = family.regular.encode_hex("A•");
        assert_eq!(hex, "4195");
        assert_eq!(substituted, 0);

        let (hex, substituted) = family.bold.encode_hex("→");
        assert_eq!(hex, "3f");
        assert_eq!(substituted, 1);
    }

    #[test]
    fn family_measures_by_style() {
        let family = FontFamily::helvetica();
        let regular = family.width_of_text("Budget", SpanFont::regular(Pt(11.0)));
        let bold = family.width_of_text("Budget", SpanFont::bold(Pt(11.0)));
        assert!(bold > regular);
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(Font::load(vec![0u8; 16]).is_err());
    }
}
