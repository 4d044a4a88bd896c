use crate::refs::{ObjectReferences, RefType};
use crate::typeface::{FontMetrics, Typeface};
use crate::{OverlapTextError, Pt};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A parsed TTF or OTF font. Cloning is cheap; clones share the parsed face.
///
/// When a font is added to a [`Document`](crate::Document) it is embedded in its
/// entirety, so large fonts will dramatically increase the size of the PDF.
#[derive(Clone)]
pub struct Font {
    face: Arc<OwnedFace>,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("glyphs", &self.face().number_of_glyphs())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if it could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, OverlapTextError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: Arc::new(face),
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Look up a name table entry, e.g. the full name or the family
    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, or `"Unnamed"` if it has none
    pub fn name(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own glyph, else U+FFFD, else `?`, else the
    /// `.notdef` glyph
    pub fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Every glyph reachable from a unicode cmap subtable, with the first
    /// character that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let (Ok(ch), Some(gid)) = (char::try_from(codepoint), subtable.glyph_index(codepoint))
                else {
                    return;
                };
                if gid.0 > 0 {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    /// Horizontal advance of every mapped glyph, in font units
    fn glyph_advances(&self) -> BTreeMap<u16, u16> {
        self.glyph_chars()
            .into_keys()
            .filter_map(|gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance))
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        let font_ref = refs.gen(RefType::Font(index));
        let cid_font_ref = self.write_cid_font(refs, index, writer);
        let to_unicode_ref = self.write_to_unicode(refs, index, writer);

        let mut font = writer.type0_font(font_ref);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_ref);
        font.to_unicode(to_unicode_ref);
    }

    fn write_cid_font(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_ref = self.write_descriptor(refs, index, writer);
        let id = refs.gen(RefType::CidFont(index));

        let scaling = 1000.0 / self.face().units_per_em() as f32;
        let advances = self.glyph_advances();

        // the most common advance becomes the default width
        let mut counts: HashMap<u16, usize> = HashMap::new();
        for advance in advances.values() {
            *counts.entry(*advance).or_insert(0) += 1;
        }
        let default_width = counts
            .into_iter()
            .max_by_key(|&(advance, count)| (count, advance))
            .map(|(advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_ref);
        cid_font.default_width(default_width);

        // widths for runs of consecutive glyph ids
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, &advance) in advances.iter() {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => {}
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
                None => run_start = Some(gid),
            }
            run.push(advance as f32 * scaling);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let data_ref = refs.gen(RefType::FontData(index));
        writer
            .stream(data_ref, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let advances = self.glyph_advances();
        let max_width = advances.values().copied().max().unwrap_or_default() as f32;
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.values().map(|&w| w as f32).sum::<f32>() / advances.len() as f32
        };
        let bbox = face.global_bounding_box();

        let id = refs.gen(RefType::FontDescriptor(index));
        let name = self.name();
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * scaling,
            bbox.y_min as f32 * scaling,
            bbox.x_max as f32 * scaling,
            bbox.y_max as f32 * scaling,
        ));
        descriptor.italic_angle(face.tables().post.map(|post| post.italic_angle).unwrap_or(0.0));
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        // TODO: estimate the stem width from the weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width * scaling);
        descriptor.missing_width(max_width * scaling);
        descriptor.font_file2(data_ref);

        id
    }

    /// A ToUnicode CMap so that text in the PDF can be searched and copied
    fn write_to_unicode(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let glyphs: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        for block in glyphs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

impl Typeface for Font {
    fn metrics(&self, size: Pt) -> FontMetrics {
        let scaling = self.scaling(size);
        FontMetrics {
            ascent: scaling * self.face().ascender() as f32,
            descent: scaling * self.face().descender() as f32,
            leading: scaling * self.face().line_gap() as f32,
        }
    }

    fn advance(&self, ch: char, size: Pt) -> Pt {
        let gid = GlyphId(self.glyph_or_replacement(ch));
        self.scaling(size) * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32
    }
}
