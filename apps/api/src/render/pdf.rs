use bytes::Bytes;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::FontFace;
use crate::render::resume::{DrawList, DrawOp};
use crate::render::RenderError;

const REGULAR_FONT_KEY: &str = "F1";
const BOLD_FONT_KEY: &str = "F2";

fn font_key(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => REGULAR_FONT_KEY,
        FontFace::Bold => BOLD_FONT_KEY,
    }
}

/// Serializes a draw list into a PDF using the base-14 Times fonts.
pub fn write_pdf(list: &DrawList) -> Result<Bytes, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = add_font(&mut doc, FontFace::Regular);
    let bold_id = add_font(&mut doc, FontFace::Bold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT_KEY => regular_id,
            BOLD_FONT_KEY => bold_id,
        },
    });

    let (width, height) = (list.geometry.width, list.geometry.height);
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(list.pages.len());

    for ops in &list.pages {
        let content = Content {
            operations: page_operations(ops),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(Bytes::from(buffer))
}

fn add_font(doc: &mut Document, face: FontFace) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn page_operations(ops: &[DrawOp]) -> Vec<Operation> {
    let mut operations = Vec::new();
    for op in ops {
        match op {
            DrawOp::Text { text, x, y, size, face } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font_key(*face).into(), (*size).into()]));
                operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Hexadecimal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y, thickness } => {
                operations.push(Operation::new("G", vec![0.into()]));
                operations.push(Operation::new("w", vec![(*thickness).into()]));
                operations.push(Operation::new("m", vec![(*x1).into(), (*y).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), (*y).into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    operations
}

/// Encodes text for a WinAnsiEncoding font.
///
/// Latin-1 maps straight through; typographic punctuation uses its cp1252
/// slot; anything else becomes `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}
