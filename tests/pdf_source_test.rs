//! Integration tests for reading PDFs built in memory with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use docrank::{extract_outline, DocumentSource, Error, HeadingLevel, OutlineOptions, PdfSource};

/// Text drawn on a page: font resource, size, x, y, text.
type Draw = (&'static str, i64, i64, i64, &'static str);

fn build_pdf(pages: &[Vec<Draw>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => bold_id,
            "F2" => regular_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for draws in pages {
        let mut operations = Vec::new();
        for (font, size, x, y, text) in draws {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![(*font).into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn guide_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            ("F1", 24, 72, 700, "Mountain Trails Planning Guide"),
            ("F2", 12, 72, 660, "Start early in the morning."),
            ("F2", 12, 72, 646, "Carry enough water."),
        ],
        vec![
            ("F1", 18, 72, 720, "Packing for Alpine Weather"),
            ("F2", 12, 72, 690, "Layers matter."),
        ],
    ])
}

#[test]
fn test_pdf_source_reads_lines_and_blocks() {
    let pages = PdfSource::new().load_bytes(&guide_pdf()).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[1].number, 2);

    let first = &pages[0];
    assert_eq!(first.blocks.len(), 2);
    let heading = &first.blocks[0].lines[0].spans[0];
    assert_eq!(heading.text, "Mountain Trails Planning Guide");
    assert_eq!(heading.size, 24.0);
    assert_eq!(heading.font, "Helvetica-Bold");
    assert_eq!(first.blocks[1].lines.len(), 2);
    assert_eq!(first.blocks[1].lines[1].spans[0].text, "Carry enough water.");
}

#[test]
fn test_outline_from_pdf() {
    let pages = PdfSource::new().load_bytes(&guide_pdf()).unwrap();
    let bundle = extract_outline(&pages, &OutlineOptions::default());

    let outline: Vec<_> = bundle
        .outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();
    assert_eq!(
        outline,
        vec![
            (HeadingLevel::H1, "Mountain Trails Planning Guide", 1),
            (HeadingLevel::H2, "Packing for Alpine Weather", 2),
        ]
    );
    assert_eq!(bundle.page_text(2), "Packing for Alpine Weather Layers matter");
}

#[test]
fn test_pdf_source_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.pdf");
    std::fs::write(&path, guide_pdf()).unwrap();

    let bundle = docrank::extract_outline_file(&path).unwrap();
    assert_eq!(bundle.heading_count(), 2);
}

#[test]
fn test_pdf_source_rejects_garbage() {
    let source = PdfSource::new();
    assert!(matches!(
        source.load_bytes(b"hello world"),
        Err(Error::UnknownFormat(_))
    ));
    assert!(source.load_bytes(b"%PDF-1.4\nnot really a pdf").is_err());
}
