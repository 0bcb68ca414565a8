use plan_pdf::{
    pagesize, render_markdown, render_markdown_to_file, Geometry, Info, LayoutOptions, Mm,
    PDFError, PdfSurface, Pt, Surface,
};

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

fn page_objects(bytes: &[u8]) -> usize {
    count(bytes, b"/Type /Page") - count(bytes, b"/Type /Pages")
}

fn plan(rows: usize) -> String {
    let mut markdown = String::from("# Growth Plan\n\n## Goals\n\n**Target:** 40% growth\n\n");
    markdown.push_str("| Week | Focus |\n|---|---|\n");
    for i in 1..=rows {
        markdown.push_str(&format!("| {i} | {} |\n", lipsum::lipsum(6)));
    }
    markdown.push_str("\n### Risks\n\n- Hiring\n  - Senior engineers\n1. Review\n");
    markdown
}

#[test]
fn writes_a_complete_pdf() {
    let document = render_markdown(&plan(5), &LayoutOptions::default()).expect("can render");
    assert!(document.bytes.starts_with(b"%PDF-"));
    assert!(count(&document.bytes, b"%%EOF") >= 1);
    assert_eq!(document.page_count, 1);
    assert_eq!(page_objects(&document.bytes), 1);
}

#[test]
fn uses_the_standard_helvetica_faces() {
    let document = render_markdown("Plain and **bold**", &LayoutOptions::default()).expect("can render");
    assert_eq!(count(&document.bytes, b"/BaseFont /Helvetica-Bold"), 1);
    assert_eq!(count(&document.bytes, b"/BaseFont /Helvetica"), 2);
    assert!(count(&document.bytes, b"/WinAnsiEncoding") >= 2);
}

#[test]
fn long_plans_span_several_pages() {
    let document = render_markdown(&plan(120), &LayoutOptions::default()).expect("can render");
    assert!(document.page_count > 1);
    assert_eq!(page_objects(&document.bytes), document.page_count);
}

#[test]
fn headings_become_an_outline() {
    let with = render_markdown(&plan(1), &LayoutOptions::default()).expect("can render");
    assert_eq!(count(&with.bytes, b"/Type /Outlines"), 1);

    let mut options = LayoutOptions::default();
    options.outline(false);
    let without = render_markdown(&plan(1), &options).expect("can render");
    assert_eq!(count(&without.bytes, b"/Type /Outlines"), 0);
}

#[test]
fn uncompressed_content_is_readable() {
    let mut options = LayoutOptions::default();
    options.compress(false);
    let document = render_markdown("Hi", &options).expect("can render");
    // "Hi" in WinAnsi
    assert_eq!(count(&document.bytes, b"<4869> Tj"), 1);
    assert_eq!(count(&document.bytes, b"/FlateDecode"), 0);
}

#[test]
fn metadata_is_written_when_given() {
    let mut info = Info::new();
    info.title("Growth Plan").author("Strategy team");
    let mut options = LayoutOptions::default();
    options.info(info).outline(false);

    let document = render_markdown("# Growth Plan", &options).expect("can render");
    assert_eq!(count(&document.bytes, b"/Title"), 1);
    assert_eq!(count(&document.bytes, b"/Author"), 1);
    assert_eq!(count(&document.bytes, b"/Creator"), 1);
}

#[test]
fn characters_outside_winansi_do_not_fail() {
    let document =
        render_markdown("Arrows → and emoji 🚀 still render", &LayoutOptions::default())
            .expect("can render");
    assert_eq!(document.page_count, 1);
}

#[test]
fn letter_paper_and_wide_margins() {
    let mut options = LayoutOptions::default();
    options.geometry(Geometry::new(pagesize::LETTER, Mm(30.0).into()).expect("valid geometry"));

    let mut surface = PdfSurface::new(&options);
    plan_pdf::render(&plan(3), &mut surface, &options);
    let page = surface.document().page(0).expect("first page");
    assert_eq!(page.media_box.x2, Pt(612.0));
    assert_eq!(page.media_box.y2, Pt(792.0));
    let left = page.text().map(|span| span.coords.0).fold(Pt(f32::MAX), Pt::min);
    assert!((left.0 - Pt::from(Mm(30.0)).0).abs() < 1e-3);
}

#[test]
fn degenerate_margins_are_rejected() {
    let result = Geometry::new(pagesize::A5, Mm(100.0).into());
    assert!(matches!(result, Err(PDFError::DegenerateGeometry { .. })));
}

#[test]
fn renders_straight_to_a_file() {
    let path = std::env::temp_dir().join(format!("plan-pdf-{}.pdf", std::process::id()));
    let summary =
        render_markdown_to_file(&plan(2), &path, &LayoutOptions::default()).expect("can render");
    let bytes = std::fs::read(&path).expect("file written");
    let _ = std::fs::remove_file(&path);

    assert_eq!(summary.page_count, 1);
    assert_eq!(summary.tables, 1);
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn surface_page_count_matches_the_document() {
    let options = LayoutOptions::default();
    let mut surface = PdfSurface::new(&options);
    let summary = plan_pdf::render(&plan(150), &mut surface, &options);
    assert_eq!(summary.page_count, surface.page_count());
    assert_eq!(surface.document().page_count(), summary.page_count);
}
