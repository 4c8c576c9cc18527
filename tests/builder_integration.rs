//! End-to-end tests for document construction and serialization

use svg_scribe::{Attrs, StyleSheet, SvgBuilder, WriteOptions};

const TIMESTAMP_PATTERN: &str = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?[+-]\d{2}:\d{2}";

fn build_sample() -> SvgBuilder {
    let mut svg = SvgBuilder::with_size(100, 60);
    svg.rect(
        4.0,
        4.0,
        92.0,
        52.0,
        Attrs::new().set("fill", "none").set("stroke", "#333"),
    )
    .unwrap();
    {
        let mut marks = svg.g(Attrs::new().set("id", "marks"));
        marks.circle(20.0, 30.0, 6.0, Attrs::new()).unwrap();
        marks.line(40.0, 10.0, 40.0, 50.0, Attrs::new()).unwrap();
    }
    svg.text("caption", 50.0, 55.0, Attrs::new().set("font_size", 9))
        .unwrap();
    svg
}

#[test]
fn sample_document_snapshot() {
    let mut out = Vec::new();
    build_sample().write_to(&mut out).unwrap();
    let doc = String::from_utf8(out).unwrap();

    insta::with_settings!({filters => vec![(TIMESTAMP_PATTERN, "[timestamp]")]}, {
        insta::assert_snapshot!(doc, @r##"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="100" height="60"><!--svg-scribe generated at [timestamp]--><rect x="4" y="4" width="92" height="52" fill="none" stroke="#333"/><g id="marks"><circle cx="20" cy="30" r="6"/><line x1="40" y1="10" x2="40" y2="50"/></g><text x="50" y="55" font-size="9">caption</text></svg>"##);
    });
}

#[test]
fn document_is_well_formed_after_nested_groups() {
    let mut svg = SvgBuilder::new();
    {
        let mut defs = svg.defs();
        defs.element("marker", Attrs::new().set("id", "dot")).unwrap();
    }
    {
        let mut outer = svg.g(Attrs::new().set("class", "layer"));
        {
            let mut inner = outer.g(Attrs::new());
            inner
                .circle_sector(50.0, 50.0, 20.0, 0.0, 2.0, Attrs::new())
                .unwrap();
        }
        outer.text("done", 1.0, 2.0, Attrs::new()).unwrap();
    }

    let mut out = Vec::new();
    svg.write_to(&mut out).unwrap();
    let doc = String::from_utf8(out).unwrap();

    // One root, and every start tag has a matching end tag.
    assert_eq!(doc.matches("<svg").count(), 1);
    assert_eq!(doc.matches("</svg>").count(), 1);
    assert_eq!(doc.matches("<g").count(), 2);
    assert_eq!(doc.matches("</g>").count(), 2);
    assert_eq!(doc.matches("<defs").count(), 1);
    assert_eq!(doc.matches("</defs>").count(), 1);
}

#[test]
fn write_creates_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.svg");

    build_sample().write(&path).unwrap();

    let doc = std::fs::read_to_string(&path).unwrap();
    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(doc.contains("svg-scribe generated at "));
    assert!(doc.ends_with("</svg>"));
}

#[test]
fn write_to_unwritable_path_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.svg");

    let err = build_sample().write(&path).unwrap_err();
    assert!(matches!(err, svg_scribe::BuildError::Io(_)));
}

#[test]
fn pretty_output_is_indented() {
    let mut out = Vec::new();
    build_sample()
        .write_with(&mut out, &WriteOptions::new().with_pretty(true))
        .unwrap();
    let doc = String::from_utf8(out).unwrap();
    assert!(doc.contains("\n  <rect"));
    assert!(doc.contains("\n    <circle"));
}

#[test]
fn custom_encoding_appears_in_declaration() {
    let mut out = Vec::new();
    SvgBuilder::new()
        .write_with(&mut out, &WriteOptions::new().with_encoding("utf-8"))
        .unwrap();
    let doc = String::from_utf8(out).unwrap();
    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
}

#[test]
fn stylesheet_presets_flow_into_shapes() {
    let sheet = StyleSheet::from_str(
        r##"
[styles.slice]
stroke = "#ffffff"
stroke_width = 2
"##,
    )
    .unwrap();

    let mut svg = SvgBuilder::new();
    svg.circle_sector(
        0.0,
        0.0,
        10.0,
        0.0,
        1.0,
        sheet.attrs("slice").unwrap().set("fill", "#2196f3"),
    )
    .unwrap();

    let root = svg.finish().unwrap();
    let path = root.child_elements().next().unwrap();
    assert_eq!(path.attr("stroke"), Some("#ffffff"));
    assert_eq!(path.attr("stroke-width"), Some("2"));
    assert_eq!(path.attr("fill"), Some("#2196f3"));
    assert!(path.attr("d").unwrap().starts_with("M0,0 "));
}

#[test]
fn escaped_text_round_trips_through_write() {
    let mut svg = SvgBuilder::new();
    svg.text("a < b & c", 0.0, 0.0, Attrs::new()).unwrap();
    let mut out = Vec::new();
    svg.write_to(&mut out).unwrap();
    let doc = String::from_utf8(out).unwrap();
    assert!(doc.contains("a &lt; b &amp; c"));
}
