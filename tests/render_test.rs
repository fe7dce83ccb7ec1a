//! End-to-end CCXML → LaTeX tests.

use std::fs;

use proptest::prelude::*;

use crossprint::{
    Cell, Crossword, Error, LatexRenderer, RenderConfig, ccxml, latex, xml_to_latex,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> Vec<u8> {
    let path = format!("{}/{}", FIXTURES_DIR, name);
    fs::read(&path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

fn render_fixture(name: &str) -> String {
    let xw = ccxml::parse(&fixture(name)).expect("fixture should parse");
    latex::render(&xw).expect("fixture should render")
}

// ============================================================================
// Whole documents
// ============================================================================

#[test]
fn test_render_cat_document() {
    let expected = "\
\\documentclass{crossword}
\\begin{document}
\\title{Crossword}
\\maketitle
\\renewcommand\\PuzzleUnitlength{0.8cm}

\\begin{Puzzle}{3}{2}%
|[1]C  |A     |*     |.
|T     |S     |O     |.
\\end{Puzzle}

\\begin{multicols}{4}
\\section*{Across}

\\begin{compactitem}
\\item[1]{Feline (3)}
\\end{compactitem}
\\end{multicols}

\\end{document}
";
    assert_eq!(render_fixture("cat.xml"), expected);
}

#[test]
fn test_render_daily_metadata() {
    let tex = render_fixture("daily.xml");
    assert!(tex.contains("\\title{Daily Quick \u{2116} 42}\n\\author{Ann O\u{2019}Nymous}\n\\maketitle\n"));
}

#[test]
fn test_render_daily_grid() {
    let tex = render_fixture("daily.xml");
    let expected_rows = [
        "|[1]S  |H     |[2]O  |E     |[3]S  |.",
        "|T     |*     |A     |*     |H     |.",
        "|[4]A  |L     |T     |O     |[5]E  |.",
        "|R     |*     |E     |*     |E     |.",
        "|[6]E  |A     |T     |S     |T     |.",
    ];
    let start = tex.find("\\begin{Puzzle}{5}{5}%\n").expect("puzzle environment");
    let body: Vec<&str> = tex[start..].lines().skip(1).take(5).collect();
    assert_eq!(body, expected_rows);
}

#[test]
fn test_render_daily_clues_are_escaped() {
    let tex = render_fixture("daily.xml");

    assert!(tex.contains("\\section*{Across}\n"));
    assert!(tex.contains("\\section*{Down}\n"));
    assert!(tex.contains("\\item[1]{Footwear \\& laces (5)}\n"));
    assert!(tex.contains(
        "\\item[4]{\u{201C}Upward\u{201D} \\& onward, 50\\% of the way (5)}\n"
    ));
    assert!(tex.contains("\\item[1]{Look hard at \\$tars (5)}\n"));
    assert!(tex.contains("\\item[2]{It\u{2019}s a \\#1 hit (2,3)}\n"));
    assert!(tex.contains("\\item[3]{She\\_et}\n"));
}

#[test]
fn test_groups_render_in_document_order() {
    let tex = render_fixture("daily.xml");
    let across = tex.find("\\section*{Across}").unwrap();
    let down = tex.find("\\section*{Down}").unwrap();
    assert!(across < down);
}

#[test]
fn test_render_unsolved_grid() {
    let tex = render_fixture("unsolved.xml");
    assert!(tex.contains("|[1]   |      |.\n|      |*     |.\n"), "{tex}");
    assert!(tex.contains("\\item[1]{Exist}\n"));
    assert!(tex.contains("\\item[1]{Exist (2)}\n"));
}

#[test]
fn test_blank_config_hides_solutions() {
    let config = RenderConfig {
        show_solution: false,
        ..RenderConfig::default()
    };
    let tex = xml_to_latex(&fixture("cat.xml"), &config).unwrap();
    assert!(tex.contains("|[1]   |      |*     |.\n|      |      |      |.\n"), "{tex}");
}

#[test]
fn test_straight_quotes_config() {
    let config = RenderConfig {
        smart_quotes: false,
        ..RenderConfig::default()
    };
    let tex = xml_to_latex(&fixture("daily.xml"), &config).unwrap();
    assert!(tex.contains("\\author{Ann O'Nymous}"));
    assert!(tex.contains("\\item[2]{It's a \\#1 hit (2,3)}"));
}

#[test]
fn test_blank_format_renders_without_suffix() {
    let text = String::from_utf8(fixture("cat.xml")).unwrap();
    let blank = text.replace(r#"format="(3)""#, r#"format="""#);
    let tex = xml_to_latex(blank.as_bytes(), &RenderConfig::default()).unwrap();
    assert!(tex.contains("\\item[1]{Feline}\n"), "{tex}");
}

#[test]
fn test_render_is_deterministic() {
    assert_eq!(render_fixture("daily.xml"), render_fixture("daily.xml"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_malformed_input_produces_no_output() {
    let err = xml_to_latex(&fixture("malformed.xml"), &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::XmlSyntax { .. }), "got {err}");
}

#[test]
fn test_empty_grid_cannot_be_sized() {
    let xw = Crossword::new(0, 0, vec![], vec![]).unwrap();
    let err = latex::render(&xw).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "got {err}");
}

// ============================================================================
// File output
// ============================================================================

#[test]
fn test_write_tex_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.tex");

    let tex = xml_to_latex(&fixture("cat.xml"), &RenderConfig::default()).unwrap();
    fs::write(&path, &tex).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, tex);
    assert!(written.ends_with("\\end{document}\n"));
}

// ============================================================================
// Properties
// ============================================================================

fn grid_of(width: u32, height: u32) -> Crossword {
    let row: Vec<Cell> = (0..width)
        .map(|x| {
            if x % 3 == 2 {
                Cell::block()
            } else {
                Cell::letter().with_solution("W")
            }
        })
        .collect();
    let grid = vec![row; height as usize];
    Crossword::new(width, height, grid, vec![]).unwrap()
}

proptest! {
    #[test]
    fn prop_grid_has_one_line_per_row(width in 1u32..30, height in 1u32..30) {
        let xw = grid_of(width, height);
        let grid = LatexRenderer::new().render_grid(&xw);
        let lines: Vec<&str> = grid.lines().collect();

        prop_assert_eq!(lines.len(), height as usize + 2);
        let header = format!("\\begin{{Puzzle}}{{{}}}{{{}}}%", width, height);
        prop_assert_eq!(lines[0], header.as_str());
        for row in &lines[1..=height as usize] {
            prop_assert_eq!(row.len(), width as usize * 7 + 2);
            prop_assert!(row.ends_with("|."));
        }
    }

    #[test]
    fn prop_printed_grid_fits_the_page(height in 1u32..200) {
        let size = latex::cell_size(height, latex::DEFAULT_CELL_SIZE, latex::MAX_GRID_HEIGHT).unwrap();
        prop_assert!(size <= latex::DEFAULT_CELL_SIZE);
        prop_assert!(size * f64::from(height) <= latex::MAX_GRID_HEIGHT + 1e-9);
    }
}
