mod common;

use assert2::{check, let_assert};
use common::{FIXTURE_ENTRIES, TempWorkspace, fixture_index, fixture_path, fixture_raw};
use documenter_search_mcp::{
    Category, DocEntry, Envelope, LoadError, MalformedReason, ScriptVariable, SearchIndex,
};
use rstest::rstest;

// --- Loading the shipped index ---

#[rstest]
fn loads_every_entry(fixture_index: SearchIndex) {
    check!(fixture_index.len() == FIXTURE_ENTRIES);
    check!(fixture_index.envelope() == &Envelope::Script(ScriptVariable::default()));
}

#[rstest]
fn first_entry_is_api_section(fixture_index: SearchIndex) {
    let first = &fixture_index.entries()[0];
    check!(*first == DocEntry::new("api/#API", "API", "API", "", "section"));
}

#[rstest]
fn biquad_filter_is_documented_type(fixture_index: SearchIndex) {
    let_assert!(Some(entry) = fixture_index.get("api/#RadiationDetectorDSP.BiquadFilter"));
    check!(entry.category == Category::Type);
    check!(entry.title == "RadiationDetectorDSP.BiquadFilter");
    check!(entry.text.contains("biquad filter"));
}

#[rstest]
fn every_entry_has_a_page(fixture_index: SearchIndex) {
    for entry in fixture_index.entries() {
        check!(!entry.page.is_empty(), "empty page at {}", entry.location);
    }
}

#[rstest]
fn section_entries_have_no_text(fixture_index: SearchIndex) {
    let sections: Vec<_> = fixture_index.by_category(&Category::Section).collect();
    check!(sections.len() == 7);
    for entry in sections {
        check!(entry.text.is_empty(), "section {} has text", entry.location);
    }
}

#[rstest]
fn symbol_entries_have_text(fixture_index: SearchIndex) {
    let symbols: Vec<_> = fixture_index
        .entries()
        .iter()
        .filter(|entry| entry.category.is_symbol())
        .collect();
    check!(symbols.len() == 39 + 17 + 15);
    for entry in symbols {
        check!(!entry.text.is_empty(), "{} has no text", entry.location);
    }
}

#[rstest]
fn fixture_passes_consistency_checks(fixture_index: SearchIndex) {
    let findings = documenter_search_mcp::check(&fixture_index);
    check!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

#[rstest]
fn summary_matches_generator_output(fixture_index: SearchIndex) {
    let summary = fixture_index.summary();
    check!(summary.entries == FIXTURE_ENTRIES);
    check!(summary.by_category.get("type") == Some(&39));
    check!(summary.by_category.get("function") == Some(&17));
    check!(summary.by_category.get("method") == Some(&15));
    check!(summary.by_category.get("page") == Some(&6));
    check!(
        summary.pages
            == vec![
                ("API".to_string(), 80),
                ("LICENSE".to_string(), 2),
                ("Home".to_string(), 2),
            ]
    );
}

#[rstest]
fn home_page_uses_root_location(fixture_index: SearchIndex) {
    let home: Vec<_> = fixture_index.on_page("Home").collect();
    let_assert!([section, page] = home.as_slice());
    check!(section.location == "#RadiationDetectorDSP.jl");
    check!(page.location.is_empty());
    check!(page.text.starts_with("This package provides DSP algorithms"));
}

#[rstest]
fn page_blocks_share_a_location(fixture_index: SearchIndex) {
    check!(fixture_index.at_location("api/").count() == 4);
    check!(
        fixture_index
            .at_location("api/")
            .all(|entry| entry.category == Category::Page)
    );
}

#[rstest]
fn method_lookup_by_title(fixture_index: SearchIndex) {
    let matches: Vec<_> = fixture_index
        .by_title("RadiationDetectorDSP.rc_filter")
        .collect();
    let_assert!([entry] = matches.as_slice());
    check!(entry.location == "api/#RadiationDetectorDSP.rc_filter-Tuple{Real}");
    check!(entry.category == Category::Method);
}

// --- Round trips ---

#[rstest]
fn script_output_reproduces_fixture_bytes(fixture_index: SearchIndex) {
    let script = fixture_index.to_script(&ScriptVariable::default()).unwrap();
    check!(script == fixture_raw());
}

#[rstest]
fn json_output_reparses_to_same_entries(fixture_index: SearchIndex) {
    let json = fixture_index.to_json().unwrap();
    let reparsed = SearchIndex::parse(&json).unwrap();
    check!(reparsed.entries() == fixture_index.entries());
    check!(reparsed.envelope() == &Envelope::Json);
}

#[rstest]
#[tokio::test]
async fn write_then_load_file(fixture_index: SearchIndex) {
    let workspace = TempWorkspace::new();
    let path = workspace.path().join("out/nested/index.json");

    let written = fixture_index.write_file(&path, &Envelope::Json).await.unwrap();
    check!(written == std::fs::metadata(&path).unwrap().len() as usize);

    let loaded = SearchIndex::load_file(&path).await.unwrap();
    check!(loaded.entries() == fixture_index.entries());
}

#[tokio::test]
async fn load_file_reads_fixture() {
    let index = SearchIndex::load_file(&fixture_path()).await.unwrap();
    check!(index.len() == FIXTURE_ENTRIES);
}

// --- Malformed input ---

#[rstest]
#[case::docs_missing(r#"var documenterSearchIndex = {"entries": []}"#, MalformedReason::MissingDocs)]
#[case::category_missing(
    r#"{"docs":[{"location":"api/#API","page":"API","title":"API","text":""}]}"#,
    MalformedReason::MissingField { index: 0, field: "category" }
)]
#[case::location_missing(
    r#"{"docs":[{"page":"API","title":"API","text":"","category":"section"}]}"#,
    MalformedReason::MissingField { index: 0, field: "location" }
)]
#[case::text_not_string(
    r#"{"docs":[{"location":"","page":"Home","title":"Home","text":42,"category":"page"}]}"#,
    MalformedReason::FieldNotString { index: 0, field: "text" }
)]
#[case::docs_null(r#"{"docs":null}"#, MalformedReason::DocsNotArray)]
#[case::root_array(r#"[{"docs":[]}]"#, MalformedReason::RootNotObject)]
#[case::docs_repeated(
    r#"{"docs":[{"location":"","page":"Home","title":"Home","text":"","category":"page"}],"docs":[]}"#,
    MalformedReason::DuplicateKey("docs".to_string())
)]
#[case::field_repeated(
    r#"var documenterSearchIndex = {"docs":[{"location":"","page":"Home","title":"Home","text":"","category":"page"},{"location":"a","location":"b","page":"API","title":"A","text":"","category":"section"}]}"#,
    MalformedReason::DuplicateField { index: 1, field: "location".to_string() }
)]
fn malformed_input_is_rejected(#[case] raw: &str, #[case] expected: MalformedReason) {
    let_assert!(Err(err) = SearchIndex::parse(raw));
    check!(err.is_malformed());
    check!(err.malformed_reason() == Some(&expected));
}

#[test]
fn truncated_fixture_is_rejected() {
    let raw = fixture_raw();
    let mut cut = raw.len() / 2;
    while !raw.is_char_boundary(cut) {
        cut -= 1;
    }

    let_assert!(Err(err) = SearchIndex::parse_bytes(&raw.as_bytes()[..cut], "<truncated>"));
    let_assert!(Some(MalformedReason::Syntax { .. }) = err.malformed_reason());
}

#[test]
fn one_bad_entry_rejects_whole_index() {
    let raw = fixture_raw().replacen(r#","category":"type"}"#, "}", 1);

    let_assert!(Err(err) = SearchIndex::parse(&raw));
    let_assert!(Some(MalformedReason::MissingField { index, field }) = err.malformed_reason());
    check!(*index == 9);
    check!(*field == "category");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let workspace = TempWorkspace::new();
    let path = workspace.path().join("search_index.js");

    let_assert!(Err(LoadError::NotFound { path: reported }) = SearchIndex::load_file(&path).await);
    check!(reported == path);
}

#[tokio::test]
async fn malformed_file_error_names_the_file() {
    let workspace = TempWorkspace::new();
    workspace.create_file("search_index.js", "var documenterSearchIndex = {\"docs\":[1]}\n");
    let path = workspace.path().join("search_index.js");

    let_assert!(Err(err) = SearchIndex::load_file(&path).await);
    check!(err.to_string().contains(&path.display().to_string()));
    check!(err.to_string().contains("docs[0] is not an object"));
}
