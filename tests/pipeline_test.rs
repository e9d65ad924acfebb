// End-to-end pipeline tests: generated PDFs, mock providers, real controller
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rstest::rstest;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use inclusivo::controller::{download_file_name, Controller};
use inclusivo::error::INVALID_FILE_TYPE_MESSAGE;
use inclusivo::pdf_extraction::{extract_text, page_count};
use inclusivo::reconcile::{apply_changes, assign_ids};
use inclusivo::suggestions::{
    ProviderError, ProviderSlot, SuggestionProvider, SuggestionService, PROVIDERS_UNAVAILABLE_MESSAGE,
};
use inclusivo::types::{Suggestion, ViewState};

/// Build a PDF with one line of Helvetica text per page
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

struct ScriptedProvider {
    name: &'static str,
    response: Result<Vec<Suggestion>, ProviderError>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn ok(name: &'static str, pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: Ok(pairs.iter().map(|(o, i)| Suggestion::new(*o, *i)).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: Err(ProviderError::Api {
                status: 503,
                body: "overloaded".into(),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn suggest(&self, _text: &str) -> Result<Vec<Suggestion>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

fn controller(dir: &Path, primary: Arc<ScriptedProvider>, secondary: Arc<ScriptedProvider>) -> Controller {
    let service = SuggestionService::new(vec![ProviderSlot::configured(primary), ProviderSlot::configured(secondary)]);
    Controller::new(Arc::new(service), dir.to_path_buf())
}

#[test]
fn pages_are_joined_with_blank_lines() {
    let pdf = build_pdf(&["Hola", "Mundo"]);
    assert_eq!(page_count(&pdf).unwrap(), 2);
    assert_eq!(extract_text(&pdf).unwrap(), "Hola\n\nMundo");
}

#[tokio::test]
async fn secondary_rescues_a_failing_primary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "informe.pdf", &["El ingeniero debe revisar el codigo."]);
    let primary = ScriptedProvider::failing("Gemini");
    let secondary = ScriptedProvider::ok("Groq", &[("El ingeniero", "La persona ingeniera")]);
    let mut controller = controller(dir.path(), primary.clone(), secondary.clone());

    assert_eq!(controller.process_file(&path).await, ViewState::Comparing);

    let session = controller.session();
    assert_eq!(session.original_text, "El ingeniero debe revisar el codigo.");
    assert_eq!(session.modified_text, "La persona ingeniera debe revisar el codigo.");
    assert_eq!(session.changes.len(), 1);
    assert_eq!(session.changes[0].id, "change-0");
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn both_providers_failing_shows_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "informe.pdf", &["Los alumnos"]);
    let mut controller = controller(dir.path(), ScriptedProvider::failing("Gemini"), ScriptedProvider::failing("Groq"));

    assert_eq!(controller.process_file(&path).await, ViewState::Error);
    assert_eq!(controller.error_message(), Some(PROVIDERS_UNAVAILABLE_MESSAGE));
    assert!(controller.session().original_text.is_empty());
}

#[tokio::test]
async fn non_pdf_never_reaches_a_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carta.docx");
    std::fs::write(&path, b"PK\x03\x04").unwrap();
    let primary = ScriptedProvider::ok("Gemini", &[]);
    let secondary = ScriptedProvider::ok("Groq", &[]);
    let mut controller = controller(dir.path(), primary.clone(), secondary.clone());

    assert_eq!(controller.process_file(&path).await, ViewState::Error);
    assert_eq!(controller.error_message(), Some(INVALID_FILE_TYPE_MESSAGE));
    assert_eq!(primary.calls() + secondary.calls(), 0);
}

#[tokio::test]
async fn broken_pdf_reports_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roto.pdf");
    std::fs::write(&path, b"esto no es un pdf").unwrap();
    let primary = ScriptedProvider::ok("Gemini", &[]);
    let mut controller = controller(dir.path(), primary.clone(), ScriptedProvider::ok("Groq", &[]));

    assert_eq!(controller.process_file(&path).await, ViewState::Error);
    assert!(controller.error_message().unwrap().starts_with("Error al procesar el archivo PDF"));
    assert_eq!(primary.calls(), 0);
}

#[tokio::test]
async fn edited_text_is_what_gets_downloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "informe.pdf", &["Los alumnos y los alumnos"]);
    let mut controller = controller(
        dir.path(),
        ScriptedProvider::ok("Gemini", &[("los alumnos", "el alumnado"), ("Los alumnos", "El alumnado")]),
        ScriptedProvider::ok("Groq", &[]),
    );

    controller.process_file(&path).await;
    assert_eq!(controller.session().modified_text, "El alumnado y el alumnado");

    controller.update_modified_text("El alumnado y el profesorado".into());
    let saved = controller.download().unwrap();
    assert_eq!(saved.file_name().unwrap(), "inclusivo_informe.txt");
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "El alumnado y el profesorado");

    controller.reset();
    assert_eq!(controller.state(), ViewState::Initial);
    assert!(controller.download().is_err());
}

#[rstest]
#[case("informe.pdf", "inclusivo_informe.txt")]
#[case("Acta Reunion.pdf", "inclusivo_Acta Reunion.txt")]
#[case("resumen.v2.pdf", "inclusivo_resumen.v2.txt")]
fn download_names(#[case] uploaded: &str, #[case] expected: &str) {
    assert_eq!(download_file_name(uploaded), expected);
}

#[rstest]
#[case("El ingeniero debe revisar el código.", &[("El ingeniero", "La persona ingeniera")], "La persona ingeniera debe revisar el código.")]
#[case("los niños y los niños", &[("los niños", "la infancia")], "la infancia y la infancia")]
#[case("Sin cambios.", &[], "Sin cambios.")]
#[case("a+b=c", &[("a+b", "b+a")], "b+a=c")]
fn reconciliation_cases(#[case] text: &str, #[case] pairs: &[(&str, &str)], #[case] expected: &str) {
    let changes = assign_ids(pairs.iter().map(|(o, i)| Suggestion::new(*o, *i)).collect());
    assert_eq!(apply_changes(text, &changes), expected);
}
