use form16_lib::server::{build_router, AppState};
use form16_lib::settings::Settings;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;

async fn spawn_app(settings: Settings) -> String {
    let app = build_router(AppState::new(), &settings);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Single-page PDF with one Helvetica text line per entry
fn make_pdf(lines: &[&str]) -> Vec<u8> {
    make_pdf_pages(&[lines])
}

/// PDF with one page per entry, each page holding its own text lines
fn make_pdf_pages(pages: &[&[&str]]) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, ObjectId, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::with_capacity(pages.len());
    for lines in pages {
        let body = lines
            .iter()
            .map(|line| format!("({}) Tj", line))
            .collect::<Vec<_>>()
            .join(" 0 -20 Td ");
        let content = format!("BT /F1 12 Tf 72 700 Td {} ET", body);
        let content_id = doc.add_object(Object::Stream(Stream::new(
            lopdf::Dictionary::new(),
            content.into_bytes(),
        )));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => Object::Dictionary(dictionary! {
                "Font" => Object::Dictionary(dictionary! {
                    "F1" => font_id,
                }),
            }),
        });
        kids.push(Object::from(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn pdf_form(bytes: Vec<u8>) -> Form {
    Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name("form16.pdf")
            .mime_str("application/pdf")
            .unwrap(),
    )
}

async fn post_form(base: &str, form: Form) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let base = spawn_app(Settings::default()).await;
    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_upload_extracts_fields() {
    let base = spawn_app(Settings::default()).await;
    let pdf = make_pdf(&["Certificate Number: ABC123 ", "Contact HR@Example.com "]);

    let (status, body) = post_form(&base, pdf_form(pdf)).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["form_no"], 16);
    assert_eq!(data["certificate_details"]["certificate_no"], "ABC123");
    assert_eq!(data["employer_details"]["email"], "hr@example.com");
    assert!(data["verification"]["verified_by"]["designation"].is_null());
}

#[tokio::test]
async fn test_upload_reads_fields_across_pages() {
    let base = spawn_app(Settings::default()).await;
    let pdf = make_pdf_pages(&[&["Contact HR@Example.com "], &["Certificate Number: ABC123 "]]);

    let (status, body) = post_form(&base, pdf_form(pdf)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employer_details"]["email"], "hr@example.com");
    assert_eq!(body["data"]["certificate_details"]["certificate_no"], "ABC123");
}

#[test]
fn test_pages_are_joined_in_order_without_marker() {
    let pdf = make_pdf_pages(&[&["PAGEONE a@b.c"], &["PAGETWO"]]);
    let text = form16_lib::pdf_extractor::extract_text_from_pdf(&pdf).unwrap();

    let first = text.find("PAGEONE").unwrap();
    let second = text.find("PAGETWO").unwrap();
    assert!(first < second);
    assert!(!text.contains('\u{000C}'));
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let base = spawn_app(Settings::default()).await;
    let form = Form::new().text("note", "no attachment");

    let (status, body) = post_form(&base, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"error": "No file provided"}));
}

#[tokio::test]
async fn test_upload_non_multipart_body() {
    let base = spawn_app(Settings::default()).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/upload", base))
        .json(&serde_json::json!({"file": "not really"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_corrupt_pdf_is_server_error() {
    let base = spawn_app(Settings::default()).await;
    let form = pdf_form(b"%PDF-1.4 this is not really a pdf".to_vec());

    let (status, body) = post_form(&base, form).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let msg = body["error"].as_str().unwrap();
    assert!(msg.starts_with("Failed to extract text from PDF"), "got: {}", msg);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_upload_without_email_is_server_error() {
    let base = spawn_app(Settings::default()).await;
    let pdf = make_pdf(&["Certificate Number: ABC123 "]);

    let (status, body) = post_form(&base, pdf_form(pdf)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No employer email address found in document");
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let settings = Settings { max_upload_bytes: 1024, ..Settings::default() };
    let base = spawn_app(settings).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/upload", base))
        .multipart(pdf_form(vec![b'x'; 8 * 1024]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string(), "got: {}", body);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_unknown_route() {
    let base = spawn_app(Settings::default()).await;
    let resp = reqwest::get(format!("{}/nope", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}
