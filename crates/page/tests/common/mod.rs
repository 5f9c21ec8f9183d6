use page::root;
use page::Document;

/// Fresh per-thread state with `markup` installed as the document body
pub fn setup(body: &str) -> Document {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    root::reset();
    let doc = Document::parse(body);
    root::set_document(doc.clone());
    doc
}
