//! PDF page source backed by lopdf.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};
use crate::model::Document;

use super::content;
use super::PageTextSource;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: usize = 8; // "%PDF-1.7"

/// Reads PDFs from a directory, one page text per PDF page.
#[derive(Debug, Clone)]
pub struct PdfPageSource {
    root: PathBuf,
}

impl PdfPageSource {
    /// Resolve document ids relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory document ids are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a document id.
    pub fn resolve(&self, document_id: &str) -> PathBuf {
        self.root.join(document_id)
    }

    /// Load a PDF from an explicit path, using its file name as the id.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Document> {
        let path = path.as_ref();
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        load_pdf(path, id)
    }
}

impl PageTextSource for PdfPageSource {
    fn load(&self, document_id: &str) -> Result<Document> {
        load_pdf(&self.resolve(document_id), document_id.to_string())
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

fn load_pdf(path: &Path, id: String) -> Result<Document> {
    sniff_pdf(path)?;

    let mut pdf = LopdfDocument::load(path).map_err(|e| match e {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(e),
    })?;

    // Owner-password-only files open with the empty user password
    if pdf.is_encrypted() {
        pdf.decrypt("").map_err(|e| {
            log::debug!("{}: empty user password rejected: {}", id, e);
            Error::Encrypted
        })?;
    }

    let mut document = Document::new(id);
    for (index, page_id) in pdf.get_pages().values().enumerate() {
        let text = match content::page_text(&pdf, *page_id) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                log::debug!("{}: page {} has no text", document.id, index + 1);
                None
            }
            Err(e) => {
                log::warn!(
                    "Failed to extract text from {} page {}: {}",
                    document.id,
                    index + 1,
                    Error::TextExtract(e.to_string())
                );
                None
            }
        };
        document.add_page(text);
    }

    Ok(document)
}

/// Verify the file starts with a PDF header before handing it to lopdf.
fn sniff_pdf(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;

    if is_pdf_bytes(&header) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if bytes start with a PDF header (`%PDF-d.d`).
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return false;
    }
    let version = &data[PDF_MAGIC.len()..HEADER_LEN];
    version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_sections;
    use lopdf::{dictionary, encryption, Object, Stream, StringFormat};
    use std::io::Write;

    const MENU_PAGE: &str = "BT /F1 12 Tf 72 700 Td (Vegetarian Entrees) Tj \
        0 -14 Td (Falafel wrap) Tj 0 -14 Td (Ratatouille bowl) Tj ET";
    const BLANK_PAGE: &str = "0 0 m 612 792 l S";
    const SIDES_PAGE: &str = "BT /F1 14 Tf 72 700 Td (Side Dishes) Tj ET \
        BT /F1 11 Tf 72 680 Td (grilled corn with lime) Tj ET";

    /// One Helvetica font, one content stream per page.
    fn build_pdf(pages: &[&str]) -> LopdfDocument {
        let mut pdf = LopdfDocument::with_version("1.5");
        let pages_id = pdf.new_object_id();
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for content in pages {
            let content_id =
                pdf.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages.len() as i64,
            }),
        );
        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        pdf.trailer.set("Root", catalog_id);
        pdf
    }

    /// Attach a standard security handler dictionary of the given version.
    fn add_encryption(pdf: &mut LopdfDocument, version: i64) {
        let encrypt_id = pdf.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => version,
            "R" => 2,
            "O" => Object::String(vec![0x4F; 32], StringFormat::Hexadecimal),
            "P" => -4,
        });
        let file_id = Object::String(b"docrank-menu-0001".to_vec(), StringFormat::Hexadecimal);
        pdf.trailer.set("ID", vec![file_id.clone(), file_id]);
        pdf.trailer.set("Encrypt", encrypt_id);
    }

    /// RC4-encrypt every stream with the key derived from an empty user password.
    fn encrypt_streams(pdf: &mut LopdfDocument) {
        let key = encryption::get_encryption_key(&*pdf, "", false).unwrap();
        for (&id, obj) in pdf.objects.iter_mut() {
            if let Ok(cipher) = encryption::decrypt_object(&key, id, obj) {
                if let Object::Stream(stream) = obj {
                    stream.set_content(cipher);
                }
            }
        }
    }

    fn save(dir: &Path, name: &str, pdf: &mut LopdfDocument) -> PathBuf {
        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(is_pdf_bytes(b"%PDF-2.0"));
        assert!(!is_pdf_bytes(b"%PDF"));
        assert!(!is_pdf_bytes(b"%PDF-abc"));
        assert!(!is_pdf_bytes(b"<!DOCTYPE html>"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = PdfPageSource::new("/nonexistent-dir");
        assert!(matches!(source.load("menu.pdf"), Err(Error::Io(_))));
    }

    #[test]
    fn test_non_pdf_file_is_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("notes.pdf")).unwrap();
        file.write_all(b"just some text, not a pdf").unwrap();

        let source = PdfPageSource::new(dir.path());
        assert!(matches!(source.load("notes.pdf"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_resolve_joins_root() {
        let source = PdfPageSource::new("/data/pdfs");
        assert_eq!(
            source.resolve("menu.pdf"),
            PathBuf::from("/data/pdfs/menu.pdf")
        );
        assert_eq!(source.root(), Path::new("/data/pdfs"));
    }

    #[test]
    fn test_loads_pages_in_order_with_blank_pages_as_none() {
        let dir = tempfile::tempdir().unwrap();
        save(
            dir.path(),
            "Dinner Mains.pdf",
            &mut build_pdf(&[MENU_PAGE, BLANK_PAGE, SIDES_PAGE]),
        );

        let document = PdfPageSource::new(dir.path())
            .load("Dinner Mains.pdf")
            .unwrap();

        assert_eq!(document.id, "Dinner Mains.pdf");
        assert_eq!(document.page_count(), 3);
        assert_eq!(
            document.page_text(1),
            Some("Vegetarian Entrees\nFalafel wrap\nRatatouille bowl\n")
        );
        assert_eq!(document.page_text(2), None);
        assert_eq!(
            document.page_text(3),
            Some("Side Dishes\ngrilled corn with lime\n")
        );
    }

    #[test]
    fn test_lines_within_one_text_object_become_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(
            dir.path(),
            "menu.pdf",
            &mut build_pdf(&[MENU_PAGE, BLANK_PAGE, SIDES_PAGE]),
        );

        let sections = extract_sections(&PdfPageSource::load_path(&path).unwrap());
        let titles: Vec<_> = sections
            .iter()
            .map(|s| (s.title.as_str(), s.page_number))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("Vegetarian Entrees", 1),
                ("Falafel wrap", 1),
                ("Ratatouille bowl", 1),
                ("Side Dishes", 3),
            ]
        );
        assert_eq!(sections[3].body, "grilled corn with lime");
    }

    #[test]
    fn test_empty_user_password_pdf_is_decrypted() {
        let dir = tempfile::tempdir().unwrap();
        let mut pdf = build_pdf(&[MENU_PAGE]);
        add_encryption(&mut pdf, 1);
        encrypt_streams(&mut pdf);
        save(dir.path(), "locked.pdf", &mut pdf);

        let document = PdfPageSource::new(dir.path()).load("locked.pdf").unwrap();
        assert_eq!(
            document.page_text(1),
            Some("Vegetarian Entrees\nFalafel wrap\nRatatouille bowl\n")
        );
    }

    #[test]
    fn test_undecryptable_pdf_is_encrypted_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut pdf = build_pdf(&[MENU_PAGE]);
        add_encryption(&mut pdf, 4);
        save(dir.path(), "locked.pdf", &mut pdf);

        let result = PdfPageSource::new(dir.path()).load("locked.pdf");
        assert!(matches!(result, Err(Error::Encrypted)));
    }
}
