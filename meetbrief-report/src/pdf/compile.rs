//! Compiles the generated Typst markup into PDF bytes.
//!
//! The compiler runs against an in-memory world: one synthetic source file,
//! no package or file access, and a font book built from the embedded
//! `typst-assets` families (Latin + Cyrillic coverage) plus any font files
//! found in the configured fonts directory (the CJK family ships there).

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use typst::Library;
use typst::World;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;

use crate::error::RenderError;

/// Family name the report asks for when it needs CJK glyphs.
pub const CJK_FAMILY: &str = "Noto Sans SC";

pub struct ReportWorld {
    library: LazyHash<Library>,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    source: Source,
    today: Option<Datetime>,
}

impl ReportWorld {
    pub fn new(markup: &str, fonts: LoadedFonts, date: NaiveDate) -> Self {
        let id = FileId::new(None, VirtualPath::new("/report.typ"));
        Self {
            library: LazyHash::new(Library::default()),
            book: LazyHash::new(fonts.book),
            fonts: fonts.fonts,
            source: Source::new(id, markup.to_string()),
            today: Datetime::from_ymd(date.year(), date.month() as u8, date.day() as u8),
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.source.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.source.id() {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(
                id.vpath().as_rootless_path().to_path_buf(),
            ))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        // The report is a single synthetic file; nothing else resolves.
        Err(FileError::NotFound(
            id.vpath().as_rootless_path().to_path_buf(),
        ))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        self.today
    }
}

pub struct LoadedFonts {
    pub book: FontBook,
    pub fonts: Vec<Font>,
    /// Whether the CJK family was found among the loaded faces.
    pub has_cjk: bool,
}

/// Loads the embedded font families and, if present, extra faces from
/// `fonts_dir`. Missing CJK coverage is reported to the caller, which decides
/// whether that is a logged fallback or irrelevant for the target language.
pub fn load_fonts(fonts_dir: Option<&Path>) -> LoadedFonts {
    let mut book = FontBook::new();
    let mut fonts = Vec::new();

    for data in typst_assets::fonts() {
        for font in Font::iter(Bytes::new(data)) {
            book.push(font.info().clone());
            fonts.push(font);
        }
    }

    if let Some(dir) = fonts_dir {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let ext = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.to_ascii_lowercase());
                    if !matches!(ext.as_deref(), Some("ttf" | "otf" | "ttc" | "otc")) {
                        continue;
                    }
                    match std::fs::read(&path) {
                        Ok(data) => {
                            for font in Font::iter(Bytes::new(data)) {
                                book.push(font.info().clone());
                                fonts.push(font);
                            }
                        }
                        Err(e) => {
                            log::warn!("skipping unreadable font {}: {e}", path.display());
                        }
                    }
                }
            }
            Err(e) => {
                log::warn!("fonts directory {} not readable: {e}", dir.display());
            }
        }
    }

    let has_cjk = fonts
        .iter()
        .any(|f| f.info().family.eq_ignore_ascii_case(CJK_FAMILY));

    LoadedFonts { book, fonts, has_cjk }
}

pub fn compile_pdf(markup: &str, fonts: LoadedFonts, date: NaiveDate) -> Result<Vec<u8>, RenderError> {
    let world = ReportWorld::new(markup, fonts, date);

    let document: PagedDocument = typst::compile(&world)
        .output
        .map_err(|diagnostics| RenderError::Pdf(format_diagnostics(&diagnostics)))?;

    typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
        .map_err(|diagnostics| RenderError::Pdf(format_diagnostics(&diagnostics)))
}

fn format_diagnostics(diagnostics: &[typst::diag::SourceDiagnostic]) -> String {
    let mut messages: Vec<String> = diagnostics
        .iter()
        .take(5)
        .map(|d| d.message.to_string())
        .collect();
    if diagnostics.len() > 5 {
        messages.push(format!("(+{} more)", diagnostics.len() - 5));
    }
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fonts_include_a_cyrillic_capable_family() {
        let fonts = load_fonts(None);
        assert!(!fonts.fonts.is_empty());
        assert!(
            fonts
                .fonts
                .iter()
                .any(|f| f.info().family.contains("Libertinus"))
        );
        assert!(!fonts.has_cjk);
    }

    #[test]
    fn compiles_minimal_markup_to_pdf_bytes() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let markup = "#set text(font: (\"Libertinus Serif\",))\nHello, отчёт.\n";
        let bytes = compile_pdf(markup, load_fonts(None), date).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
