//! PDF rendering: Typst markup generation plus in-process compilation.

mod compile;
mod content;

pub use compile::{CJK_FAMILY, LoadedFonts, load_fonts};
pub use content::{FontSelection, build_typst_source, escape_typst, pdf_priority_label, pdf_status_glyph};

use chrono::NaiveDate;
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::lang::TargetLanguage;
use std::path::Path;

use crate::error::RenderError;

/// Renders the paginated PDF report.
///
/// Rendering a CJK report without a CJK-capable font is a defect, not a
/// silent degradation; when the `Noto Sans SC` family is absent we log the
/// fallback explicitly and let Typst substitute what it can.
pub fn render_pdf(
    doc: &AnalysisDocument,
    target: TargetLanguage,
    fonts_dir: Option<&Path>,
    date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let lang = target.resolve(doc);
    let fonts = load_fonts(fonts_dir);

    let mut selection = FontSelection::default();
    if lang.needs_cjk_font() {
        if fonts.has_cjk {
            selection.cjk = Some(CJK_FAMILY.into());
        } else {
            log::error!(
                "report language {} needs a CJK font but '{}' was not found; \
                 falling back to the base family (glyphs will be missing)",
                lang.code(),
                CJK_FAMILY
            );
        }
    }

    let markup = build_typst_source(doc, lang, &selection, date);
    compile::compile_pdf(&markup, fonts, date)
}
