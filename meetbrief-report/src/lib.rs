pub mod error;
pub mod filename;
pub mod html;
pub mod pdf;
pub mod txt;

pub use error::RenderError;
pub use filename::{ReportFormat, report_file_name, slugify};
pub use html::render_html;
pub use pdf::render_pdf;
pub use txt::render_txt;
