use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    // Typst diagnostics don't implement std::error::Error; carry the
    // formatted message instead.
    #[error("pdf compilation failed: {0}")]
    Pdf(String),
}
