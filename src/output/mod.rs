//! Report rendering and report file writing

pub mod nfo;
pub mod presentation;
pub mod writer;

pub use nfo::NfoRenderer;
pub use presentation::render_presentation;
pub use writer::ReportWriter;

/// Kind of report file written next to a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Nfo,
    Presentation,
    Layout,
    Torrent,
}

impl ReportKind {
    /// File extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::Nfo => "nfo",
            ReportKind::Presentation => "bbcode",
            ReportKind::Layout => "layout.json",
            ReportKind::Torrent => "torrent",
        }
    }

    /// Report file name for a release
    pub fn file_name(&self, release_name: &str) -> String {
        format!("{}.{}", release_name, self.extension())
    }
}
