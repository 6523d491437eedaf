pub mod document;
#[cfg(test)]
pub mod fixture;
pub mod outline;

pub use document::PdfDocument;
