use crate::pdf::outline::OutlineEntry;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;

    println!("File: {}", path.as_ref().display());
    println!("Total Pages: {}", doc.page_count());

    let outline = doc.outline()?;
    if outline.is_empty() {
        println!("No outline found.");
        return Ok(());
    }

    println!();
    println!("--- Outline Structure ---");
    for line in format_outline(&outline) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per entry, indented by depth, with 1-based page numbers.
pub fn format_outline(outline: &[OutlineEntry]) -> Vec<String> {
    outline
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(entry.depth as usize);
            match (&entry.title, entry.page) {
                (Some(title), Some(page)) => format!("{}- {} (p. {})", indent, title, page + 1),
                (Some(title), None) => format!("{}- {} [unresolvable destination]", indent, title),
                (None, _) => format!("{}- [Error reading item]", indent),
            }
        })
        .collect()
}
