use crate::pdf::outline::OutlineEntry;
use serde::Serialize;

/// A retained outline entry that becomes one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// 0-based page index
    pub start_page: u32,
}

/// A section together with its derived exclusive end page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitRange {
    /// Position of the section in the resolved list; used as the filename prefix.
    pub index: usize,
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

impl SplitRange {
    /// Zero or negative length: nothing to write.
    pub fn is_degenerate(&self) -> bool {
        self.start_page >= self.end_page
    }

    pub fn page_count(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page)
    }
}

#[derive(Debug)]
pub struct Flattened {
    pub sections: Vec<Section>,
    /// Entries dropped because their title or page could not be read.
    pub dropped: Vec<OutlineEntry>,
}

/// Flatten a document-order outline into ordered, non-colliding sections.
///
/// Entries at depth `>= max_depth` are ignored. When several entries target
/// the same page, the shallowest one (first in document order among equals)
/// is kept.
pub fn flatten(outline: &[OutlineEntry], max_depth: u32) -> Flattened {
    let mut resolved: Vec<(u32, u32, String)> = Vec::new();
    let mut dropped = Vec::new();

    for entry in outline.iter().filter(|e| e.depth < max_depth) {
        match (&entry.title, entry.page) {
            (Some(title), Some(page)) => resolved.push((page, entry.depth, title.clone())),
            _ => dropped.push(entry.clone()),
        }
    }

    // Stable: equal (page, depth) keeps document order.
    resolved.sort_by_key(|(page, depth, _)| (*page, *depth));

    let sections = resolved
        .into_iter()
        .fold(Vec::<Section>::new(), |mut acc, (start_page, _, title)| {
            if acc.last().map(|prev| prev.start_page) != Some(start_page) {
                acc.push(Section { title, start_page });
            }
            acc
        });

    log::debug!(
        "flattened outline to {} section(s) at max depth {} ({} dropped)",
        sections.len(),
        max_depth,
        dropped.len()
    );

    Flattened { sections, dropped }
}

/// Derive each section's exclusive end page: the next section's start, or
/// `total_pages` for the last one. Degenerate ranges are kept in the result
/// so the caller can report them.
pub fn split_ranges(sections: &[Section], total_pages: u32) -> Vec<SplitRange> {
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let end_page = sections
                .get(index + 1)
                .map(|next| next.start_page)
                .unwrap_or(total_pages);
            SplitRange {
                index,
                title: section.title.clone(),
                start_page: section.start_page,
                end_page,
            }
        })
        .collect()
}
