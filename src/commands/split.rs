use crate::error::SplitError;
use crate::filename::section_filename;
use crate::pdf::outline::OutlineEntry;
use crate::pdf::PdfDocument;
use crate::sections::{flatten, split_ranges, SplitRange};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct SplitOptions {
    pub max_depth: u32,
    pub dry_run: bool,
    pub json: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            max_depth: 1,
            dry_run: false,
            json: false,
        }
    }
}

#[derive(Serialize)]
struct PlannedFile<'a> {
    #[serde(flatten)]
    range: &'a SplitRange,
    /// `None` for ranges that will be skipped
    file_name: Option<String>,
}

/// Split `input` along its outline into `output_dir`. Returns the number of
/// files written.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &SplitOptions,
) -> Result<usize> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let doc = PdfDocument::open(input)?;
    let total_pages = doc.page_count();

    // JSON goes to stdout on its own
    let chatty = !options.json;
    if chatty {
        println!("Input File: {}", input.display());
        println!("Output Directory: {}", output_dir.display());
        println!("Max Depth: {}", options.max_depth);
    }

    if !options.dry_run && !output_dir.is_dir() {
        std::fs::create_dir_all(output_dir)
            .map_err(|source| SplitError::CreateOutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
        if chatty {
            println!("Created output directory: {}", output_dir.display());
        }
    }

    let outline = doc.outline()?;
    if outline.is_empty() {
        if chatty {
            println!("No outline found. Cannot split by chapters.");
        }
        return Ok(0);
    }

    let flat = flatten(&outline, options.max_depth);
    for bookmark in &flat.dropped {
        if chatty {
            println!("Skipping outline item: {}", describe_dropped(bookmark));
        } else {
            log::warn!("skipping outline item: {}", describe_dropped(bookmark));
        }
    }

    let ranges = split_ranges(&flat.sections, total_pages);

    if options.dry_run {
        print_plan(&ranges, options.json)?;
        return Ok(0);
    }

    println!("Found {} sections. Starting split...", ranges.len());
    let written = write_sections(&doc, &ranges, output_dir)?;
    println!("Split complete. {} file(s) written.", written.len());

    Ok(written.len())
}

/// Write one file per non-degenerate range. Files already written stay on
/// disk if a later one fails.
pub fn write_sections(
    doc: &PdfDocument,
    ranges: &[SplitRange],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for range in ranges {
        if range.is_degenerate() {
            println!(
                "Skipping empty or invalid section: {} (Pages {}-{})",
                range.title, range.start_page, range.end_page
            );
            continue;
        }

        let file_name = section_filename(range.index, &range.title);
        let output_path = output_dir.join(&file_name);

        let mut part = doc
            .extract_range(range.start_page, range.end_page)
            .with_context(|| format!("Failed to extract section '{}'", range.title))?;
        PdfDocument::save_atomic(&mut part, &output_path)?;
        log::debug!(
            "wrote {} page(s) to {}",
            range.page_count(),
            output_path.display()
        );

        println!(
            "Saved: {} (Pages {}-{})",
            file_name,
            range.start_page + 1,
            range.end_page
        );
        written.push(output_path);
    }

    Ok(written)
}

fn print_plan(ranges: &[SplitRange], json: bool) -> Result<()> {
    let planned: Vec<PlannedFile> = ranges
        .iter()
        .map(|range| PlannedFile {
            range,
            file_name: (!range.is_degenerate())
                .then(|| section_filename(range.index, &range.title)),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(());
    }

    for file in &planned {
        match &file.file_name {
            Some(name) => println!(
                "Would save: {} (Pages {}-{})",
                name,
                file.range.start_page + 1,
                file.range.end_page
            ),
            None => println!(
                "Would skip: {} (Pages {}-{})",
                file.range.title, file.range.start_page, file.range.end_page
            ),
        }
    }

    Ok(())
}

fn describe_dropped(entry: &OutlineEntry) -> String {
    match (&entry.title, entry.page) {
        (Some(title), None) => format!("'{}' has no resolvable destination", title),
        (None, Some(page)) => format!("untitled entry on page {}", page + 1),
        _ => "entry without title or destination".to_string(),
    }
}
