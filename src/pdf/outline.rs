use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};

/// Chains of references longer than this are treated as unresolvable.
const MAX_REFERENCE_HOPS: usize = 32;

/// One outline entry, in document (pre-)order, tagged with its nesting
/// depth. Root-level entries have depth 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// `None` if the entry has no readable `/Title`
    pub title: Option<String>,
    /// 0-based target page, `None` if the destination cannot be resolved
    pub page: Option<u32>,
    pub depth: u32,
}

/// Read the outline (bookmark) tree as a depth-first, document-order list.
/// A document without one yields an empty list.
///
/// The `/First` and `/Next` links are followed with an explicit stack, so
/// nesting depth is bounded by memory rather than the call stack.
pub fn read_outline(doc: &Document) -> Result<Vec<OutlineEntry>> {
    let catalog = doc
        .catalog()
        .with_context(|| "Failed to get document catalog")?;

    let outlines = match catalog.get(b"Outlines").ok().and_then(|o| as_dict(doc, o)) {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };

    let first_ref = match outlines.get(b"First") {
        Ok(Object::Reference(r)) => *r,
        _ => return Ok(Vec::new()),
    };

    let page_map = build_page_map(doc);
    let mut visited = HashSet::new();
    let mut entries = Vec::new();
    let mut stack: Vec<(ObjectId, u32)> = vec![(first_ref, 0)];

    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id) {
            log::warn!("outline item {:?} visited twice, stopping this branch", id);
            continue;
        }

        let dict = match doc.get_dictionary(id) {
            Ok(d) => d,
            Err(_) => continue,
        };

        let title = dict
            .get(b"Title")
            .ok()
            .and_then(|o| deref(doc, o))
            .and_then(|o| match o {
                Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
                _ => None,
            });

        entries.push(OutlineEntry {
            title,
            page: get_destination_page(doc, dict, &page_map),
            depth,
        });

        // Sibling goes under the child so the whole subtree comes first
        if let Ok(Object::Reference(next)) = dict.get(b"Next") {
            stack.push((*next, depth));
        }
        if let Ok(Object::Reference(child)) = dict.get(b"First") {
            stack.push((*child, depth + 1));
        }
    }

    log::debug!("read {} outline item(s)", entries.len());
    Ok(entries)
}

fn get_destination_page(
    doc: &Document,
    dict: &Dictionary,
    page_map: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map, 0);
    }

    // GoTo action, either referenced or inline
    let action = dict.get(b"A").ok().and_then(|o| as_dict(doc, o))?;
    match action.get(b"S") {
        Ok(Object::Name(kind)) if kind == b"GoTo" => {
            let dest = action.get(b"D").ok()?;
            resolve_destination(doc, dest, page_map, 0)
        }
        _ => None,
    }
}

fn resolve_destination(
    doc: &Document,
    dest: &Object,
    page_map: &HashMap<ObjectId, u32>,
    hops: usize,
) -> Option<u32> {
    if hops > MAX_REFERENCE_HOPS {
        return None;
    }

    match dest {
        Object::String(name, _) | Object::Name(name) => {
            let target = resolve_named_destination(doc, name)?;
            resolve_destination(doc, target, page_map, hops + 1)
        }
        // [page_ref /XYZ left top zoom] and friends
        Object::Array(arr) => match arr.first() {
            Some(Object::Reference(page_ref)) => page_map.get(page_ref).copied(),
            // Remote-style destinations carry a page index instead
            Some(Object::Integer(index)) => u32::try_from(*index)
                .ok()
                .filter(|i| (*i as usize) < page_map.len()),
            _ => None,
        },
        // Named destination values may be wrapped as << /D [...] >>
        Object::Dictionary(d) => {
            let inner = d.get(b"D").ok()?;
            resolve_destination(doc, inner, page_map, hops + 1)
        }
        Object::Reference(r) => {
            let obj = doc.get_object(*r).ok()?;
            resolve_destination(doc, obj, page_map, hops + 1)
        }
        _ => None,
    }
}

fn resolve_named_destination<'a>(doc: &'a Document, name: &[u8]) -> Option<&'a Object> {
    let catalog = doc.catalog().ok()?;

    // PDF 1.2+: /Names /Dests name tree
    if let Some(dests) = catalog
        .get(b"Names")
        .ok()
        .and_then(|o| as_dict(doc, o))
        .and_then(|names| names.get(b"Dests").ok())
        .and_then(|o| as_dict(doc, o))
    {
        if let Some(found) = search_name_tree(doc, dests, name, 0) {
            return Some(found);
        }
    }

    // PDF 1.1: /Dests dictionary keyed by name
    catalog
        .get(b"Dests")
        .ok()
        .and_then(|o| as_dict(doc, o))
        .and_then(|dests| dests.get(name).ok())
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &[u8],
    depth: usize,
) -> Option<&'a Object> {
    if depth > MAX_REFERENCE_HOPS {
        return None;
    }

    if let Ok(Object::Array(names)) = node.get(b"Names") {
        for chunk in names.chunks(2) {
            if let [Object::String(key, _), value] = chunk {
                if key == name {
                    return Some(value);
                }
            }
        }
    }

    if let Ok(Object::Array(kids)) = node.get(b"Kids") {
        for kid in kids {
            if let Some(kid_dict) = as_dict(doc, kid) {
                if let Some(found) = search_name_tree(doc, kid_dict, name, depth + 1) {
                    return Some(found);
                }
            }
        }
    }

    None
}

/// Page object id -> 0-based page index
fn build_page_map(doc: &Document) -> HashMap<ObjectId, u32> {
    doc.get_pages()
        .into_iter()
        .map(|(num, id)| (id, num - 1))
        .collect()
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(r) => doc.get_object(*r).ok(),
        other => Some(other),
    }
}

fn as_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match deref(doc, obj)? {
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    // UTF-16 BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16_lossy(&u16_chars)
    } else if let Ok(s) = std::str::from_utf8(bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes))
    {
        s.to_string()
    } else {
        // PDFDocEncoding / Latin-1 (simplified)
        bytes.iter().map(|&b| b as char).collect()
    }
}
