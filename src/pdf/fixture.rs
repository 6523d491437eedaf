//! In-memory PDFs with outlines for tests.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

enum Target {
    Page(u32),
    Broken,
}

pub struct Node {
    title: String,
    target: Target,
    via_action: bool,
    children: Vec<Node>,
}

impl Node {
    pub fn new(title: &str, page: u32) -> Self {
        Node {
            title: title.to_string(),
            target: Target::Page(page),
            via_action: false,
            children: Vec::new(),
        }
    }

    /// An entry whose destination points at an object that is not a page.
    pub fn broken(title: &str) -> Self {
        Node {
            target: Target::Broken,
            ..Node::new(title, 0)
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn via_goto_action(mut self) -> Self {
        self.via_action = true;
        self
    }
}

/// Marker written into each page's content stream.
pub fn page_marker(index: u32) -> String {
    format!("% page {}\n", index)
}

pub fn build(page_count: u32, outline: &[Node]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page_ids: Vec<ObjectId> = (0..page_count)
        .map(|i| {
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                page_marker(i).into_bytes(),
            ));
            doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(100),
                        Object::Integer(100),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
            ]))
        })
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_count as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);

    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let (first, last, count) = add_items(&mut doc, outline, outlines_id, &page_ids);
        let outlines = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Outlines".to_vec())),
            ("First", Object::Reference(first)),
            ("Last", Object::Reference(last)),
            ("Count", Object::Integer(count)),
        ]);
        doc.objects.insert(outlines_id, Object::Dictionary(outlines));
        catalog.set("Outlines", Object::Reference(outlines_id));
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

/// Returns (first, last, total descendant count).
fn add_items(
    doc: &mut Document,
    nodes: &[Node],
    parent: ObjectId,
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId, i64) {
    let ids: Vec<ObjectId> = nodes.iter().map(|_| doc.new_object_id()).collect();
    let mut count = nodes.len() as i64;

    for (i, node) in nodes.iter().enumerate() {
        let mut item = Dictionary::new();
        item.set("Title", Object::string_literal(node.title.as_str()));
        item.set("Parent", Object::Reference(parent));
        if i > 0 {
            item.set("Prev", Object::Reference(ids[i - 1]));
        }
        if i + 1 < ids.len() {
            item.set("Next", Object::Reference(ids[i + 1]));
        }

        let page_ref = match node.target {
            Target::Page(p) => page_ids[p as usize],
            Target::Broken => (9999, 0),
        };
        let dest = Object::Array(vec![
            Object::Reference(page_ref),
            Object::Name(b"Fit".to_vec()),
        ]);
        if node.via_action {
            item.set(
                "A",
                Dictionary::from_iter(vec![("S", Object::Name(b"GoTo".to_vec())), ("D", dest)]),
            );
        } else {
            item.set("Dest", dest);
        }

        if !node.children.is_empty() {
            let (first, last, child_count) = add_items(doc, &node.children, ids[i], page_ids);
            item.set("First", Object::Reference(first));
            item.set("Last", Object::Reference(last));
            item.set("Count", Object::Integer(child_count));
            count += child_count;
        }

        doc.objects.insert(ids[i], Object::Dictionary(item));
    }

    (ids[0], ids[ids.len() - 1], count)
}

/// A single chain of `depth` nested entries, each one the only child of the
/// previous, all targeting the first page. Built without recursion.
pub fn deep_chain(page_count: u32, depth: u32) -> Document {
    let mut doc = build(page_count, &[]);
    let first_page = doc.get_pages()[&1];
    let outlines_id = doc.new_object_id();
    let ids: Vec<ObjectId> = (0..depth).map(|_| doc.new_object_id()).collect();

    for (level, id) in ids.iter().enumerate() {
        let mut item = Dictionary::new();
        item.set("Title", Object::string_literal(format!("Level {}", level)));
        let parent = if level == 0 { outlines_id } else { ids[level - 1] };
        item.set("Parent", Object::Reference(parent));
        item.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(first_page),
                Object::Name(b"Fit".to_vec()),
            ]),
        );
        if let Some(child) = ids.get(level + 1) {
            item.set("First", Object::Reference(*child));
            item.set("Last", Object::Reference(*child));
        }
        doc.objects.insert(*id, Object::Dictionary(item));
    }

    let outlines = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Outlines".to_vec())),
        ("First", Object::Reference(ids[0])),
        ("Last", Object::Reference(ids[0])),
    ]);
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));
    doc.catalog_mut()
        .unwrap()
        .set("Outlines", Object::Reference(outlines_id));
    doc
}

/// Build and save a fixture into `dir`.
pub fn write(dir: &Path, name: &str, page_count: u32, outline: &[Node]) -> PathBuf {
    let path = dir.join(name);
    let mut doc = build(page_count, outline);
    doc.save(&path).unwrap();
    path
}

/// Content markers of every page in a saved PDF, in page order.
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|id| String::from_utf8(doc.get_page_content(*id).unwrap()).unwrap())
        .collect()
}
