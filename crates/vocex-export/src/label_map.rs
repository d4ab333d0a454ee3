//! Label map builder
//!
//! Produces the `pascal_label_map.pbtxt` artifact mapping tag names to
//! numeric ids for downstream model training. Ids are the 1-based position
//! of each tag in the project tag list; every project tag gets an entry,
//! whether or not any region uses it.

use vocex_core::Tag;

fn label_map_entry(id: usize, name: &str) -> String {
    format!("\nitem {{\n    id: {}\n    name: '{}'\n}}", id, name)
}

/// Build the full label map text for a project tag list.
pub fn build_label_map(tags: &[Tag]) -> String {
    tags.iter()
        .enumerate()
        .map(|(index, tag)| label_map_entry(index + 1, &tag.name))
        .collect::<Vec<_>>()
        .join("\n")
}
