//! Titles for repeated groups.

/// Pair every item with its title.
///
/// With more than one item the title gets a 1-based position suffix in
/// source order; a lone item keeps the bare title.
pub fn numbered<T: Copy>(title: &str, items: &[T]) -> Vec<(String, T)> {
    let plural = items.len() > 1;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (numbered_title(title, index + 1, plural), *item))
        .collect()
}

/// Title for the item at `position` (1-based).
pub fn numbered_title(title: &str, position: usize, plural: bool) -> String {
    if plural {
        format!("{} {}", title, position)
    } else {
        title.to_string()
    }
}
