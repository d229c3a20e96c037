//! Plain-text rendering of command outcomes.

use crate::store::WatchlistItem;
use crate::watchlist::{AddOutcome, RemoveOutcome, ToggleOutcome};

pub fn watched_label(watched: bool) -> &'static str {
    if watched {
        "Watched"
    } else {
        "Unwatched"
    }
}

/// One item as `[id] title - Watched`.
pub fn render_item(item: &WatchlistItem) -> String {
    format!("[{}] {} - {}", item.id, item.title, watched_label(item.watched))
}

fn render_items(out: &mut String, items: &[WatchlistItem]) {
    for item in items {
        out.push_str("\n  ");
        out.push_str(&render_item(item));
    }
}

pub fn render_add(outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::Added(item) => {
            format!("Added \"{}\" to your watchlist (id {}).", item.title, item.id)
        }
        AddOutcome::AlreadyExists(item) => format!(
            "\"{}\" already exists in your watchlist (id {}).",
            item.title, item.id
        ),
    }
}

pub fn render_list(items: &[WatchlistItem]) -> String {
    if items.is_empty() {
        return "Your watchlist is empty.".to_string();
    }

    let mut out = format!("Your watchlist ({}):", plural(items.len(), "item"));
    render_items(&mut out, items);
    out
}

pub fn render_toggle(outcome: &ToggleOutcome) -> String {
    match outcome {
        ToggleOutcome::Toggled(item) => format!(
            "Marked \"{}\" as {} (id {}).",
            item.title,
            watched_label(item.watched),
            item.id
        ),
        ToggleOutcome::NotFound(id) => format!("No item found with id {}.", id),
    }
}

pub fn render_remove(outcome: &RemoveOutcome) -> String {
    match outcome {
        RemoveOutcome::Removed(item) => {
            format!("Removed \"{}\" from your watchlist (id {}).", item.title, item.id)
        }
        RemoveOutcome::NotFound(id) => format!("No item found with id {}.", id),
    }
}

pub fn render_search(query: &str, items: &[WatchlistItem]) -> String {
    if items.is_empty() {
        return format!("No matches for \"{}\".", query);
    }

    let mut out = format!(
        "Found {} for \"{}\":",
        plural(items.len(), "match"),
        query
    );
    render_items(&mut out, items);
    out
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun.ends_with("ch")) {
        (1, _) => format!("1 {}", noun),
        (n, true) => format!("{} {}es", n, noun),
        (n, false) => format!("{} {}s", n, noun),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ItemId;

    fn item(id: i64, title: &str, watched: bool) -> WatchlistItem {
        WatchlistItem {
            id: ItemId::Numeric(id),
            title: title.to_string(),
            watched,
            created_at: None,
        }
    }

    #[test]
    fn test_render_item() {
        assert_eq!(render_item(&item(3, "Dune", false)), "[3] Dune - Unwatched");
        assert_eq!(render_item(&item(4, "Heat", true)), "[4] Heat - Watched");
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&[]), "Your watchlist is empty.");
    }

    #[test]
    fn test_render_list_keeps_order() {
        let out = render_list(&[item(2, "Heat", true), item(1, "Dune", false)]);
        assert_eq!(
            out,
            "Your watchlist (2 items):\n  [2] Heat - Watched\n  [1] Dune - Unwatched"
        );
    }

    #[test]
    fn test_render_add() {
        assert_eq!(
            render_add(&AddOutcome::Added(item(1, "Dune", false))),
            "Added \"Dune\" to your watchlist (id 1)."
        );
        assert!(render_add(&AddOutcome::AlreadyExists(item(1, "Dune", false)))
            .contains("already exists"));
    }

    #[test]
    fn test_render_toggle() {
        assert_eq!(
            render_toggle(&ToggleOutcome::Toggled(item(1, "Dune", true))),
            "Marked \"Dune\" as Watched (id 1)."
        );
        assert_eq!(
            render_toggle(&ToggleOutcome::NotFound("9".to_string())),
            "No item found with id 9."
        );
    }

    #[test]
    fn test_render_remove() {
        assert_eq!(
            render_remove(&RemoveOutcome::Removed(item(1, "Dune", false))),
            "Removed \"Dune\" from your watchlist (id 1)."
        );
        assert_eq!(
            render_remove(&RemoveOutcome::NotFound(9)),
            "No item found with id 9."
        );
    }

    #[test]
    fn test_render_search() {
        assert_eq!(render_search("zzz", &[]), "No matches for \"zzz\".");
        assert_eq!(
            render_search("bat", &[item(5, "The Batman", false)]),
            "Found 1 match for \"bat\":\n  [5] The Batman - Unwatched"
        );
        assert!(render_search("e", &[item(1, "Heat", true), item(2, "Dune", false)])
            .starts_with("Found 2 matches"));
    }
}
