use serde::Serialize;
use store::{MenuItem, Store};

use crate::error::AppError;

/// Display order for the menu page. Categories the store returns that are
/// not listed here sort after these, alphabetically.
pub const CATEGORY_ORDER: [&str; 6] = [
    "starters",
    "mainCourse",
    "biryani",
    "chinese",
    "desserts",
    "drinks",
];

#[derive(Debug, Serialize)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Offerable items, name-ascending, optionally narrowed to one category.
/// Store failures surface as a loading/error state on the caller; no
/// retry.
pub async fn list_available(
    store: &Store,
    category: Option<&str>,
) -> Result<Vec<MenuItem>, AppError> {
    store
        .available_menu_items(category)
        .await
        .map_err(AppError::RemoteQuery)
}

/// Resolves an item for add-to-cart. Unknown ids and rows the store still
/// holds but no longer offers are distinct failures.
pub async fn available_item(store: &Store, id: &str) -> Result<MenuItem, AppError> {
    let item = store
        .menu_item_by_id(id)
        .await
        .map_err(AppError::RemoteQuery)?
        .ok_or_else(|| AppError::UnknownMenuItem(id.to_string()))?;

    if !item.is_available {
        return Err(AppError::ItemUnavailable(item.name));
    }
    Ok(item)
}

/// Buckets a flat item list into display sections. Items inside a section
/// keep the store's name ordering.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        match sections
            .iter_mut()
            .find(|section| section.category == item.category)
        {
            Some(section) => section.items.push(item),
            None => sections.push(MenuSection {
                category: item.category.clone(),
                items: vec![item],
            }),
        }
    }
    sections.sort_by(|a, b| rank(&a.category).cmp(&rank(&b.category)));
    sections
}

fn rank(category: &str) -> (usize, String) {
    let position = CATEGORY_ORDER
        .iter()
        .position(|known| *known == category)
        .unwrap_or(CATEGORY_ORDER.len());
    (position, category.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: 100.0,
            description: None,
            is_available: true,
        }
    }

    #[test]
    fn groups_in_display_order() {
        let items = vec![
            item("d1", "Gulab Jamun", "desserts"),
            item("s1", "Gobi 65", "starters"),
            item("b1", "Veg Biryani", "biryani"),
            item("s2", "Paneer Tikka", "starters"),
        ];

        let sections = group_by_category(items);
        let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, ["starters", "biryani", "desserts"]);
        assert_eq!(sections[0].items.len(), 2);
    }

    #[test]
    fn unknown_categories_sort_last_alphabetically() {
        let items = vec![
            item("x1", "Mystery Special", "specials"),
            item("a1", "Combo Box", "combos"),
            item("dr1", "Tea", "drinks"),
        ];

        let sections = group_by_category(items);
        let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, ["drinks", "combos", "specials"]);
    }

    #[test]
    fn empty_input_groups_to_nothing() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
