//! Closed vocabulary of word categories.

/// Category definition
pub struct Category {
  pub id: &'static str,
  pub label: &'static str,
}

/// All category definitions. Import validation rejects ids outside this
/// list.
pub const CATEGORIES: [Category; 12] = [
  Category { id: "household", label: "Household objects" },
  Category { id: "kitchen", label: "Kitchen" },
  Category { id: "bathroom", label: "Bathroom" },
  Category { id: "office", label: "Office" },
  Category { id: "clothing", label: "Clothing and accessories" },
  Category { id: "furniture", label: "Furniture" },
  Category { id: "tools", label: "Tools and equipment" },
  Category { id: "medical", label: "Medical" },
  Category { id: "animals", label: "Animals" },
  Category { id: "social", label: "Social" },
  Category { id: "plants", label: "Plants" },
  Category { id: "food", label: "Food and drink" },
];

/// Is this id part of the closed category vocabulary?
pub fn is_valid_category(id: &str) -> bool {
  CATEGORIES.iter().any(|c| c.id == id)
}

pub fn get_category(id: &str) -> Option<&'static Category> {
  CATEGORIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_categories_valid() {
    assert!(is_valid_category("household"));
    assert!(is_valid_category("animals"));
  }

  #[test]
  fn test_unknown_category_invalid() {
    assert!(!is_valid_category("sports"));
    assert!(!is_valid_category(""));
    assert!(!is_valid_category("Household"));
  }

  #[test]
  fn test_get_category() {
    assert_eq!(get_category("kitchen").unwrap().label, "Kitchen");
    assert!(get_category("nope").is_none());
  }

  #[test]
  fn test_category_ids_unique() {
    let mut ids: Vec<&str> = CATEGORIES.iter().map(|c| c.id).collect();
    ids.sort();
    let len = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), len);
  }
}
