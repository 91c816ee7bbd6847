//! Relationship checks shared by every repository implementation.
//!
//! Each takes the row a repository just looked up (inside the same
//! transaction as the write that follows) and fails fast before any write.

use crate::error::{CatalogError, CatalogResult};
use crate::models::Category;

/// A parent must exist and be active.
pub fn check_parent(parent: Option<&Category>) -> CatalogResult<()> {
    match parent {
        Some(parent) if parent.is_active => Ok(()),
        _ => Err(CatalogError::parent_not_found()),
    }
}

/// `ancestors` is the parent chain above a prospective parent, nearest first.
/// Re-parenting `id` under that parent must not close a loop.
pub fn check_ancestors(id: i32, ancestors: &[i32]) -> CatalogResult<()> {
    if ancestors.contains(&id) {
        return Err(CatalogError::parent_cycle());
    }
    Ok(())
}

/// Category for a new product: missing is 404, inactive is 400.
pub fn check_category_for_create(id: i32, category: Option<&Category>) -> CatalogResult<()> {
    match category {
        None => Err(CatalogError::category_not_found(id)),
        Some(c) if !c.is_active => Err(CatalogError::category_inactive(&c.name)),
        Some(_) => Ok(()),
    }
}

/// Category for a product update: any failure is a 400, since the product
/// itself was found.
pub fn check_category_for_update(id: i32, category: Option<&Category>) -> CatalogResult<()> {
    match check_category_for_create(id, category) {
        Err(CatalogError::NotFound(msg)) => Err(CatalogError::Validation(msg)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(is_active: bool) -> Category {
        Category {
            id: 1,
            name: "Tools".to_string(),
            parent_id: None,
            is_active,
        }
    }

    #[test]
    fn test_parent_must_be_active() {
        assert!(check_parent(Some(&category(true))).is_ok());
        assert!(matches!(
            check_parent(Some(&category(false))),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(check_parent(None), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_ancestor_chain_must_not_contain_category() {
        assert!(check_ancestors(1, &[]).is_ok());
        assert!(check_ancestors(1, &[3, 2]).is_ok());
        assert!(matches!(
            check_ancestors(1, &[3, 1]),
            Err(CatalogError::Validation(msg)) if msg == "Category cannot be nested under its own descendant"
        ));
    }

    #[test]
    fn test_create_distinguishes_missing_from_inactive() {
        assert!(matches!(
            check_category_for_create(9, None),
            Err(CatalogError::NotFound(msg)) if msg == "Category with id 9 not found"
        ));
        assert!(matches!(
            check_category_for_create(1, Some(&category(false))),
            Err(CatalogError::Validation(msg)) if msg == "Category 'Tools' is inactive"
        ));
        assert!(check_category_for_create(1, Some(&category(true))).is_ok());
    }

    #[test]
    fn test_update_reports_missing_category_as_validation() {
        assert!(matches!(
            check_category_for_update(9, None),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            check_category_for_update(1, Some(&category(false))),
            Err(CatalogError::Validation(_))
        ));
    }
}
