//! Integration tests for the Catalog domain
//!
//! These run the SeaORM repositories and services against an in-memory
//! SQLite database with the real schema applied, so that:
//! - Relationship checks happen before any write
//! - Failed writes leave rows untouched
//! - Visibility filters match the activity rules

use domain_catalog::*;
use test_utils::{assertions::*, TestDataBuilder, TestDatabase};

struct Catalog {
    _db: TestDatabase,
    categories: CategoryService<SqlCategoryRepository>,
    products: ProductService<SqlProductRepository>,
}

async fn catalog() -> Catalog {
    let db = TestDatabase::new().await;
    let categories = CategoryService::new(SqlCategoryRepository::new(db.connection()));
    let products = ProductService::new(SqlProductRepository::new(db.connection()));
    Catalog {
        _db: db,
        categories,
        products,
    }
}

fn new_category(name: &str, parent_id: Option<i32>) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        parent_id,
    }
}

fn new_product(builder: &TestDataBuilder, name: &str, category_id: i32, stock: i32) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", name),
        description: Some("Integration test product".to_string()),
        price: builder.price(),
        image_url: None,
        stock,
        category_id,
    }
}

// ============================================================================
// Category Tests
// ============================================================================

#[tokio::test]
async fn test_create_category_under_active_parent() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("category_parent");

    let tools = catalog
        .categories
        .create_category(new_category(&builder.name("category", "tools"), None))
        .await
        .unwrap();
    let hand_tools = catalog
        .categories
        .create_category(new_category(&builder.name("category", "hand"), Some(tools.id)))
        .await
        .unwrap();

    assert_eq!(hand_tools.parent_id, Some(tools.id));
    assert!(hand_tools.is_active);
    assert_eq!(hand_tools.state(), ActivityState::Active);
}

#[tokio::test]
async fn test_create_category_with_missing_or_inactive_parent_fails() {
    let catalog = catalog().await;

    let result = catalog
        .categories
        .create_category(new_category("Orphan", Some(999)))
        .await;
    assert!(
        matches!(result, Err(CatalogError::Validation(ref msg)) if msg == "Parent category not found"),
        "Expected Validation error, got {:?}",
        result
    );

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    catalog.categories.delete_category(tools.id).await.unwrap();

    let result = catalog
        .categories
        .create_category(new_category("Hand tools", Some(tools.id)))
        .await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));

    // Nothing was written by the failed attempts
    let listed = catalog.categories.list_categories().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_update_category_rejects_self_parent() {
    let catalog = catalog().await;

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();

    let result = catalog
        .categories
        .update_category(
            tools.id,
            UpdateCategory {
                parent_id: Some(tools.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[tokio::test]
async fn test_update_category_renames() {
    let catalog = catalog().await;

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();

    let renamed = catalog
        .categories
        .update_category(
            tools.id,
            UpdateCategory {
                name: Some("Hardware".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(renamed.id, tools.id);
    assert_eq!(renamed.name, "Hardware");
    assert_eq!(renamed.parent_id, None);
}

#[tokio::test]
async fn test_update_category_rejects_descendant_as_parent() {
    let catalog = catalog().await;

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hand = catalog
        .categories
        .create_category(new_category("Hand tools", Some(tools.id)))
        .await
        .unwrap();
    let hammers = catalog
        .categories
        .create_category(new_category("Hammers", Some(hand.id)))
        .await
        .unwrap();

    // Direct child and grandchild both close a loop
    for descendant in [hand.id, hammers.id] {
        let result = catalog
            .categories
            .update_category(
                tools.id,
                UpdateCategory {
                    parent_id: Some(descendant),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(CatalogError::Validation(msg))
                if msg == "Category cannot be nested under its own descendant"
        ));
    }

    let categories = catalog.categories.list_categories().await.unwrap();
    let stored = categories.iter().find(|c| c.id == tools.id).unwrap();
    assert_eq!(stored.parent_id, None);

    // Moving a leaf under a sibling branch is still allowed
    let garden = catalog
        .categories
        .create_category(new_category("Garden", None))
        .await
        .unwrap();
    let moved = catalog
        .categories
        .update_category(
            hammers.id,
            UpdateCategory {
                parent_id: Some(garden.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(garden.id));
}

#[tokio::test]
async fn test_deleted_category_is_hidden_and_blocks_new_products() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("category_soft_delete");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();

    let ack = catalog.categories.delete_category(tools.id).await.unwrap();
    assert_eq!(ack.status, "success");

    let listed = catalog.categories.list_categories().await.unwrap();
    assert!(listed.iter().all(|c| c.id != tools.id));

    let result = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await;
    assert!(
        matches!(result, Err(CatalogError::Validation(ref msg)) if msg == "Category 'Tools' is inactive"),
        "Expected Validation error, got {:?}",
        result
    );

    let again = catalog.categories.delete_category(tools.id).await;
    assert!(matches!(again, Err(CatalogError::NotFound(_))));

    let update = catalog
        .categories
        .update_category(
            tools.id,
            UpdateCategory {
                name: Some("Hardware".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(CatalogError::NotFound(_))));
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
async fn test_create_product_requires_existing_category() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("product_missing_category");

    let result = catalog
        .products
        .create_product(new_product(&builder, "ghost", 42, 1))
        .await;

    assert!(
        matches!(result, Err(CatalogError::NotFound(ref msg)) if msg == "Category with id 42 not found"),
        "Expected NotFound error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_create_and_get_product() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let input = new_product(&builder, "drill", tools.id, builder.stock());

    let created = catalog.products.create_product(input.clone()).await.unwrap();
    assert_eq!(created.name, input.name);
    assert_eq!(created.category_id, tools.id);
    assert!(created.is_active);
    assert_price_eq(created.price, input.price, "created price");

    let retrieved = catalog.products.get_product(created.id).await.unwrap();
    assert_eq!(retrieved, created);

    let second = catalog
        .products
        .create_product(new_product(&builder, "saw", tools.id, 1))
        .await
        .unwrap();
    assert_ne!(second.id, created.id);
}

#[tokio::test]
async fn test_list_active_products_is_exact_available_set() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("available_set");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let garden = catalog
        .categories
        .create_category(new_category("Garden", None))
        .await
        .unwrap();

    let in_stock = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();
    let sold_out = catalog
        .products
        .create_product(new_product(&builder, "wrench", tools.id, 0))
        .await
        .unwrap();
    let deleted = catalog
        .products
        .create_product(new_product(&builder, "pliers", tools.id, 3))
        .await
        .unwrap();
    let hidden_category = catalog
        .products
        .create_product(new_product(&builder, "rake", garden.id, 8))
        .await
        .unwrap();

    catalog.products.delete_product(deleted.id).await.unwrap();
    catalog.categories.delete_category(garden.id).await.unwrap();

    let listed: Vec<i32> = catalog
        .products
        .list_active_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(listed, vec![in_stock.id]);
    assert!(!listed.contains(&sold_out.id));
    assert!(!listed.contains(&hidden_category.id));
}

#[tokio::test]
async fn test_list_products_by_category() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("by_category");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let garden = catalog
        .categories
        .create_category(new_category("Garden", None))
        .await
        .unwrap();

    // Out-of-stock products are still listed per category
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 0))
        .await
        .unwrap();
    catalog
        .products
        .create_product(new_product(&builder, "rake", garden.id, 2))
        .await
        .unwrap();

    let listed = catalog
        .products
        .list_products_by_category(tools.id)
        .await
        .unwrap();
    assert_eq!(listed, vec![hammer]);

    catalog.categories.delete_category(garden.id).await.unwrap();
    let result = catalog.products.list_products_by_category(garden.id).await;
    assert!(
        matches!(result, Err(CatalogError::NotFound(ref msg)) if msg == "Category not found or inactive")
    );

    let result = catalog.products.list_products_by_category(999).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_empty_update_is_a_no_op() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("empty_update");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();

    let updated = catalog
        .products
        .update_product(hammer.id, UpdateProduct::default())
        .await
        .unwrap();
    assert_eq!(updated, hammer);

    let result = catalog
        .products
        .update_product(999, UpdateProduct::default())
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_stock_only_update_leaves_other_fields() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("stock_only");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();

    let updated = catalog
        .products
        .update_product(
            hammer.id,
            UpdateProduct {
                stock: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.stock, 12);
    assert_eq!(updated.name, hammer.name);
    assert_eq!(updated.category_id, hammer.category_id);
    assert_eq!(updated.description, hammer.description);
}

#[tokio::test]
async fn test_update_can_clear_optional_fields() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("clear_optional");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(CreateProduct {
            image_url: Some("https://img.example.com/hammer.png".to_string()),
            ..new_product(&builder, "hammer", tools.id, 5)
        })
        .await
        .unwrap();
    assert!(hammer.description.is_some());

    let updated = catalog
        .products
        .update_product(
            hammer.id,
            UpdateProduct {
                description: Some(None),
                image_url: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.image_url, None);
    assert_eq!(updated.stock, 5);
}

#[tokio::test]
async fn test_update_into_inactive_category_leaves_row_unmodified() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("inactive_target");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let garden = catalog
        .categories
        .create_category(new_category("Garden", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();
    catalog.categories.delete_category(garden.id).await.unwrap();

    let result = catalog
        .products
        .update_product(
            hammer.id,
            UpdateProduct {
                name: Some("Sledgehammer".to_string()),
                category_id: Some(garden.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));

    let missing_target = catalog
        .products
        .update_product(
            hammer.id,
            UpdateProduct {
                category_id: Some(999),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing_target, Err(CatalogError::Validation(_))));

    let stored = catalog.products.get_product(hammer.id).await.unwrap();
    assert_eq!(stored, hammer);
}

#[tokio::test]
async fn test_update_is_blocked_when_current_category_is_inactive() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("inactive_current");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();
    catalog.categories.delete_category(tools.id).await.unwrap();

    let result = catalog
        .products
        .update_product(
            hammer.id,
            UpdateProduct {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[tokio::test]
async fn test_delete_product_then_not_found() {
    let catalog = catalog().await;
    let builder = TestDataBuilder::from_test_name("delete_twice");

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    let hammer = catalog
        .products
        .create_product(new_product(&builder, "hammer", tools.id, 5))
        .await
        .unwrap();

    let ack = catalog.products.delete_product(hammer.id).await.unwrap();
    assert_eq!(ack, Acknowledgement::success(format!("Product {} deleted", hammer.id)));

    let again = catalog.products.delete_product(hammer.id).await;
    assert!(matches!(again, Err(CatalogError::NotFound(_))));

    let get = catalog.products.get_product(hammer.id).await;
    assert!(matches!(get, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_tools_hammer_scenario() {
    let catalog = catalog().await;

    let tools = catalog
        .categories
        .create_category(new_category("Tools", None))
        .await
        .unwrap();
    assert_eq!(tools.id, 1);

    let hammer = catalog
        .products
        .create_product(CreateProduct {
            name: "Hammer".to_string(),
            description: None,
            price: 9.99,
            image_url: None,
            stock: 5,
            category_id: tools.id,
        })
        .await
        .unwrap();
    assert_eq!(hammer.id, 1);

    let listed = catalog.products.list_active_products().await.unwrap();
    assert!(listed.iter().any(|p| p.id == hammer.id));

    catalog.categories.delete_category(tools.id).await.unwrap();

    let listed = catalog.products.list_active_products().await.unwrap();
    assert!(listed.iter().all(|p| p.id != hammer.id));

    let result = catalog.products.get_product(hammer.id).await;
    assert!(matches!(
        result,
        Err(CatalogError::NotFound(ref msg))
            if msg == "Product not found, inactive, or its category is inactive"
    ));
}

#[tokio::test]
async fn test_sql_and_in_memory_repositories_agree() {
    let db = TestDatabase::new().await;
    let sql_categories = SqlCategoryRepository::new(db.connection());
    let sql_products = SqlProductRepository::new(db.connection());
    let memory = InMemoryCatalog::new();
    let builder = TestDataBuilder::from_test_name("repositories_agree");

    for category in ["Tools", "Garden"] {
        CategoryRepository::create(&sql_categories, new_category(category, None))
            .await
            .unwrap();
        CategoryRepository::create(&memory, new_category(category, None))
            .await
            .unwrap();
    }
    for (name, category_id, stock) in [("hammer", 1, 5), ("saw", 1, 0), ("rake", 2, 3)] {
        let input = new_product(&builder, name, category_id, stock);
        ProductRepository::create(&sql_products, input.clone())
            .await
            .unwrap();
        ProductRepository::create(&memory, input).await.unwrap();
    }
    CategoryRepository::deactivate(&sql_categories, 2).await.unwrap();
    CategoryRepository::deactivate(&memory, 2).await.unwrap();

    let from_sql = ProductRepository::list_available(&sql_products).await.unwrap();
    let from_memory = ProductRepository::list_available(&memory).await.unwrap();
    assert_eq!(from_sql.len(), from_memory.len());
    for (a, b) in from_sql.iter().zip(&from_memory) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_price_eq(a.price, b.price, "listed price");
    }

    let stored = ProductRepository::find_by_id(&sql_products, 3).await.unwrap();
    let stored = assert_some(stored, "inactive-category product is still stored");
    assert_eq!(stored.category_id, 2);
}
