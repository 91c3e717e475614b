use liferpg_core::db::open_db_in_memory;
use liferpg_core::repo::category_repo::CategoryRepository;
use liferpg_core::seed::seed_default_categories;
use liferpg_core::{
    CategoryService, CategoryServiceError, CreateCategoryRequest, SqliteStore,
};

#[test]
fn seed_populates_an_empty_store_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();

    assert!(seed_default_categories(&store).unwrap());
    assert_eq!(store.count_categories().unwrap(), 10);

    // Re-running against a populated store is a no-op.
    assert!(!seed_default_categories(&store).unwrap());
    assert_eq!(store.count_categories().unwrap(), 10);

    let categories = store.list_categories().unwrap();
    assert_eq!(categories.len(), 10);
    assert_eq!(categories[0].name, "Aprendizaje");
    assert!(categories
        .iter()
        .any(|category| category.name == "Salud" && category.base_xp == 15));
}

#[test]
fn category_service_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteStore::try_new(&conn).unwrap());

    let created = service
        .create_category(&CreateCategoryRequest {
            name: "Deporte".to_string(),
            description: "entrenamiento".to_string(),
            icon: "barbell".to_string(),
            color: "#112233".to_string(),
            base_xp: 20,
        })
        .unwrap();

    let fetched = service.get_category(created.uuid).unwrap();
    assert_eq!(fetched, created);

    let listed = service.list_categories().unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn category_service_rejects_invalid_color() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service
        .create_category(&CreateCategoryRequest {
            name: "Deporte".to_string(),
            description: "entrenamiento".to_string(),
            icon: "barbell".to_string(),
            color: "blue".to_string(),
            base_xp: 20,
        })
        .unwrap_err();
    assert!(matches!(err, CategoryServiceError::Validation(_)));
}

#[test]
fn get_unknown_category_fails_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service.get_category(uuid::Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, CategoryServiceError::CategoryNotFound(_)));
}
