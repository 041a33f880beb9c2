//! Integration tests for catalog loading and search.

use std::fs;
use std::path::Path;

use nalog_mcp_server::catalog::{self, Catalog, CatalogError, CatalogStore, Product, Vehicle};

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn test_load_tolerates_bad_numeric_field() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "products.csv",
        "sku,name,unit,unit_price,description\n\
         A,Red Widget,pcs,10.5,\n\
         B,Blue Gadget,pcs,not-a-number,shiny\n",
    );

    let catalog: Catalog<Product> = CatalogStore::new(dir.path()).load("products.csv").unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("A").unwrap().unit_price, 10.5);
    assert_eq!(catalog.get("B").unwrap().unit_price, 0.0);
    assert_eq!(catalog.get("B").unwrap().description, "shiny");
}

#[test]
fn test_load_skips_rows_without_identifier() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "products.csv",
        "sku,name,unit,unit_price,description\n\
         ,Orphan,pcs,1,\n\
         \"  \",Blank,pcs,1,\n\
         C,Kept,pcs,1,\n",
    );

    let catalog: Catalog<Product> = CatalogStore::new(dir.path()).load("products.csv").unwrap();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("C").is_some());
}

#[test]
fn test_load_trims_identifier_and_missing_columns_default() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "products.csv", "sku,name\n  X-1  ,Short row\n");

    let catalog: Catalog<Product> = CatalogStore::new(dir.path()).load("products.csv").unwrap();
    let product = catalog.get("X-1").unwrap();

    assert_eq!(product.name, "Short row");
    assert_eq!(product.unit, "");
    assert_eq!(product.unit_price, 0.0);
}

#[test]
fn test_load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = CatalogStore::new(dir.path()).load::<Product>("absent.csv");

    match result {
        Err(CatalogError::NotFound(path)) => assert_eq!(path, dir.path().join("absent.csv")),
        other => panic!("expected NotFound, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_load_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested.csv")).unwrap();
    let result = CatalogStore::new(dir.path()).load::<Product>("nested.csv");
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[test]
fn test_relative_path_uses_base_dir_not_cwd() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(&dir.path().join("sub"), "vehicles.csv", "brand,model,price_rub,engine_power_hp\nLada,Vesta,1500000,106\n");

    let catalog: Catalog<Vehicle> = CatalogStore::new(dir.path())
        .load(Path::new("sub").join("vehicles.csv"))
        .unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.source(), dir.path().join("sub").join("vehicles.csv"));
}

#[test]
fn test_load_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "products.csv", "sku,name\nA,One\nB,Two\nC,Three\n");
    let store = CatalogStore::new(dir.path());

    let first: Catalog<Product> = store.load("products.csv").unwrap();
    let second: Catalog<Product> = store.load("products.csv").unwrap();

    let first: Vec<_> = first.iter().cloned().collect();
    let second: Vec<_> = second.iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn test_load_reflects_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::new(dir.path());

    write(dir.path(), "products.csv", "sku,name\nA,One\n");
    assert_eq!(store.load::<Product>("products.csv").unwrap().len(), 1);

    write(dir.path(), "products.csv", "sku,name\nA,One\nB,Two\n");
    assert_eq!(store.load::<Product>("products.csv").unwrap().len(), 2);
}

#[test]
fn test_semicolon_delimited_vehicles() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "vehicles.csv",
        "brand;model;price_rub;engine_power_hp\nHaval;Jolion;2 199 000;150\nKia;Rio;1800000,50;abc\n",
    );

    let catalog: Catalog<Vehicle> = CatalogStore::new(dir.path()).load("vehicles.csv").unwrap();

    let jolion = catalog.get("Haval Jolion").unwrap();
    assert_eq!(jolion.price_rub, 2_199_000.0);
    assert_eq!(jolion.engine_power_hp, 150);

    let rio = catalog.get("Kia Rio").unwrap();
    assert_eq!(rio.price_rub, 1_800_000.5);
    assert_eq!(rio.engine_power_hp, 0);
}

#[test]
fn test_search_scenario_widget() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "products.csv", "sku,name\nA,Red Widget\nB,Blue Gadget\n");
    let catalog: Catalog<Product> = CatalogStore::new(dir.path()).load("products.csv").unwrap();

    let found = catalog::search("widget", 10, &catalog);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "A");
}

#[test]
fn test_search_empty_query_and_zero_limit() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "products.csv", "sku,name\nA,Red Widget\nB,Green Widget\n");
    let catalog: Catalog<Product> = CatalogStore::new(dir.path()).load("products.csv").unwrap();

    assert!(catalog::search("", 5, &catalog).is_empty());
    assert_eq!(catalog::search("widget", 0, &catalog).len(), 1);
    assert_eq!(catalog::search("widget", -10, &catalog).len(), 1);
}

#[test]
fn test_bundled_data_files_load() {
    let store = CatalogStore::new(nalog_mcp_server::config::default_data_dir());

    let products: Catalog<Product> = store.load("products.csv").unwrap();
    let vehicles: Catalog<Vehicle> = store.load("vehicles.csv").unwrap();

    assert!(!products.is_empty());
    assert!(!vehicles.is_empty());
    assert_eq!(catalog::search("vesta", 10, &vehicles)[0].engine_power_hp, 106);
}
