use product_store::{
    Error, FieldValue, MemorySink, NewProduct, ProductStore, ProductUpdate, Severity,
};
use std::sync::Arc;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("product_store_test_{}.json", name))
}

fn fresh(name: &str) -> (ProductStore, std::path::PathBuf) {
    let path = temp_path(name);
    let _ = std::fs::remove_file(&path);
    (ProductStore::open(&path), path)
}

fn item(code: &str) -> NewProduct {
    NewProduct::new("title", "desc", 10, "thumb", code, 5)
}

// ---- add ---------------------------------------------------------------------

#[test]
fn ids_follow_insertion_order() {
    let (db, path) = fresh("ids_in_order");
    for i in 0..5 {
        db.add_product(item(&format!("c{i}"))).unwrap();
    }
    let ids: Vec<u64> = db.get_products().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn add_returns_stored_product() {
    let (db, path) = fresh("add_returns");
    let added = db.add_product(item("c1")).unwrap();
    assert_eq!(added.id, 1);
    assert_eq!(db.get_product_by_id(1).unwrap(), Some(added));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn duplicate_code_is_rejected() {
    let (db, path) = fresh("dup_code");
    db.add_product(item("c1")).unwrap();
    let before = db.get_products().unwrap();

    let err = db
        .add_product(NewProduct::new("other", "other", 1, "x", "c1", 1))
        .unwrap_err();
    assert_eq!(err, Error::DuplicateCode("c1".into()));
    assert_eq!(db.get_products().unwrap(), before);
    assert_eq!(db.len().unwrap(), 1);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn every_empty_field_is_rejected() {
    let (db, path) = fresh("empty_fields");
    db.add_product(item("keep")).unwrap();
    let before = db.get_products().unwrap();

    let cases = [
        (NewProduct::new("", "d", 1, "t", "x", 1), "title"),
        (NewProduct::new("a", "", 1, "t", "x", 1), "description"),
        (NewProduct::new("a", "d", "", "t", "x", 1), "price"),
        (NewProduct::new("a", "d", 1, "", "x", 1), "thumbnail"),
        (NewProduct::new("a", "d", 1, "t", "", 1), "code"),
        (NewProduct::new("a", "d", 1, "t", "x", ""), "stock"),
    ];
    for (draft, field) in cases {
        assert_eq!(db.add_product(draft).unwrap_err(), Error::MissingField(field));
    }
    assert_eq!(db.get_products().unwrap(), before);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn zero_price_and_stock_are_accepted() {
    let (db, path) = fresh("zero_values");
    let added = db
        .add_product(NewProduct::new("free", "d", 0, "t", "c0", 0))
        .unwrap();
    assert_eq!(added.price, FieldValue::from(0));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn ids_are_not_reused_after_deleting_the_last() {
    let (db, path) = fresh("id_reuse");
    db.add_product(item("a")).unwrap();
    db.add_product(item("b")).unwrap();
    db.add_product(item("c")).unwrap();
    db.delete_product_by_id(1).unwrap();

    let added = db.add_product(item("d")).unwrap();
    assert_eq!(added.id, 4);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn add_after_highest_possible_id_is_an_error() {
    let path = temp_path("id_exhausted");
    let raw = format!(
        r#"[{{"id":{},"title":"t","description":"d","price":1,"thumbnail":"x","code":"k1","stock":1}}]"#,
        u64::MAX
    );
    std::fs::write(&path, &raw).unwrap();
    let sink = Arc::new(MemorySink::new());
    let db = ProductStore::builder(&path).sink(sink.clone()).build();

    let err = db
        .add_product(NewProduct::new("a", "b", 1, "c", "k2", 1))
        .unwrap_err();
    assert_eq!(err, Error::IdExhausted);
    assert!(sink.contains("No ids left"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);

    // the lock was released, later calls still work
    assert_eq!(db.delete_product_by_id(u64::MAX).unwrap().code, "k1");
    let _ = std::fs::remove_file(&path);
}

// ---- get ---------------------------------------------------------------------

#[test]
fn get_missing_id_is_none_and_logged() {
    let path = temp_path("get_missing");
    let _ = std::fs::remove_file(&path);
    let sink = Arc::new(MemorySink::new());
    let db = ProductStore::builder(&path).sink(sink.clone()).build();

    assert_eq!(db.get_product_by_id(42).unwrap(), None);
    assert!(sink.contains("Not Found"));
    assert_eq!(sink.count(Severity::Warn), 1);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn get_by_code() {
    let (db, path) = fresh("get_code");
    db.add_product(item("a")).unwrap();
    let b = db.add_product(item("b")).unwrap();
    assert_eq!(db.get_product_by_code("b").unwrap(), Some(b));
    assert_eq!(db.get_product_by_code("zzz").unwrap(), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_store_reads_empty() {
    let (db, path) = fresh("empty");
    assert!(db.get_products().unwrap().is_empty());
    assert!(db.is_empty().unwrap());
    let _ = std::fs::remove_file(&path);
}

// ---- update ------------------------------------------------------------------

#[test]
fn update_changes_only_given_fields() {
    let (db, path) = fresh("update_partial");
    let first = db.add_product(item("c1")).unwrap();
    let second = db.add_product(item("c2")).unwrap();

    let updated = db
        .update_product(1, ProductUpdate::new().price(15).title("renamed"))
        .unwrap();

    let mut expected = first;
    expected.price = FieldValue::from(15);
    expected.title = "renamed".into();
    assert_eq!(updated, expected);
    assert_eq!(db.get_product_by_id(1).unwrap(), Some(expected));
    assert_eq!(db.get_product_by_id(2).unwrap(), Some(second));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_from_json_patch() {
    let (db, path) = fresh("update_json");
    db.add_product(item("c1")).unwrap();

    let patch: ProductUpdate =
        serde_json::from_str(r#"{"description": "new description"}"#).unwrap();
    let updated = db.update_product(1, patch).unwrap();
    assert_eq!(updated.description, "new description");
    assert_eq!(updated.code, "c1");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_missing_id_is_not_found() {
    let (db, path) = fresh("update_missing");
    db.add_product(item("c1")).unwrap();
    let before = db.get_products().unwrap();

    let err = db.update_product(9, ProductUpdate::new().stock(1)).unwrap_err();
    assert_eq!(err, Error::NotFound(9));
    assert_eq!(db.get_products().unwrap(), before);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_to_taken_code_is_rejected() {
    let (db, path) = fresh("update_dup_code");
    db.add_product(item("c1")).unwrap();
    db.add_product(item("c2")).unwrap();
    let before = db.get_products().unwrap();

    let err = db.update_product(2, ProductUpdate::new().code("c1")).unwrap_err();
    assert_eq!(err, Error::DuplicateCode("c1".into()));
    assert_eq!(db.get_products().unwrap(), before);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_to_own_code_is_fine() {
    let (db, path) = fresh("update_own_code");
    db.add_product(item("c1")).unwrap();
    let updated = db
        .update_product(1, ProductUpdate::new().code("c1").stock("plenty"))
        .unwrap();
    assert_eq!(updated.stock, FieldValue::Text("plenty".into()));
    let _ = std::fs::remove_file(&path);
}

// ---- delete ------------------------------------------------------------------

#[test]
fn delete_removes_one_and_keeps_order() {
    let (db, path) = fresh("delete_order");
    for code in ["a", "b", "c", "d"] {
        db.add_product(item(code)).unwrap();
    }

    let removed = db.delete_product_by_id(2).unwrap();
    assert_eq!(removed.code, "b");

    let codes: Vec<String> = db.get_products().unwrap().into_iter().map(|p| p.code).collect();
    assert_eq!(codes, vec!["a", "c", "d"]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn delete_missing_id_is_not_found() {
    let path = temp_path("delete_missing");
    let _ = std::fs::remove_file(&path);
    let sink = Arc::new(MemorySink::new());
    let db = ProductStore::builder(&path).sink(sink.clone()).build();
    db.add_product(item("a")).unwrap();

    assert_eq!(db.delete_product_by_id(7).unwrap_err(), Error::NotFound(7));
    assert_eq!(db.len().unwrap(), 1);
    assert!(sink.contains("Product with ID 7 not found"));
    assert_eq!(sink.count(Severity::Warn), 1);
    let _ = std::fs::remove_file(&path);
}

// ---- scenarios ---------------------------------------------------------------

#[test]
fn add_update_delete_walkthrough() {
    let (db, path) = fresh("walkthrough");

    db.add_product(NewProduct::new("A", "desc", 10, "thumb", "c1", 5))
        .unwrap();
    let products = db.get_products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 1);

    let b = db
        .add_product(NewProduct::new("B", "desc2", 20, "thumb2", "c2", 3))
        .unwrap();
    assert_eq!(b.id, 2);

    let a = db.update_product(1, ProductUpdate::new().price(15)).unwrap();
    assert_eq!(a.price, FieldValue::from(15));
    assert_eq!(a.title, "A");
    assert_eq!(a.description, "desc");
    assert_eq!(a.thumbnail, "thumb");
    assert_eq!(a.code, "c1");
    assert_eq!(a.stock, FieldValue::from(5));
    assert_eq!(db.get_product_by_id(2).unwrap(), Some(b.clone()));

    db.delete_product_by_id(1).unwrap();
    assert_eq!(db.get_products().unwrap(), vec![b]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn confirmations_reach_the_sink() {
    let path = temp_path("confirmations");
    let _ = std::fs::remove_file(&path);
    let sink = Arc::new(MemorySink::new());
    let db = ProductStore::builder(&path).sink(sink.clone()).build();

    db.add_product(item("c1")).unwrap();
    db.update_product(1, ProductUpdate::new().stock(2)).unwrap();
    db.delete_product_by_id(1).unwrap();

    assert!(sink.contains("New file created"));
    assert!(sink.contains("Product with ID 1 has been updated"));
    assert!(sink.contains("Product with ID 1 has been deleted"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn debug_impls_dont_panic() {
    let (db, path) = fresh("debug");
    let dbg_store = format!("{:?}", db);
    assert!(dbg_store.contains("ProductStore"));
    assert!(dbg_store.contains("path"));
    assert!(dbg_store.contains("pretty: true"));

    let compact = ProductStore::builder(&path).pretty(false).build();
    assert!(format!("{:?}", compact).contains("pretty: false"));

    let dbg_builder = format!("{:?}", ProductStore::builder(&path));
    assert!(dbg_builder.contains("ProductStoreBuilder"));
    let _ = std::fs::remove_file(&path);
}
