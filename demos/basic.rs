use product_store::{NewProduct, ProductStore, ProductUpdate};

fn main() -> Result<(), product_store::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::temp_dir().join("product_store_example_basic.json");
    let _ = std::fs::remove_file(&path);
    let store = ProductStore::open(&path);
    println!("products = {:?}", store.get_products()?);

    // add
    store.add_product(NewProduct::new(
        "test product",
        "This is a test product",
        200,
        "no image",
        "abc123",
        25,
    ))?;
    println!("products = {:?}", store.get_products()?);

    // a second add with the same code is rejected
    if let Err(e) = store.add_product(NewProduct::new("copy", "copy", 1, "none", "abc123", 1)) {
        println!("rejected: {e}");
    }

    // partial update
    let updated = store.update_product(1, ProductUpdate::new().description("A new description"))?;
    println!("updated  = {updated:?}");

    // delete
    store.delete_product_by_id(1)?;
    println!("after delete: len = {}", store.len()?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
