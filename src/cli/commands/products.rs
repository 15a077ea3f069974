//! Seed-products command handler

use crate::config::Config;
use crate::db::{NewProduct, Store};
use crate::entities::products::Category;

/// `(name, description, category, base cost in hundredths)`
pub const SAMPLE_PRODUCTS: &[(&str, &str, Category, i64)] = &[
    (
        "Kaos Cotton Combed 30s",
        "Kaos premium bahan Cotton Combed 30s, lembut dan nyaman",
        Category::Apparel,
        4_500_000,
    ),
    (
        "Kaos Cotton Combed 24s",
        "Kaos standar bahan Cotton Combed 24s, tebal dan kuat",
        Category::Apparel,
        4_000_000,
    ),
    (
        "Hoodie",
        "Hoodie pullover bahan fleece tebal",
        Category::Apparel,
        8_500_000,
    ),
    (
        "Hoodie Zipper",
        "Hoodie dengan zipper depan bahan fleece",
        Category::Apparel,
        9_500_000,
    ),
    (
        "Crewneck",
        "Sweater crewneck bahan fleece premium",
        Category::Apparel,
        8_000_000,
    ),
    (
        "Mug Ceramic",
        "Mug keramik 11oz untuk sublimasi",
        Category::Merchandise,
        2_500_000,
    ),
    (
        "Keychain Acrylic",
        "Gantungan kunci akrilik custom print",
        Category::Merchandise,
        1_500_000,
    ),
];

/// Inserts any missing sample products. Returns `(created, existing)` names.
pub async fn seed_products(store: &Store) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let mut created = Vec::new();
    let mut existing = Vec::new();

    for (name, description, category, base_cost) in SAMPLE_PRODUCTS {
        let (product, was_created) = store
            .get_or_create_product(NewProduct {
                name: (*name).to_string(),
                description: Some((*description).to_string()),
                category: *category,
                base_cost: *base_cost,
                is_active: true,
            })
            .await?;

        if was_created {
            created.push(product.name);
        } else {
            existing.push(product.name);
        }
    }

    Ok((created, existing))
}

pub async fn cmd_seed_products(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let (created, existing) = seed_products(&store).await?;

    for name in &created {
        println!("✓ Created: {name}");
    }
    for name in &existing {
        println!("• Already exists: {name}");
    }

    println!();
    println!("Done! Created {} new products.", created.len());
    Ok(())
}
