use uuid::Uuid;

pub const SKU_PREFIX: &str = "PICU";

/// Number of leading characters taken from each identifier.
const ID_PREFIX_LEN: usize = 4;

/// Derives the SKU for a design/product pairing.
///
/// The result is `PICU-<design>-<product>` where each part is the first four
/// characters of the hyphenated UUID, upper-cased.
///
/// ```rust
/// use picu::domain::generate_sku;
/// use uuid::Uuid;
///
/// let design = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
/// let product = Uuid::parse_str("0f9e8d7c-0000-4000-8000-000000000000").unwrap();
/// assert_eq!(generate_sku(design, product), "PICU-A1B2-0F9E");
/// ```
#[must_use]
pub fn generate_sku(design_id: Uuid, product_id: Uuid) -> String {
    format!(
        "{SKU_PREFIX}-{}-{}",
        short_id(design_id),
        short_id(product_id)
    )
}

fn short_id(id: Uuid) -> String {
    let hyphenated = id.hyphenated().to_string();
    hyphenated[..ID_PREFIX_LEN].to_ascii_uppercase()
}
