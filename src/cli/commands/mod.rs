mod admin;
mod products;

pub use admin::{AdminOutcome, cmd_create_admin, create_admin};
pub use products::{SAMPLE_PRODUCTS, cmd_seed_products, seed_products};
