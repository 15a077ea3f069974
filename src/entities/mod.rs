pub mod prelude;

pub mod design_products;
pub mod designs;
pub mod products;
pub mod users;
