pub mod design;
pub mod product;
pub mod user;
