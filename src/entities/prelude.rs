pub use super::design_products::Entity as DesignProducts;
pub use super::designs::Entity as Designs;
pub use super::products::Entity as Products;
pub use super::users::Entity as Users;
