pub mod brands;
pub mod contacts;
pub mod genders;
pub mod order_items;
pub mod orders;
pub mod users;
pub mod watch_types;
pub mod watches;

pub use brands::Entity as Brands;
pub use contacts::Entity as Contacts;
pub use genders::Entity as Genders;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
pub use watch_types::Entity as WatchTypes;
pub use watches::Entity as Watches;
