pub mod c;
pub mod driver;
