//! Fridge Buddy Common Library
//!
//! CLIと各フロントエンドで共有される型・カタログ・レシートパーサー

pub mod types;
pub mod unit;
pub mod catalog;
pub mod receipt;
pub mod error;

pub use types::{FridgeItem, ScannedItem, round_amount};
pub use unit::{AmountWithUnit, Unit};
pub use catalog::{Catalog, CatalogEntry};
pub use receipt::parse_journal;
pub use error::{Error, Result};
