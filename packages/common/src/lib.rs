pub mod catalog;
pub mod config;
pub mod faq;
pub mod hero;
pub mod storage;
pub mod theme;

pub use catalog::{AssetKind, CatalogKind};
pub use hero::{HeroMediaKind, HeroSlot};
pub use theme::ThemeKind;
