pub mod asset;
pub mod catalog;
pub mod category;
pub mod faq;
pub mod hero;
pub mod review;
pub mod shared;
pub mod site;
pub mod sweep;
