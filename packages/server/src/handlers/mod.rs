pub mod assets;
pub mod catalog;
pub mod category;
pub mod faq;
pub mod hero;
pub mod integration;
pub mod public;
pub mod review;
pub mod site;
pub mod storage;
pub mod sweep;
