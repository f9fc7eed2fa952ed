pub mod asset;
pub mod catalog_item;
pub mod category;
pub mod faq;
pub mod hero_media;
pub mod hero_media_config;
pub mod hero_theme;
pub mod review;
pub mod site_setting;
pub mod site_tagline;
