pub mod assets;
pub mod categories;
pub mod singleton;
pub mod site_config;
pub mod sweep;
