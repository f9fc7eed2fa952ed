mod asset;
mod catalog;
mod category;
mod faq;
mod public;
mod site;
