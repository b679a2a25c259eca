pub mod article;
pub mod ids;
pub mod news_type;
pub mod template;
