// Generated articles: listing, viewing, editing and deleting what the news
// service produced.

pub mod handlers;
