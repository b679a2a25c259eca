// News composition: base fields, the dynamic field store fed by a loaded
// template, and assembly of the outbound generation request.

pub mod fields;
pub mod handlers;
pub mod request;
pub mod session;
pub mod store;
