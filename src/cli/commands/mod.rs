pub mod auth;
pub mod loja;
