pub mod http;
pub mod jwt;
