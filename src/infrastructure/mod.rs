pub mod client;
pub mod crypto;
pub mod db;
