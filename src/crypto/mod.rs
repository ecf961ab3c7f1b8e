pub mod identity;
pub mod password;
