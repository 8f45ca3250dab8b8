pub mod approve;
pub mod chat;
pub mod frontend;
pub mod health;
