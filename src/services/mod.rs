pub mod capture;
pub mod chat;
pub mod credentials;
pub mod prompt;

pub use chat::ChatController;
