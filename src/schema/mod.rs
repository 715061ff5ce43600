pub mod entity;
pub mod location;
pub mod scenario;
pub mod vocabulary;
