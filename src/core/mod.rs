pub mod chain;
pub mod emit;
pub mod grid;
pub mod output;
pub mod pipeline;
pub mod roles;
pub mod template;
pub mod tree;
