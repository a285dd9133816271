pub mod claude;

pub use claude::ClaudeClient;
