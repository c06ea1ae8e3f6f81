pub mod client;

pub use client::{parse_reply, GenerateRequest, GeminiBackend};
