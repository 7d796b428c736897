pub mod configuration;
pub mod gemini;
pub mod prompts;
pub mod research;
pub mod state;
