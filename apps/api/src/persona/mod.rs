// Persona Engine
// Implements: prompt building, response parsing, trait bars, report rendering.
// All model calls go through llm_client; all Reddit calls go through reddit.

pub mod builder;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod render;
pub mod sections;
pub mod traits;

