pub mod character_creation;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod llm_client;
pub mod narrative_parser;
pub mod prompt_builder;
pub mod protocol;
pub mod service_backed;
pub mod strategy;
pub mod synthetic;
