// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod resource_api_client;
