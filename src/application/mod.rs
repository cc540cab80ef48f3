// Application layer - Use cases and collaborator traits
pub mod navigation_service;
pub mod resource_client;
