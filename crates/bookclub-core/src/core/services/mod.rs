pub mod columns;
pub mod resource_service;
pub mod traits;
pub mod types;
