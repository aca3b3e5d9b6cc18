//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_custom_role_repository;
mod in_memory_user_directory;
mod postgres_custom_role_repository;
mod postgres_user_directory;

pub use in_memory_custom_role_repository::InMemoryCustomRoleRepository;
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use postgres_custom_role_repository::PostgresCustomRoleRepository;
pub use postgres_user_directory::PostgresUserDirectory;
