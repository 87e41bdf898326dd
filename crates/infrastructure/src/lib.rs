//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod postgres_membership_repository;
mod postgres_procedure_repository;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use postgres_membership_repository::PostgresMembershipRepository;
pub use postgres_procedure_repository::PostgresProcedureRepository;
