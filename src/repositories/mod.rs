pub mod content_repository;
pub mod organization_repository;
pub mod taxonomy_repository;
pub mod user_repository;

pub use content_repository::{ContentRepository, MongoContentRepository};
pub use organization_repository::{MongoOrganizationRepository, OrganizationRepository};
pub use taxonomy_repository::{MongoTaxonomyRepository, TaxonomyRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
