pub mod access_policy;
pub mod content_service;
pub mod generation_service;
pub mod model_service;
pub mod organization_service;
pub mod prompt_builder;
pub mod response_normalizer;
pub mod taxonomy_service;
pub mod user_service;

pub use access_policy::{resolve_scope, AccessScope};
pub use content_service::ContentService;
pub use generation_service::GenerationService;
pub use model_service::{CompletionProvider, MistralProvider, OpenAiProvider, ProviderRegistry};
pub use organization_service::OrganizationService;
pub use taxonomy_service::TaxonomyService;
pub use user_service::UserService;
