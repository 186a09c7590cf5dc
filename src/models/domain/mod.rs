pub mod content;
pub mod generation;
pub mod organization;
pub mod taxonomy;
pub mod user;
pub use content::{ContentArtifact, ContentStats, ContentType};
pub use generation::{
    ComposedPrompt, GeneratedContent, GenerationParams, GenerationRequest, LearningContext,
    ProviderKind,
};
pub use organization::Organization;
pub use taxonomy::{TaxonomyEntry, TaxonomyKind};
pub use user::{MemberRole, Membership, User};
