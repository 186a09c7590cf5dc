pub mod queries;

use async_graphql::{EmptyMutation, EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_exposes_only_public_content_view() {
        let sdl = GraphQLSchema::build(QueryRoot, EmptyMutation, EmptySubscription)
            .finish()
            .sdl();

        assert!(sdl.contains("type ContentDto"));
        assert!(!sdl.contains("ContentArtifact"));
        assert!(!sdl.contains("ownerUserId"));
        assert!(!sdl.contains("passwordHash"));
    }
}
