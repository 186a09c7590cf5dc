pub mod auth_handler;
pub mod content_handler;
pub mod generation_handler;
pub mod graphql_handler;
pub mod organization_handler;
pub mod taxonomy_handler;
pub mod user_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use auth_handler::{login, register};
pub use content_handler::{content_stats, get_content, list_content, save_content};
pub use generation_handler::generate_content;
pub use graphql_handler::{graphiql, graphql};
pub use organization_handler::{
    create_organization, join_organization, leave_organization, my_organization, remove_member,
};
pub use taxonomy_handler::{create_entry, delete_subject, list_entries};
pub use user_handler::{get_profile, health_check, health_check_db};

/// Registers every route. `/api/auth` is matched before the guarded `/api`
/// scope so registration and login stay public.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_db)
        .service(graphiql)
        .service(web::scope("/api/auth").service(register).service(login))
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(get_profile)
                .service(generate_content)
                .service(save_content)
                .service(list_content)
                .service(content_stats)
                .service(get_content)
                .service(list_entries)
                .service(create_entry)
                .service(delete_subject)
                .service(create_organization)
                .service(my_organization)
                .service(join_organization)
                .service(leave_organization)
                .service(remove_member)
                .service(graphql),
        );
}

/// Malformed JSON bodies surface as validation errors in the usual error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
