use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::{Database, HealthCheck},
    errors::AppResult,
    models::domain::GenerationParams,
    repositories::{
        ContentRepository, MongoContentRepository, MongoOrganizationRepository,
        MongoTaxonomyRepository, MongoUserRepository, OrganizationRepository, TaxonomyRepository,
        UserRepository,
    },
    services::{
        ContentService, GenerationService, OrganizationService, ProviderRegistry,
        TaxonomyService, UserService,
    },
};

/// Storage backends the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub contents: Arc<dyn ContentRepository>,
    pub taxonomy: Arc<dyn TaxonomyRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            organizations: Arc::new(MongoOrganizationRepository::new(db)),
            contents: Arc::new(MongoContentRepository::new(db)),
            taxonomy: Arc::new(MongoTaxonomyRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.organizations.ensure_indexes().await?;
        self.contents.ensure_indexes().await?;
        self.taxonomy.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub content_service: Arc<ContentService>,
    pub taxonomy_service: Arc<TaxonomyService>,
    pub organization_service: Arc<OrganizationService>,
    pub generation_service: Arc<GenerationService>,
    pub jwt_service: Arc<JwtService>,
    pub health: Arc<dyn HealthCheck>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        let providers = ProviderRegistry::from_config(&config.providers);
        let configured: Vec<&str> = providers.configured().iter().map(|p| p.as_str()).collect();
        if configured.is_empty() {
            log::warn!("No LLM provider configured; generation requests will be rejected");
        } else {
            log::info!("Configured LLM providers: {}", configured.join(", "));
        }

        Ok(Self::from_parts(config, repositories, providers, Arc::new(db)))
    }

    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        providers: ProviderRegistry,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));
        let params = GenerationParams::from(&config.providers);

        Self {
            user_service: Arc::new(UserService::new(
                repositories.users.clone(),
                jwt_service.clone(),
            )),
            content_service: Arc::new(ContentService::new(
                repositories.contents.clone(),
                repositories.users.clone(),
            )),
            taxonomy_service: Arc::new(TaxonomyService::new(repositories.taxonomy.clone())),
            organization_service: Arc::new(OrganizationService::new(
                repositories.organizations.clone(),
                repositories.users.clone(),
            )),
            generation_service: Arc::new(GenerationService::new(providers, params)),
            jwt_service,
            health,
            config: Arc::new(config),
        }
    }
}
