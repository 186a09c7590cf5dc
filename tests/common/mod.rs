#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use lesson_forge::{
    app_state::{AppState, Repositories},
    config::{Config, ProviderConfig},
    db::HealthCheck,
    errors::{AppError, AppResult},
    models::domain::{
        ComposedPrompt, ContentArtifact, ContentStats, GenerationParams, Membership, Organization,
        ProviderKind, TaxonomyEntry, TaxonomyKind, User,
    },
    repositories::{
        ContentRepository, OrganizationRepository, TaxonomyRepository, UserRepository,
    },
    services::{CompletionProvider, ProviderRegistry},
};

fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_organization(&self, organization_id: &str) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut members: Vec<User> = users
            .values()
            .filter(|u| u.organization_id() == Some(organization_id))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(members)
    }

    async fn set_membership(
        &self,
        user_id: &str,
        membership: Option<Membership>,
    ) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;
        user.membership = membership;
        Ok(user.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: RwLock<HashMap<String, Organization>>,
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn create(&self, organization: Organization) -> AppResult<Organization> {
        self.organizations
            .write()
            .await
            .insert(organization.id.clone(), organization.clone());
        Ok(organization)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Organization>> {
        Ok(self.organizations.read().await.get(id).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    contents: RwLock<Vec<ContentArtifact>>,
}

impl InMemoryContentRepository {
    async fn owned_by(&self, owner_ids: &[String]) -> Vec<ContentArtifact> {
        self.contents
            .read()
            .await
            .iter()
            .filter(|a| owner_ids.contains(&a.owner_user_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, artifact: ContentArtifact) -> AppResult<ContentArtifact> {
        self.contents.write().await.push(artifact.clone());
        Ok(artifact)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<ContentArtifact>> {
        let contents = self.contents.read().await;
        Ok(contents.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_owners(
        &self,
        owner_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ContentArtifact>, i64)> {
        let mut visible = self.owned_by(owner_ids).await;
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok((page(&visible, offset, limit), visible.len() as i64))
    }

    async fn stats_for_owners(&self, owner_ids: &[String]) -> AppResult<ContentStats> {
        let visible = self.owned_by(owner_ids).await;
        Ok(ContentStats::from_artifacts(&visible))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTaxonomyRepository {
    entries: RwLock<HashMap<TaxonomyKind, Vec<TaxonomyEntry>>>,
}

#[async_trait]
impl TaxonomyRepository for InMemoryTaxonomyRepository {
    async fn create(&self, kind: TaxonomyKind, entry: TaxonomyEntry) -> AppResult<TaxonomyEntry> {
        let mut entries = self.entries.write().await;
        let list = entries.entry(kind).or_default();
        if list
            .iter()
            .any(|e| e.owner_user_id == entry.owner_user_id && e.name == entry.name)
        {
            return Err(AppError::AlreadyExists(format!(
                "{} '{}' already exists",
                kind, entry.name
            )));
        }
        list.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_name(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        name: &str,
    ) -> AppResult<Option<TaxonomyEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&kind).and_then(|list| {
            list.iter()
                .find(|e| e.owner_user_id == owner_user_id && e.name == name)
                .cloned()
        }))
    }

    async fn list_by_owner(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TaxonomyEntry>, i64)> {
        let entries = self.entries.read().await;
        let mut owned: Vec<TaxonomyEntry> = entries
            .get(&kind)
            .map(|list| {
                list.iter()
                    .filter(|e| e.owner_user_id == owner_user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        owned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok((page(&owned, offset, limit), owned.len() as i64))
    }

    async fn delete_owned(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        id: &str,
    ) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let Some(list) = entries.get_mut(&kind) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|e| !(e.id == id && e.owner_user_id == owner_user_id));
        Ok(list.len() < before)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Content storage whose reads fail the way an unreachable database does.
pub struct UnreachableContentRepository;

impl UnreachableContentRepository {
    pub const DETAIL: &'static str = "connection refused at 10.0.0.3:27017 user=admin";

    fn failure() -> AppError {
        AppError::DatabaseError(Self::DETAIL.to_string())
    }
}

#[async_trait]
impl ContentRepository for UnreachableContentRepository {
    async fn create(&self, _artifact: ContentArtifact) -> AppResult<ContentArtifact> {
        Err(Self::failure())
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<ContentArtifact>> {
        Err(Self::failure())
    }

    async fn find_by_owners(
        &self,
        _owner_ids: &[String],
        _offset: i64,
        _limit: i64,
    ) -> AppResult<(Vec<ContentArtifact>, i64)> {
        Err(Self::failure())
    }

    async fn stats_for_owners(&self, _owner_ids: &[String]) -> AppResult<ContentStats> {
        Err(Self::failure())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Provider double that records how often it was called.
pub struct CountingProvider {
    kind: ProviderKind,
    reply: String,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(kind: ProviderKind, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for CountingProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(
        &self,
        _prompt: &ComposedPrompt,
        _params: &GenerationParams,
    ) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn health_check(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::DatabaseError("ping failed".to_string()))
        }
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "lesson-forge-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 3001,
        jwt_secret: SecretString::from("integration_test_secret_key_0123456789".to_string()),
        jwt_expiration_hours: 1,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        app_env: "test".to_string(),
        providers: ProviderConfig::default(),
    }
}

pub fn in_memory_repositories() -> Repositories {
    Repositories {
        users: Arc::new(InMemoryUserRepository::default()),
        organizations: Arc::new(InMemoryOrganizationRepository::default()),
        contents: Arc::new(InMemoryContentRepository::default()),
        taxonomy: Arc::new(InMemoryTaxonomyRepository::default()),
    }
}

/// App state over in-memory storage with the given provider registered.
pub fn test_state(provider: Option<Arc<CountingProvider>>) -> AppState {
    let mut providers = ProviderRegistry::new();
    if let Some(provider) = provider {
        providers.register(provider);
    }

    AppState::from_parts(
        test_config(),
        in_memory_repositories(),
        providers,
        Arc::new(StaticHealth(true)),
    )
}
