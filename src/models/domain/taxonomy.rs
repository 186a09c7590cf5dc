use std::fmt;

use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four per-user label lists used to tag generation requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum TaxonomyKind {
    Subject,
    State,
    SchoolType,
    Grade,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 4] = [
        TaxonomyKind::Subject,
        TaxonomyKind::State,
        TaxonomyKind::SchoolType,
        TaxonomyKind::Grade,
    ];

    pub fn collection_name(&self) -> &'static str {
        match self {
            TaxonomyKind::Subject => "subjects",
            TaxonomyKind::State => "states",
            TaxonomyKind::SchoolType => "school_types",
            TaxonomyKind::Grade => "grades",
        }
    }

    /// Path segment under `/api`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            TaxonomyKind::Subject => "subjects",
            TaxonomyKind::State => "states",
            TaxonomyKind::SchoolType => "school-types",
            TaxonomyKind::Grade => "grades",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        TaxonomyKind::ALL
            .into_iter()
            .find(|kind| kind.route_segment() == segment)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxonomyKind::Subject => "Subject",
            TaxonomyKind::State => "State",
            TaxonomyKind::SchoolType => "School type",
            TaxonomyKind::Grade => "Grade",
        }
    }

    pub fn supports_description(&self) -> bool {
        matches!(self, TaxonomyKind::Subject)
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct TaxonomyEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaxonomyEntry {
    pub fn new(name: &str, description: Option<&str>, owner_user_id: &str) -> Self {
        TaxonomyEntry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            owner_user_id: owner_user_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
