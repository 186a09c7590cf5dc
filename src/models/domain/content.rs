use std::{fmt, str::FromStr};

use async_graphql::{Enum, SimpleObject};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    LearningPage,
    Exercise,
    ExerciseWithSolution,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::LearningPage,
        ContentType::Exercise,
        ContentType::ExerciseWithSolution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::LearningPage => "learning-page",
            ContentType::Exercise => "exercise",
            ContentType::ExerciseWithSolution => "exercise-with-solution",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|content_type| content_type.as_str() == value.trim())
            .ok_or_else(|| AppError::InvalidContentType(value.to_string()))
    }
}

/// A saved piece of generated material. Never mutated after insert.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContentArtifact {
    pub id: String,
    pub title: String,
    pub body: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    pub content_type: ContentType,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_id: Option<String>,
    pub owner_user_id: String,
    pub creator_name: String,
    pub creator_email: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ContentArtifact {
    pub fn new(
        title: &str,
        body: &str,
        subject: &str,
        topic: &str,
        difficulty: &str,
        content_type: ContentType,
        language: &str,
    ) -> Self {
        ContentArtifact {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            body: body.to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty: difficulty.to_string(),
            content_type,
            language: language.to_string(),
            country: None,
            state: None,
            school_type: None,
            grade: None,
            based_on_id: None,
            owner_user_id: String::new(),
            creator_name: String::new(),
            creator_email: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Counts over the set of artifacts visible to one viewer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub total_content: u64,
    pub learning_pages: u64,
    pub exercises: u64,
    pub exercises_with_solution: u64,
    pub unique_subjects: u64,
}

impl ContentStats {
    pub fn from_artifacts<'a>(artifacts: impl IntoIterator<Item = &'a ContentArtifact>) -> Self {
        let mut stats = ContentStats::default();
        let mut subjects = std::collections::HashSet::new();

        for artifact in artifacts {
            stats.total_content += 1;
            match artifact.content_type {
                ContentType::LearningPage => stats.learning_pages += 1,
                ContentType::Exercise => stats.exercises += 1,
                ContentType::ExerciseWithSolution => stats.exercises_with_solution += 1,
            }
            subjects.insert(artifact.subject.as_str());
        }

        stats.unique_subjects = subjects.len() as u64;
        stats
    }
}
