use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Content category, matching the database `content_category` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "content_category", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContentCategory {
    TechnicalArticle,
    IndustryInsight,
    LifeShare,
    CreativeWork,
    CodeSnippet,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 5] = [
        ContentCategory::TechnicalArticle,
        ContentCategory::IndustryInsight,
        ContentCategory::LifeShare,
        ContentCategory::CreativeWork,
        ContentCategory::CodeSnippet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::TechnicalArticle => "technical-article",
            ContentCategory::IndustryInsight => "industry-insight",
            ContentCategory::LifeShare => "life-share",
            ContentCategory::CreativeWork => "creative-work",
            ContentCategory::CodeSnippet => "code-snippet",
        }
    }
}

/// Publish state, matching the database `content_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "content_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
        }
    }
}

/// A publishable unit of written content
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    /// Markdown source
    pub body: String,
    pub category: ContentCategory,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content item with its associated tag names, for detail responses
#[derive(Debug, Clone, Serialize)]
pub struct ContentItemDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ContentCategory::TechnicalArticle).unwrap();
        assert_eq!(json, "\"technical-article\"");

        let parsed: ContentCategory = serde_json::from_str("\"code-snippet\"").unwrap();
        assert_eq!(parsed, ContentCategory::CodeSnippet);
    }

    #[test]
    fn category_rejects_unknown_values() {
        let result: Result<ContentCategory, _> = serde_json::from_str("\"random-thoughts\"");
        assert!(result.is_err());
    }

    #[test]
    fn all_categories_round_trip_through_as_str() {
        for category in ContentCategory::ALL {
            let json = format!("\"{}\"", category.as_str());
            let parsed: ContentCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn status_serializes_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&ContentStatus::Published).unwrap(),
            "\"published\""
        );
        assert_eq!(ContentStatus::Draft.as_str(), "draft");
    }
}
