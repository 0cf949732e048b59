/// Project service - portfolio entries with milestone timelines
use crate::db::{project_repo, tag_repo};
use crate::error::{AppError, Result};
use crate::models::{Project, ProjectDetail};
use crate::services::content::normalize_tag_name;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Dated timeline entry as accepted from callers
#[derive(Debug, Clone)]
pub struct MilestoneInput {
    pub label: String,
    pub date: NaiveDate,
}

/// Normalize a milestone list to chronological order
fn sorted_milestones(milestones: Vec<MilestoneInput>) -> Result<Vec<(String, NaiveDate)>> {
    let mut entries = Vec::with_capacity(milestones.len());
    for milestone in milestones {
        let label = milestone.label.trim().to_string();
        if label.is_empty() {
            return Err(AppError::Validation(
                "milestone label must not be empty".into(),
            ));
        }
        entries.push((label, milestone.date));
    }
    entries.sort_by_key(|(_, date)| *date);
    Ok(entries)
}

pub struct ProjectService {
    pool: PgPool,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a project with its timeline and tech-stack tags
    #[allow(clippy::too_many_arguments)]
    pub async fn create_project(
        &self,
        title: &str,
        description: &str,
        demo_url: Option<&str>,
        source_url: Option<&str>,
        milestones: Vec<MilestoneInput>,
        tags: &[String],
    ) -> Result<ProjectDetail> {
        let milestones = sorted_milestones(milestones)?;

        let mut tx = self.pool.begin().await?;

        let project =
            project_repo::insert_project(&mut tx, title, description, demo_url, source_url).await?;

        project_repo::replace_milestones(&mut tx, project.id, &milestones).await?;

        for name in tags {
            let name = normalize_tag_name(name)?;
            let tag = tag_repo::get_or_create_tag(&mut tx, name).await?;
            tag_repo::attach_project_tag(&mut tx, project.id, tag.id).await?;
        }

        tx.commit().await?;

        self.detail(project).await
    }

    /// Update project fields; `milestones = Some(..)` replaces the timeline
    #[allow(clippy::too_many_arguments)]
    pub async fn update_project(
        &self,
        project_id: Uuid,
        title: &str,
        description: &str,
        demo_url: Option<&str>,
        source_url: Option<&str>,
        milestones: Option<Vec<MilestoneInput>>,
    ) -> Result<ProjectDetail> {
        let milestones = match milestones {
            Some(list) => Some(sorted_milestones(list)?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let project =
            project_repo::update_project(&mut tx, project_id, title, description, demo_url, source_url)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("project {}", project_id)))?;

        if let Some(milestones) = milestones {
            project_repo::replace_milestones(&mut tx, project.id, &milestones).await?;
        }

        tx.commit().await?;

        self.detail(project).await
    }

    /// Get a project with milestones and tags
    pub async fn get_project(&self, project_id: Uuid) -> Result<ProjectDetail> {
        let project = project_repo::find_project_by_id(&self.pool, project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project {}", project_id)))?;

        self.detail(project).await
    }

    /// List projects, most recently updated first
    pub async fn list_projects(&self, limit: i64, offset: i64) -> Result<Vec<Project>> {
        let projects = project_repo::list_projects(&self.pool, limit, offset).await?;
        Ok(projects)
    }

    /// Delete a project; milestones cascade, tags survive
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let deleted = project_repo::delete_project(&self.pool, project_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("project {}", project_id)));
        }
        Ok(())
    }

    /// Attach a tech-stack tag by name (idempotent)
    pub async fn attach_tag(&self, project_id: Uuid, name: &str) -> Result<ProjectDetail> {
        let name = normalize_tag_name(name)?;

        let mut tx = self.pool.begin().await?;

        let project = project_repo::find_project_by_id(&self.pool, project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project {}", project_id)))?;

        let tag = tag_repo::get_or_create_tag(&mut tx, name).await?;
        tag_repo::attach_project_tag(&mut tx, project_id, tag.id).await?;

        tx.commit().await?;

        self.detail(project).await
    }

    /// Detach a tech-stack tag by name; the tag itself is retained
    pub async fn detach_tag(&self, project_id: Uuid, name: &str) -> Result<ProjectDetail> {
        let mut tx = self.pool.begin().await?;

        let project = project_repo::find_project_by_id(&self.pool, project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project {}", project_id)))?;

        tag_repo::detach_project_tag(&mut tx, project_id, name).await?;

        tx.commit().await?;

        self.detail(project).await
    }

    async fn detail(&self, project: Project) -> Result<ProjectDetail> {
        let milestones = project_repo::milestones_for_project(&self.pool, project.id).await?;
        let tags = project_repo::tags_for_project(&self.pool, project.id)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();

        Ok(ProjectDetail {
            project,
            milestones,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn milestones_are_sorted_by_date() {
        let input = vec![
            MilestoneInput {
                label: "Launch".into(),
                date: date("2026-03-01"),
            },
            MilestoneInput {
                label: "Kickoff".into(),
                date: date("2025-11-15"),
            },
            MilestoneInput {
                label: "Beta".into(),
                date: date("2026-01-20"),
            },
        ];

        let sorted = sorted_milestones(input).unwrap();
        let labels: Vec<_> = sorted.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["Kickoff", "Beta", "Launch"]);
    }

    #[test]
    fn empty_milestone_labels_are_rejected() {
        let input = vec![MilestoneInput {
            label: "   ".into(),
            date: date("2026-01-01"),
        }];
        assert!(matches!(
            sorted_milestones(input),
            Err(AppError::Validation(_))
        ));
    }
}
