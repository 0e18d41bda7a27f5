//! Project aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, ProjectId, Timestamp, ValidationError,
};

/// Whether a project is delivered to a client or run internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Client,
    Internal,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    Paused,
    Done,
    Cancelled,
}

/// Editable project fields.
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub worked_hours: f64,
}

/// Project record.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `client_id` is present iff `kind` is `Client`
/// - `worked_hours` is finite and >= 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    kind: ProjectKind,
    client_id: Option<ClientId>,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    worked_hours: f64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Project {
    /// Creates a new project in the `Planning` status.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when the kind and client link disagree
    pub fn new(
        id: ProjectId,
        kind: ProjectKind,
        client_id: Option<ClientId>,
        name: String,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_name(&name)?;
        validate_client_link(kind, client_id.as_ref())?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            kind,
            client_id,
            name,
            description,
            status: ProjectStatus::Planning,
            worked_hours: 0.0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a project from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProjectId,
        kind: ProjectKind,
        client_id: Option<ClientId>,
        name: String,
        description: Option<String>,
        status: ProjectStatus,
        worked_hours: f64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind,
            client_id,
            name,
            description,
            status,
            worked_hours,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields. Kind and client link are fixed at creation.
    pub fn update(&mut self, details: ProjectDetails) -> Result<(), DomainError> {
        validate_name(&details.name)?;
        validate_hours(details.worked_hours)?;
        self.name = details.name;
        self.description = details.description;
        self.status = details.status;
        self.worked_hours = details.worked_hours;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn worked_hours(&self) -> f64 {
        self.worked_hours
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    Ok(())
}

fn validate_hours(hours: f64) -> Result<(), DomainError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(DomainError::validation(
            "worked_hours",
            "worked_hours must be a non-negative number",
        ));
    }
    Ok(())
}

fn validate_client_link(kind: ProjectKind, client_id: Option<&ClientId>) -> Result<(), DomainError> {
    match (kind, client_id) {
        (ProjectKind::Client, None) => Err(DomainError::new(
            ErrorCode::ValidationFailed,
            "Client projects require a client_id",
        )),
        (ProjectKind::Internal, Some(_)) => Err(DomainError::new(
            ErrorCode::ValidationFailed,
            "Internal projects cannot reference a client",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_project_requires_client_id() {
        let err = Project::new(
            ProjectId::new(),
            ProjectKind::Client,
            None,
            "Site redesign".to_string(),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn internal_project_rejects_client_id() {
        let err = Project::new(
            ProjectId::new(),
            ProjectKind::Internal,
            Some(ClientId::new()),
            "Tooling".to_string(),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_project_starts_planning_with_zero_hours() {
        let project = Project::new(
            ProjectId::new(),
            ProjectKind::Internal,
            None,
            "Tooling".to_string(),
            None,
        )
        .unwrap();
        assert_eq!(project.status(), ProjectStatus::Planning);
        assert_eq!(project.worked_hours(), 0.0);
    }

    #[test]
    fn update_rejects_negative_hours() {
        let mut project = Project::new(
            ProjectId::new(),
            ProjectKind::Internal,
            None,
            "Tooling".to_string(),
            None,
        )
        .unwrap();

        let err = project
            .update(ProjectDetails {
                name: "Tooling".to_string(),
                description: None,
                status: ProjectStatus::Active,
                worked_hours: -1.0,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn update_replaces_status_and_hours() {
        let mut project = Project::new(
            ProjectId::new(),
            ProjectKind::Client,
            Some(ClientId::new()),
            "Site redesign".to_string(),
            None,
        )
        .unwrap();

        project
            .update(ProjectDetails {
                name: "Site redesign v2".to_string(),
                description: Some("Second phase".to_string()),
                status: ProjectStatus::Active,
                worked_hours: 37.5,
            })
            .unwrap();

        assert_eq!(project.name(), "Site redesign v2");
        assert_eq!(project.status(), ProjectStatus::Active);
        assert_eq!(project.worked_hours(), 37.5);
    }
}
