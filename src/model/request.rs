//! Ranking request and its validation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A ranking request: who is asking, what they need, which documents to read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// Persona description (e.g., "Travel Planner")
    pub persona: String,
    /// Task to accomplish (e.g., "Plan a 4-day trip")
    pub task: String,
    /// Document identifiers, in request order
    pub documents: Vec<String>,
}

impl Request {
    /// Create a new request.
    pub fn new(
        persona: impl Into<String>,
        task: impl Into<String>,
        documents: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            persona: persona.into(),
            task: task.into(),
            documents: documents.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a request from JSON.
    ///
    /// Accepts the flat form `{"persona", "task" | "job", "documents": [..]}`
    /// as well as the nested form where the persona is `{"role": ..}`, the
    /// task is `{"task": ..}` under `job_to_be_done`, and documents are
    /// `{"filename": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(json)?;
        let request = raw.into_request();
        Ok(request)
    }

    /// Reject requests missing a persona, task, or documents.
    pub fn validate(&self) -> Result<()> {
        if self.persona.trim().is_empty() {
            return Err(Error::InvalidRequest("persona is required".into()));
        }
        if self.task.trim().is_empty() {
            return Err(Error::InvalidRequest("task is required".into()));
        }
        if self.documents.is_empty() {
            return Err(Error::InvalidRequest("documents must not be empty".into()));
        }
        if self.documents.iter().any(|d| d.trim().is_empty()) {
            return Err(Error::InvalidRequest(
                "document identifiers must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Query string embedded for ranking.
    pub fn query(&self) -> String {
        ranking_query(&self.persona, &self.task)
    }
}

/// Query embedded for ranking: `"<persona>. <task>"`.
pub fn ranking_query(persona: &str, task: &str) -> String {
    format!("{}. {}", persona, task)
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    persona: Option<TextField>,
    #[serde(default, alias = "job", alias = "job_to_be_done")]
    task: Option<TextField>,
    #[serde(default)]
    documents: Vec<DocumentRef>,
}

impl RawRequest {
    fn into_request(self) -> Request {
        let text = |field: Option<TextField>| {
            field
                .map(TextField::into_text)
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        Request {
            persona: text(self.persona),
            task: text(self.task),
            documents: self
                .documents
                .into_iter()
                .map(DocumentRef::into_id)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Role { role: String },
    Task { task: String },
}

impl TextField {
    fn into_text(self) -> String {
        match self {
            TextField::Plain(s) => s,
            TextField::Role { role } => role,
            TextField::Task { task } => task,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRef {
    Plain(String),
    File { filename: String },
}

impl DocumentRef {
    fn into_id(self) -> String {
        match self {
            DocumentRef::Plain(s) => s,
            DocumentRef::File { filename } => filename,
        }
    }
}
