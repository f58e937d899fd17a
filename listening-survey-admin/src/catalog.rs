use chrono::{DateTime, Utc};
use listening_survey_types::TestKind;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AdminError;

/// A test as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    pub created_at: DateTime<Utc>,

    /// Ids of the responses submitted so far.
    #[serde(default)]
    pub responses: Vec<String>,
}

impl TestSummary {
    pub fn response_count(&self) -> usize {
        self.responses.len()
    }
}

/// Storage for tests of one kind.
pub trait TestService {
    /// Store a copy of the test `id` under `name`, returning the new test.
    fn copy(&mut self, kind: TestKind, id: &str, name: &str) -> anyhow::Result<TestSummary>;

    /// Delete the test `id`.
    fn delete(&mut self, kind: TestKind, id: &str) -> anyhow::Result<()>;
}

/// Short message shown after a catalog action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Deleted,
    Duplicated,
    Failed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Deleted => "Delete successfully".to_string(),
            Self::Duplicated => "Duplicate successfully".to_string(),
            Self::Failed(reason) => format!("Something went wrong: {reason}"),
        }
    }
}

/// The tests of one kind, newest first.
#[derive(Debug, Clone)]
pub struct TestCatalog {
    kind: TestKind,
    tests: Vec<TestSummary>,
}

impl TestCatalog {
    pub fn new(kind: TestKind, tests: Vec<TestSummary>) -> Self {
        Self { kind, tests }
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn tests(&self) -> &[TestSummary] {
        &self.tests
    }

    pub fn get(&self, id: &str) -> Option<&TestSummary> {
        self.tests.iter().find(|test| test.id == id)
    }

    /// Tests whose name or creation date contains `search`, ignoring case.
    pub fn filter(&self, search: &str) -> Vec<&TestSummary> {
        let needle = search.to_lowercase();
        self.tests
            .iter()
            .filter(|test| {
                test.name.to_lowercase().contains(&needle)
                    || test.created_at.to_rfc3339().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Duplicate a test as "<name> copy" and list the copy first.
    pub fn duplicate(&mut self, id: &str, service: &mut dyn TestService) -> Result<Notice, AdminError> {
        let source = self
            .get(id)
            .ok_or_else(|| AdminError::UnknownTest(id.to_string()))?;
        let name = format!("{} copy", source.name);

        match service.copy(self.kind, id, &name) {
            Ok(copy) => {
                info!(kind = %self.kind, source = id, copy = %copy.id, "test duplicated");
                self.tests.insert(0, copy);
                Ok(Notice::Duplicated)
            }
            Err(err) => {
                warn!(kind = %self.kind, source = id, error = %err, "failed to duplicate test");
                Ok(Notice::Failed(err.to_string()))
            }
        }
    }

    /// Delete a test; it stays listed if the service refuses.
    pub fn delete(&mut self, id: &str, service: &mut dyn TestService) -> Result<Notice, AdminError> {
        let position = self
            .tests
            .iter()
            .position(|test| test.id == id)
            .ok_or_else(|| AdminError::UnknownTest(id.to_string()))?;

        match service.delete(self.kind, id) {
            Ok(()) => {
                self.tests.remove(position);
                info!(kind = %self.kind, id, "test deleted");
                Ok(Notice::Deleted)
            }
            Err(err) => {
                warn!(kind = %self.kind, id, error = %err, "failed to delete test");
                Ok(Notice::Failed(err.to_string()))
            }
        }
    }

    /// Path a respondent opens to take the test.
    pub fn share_path(&self, id: &str) -> String {
        format!("/task/{}/{id}", self.kind)
    }

    /// Full link to share with respondents.
    pub fn share_url(&self, host: &str, id: &str) -> String {
        format!("{}{}", host.trim_end_matches('/'), self.share_path(id))
    }
}
