//! Questionnaires and responses kept as JSON files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use listening_survey::{Ack, LoadError, Loader, Questionnaire, SubmitError, Submitter, TestKind};
use tracing::{debug, info};

/// Loads `<data_dir>/<kind>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    data_dir: PathBuf,
}

impl JsonFileLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, kind: TestKind, id: &str) -> PathBuf {
        self.data_dir.join(kind.url_segment()).join(format!("{id}.json"))
    }
}

impl Loader for JsonFileLoader {
    fn load(&self, kind: TestKind, id: &str) -> Result<Questionnaire, LoadError> {
        let path = self.path_for(kind, id);
        debug!(path = %path.display(), "loading questionnaire");

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Err(err) => {
                return Err(LoadError::Backend(
                    anyhow::Error::new(err).context(format!("failed to read '{}'", path.display())),
                ));
            }
        };
        read_questionnaire(&raw)
    }
}

/// Parse a questionnaire or submitted response.
pub fn read_questionnaire(raw: &str) -> Result<Questionnaire, LoadError> {
    serde_json::from_str(raw).map_err(|err| LoadError::Malformed(err.to_string()))
}

/// Read a submitted response from a file.
pub fn read_response(path: &Path) -> anyhow::Result<Questionnaire> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read response '{}'", path.display()))?;
    read_questionnaire(&raw).with_context(|| format!("invalid response '{}'", path.display()))
}

/// Writes each submitted response to `<output_dir>/<kind>/<response id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSubmitter {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonFileSubmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, kind: TestKind, payload: &Questionnaire) -> anyhow::Result<String> {
        let dir = self.output_dir.join(kind.url_segment());
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;

        let test_id = payload.id.as_deref().unwrap_or("response");
        let response_id = format!(
            "{test_id}-{}-{}",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            self.written.len() + 1
        );
        let path = dir.join(format!("{response_id}.json"));
        let json = serde_json::to_string_pretty(payload)?;
        fs::write(&path, json).with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(path = %path.display(), "response written");
        self.written.push(path);
        Ok(response_id)
    }
}

impl Submitter for JsonFileSubmitter {
    fn submit(&mut self, kind: TestKind, payload: &Questionnaire) -> Result<Ack, SubmitError> {
        let response_id = self.write(kind, payload)?;
        Ok(Ack {
            response_id: Some(response_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use listening_survey::{Item, SurveyControl};
    use serde_json::json;

    use super::*;

    fn write_fixture(dir: &Path, kind: &str, id: &str, value: serde_json::Value) {
        let dir = dir.join(kind);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{id}.json")), value.to_string()).unwrap();
    }

    #[test]
    fn loads_by_kind_and_id() {
        let data = tempfile::tempdir().unwrap();
        write_fixture(
            data.path(),
            "acr-test",
            "t1",
            json!({
                "_id": "t1",
                "name": "Codec rating",
                "settings": { "isIndividual": true },
                "items": [{
                    "id": "q1",
                    "title": "Setup",
                    "type": "question",
                    "questionControl": { "type": "text", "question": "Headphones?" }
                }]
            }),
        );

        let loader = JsonFileLoader::new(data.path());
        let questionnaire = loader.load(TestKind::AcrTest, "t1").unwrap();
        assert_eq!(questionnaire.name, "Codec rating");
        assert!(questionnaire.settings.is_individual);
        assert_eq!(questionnaire.len(), 1);
    }

    #[test]
    fn missing_and_malformed_files() {
        let data = tempfile::tempdir().unwrap();
        write_fixture(data.path(), "ab-test", "broken", json!({ "items": 3 }));
        let loader = JsonFileLoader::new(data.path());

        assert!(matches!(
            loader.load(TestKind::AbTest, "missing"),
            Err(LoadError::NotFound { kind: TestKind::AbTest, .. })
        ));
        assert!(matches!(
            loader.load(TestKind::AbTest, "broken"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn submitted_response_can_be_read_back() {
        let out = tempfile::tempdir().unwrap();
        let mut item = Item::question("q1", "Setup", SurveyControl::text("Headphones?").answered("yes"));
        item.time = Some(2.5);
        let payload = Questionnaire::new("Codec rating", vec![item]).with_id("t1");

        let mut submitter = JsonFileSubmitter::new(out.path());
        let ack = submitter.submit(TestKind::AbTest, &payload).unwrap();

        let response_id = ack.response_id.unwrap();
        assert!(response_id.starts_with("t1-"));
        let path = &submitter.written()[0];
        assert_eq!(path, &out.path().join("ab-test").join(format!("{response_id}.json")));
        assert_eq!(read_response(path).unwrap(), payload);
    }
}
