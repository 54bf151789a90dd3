// Job Descriptor Domain Model

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A job protocol document parsed from its YAML text.
///
/// The adapter never validates the structure; it is handed to the cluster
/// API as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescriptor(Value);

impl JobDescriptor {
    /// Parse a job protocol from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text).map(Self)
    }

    /// Serialize back to YAML text
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }

    /// Top-level `name` field, if present
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document_is_structured() {
        let job = JobDescriptor::from_yaml("name: demo").unwrap();

        assert!(job.as_value().is_mapping());
        assert_eq!(job.name(), Some("demo"));
    }

    #[test]
    fn test_parse_nested_protocol() {
        let text = r#"
protocolVersion: 2
name: mnist
type: job
taskRoles:
  train:
    instances: 1
    commands:
      - python train.py
"#;
        let job = JobDescriptor::from_yaml(text).unwrap();

        assert_eq!(job.name(), Some("mnist"));
        let instances = job
            .as_value()
            .get("taskRoles")
            .and_then(|t| t.get("train"))
            .and_then(|t| t.get("instances"))
            .and_then(Value::as_u64);
        assert_eq!(instances, Some(1));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let result = JobDescriptor::from_yaml("name: [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_name_absent_for_scalar_document() {
        let job = JobDescriptor::from_yaml("just a string").unwrap();
        assert_eq!(job.name(), None);
    }
}
