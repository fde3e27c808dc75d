//! Where a model definition comes from.

use std::path::{Path, PathBuf};

use armviz_model::ChainDefinition;

use crate::error::LoadError;

/// A model to load into the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    /// The built-in 4-joint reference arm.
    Reference,
    /// An in-memory definition.
    Definition(ChainDefinition),
    /// Robot description XML text.
    UrdfString(String),
    /// Robot description file.
    UrdfFile(PathBuf),
    /// JSON chain definition file.
    JsonFile(PathBuf),
}

impl ModelSource {
    /// Pick a file source by extension: `.json` is a chain definition,
    /// anything else is treated as a robot description.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::JsonFile(path.to_path_buf())
        } else {
            Self::UrdfFile(path.to_path_buf())
        }
    }

    /// Fetch and parse the definition. Chain validation happens later, in
    /// [`JointChain::initialize`](armviz_model::JointChain::initialize).
    pub async fn load(self) -> Result<ChainDefinition, LoadError> {
        match self {
            Self::Reference => Ok(ChainDefinition::reference_arm()),
            Self::Definition(def) => Ok(def),
            Self::UrdfString(xml) => Ok(armviz_urdf::parse_urdf(&xml)?),
            Self::UrdfFile(path) => {
                let xml = tokio::fs::read_to_string(&path).await?;
                Ok(armviz_urdf::parse_urdf(&xml)?)
            }
            Self::JsonFile(path) => {
                let json = tokio::fs::read_to_string(&path).await?;
                Ok(ChainDefinition::from_json(&json)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armviz_urdf::UrdfError;

    #[test]
    fn test_from_path() {
        assert_eq!(
            ModelSource::from_path("arm.JSON"),
            ModelSource::JsonFile("arm.JSON".into())
        );
        assert_eq!(
            ModelSource::from_path("models/arm.urdf"),
            ModelSource::UrdfFile("models/arm.urdf".into())
        );
    }

    #[tokio::test]
    async fn test_load_reference() {
        let def = ModelSource::Reference.load().await.unwrap();
        assert_eq!(def, ChainDefinition::reference_arm());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = ModelSource::UrdfFile("/nonexistent/armviz/arm.urdf".into())
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[tokio::test]
    async fn test_bad_xml() {
        let err = ModelSource::UrdfString("<robot><joint".into())
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Urdf(UrdfError::Xml(_))));
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("armviz-source-{}.json", std::process::id()));
        let def = ChainDefinition::reference_arm();
        tokio::fs::write(&path, def.to_json().unwrap()).await.unwrap();
        let loaded = ModelSource::from_path(&path).load().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(loaded.unwrap(), def);
    }
}
