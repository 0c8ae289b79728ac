use serde::{Deserialize, Serialize};

/// Which authoring workflow governs how a save is routed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BuilderMode {
    #[default]
    Create,
    Edit {
        #[serde(rename = "versionLabel")]
        version_label: String,
    },
    Clone,
}

/// The persistence call a save turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRoute {
    Create,
    Update(String),
}

impl BuilderMode {
    pub fn edit(version_label: impl Into<String>) -> Self {
        BuilderMode::Edit {
            version_label: version_label.into(),
        }
    }

    pub fn version_label(&self) -> Option<&str> {
        match self {
            BuilderMode::Edit { version_label } => Some(version_label),
            _ => None,
        }
    }

    /// `meta_label` is the label of the last version this session persisted.
    pub fn route_save(&self, meta_label: Option<&str>, as_new: bool) -> SaveRoute {
        match (self, meta_label) {
            (BuilderMode::Edit { version_label }, _) => SaveRoute::Update(version_label.clone()),
            (BuilderMode::Clone, _) => SaveRoute::Create,
            (BuilderMode::Create, Some(label)) if !as_new => SaveRoute::Update(label.to_string()),
            (BuilderMode::Create, _) => SaveRoute::Create,
        }
    }

    /// Mode after a successful save that returned `saved_label`.
    pub fn after_save(&self, saved_label: &str) -> BuilderMode {
        match self {
            BuilderMode::Edit { .. } => BuilderMode::edit(saved_label),
            BuilderMode::Clone | BuilderMode::Create => BuilderMode::Create,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_routing_table() {
        assert_eq!(
            BuilderMode::edit("v4").route_save(Some("v9"), true),
            SaveRoute::Update("v4".into())
        );
        assert_eq!(
            BuilderMode::Clone.route_save(Some("v2"), false),
            SaveRoute::Create
        );
        assert_eq!(BuilderMode::Create.route_save(None, false), SaveRoute::Create);
        assert_eq!(
            BuilderMode::Create.route_save(Some("v3"), false),
            SaveRoute::Update("v3".into())
        );
        assert_eq!(
            BuilderMode::Create.route_save(Some("v3"), true),
            SaveRoute::Create
        );
    }

    #[test]
    fn test_transitions_after_save() {
        assert_eq!(BuilderMode::Clone.after_save("v5"), BuilderMode::Create);
        assert_eq!(BuilderMode::Create.after_save("v5"), BuilderMode::Create);
        assert_eq!(
            BuilderMode::edit("v1").after_save("v1"),
            BuilderMode::edit("v1")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(BuilderMode::edit("v2")).unwrap();
        assert_eq!(json["mode"], "edit");
        assert_eq!(json["versionLabel"], "v2");
        let back: BuilderMode = serde_json::from_str(r#"{"mode":"clone"}"#).unwrap();
        assert_eq!(back, BuilderMode::Clone);
    }
}
