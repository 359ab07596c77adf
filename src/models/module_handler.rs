//! Typed module handler descriptors.

use serde::{Deserialize, Serialize};

/// Module type, parsed from the `modname` of a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Page,
    Resource,
    Url,
    Label,
    Forum,
    Quiz,
    Assign,
    Other(String),
}

impl ModuleKind {
    pub fn from_modname(modname: &str) -> Self {
        match modname {
            "page" => ModuleKind::Page,
            "resource" => ModuleKind::Resource,
            "url" => ModuleKind::Url,
            "label" => ModuleKind::Label,
            "forum" => ModuleKind::Forum,
            "quiz" => ModuleKind::Quiz,
            "assign" => ModuleKind::Assign,
            other => ModuleKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModuleKind::Page => "page",
            ModuleKind::Resource => "resource",
            ModuleKind::Url => "url",
            ModuleKind::Label => "label",
            ModuleKind::Forum => "forum",
            ModuleKind::Quiz => "quiz",
            ModuleKind::Assign => "assign",
            ModuleKind::Other(name) => name,
        }
    }
}

/// What happens when the user activates a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleAction {
    /// Inline content (labels); nothing to open.
    None,
    /// Open the module page at a site path.
    Open { path: String },
    /// Download the module files before opening them.
    Download { path: String },
}

/// Display and behaviour of a module, resolved by its handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleHandlerData {
    pub kind: ModuleKind,
    pub title: String,
    pub icon: String,
    pub action: ModuleAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_kind_parsing() {
        assert_eq!(ModuleKind::from_modname("quiz"), ModuleKind::Quiz);
        assert_eq!(
            ModuleKind::from_modname("h5pactivity"),
            ModuleKind::Other("h5pactivity".to_string())
        );
        assert_eq!(ModuleKind::from_modname("h5pactivity").as_str(), "h5pactivity");
        assert_eq!(ModuleKind::Forum.as_str(), "forum");
    }
}
