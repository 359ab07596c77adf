//! Module handler registry.
//!
//! A module's display data and action are resolved from its [`ModuleKind`]
//! the first time the user interacts with it, then cached on the module.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{ModuleAction, ModuleHandlerData, ModuleKind, ModuleRef};

/// Resolves the handler data of one module type.
pub trait ModuleHandler: Send + Sync {
    fn handler_data(&self, module: &ModuleRef, course_id: i64) -> ModuleHandlerData;
}

/// Handler shared by the built-in module types.
#[derive(Debug, Clone)]
pub struct StandardModuleHandler {
    icon: String,
}

impl StandardModuleHandler {
    pub fn new(icon: impl Into<String>) -> Self {
        Self { icon: icon.into() }
    }
}

impl ModuleHandler for StandardModuleHandler {
    fn handler_data(&self, module: &ModuleRef, course_id: i64) -> ModuleHandlerData {
        let kind = ModuleKind::from_modname(&module.modname);
        let path = format!("mod/{}/{}/{}", kind.as_str(), course_id, module.id);
        let action = match kind {
            ModuleKind::Label => ModuleAction::None,
            ModuleKind::Resource => ModuleAction::Download { path },
            _ => ModuleAction::Open { path },
        };

        ModuleHandlerData {
            kind,
            title: module.name.clone(),
            icon: self.icon.clone(),
            action,
        }
    }
}

/// Maps module kinds to their handlers.
pub struct ModuleHandlerRegistry {
    handlers: HashMap<ModuleKind, Arc<dyn ModuleHandler>>,
    fallback: Arc<dyn ModuleHandler>,
}

impl Default for ModuleHandlerRegistry {
    fn default() -> Self {
        Self::with_standard_handlers()
    }
}

impl ModuleHandlerRegistry {
    /// Registry with no specific handlers; every kind uses the fallback.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Arc::new(StandardModuleHandler::new("activity")),
        }
    }

    pub fn with_standard_handlers() -> Self {
        let mut registry = Self::empty();
        for (kind, icon) in [
            (ModuleKind::Page, "page"),
            (ModuleKind::Resource, "file"),
            (ModuleKind::Url, "link"),
            (ModuleKind::Label, "label"),
            (ModuleKind::Forum, "forum"),
            (ModuleKind::Quiz, "quiz"),
            (ModuleKind::Assign, "assign"),
        ] {
            registry.register(kind, Arc::new(StandardModuleHandler::new(icon)));
        }
        registry
    }

    pub fn register(&mut self, kind: ModuleKind, handler: Arc<dyn ModuleHandler>) {
        self.handlers.insert(kind, handler);
    }

    pub fn is_registered(&self, kind: &ModuleKind) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn resolve(&self, module: &ModuleRef, course_id: i64) -> ModuleHandlerData {
        let kind = ModuleKind::from_modname(&module.modname);
        self.handlers
            .get(&kind)
            .unwrap_or(&self.fallback)
            .handler_data(module, course_id)
    }

    /// Fill `module.handler` if it is still empty and return it.
    pub fn populate<'a>(&self, module: &'a mut ModuleRef, course_id: i64) -> &'a ModuleHandlerData {
        let data = match module.handler.take() {
            Some(data) => data,
            None => self.resolve(module, course_id),
        };
        module.handler.insert(data)
    }
}

impl std::fmt::Debug for ModuleHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.handlers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("ModuleHandlerRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}
