//! Persisted card/list layout of the course overview block.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::CampusResult;
use crate::traits::PreferenceStore;

pub const LAYOUT_PREFERENCE_KEY: &str = "AddonBlockMyOverviewLayout";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewLayout {
    #[default]
    Card,
    List,
}

impl OverviewLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverviewLayout::Card => "card",
            OverviewLayout::List => "list",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            OverviewLayout::Card => OverviewLayout::List,
            OverviewLayout::List => OverviewLayout::Card,
        }
    }
}

impl FromStr for OverviewLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "card" => Ok(OverviewLayout::Card),
            "list" => Ok(OverviewLayout::List),
            other => Err(format!("unknown overview layout: {:?}", other)),
        }
    }
}

impl fmt::Display for OverviewLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current layout plus the store it is persisted to.
pub struct LayoutToggle {
    store: Arc<dyn PreferenceStore>,
    layout: OverviewLayout,
}

impl LayoutToggle {
    /// Read the stored layout. Missing, unknown or unreadable values give
    /// the card layout.
    pub async fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let layout = match store.get(LAYOUT_PREFERENCE_KEY).await {
            Ok(Some(Value::String(stored))) => stored.parse().unwrap_or_else(|err| {
                debug!(error = %err, "Ignoring stored layout");
                OverviewLayout::default()
            }),
            Ok(_) => OverviewLayout::default(),
            Err(err) => {
                warn!(error = %err, "Failed to read overview layout");
                OverviewLayout::default()
            }
        };
        Self { store, layout }
    }

    pub fn layout(&self) -> OverviewLayout {
        self.layout
    }

    /// Flip the layout and persist it.
    pub async fn toggle(&mut self) -> CampusResult<OverviewLayout> {
        let next = self.layout.toggled();
        self.set(next).await?;
        Ok(next)
    }

    /// Switch to `layout` and persist it. The in-memory value changes even
    /// when the write fails.
    pub async fn set(&mut self, layout: OverviewLayout) -> CampusResult<()> {
        self.layout = layout;
        self.store
            .set(LAYOUT_PREFERENCE_KEY, Value::from(layout.as_str()))
            .await?;
        debug!(%layout, "Overview layout stored");
        Ok(())
    }
}

impl fmt::Debug for LayoutToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutToggle")
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_parsing() {
        assert_eq!("card".parse::<OverviewLayout>().unwrap(), OverviewLayout::Card);
        assert_eq!("list".parse::<OverviewLayout>().unwrap(), OverviewLayout::List);
        assert!("grid".parse::<OverviewLayout>().is_err());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(OverviewLayout::Card.toggled(), OverviewLayout::List);
        assert_eq!(OverviewLayout::List.toggled(), OverviewLayout::Card);
        assert_eq!(OverviewLayout::default(), OverviewLayout::Card);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_value(OverviewLayout::List).unwrap(),
            Value::from("list")
        );
    }
}
