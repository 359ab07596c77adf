pub mod analytics;
pub mod course;
pub mod dashboard;
pub mod home;
pub mod module_handler;

pub use analytics::{AnalyticsEvent, AnalyticsEventType};
pub use course::{
    has_several_sections, real_section_count, CompletionStatus, Course, ModuleRef, Section,
    ViewedModuleRecord, ALL_SECTIONS_ID, STEALTH_MODULES_SECTION_ID,
};
pub use dashboard::{
    DashboardBlock, DashboardBlocks, DashboardOptions, ReadingStrategy, SiteVersion,
    MY_PAGE_COURSES, OVERVIEW_BLOCK_NAME, SIDE_REGION,
};
pub use home::{HomeHandler, HomeTab};
pub use module_handler::{ModuleAction, ModuleHandlerData, ModuleKind};

use serde::Deserializer;

/// Helper to deserialize an id sent either as an integer or a numeric string.
///
/// Some web services return ids as strings; the preference store also keeps
/// them as text.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value.trim().parse::<i64>().map_err(de::Error::custom)
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
