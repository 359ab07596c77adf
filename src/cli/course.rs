//! `campus course <fixture>`: run the course screen over a fixture.

use color_eyre::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::adapters::{
    CourseFixture, LocalCourseService, StandardFormatDelegate, TracingAnalytics,
};
use crate::config::CampusConfig;
use crate::course::{
    CourseDeps, CourseFormatController, CourseInputs, ModuleHandlerRegistry, StandardAccessPolicy,
};
use crate::events::EventBus;
use crate::view_state::{CommandSink, ViewCommand};

use super::preference_store;

pub async fn handle_course_command(fixture_path: &Path, config: &CampusConfig) -> Result<()> {
    let fixture = CourseFixture::from_file(fixture_path)?;
    let preferences = preference_store(config)?;

    let deps = CourseDeps {
        preferences: Arc::new(preferences),
        course_service: Arc::new(LocalCourseService::from_fixture(&fixture)),
        format: Arc::new(StandardFormatDelegate::new()),
        access: Arc::new(StandardAccessPolicy),
        analytics: Arc::new(TracingAnalytics),
        handlers: Arc::new(ModuleHandlerRegistry::with_standard_handlers()),
        events: EventBus::new(),
    };
    let (commands, mut receiver) = CommandSink::channel();
    let inputs = CourseInputs::new(fixture.course.clone(), fixture.sections.clone());

    let mut controller =
        CourseFormatController::with_page_size(deps, commands, inputs, config.page_size);
    controller.initialize().await?;

    println!("{}", fixture.course.fullname);
    for section in controller.sections() {
        let marker = if Some(section.id) == controller.selected_section_id() {
            ">"
        } else {
            " "
        };
        let expanded = if section.expanded { "+" } else { "-" };
        println!(
            "{} {} {} ({} modules)",
            marker,
            expanded,
            section.name,
            section.modules.len()
        );
    }
    println!(
        "previous: {:?}  next: {:?}  more: {}",
        controller.previous_section_id(),
        controller.next_section_id(),
        controller.can_load_more()
    );
    print_commands(&mut receiver);

    controller.dispose();
    Ok(())
}

fn print_commands(receiver: &mut UnboundedReceiver<ViewCommand>) {
    while let Ok(command) = receiver.try_recv() {
        match serde_json::to_string(&command) {
            Ok(json) => println!("view: {}", json),
            Err(_) => println!("view: {:?}", command),
        }
    }
}
