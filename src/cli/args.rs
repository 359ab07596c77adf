//! Command-line argument parsing.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Open a course fixture and print the resolved selection
    Course(PathBuf),
    /// Load the home dashboard from the configured site
    Dashboard,
    /// Flip the stored course overview layout
    ToggleLayout,
    /// Print usage (default)
    Help,
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use campus::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["campus".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" | "help" => return CliCommand::Help,
            "course" => {
                return match args.next() {
                    Some(path) => CliCommand::Course(PathBuf::from(path)),
                    None => CliCommand::Help,
                }
            }
            "dashboard" => return CliCommand::Dashboard,
            "toggle-layout" => return CliCommand::ToggleLayout,
            _ => {}
        }
    }
    CliCommand::Help
}

pub const USAGE: &str = "\
Usage: campus <command>

Commands:
  course <fixture.json>   Open a course fixture and print the selected section
  dashboard               Load the home dashboard of CAMPUS_SITE_URL
  toggle-layout           Switch the course overview between card and list
  --version, -V           Show version
  --help, -h              Show this message";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let args: Vec<String> = std::iter::once("campus")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_course_with_fixture() {
        assert_eq!(
            parse(&["course", "fixtures/bio.json"]),
            CliCommand::Course(PathBuf::from("fixtures/bio.json"))
        );
    }

    #[test]
    fn test_parse_course_without_fixture_is_help() {
        assert_eq!(parse(&["course"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(&["dashboard"]), CliCommand::Dashboard);
        assert_eq!(parse(&["toggle-layout"]), CliCommand::ToggleLayout);
    }

    #[test]
    fn test_parse_no_args_and_unknown() {
        assert_eq!(parse(&[]), CliCommand::Help);
        assert_eq!(parse(&["--unknown"]), CliCommand::Help);
    }
}
