//! Calendar commands for scheduled shifts.
//!
//! Shifts are exported as `gcalcli add` invocations, one per shift, so they
//! can be reviewed before being run.

use crate::config::CalendarConfig;
use crate::models::Shift;

/// Builds the `gcalcli add` argument vector for one shift.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payslip_parser::config::CalendarConfig;
/// use payslip_parser::parser::parse_shift;
/// use payslip_parser::render::calendar_command;
///
/// let date = NaiveDate::from_ymd_opt(2023, 9, 26).unwrap();
/// let shift = parse_shift("Sun", 26, date, "1:00 PM-7:30 PM [6.50]").unwrap();
/// let args = calendar_command(&shift, &CalendarConfig::default());
/// assert_eq!(args[0], "gcalcli");
/// assert!(args.contains(&"2023-09-26 13:00".to_string()));
/// assert!(args.contains(&"390".to_string()));
/// ```
pub fn calendar_command(shift: &Shift, config: &CalendarConfig) -> Vec<String> {
    vec![
        "gcalcli".to_string(),
        "add".to_string(),
        "--calendar".to_string(),
        config.name.clone(),
        "--title".to_string(),
        config.title.clone(),
        "--when".to_string(),
        shift.start_instant.format("%Y-%m-%d %H:%M").to_string(),
        "--duration".to_string(),
        shift.duration_minutes.to_string(),
        "--reminder".to_string(),
        config.reminder.clone(),
        "--noprompt".to_string(),
    ]
}

/// Joins arguments into a single shell command line.
///
/// Arguments that are empty or hold whitespace or shell metacharacters are
/// wrapped in double quotes.
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
