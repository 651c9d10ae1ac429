use std::io::{self, Write};

use crate::model::work_item::WorkItemDetail;

const RULE_WIDTH: usize = 85;
const MISSING: &str = "-";

pub fn render_table(out: &mut dyn Write, items: &[WorkItemDetail]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{:<6} | {:<8} | {:<12} | {}", "ID", "PRIORITY", "STATE", "TITLE")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for item in items {
        let priority = item
            .priority()
            .map(|p| p.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        writeln!(
            out,
            "{:<6} | {:<8} | {:<12} | {}",
            item.id,
            priority,
            item.state().unwrap_or(MISSING),
            item.title().unwrap_or_default()
        )?;
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::work_item::DetailFields;

    fn item(
        id: u64,
        title: Option<&str>,
        priority: Option<i64>,
        state: Option<&str>,
    ) -> WorkItemDetail {
        WorkItemDetail {
            id,
            fields: DetailFields {
                title: title.map(String::from),
                priority: priority.map(serde_json::Number::from),
                state: state.map(String::from),
            },
        }
    }

    fn render(items: &[WorkItemDetail]) -> String {
        let mut buf = Vec::new();
        render_table(&mut buf, items).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_rules() {
        let out = render(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(85));
        assert_eq!(lines[2], "ID     | PRIORITY | STATE        | TITLE");
        assert_eq!(lines[3], "-".repeat(85));
        assert_eq!(lines[4], "=".repeat(85));
    }

    #[test]
    fn pads_columns_to_fixed_widths() {
        let out = render(&[item(101, Some("Fix login bug"), Some(1), Some("Active"))]);
        assert!(out.contains("101    | 1        | Active       | Fix login bug\n"));
    }

    #[test]
    fn missing_state_and_priority_render_as_dash() {
        let out = render(&[item(7, Some("No state"), None, None)]);
        assert!(out.contains("7      | -        | -            | No state\n"));
    }

    #[test]
    fn missing_title_renders_empty() {
        let out = render(&[item(8, None, Some(2), Some("New"))]);
        assert!(out.contains("8      | 2        | New          | \n"));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let out = render(&[item(1234567, Some("t"), Some(1), Some("Waiting on customer"))]);
        assert!(out.contains("1234567 | 1        | Waiting on customer | t\n"));
    }
}
