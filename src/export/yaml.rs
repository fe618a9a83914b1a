//! YAML export
//!
//! Same content as the JSON export, with a comment header for people
//! reading the file.

use std::io::Write;

use super::json::FullExport;
use crate::error::{PlannerError, PlannerResult};

fn export_err(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::Export(e.to_string())
}

/// Write the export as YAML
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> PlannerResult<()> {
    writeln!(writer, "# Wedding Planner Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "# User: {}", export.user_id).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(export_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_yaml_export() {
        let mut output = Vec::new();
        export_full_yaml(&sample_export(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Wedding Planner Export\n"));
        assert!(text.contains("# User: u1"));
        assert!(text.contains("Cetak undangan"));

        let body: String = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let value: serde_yaml::Value = serde_yaml::from_str(&body).unwrap();
        assert_eq!(value["app_id"].as_str(), Some("horja"));
        assert_eq!(value["vendors"][0]["category"].as_str(), Some("Katering"));
    }
}
