//! Audit history command

use crate::audit::AuditLogger;
use crate::config::PlannerPaths;
use crate::error::PlannerResult;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(paths: &PlannerPaths, count: usize) -> PlannerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        println!("Belum ada riwayat perubahan.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
