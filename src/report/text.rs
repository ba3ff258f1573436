/// Plain-text certificate of erasure
use super::header::CertificateHeader;
use crate::oplog::{FileOutcome, OperationLog};
use std::fmt::Write;

/// Render header, every log line and the outcome summary.
pub fn render_text(header: &CertificateHeader, log: &OperationLog) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_body(&mut out, header, log);
    out
}

fn write_body(out: &mut String, header: &CertificateHeader, log: &OperationLog) -> std::fmt::Result {
    writeln!(out, "Certificate of Erasure")?;
    writeln!(out, "Generated at: {}", header.generated_at.to_rfc3339())?;
    writeln!(out)?;
    writeln!(out, "Device ID: {}", header.device_id)?;
    writeln!(out, "Machine Fingerprint: {}", header.machine_fingerprint)?;
    writeln!(out, "User Name: {}", header.user_name)?;
    writeln!(out, "System Info: {}", header.system_info)?;
    writeln!(out, "Processor: {}", header.processor)?;
    writeln!(out, "Algorithm: {}", header.algorithm)?;
    writeln!(out, "Target: {}", header.target.display())?;
    writeln!(out)?;

    for entry in log.entries() {
        writeln!(out, "{}", entry)?;
    }

    let outcomes = log.outcomes();
    let summary = log.summary();
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "  Wiped: {}", summary.wiped)?;
    writeln!(out, "  Locked (skipped): {}", summary.locked)?;
    writeln!(out, "  Failed (untouched): {}", summary.failed)?;
    writeln!(
        out,
        "  Interrupted (content altered, file NOT removed): {}",
        summary.interrupted
    )?;
    for (path, outcome) in &outcomes {
        if let FileOutcome::Interrupted { passes_completed } = outcome {
            writeln!(
                out,
                "    - {} ({} pass(es) completed; do not trust remaining content)",
                path.display(),
                passes_completed
            )?;
        }
    }
    Ok(())
}
