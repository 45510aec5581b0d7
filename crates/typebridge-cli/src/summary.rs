//! End-of-run diagnostics summary

use typebridge_logging::Diagnostic;

/// Summary of the warnings raised during a run, `None` when there were none.
pub fn format(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }

    let mut out = format!("\n{} diagnostic(s):\n", diagnostics.len());
    for diagnostic in diagnostics {
        out.push_str(&format!("  - {diagnostic}\n"));
    }
    Some(out)
}
