//! The persisted output artifact.
//!
//! ```text
//! RESEARCH FINDINGS:
//! ==================================================
//! <research>
//!
//! ==================================================
//! DRAFT ARTICLE:
//! ==================================================
//! <draft>
//!
//! ==================================================
//! FINAL ARTICLE:
//! ==================================================
//! <final>
//! ```
//!
//! Results are inserted verbatim. There is no trailing newline after the
//! final section.

use super::stage::Stage;

/// Width of the `=` rule between sections.
const RULE_WIDTH: usize = 50;

/// Render the three stage results into the artifact text.
pub fn render_artifact(research: &str, draft: &str, final_text: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let sections = [
        (Stage::Research, research),
        (Stage::Writing, draft),
        (Stage::Editing, final_text),
    ];

    let mut out = String::with_capacity(research.len() + draft.len() + final_text.len() + 256);
    for (i, (stage, body)) in sections.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
            out.push_str(&rule);
            out.push('\n');
        }
        out.push_str(stage.section_title());
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_artifact_layout() {
        let rule = "=".repeat(50);
        let expected = format!(
            "RESEARCH FINDINGS:\n{rule}\nR1\n\n{rule}\nDRAFT ARTICLE:\n{rule}\nA1\n\n{rule}\nFINAL ARTICLE:\n{rule}\nE1"
        );
        assert_eq!(render_artifact("R1", "A1", "E1"), expected);
    }

    #[test]
    fn test_results_inserted_verbatim() {
        let artifact = render_artifact("line\n\n", "", "==== not a banner ====");
        assert!(artifact.starts_with("RESEARCH FINDINGS:\n"));
        assert!(artifact.contains("\nline\n\n\n\n"));
        assert!(artifact.contains("\nDRAFT ARTICLE:\n"));
        assert!(artifact.ends_with("\n==== not a banner ===="));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_artifact("a", "b", "c"), render_artifact("a", "b", "c"));
    }
}
