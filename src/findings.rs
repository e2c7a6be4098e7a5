//! Parsing analysis findings from tool output.
//!
//! Recognized line shapes:
//! - `path:line: message`
//! - `path:line:column: message`
//! - checkstyle's `[SEVERITY] path:line[:column]: message [CheckName]`
//!
//! Windows drive letters (`C:\src\A.java:12: ...`) are accepted.

use regex::Regex;
use std::sync::LazyLock;

static FINDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\[(?P<severity>[A-Za-z]+)\]\s+)?(?P<file>[A-Za-z]:[\\/][^:]*|[^:\[\s][^:]*):(?P<line>\d+):(?:(?P<column>\d+):)?\s*(?P<message>.*?)(?:\s+\[(?P<check>\w+)\])?$",
    )
    .expect("finding pattern is valid")
});

/// One diagnostic reported by an analysis tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// File the finding refers to, as the tool reported it.
    pub file: Option<String>,
    /// 1-based line number.
    pub line: u32,
    pub column: Option<u32>,
    pub severity: Option<String>,
    pub check: Option<String>,
    pub message: String,
}

impl Finding {
    /// Create a finding with only a location and message.
    pub fn new(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column: None,
            severity: None,
            check: None,
            message: message.into(),
        }
    }
}

/// Parse one line of tool output.
///
/// Returns `None` for lines that are not findings (summaries, banners) and
/// for line numbers that are 0 or out of range.
pub fn parse_finding(line: &str) -> Option<Finding> {
    let caps = FINDING_RE.captures(line.trim_end())?;

    let line_no: u32 = caps.name("line")?.as_str().parse().ok()?;
    if line_no == 0 {
        return None;
    }

    Some(Finding {
        file: Some(caps.name("file")?.as_str().to_string()),
        line: line_no,
        column: caps.name("column").and_then(|c| c.as_str().parse().ok()),
        severity: caps.name("severity").map(|s| s.as_str().to_string()),
        check: caps.name("check").map(|c| c.as_str().to_string()),
        message: caps
            .name("message")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_compiler_style() {
        let finding = parse_finding("src/A.java:12: missing javadoc").unwrap();
        assert_eq!(finding, Finding::new("src/A.java", 12, "missing javadoc"));
    }

    #[test]
    fn with_column() {
        let finding = parse_finding("src/lib.rs:3:14: unused variable").unwrap();
        assert_eq!(finding.file.as_deref(), Some("src/lib.rs"));
        assert_eq!(finding.line, 3);
        assert_eq!(finding.column, Some(14));
        assert_eq!(finding.message, "unused variable");
    }

    #[test]
    fn checkstyle_format() {
        let finding = parse_finding(
            "[WARN] /repo/src/A.java:40:5: Unallowed increment/decrement operation. [NoEmbeddedPlusPlus]",
        )
        .unwrap();
        assert_eq!(finding.severity.as_deref(), Some("WARN"));
        assert_eq!(finding.file.as_deref(), Some("/repo/src/A.java"));
        assert_eq!(finding.line, 40);
        assert_eq!(finding.column, Some(5));
        assert_eq!(finding.check.as_deref(), Some("NoEmbeddedPlusPlus"));
        assert_eq!(finding.message, "Unallowed increment/decrement operation.");
    }

    #[test]
    fn windows_drive_letter() {
        let finding = parse_finding(r"C:\work\src\A.java:7: tab character").unwrap();
        assert_eq!(finding.file.as_deref(), Some(r"C:\work\src\A.java"));
        assert_eq!(finding.line, 7);
    }

    #[test]
    fn non_findings_are_rejected() {
        for line in [
            "Starting audit...",
            "Audit done.",
            "",
            "src/A.java: no line number",
            "src/A.java:0: line zero",
            "src/A.java:99999999999: overflow",
            "  indented.rs:3: leading space",
        ] {
            assert!(parse_finding(line).is_none(), "{line:?} should not parse");
        }
    }

    #[test]
    fn empty_message_is_allowed() {
        let finding = parse_finding("a.rs:1:").unwrap();
        assert_eq!(finding.message, "");
    }
}
