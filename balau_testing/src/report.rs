//! JUnit-style XML reports, one file per test group.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::HarnessError;
use crate::runner::{CaseOutcome, GroupOutcome};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escapes markup and whitespace for attribute values, replacing characters
/// XML 1.0 cannot represent with U+FFFD.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\u{FFFE}' | '\u{FFFF}' => escaped.push(char::REPLACEMENT_CHARACTER),
            ch if u32::from(ch) < 0x20 => escaped.push(char::REPLACEMENT_CHARACTER),
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64())
}

struct XmlWriter {
    buffer: String,
    indent: usize,
}

impl XmlWriter {
    #[expect(
        clippy::missing_const_for_fn,
        reason = "avoid relying on const-stability details for allocation constructors"
    )]
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
        }
    }

    const fn indent(&mut self) {
        self.indent += 1;
    }

    const fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Renders the report document for one group.
#[must_use]
pub fn render_group(outcome: &GroupOutcome) -> String {
    let mut writer = XmlWriter::new();
    writer.line(XML_DECLARATION);
    writer.line(&format!(
        r#"<testsuite name="{}" tests="{}" failures="{}" time="{}">"#,
        escape_xml(outcome.name()),
        outcome.cases().len(),
        outcome.failed(),
        seconds(outcome.elapsed()),
    ));
    writer.indent();
    for case in outcome.cases() {
        render_case(&mut writer, outcome.name(), case);
    }
    writer.outdent();
    writer.line("</testsuite>");
    writer.finish()
}

fn render_case(writer: &mut XmlWriter, group: &str, case: &CaseOutcome) {
    let open = format!(
        r#"<testcase classname="{}" name="{}" time="{}""#,
        escape_xml(group),
        escape_xml(case.name()),
        seconds(case.elapsed()),
    );
    match case.failure() {
        None => writer.line(&format!("{open}/>")),
        Some(failure) => {
            writer.line(&format!("{open}>"));
            writer.indent();
            writer.line(&format!(
                r#"<failure message="{}"/>"#,
                escape_xml(&failure.to_string())
            ));
            writer.outdent();
            writer.line("</testcase>");
        }
    }
}

/// Writes `<dir>/<Group>.xml` for every group, creating `dir` if needed.
///
/// Returns the paths written, in group order.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] when the directory cannot be created or a
/// report cannot be written.
pub fn write_reports(
    dir: &Utf8Path,
    groups: &[GroupOutcome],
) -> Result<Vec<Utf8PathBuf>, HarnessError> {
    Dir::create_ambient_dir_all(dir, ambient_authority()).map_err(|source| HarnessError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let handle =
        Dir::open_ambient_dir(dir, ambient_authority()).map_err(|source| HarnessError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let file_name = format!("{}.xml", group.name());
        let path = dir.join(&file_name);
        let mut file = handle
            .open_with(
                &file_name,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
        file.write_all(render_group(group).as_bytes())
            .map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(report = %path, "wrote test report");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
    }

    #[rstest]
    #[case("tab\tline\nreturn\r", "tab&#9;line&#10;return&#13;")]
    #[case("bell\u{7}nul\u{0}", "bell\u{FFFD}nul\u{FFFD}")]
    #[case("\u{1}\u{1f}\u{FFFE}\u{FFFF}", "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}")]
    #[case("caf\u{e9} \u{1F600}", "caf\u{e9} \u{1F600}")]
    fn keeps_attribute_values_well_formed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_xml(raw), expected);
    }

    #[rstest]
    #[case(Duration::from_millis(1500), "1.500")]
    #[case(Duration::ZERO, "0.000")]
    fn formats_seconds(#[case] elapsed: Duration, #[case] expected: &str) {
        assert_eq!(seconds(elapsed), expected);
    }
}
