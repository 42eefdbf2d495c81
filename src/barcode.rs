//! # Barcode Result Formatting
//!
//! Turns a confirmed scan (decoded value, reader format key, reader label)
//! into a display fragment for the operator.
//!
//! Format keys are the scanner's reader identifiers (`code_128`, `ean`,
//! `i2of5`, ...). Keys missing from the table are shown verbatim.
//!
//! | Key | Display name |
//! |-----|--------------|
//! | `code_128` | Code 128 |
//! | `ean` | EAN-13 |
//! | `ean_8` | EAN-8 |
//! | `code_39` | Code 39 |
//! | `code_39_vin` | Code 39 VIN |
//! | `codabar` | Codabar |
//! | `upc` | UPC-A |
//! | `upc_e` | UPC-E |
//! | `i2of5` | Interleaved 2 of 5 |
//! | `2of5` | Standard 2 of 5 |
//! | `code_93` | Code 93 |
//!
//! ## Example
//!
//! ```
//! use pitboss::barcode::BarcodeInfoFormatter;
//!
//! let formatter = BarcodeInfoFormatter::default();
//! let info = formatter.format_info("000123456789012345", "i2of5", "Cámara");
//! assert_eq!(info.format, "Interleaved 2 of 5");
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const BUILT_IN_FORMATS: &[(&str, &str)] = &[
    ("code_128", "Code 128"),
    ("ean", "EAN-13"),
    ("ean_8", "EAN-8"),
    ("code_39", "Code 39"),
    ("code_39_vin", "Code 39 VIN"),
    ("codabar", "Codabar"),
    ("upc", "UPC-A"),
    ("upc_e", "UPC-E"),
    ("i2of5", "Interleaved 2 of 5"),
    ("2of5", "Standard 2 of 5"),
    ("code_93", "Code 93"),
];

/// Shown under every scan result.
pub const SCAN_NOTICE: &str =
    "Verifique que el código coincida con el ticket físico antes de continuar.";

/// Immutable format key → display name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormatNames(BTreeMap<String, String>);

impl Default for FormatNames {
    fn default() -> Self {
        Self::new(
            BUILT_IN_FORMATS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }
}

impl FormatNames {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Built-in table with `overrides` layered on top.
    pub fn with_overrides(overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut names = Self::default();
        names.0.extend(overrides);
        names
    }

    /// Display name for `key`, or `key` itself when unknown.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map_or(key, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A formatted scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFragment {
    pub value: String,
    pub format: String,
    pub reader: String,
    pub notice: &'static str,
}

impl DisplayFragment {
    /// Render as an HTML fragment. Field values are escaped.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="barcode-info">"#,
                r#"<p><strong>Código:</strong> {}</p>"#,
                r#"<p><strong>Formato:</strong> {}</p>"#,
                r#"<p><strong>Lector:</strong> {}</p>"#,
                r#"<p class="barcode-info-notice">{}</p>"#,
                "</div>"
            ),
            escape_html(&self.value),
            escape_html(&self.format),
            escape_html(&self.reader),
            escape_html(self.notice),
        )
    }
}

impl fmt::Display for DisplayFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Código:  {}", self.value)?;
        writeln!(f, "Formato: {}", self.format)?;
        writeln!(f, "Lector:  {}", self.reader)?;
        write!(f, "{}", self.notice)
    }
}

/// Builds display fragments from scan results.
#[derive(Debug, Clone, Default)]
pub struct BarcodeInfoFormatter {
    names: FormatNames,
}

impl BarcodeInfoFormatter {
    pub fn new(names: FormatNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &FormatNames {
        &self.names
    }

    /// Format a scan result. Pure: same inputs, same fragment.
    pub fn format_info(&self, code: &str, format_key: &str, reader_label: &str) -> DisplayFragment {
        DisplayFragment {
            value: code.to_string(),
            format: self.names.display_name(format_key).to_string(),
            reader: reader_label.to_string(),
            notice: SCAN_NOTICE,
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_format() {
        let info = BarcodeInfoFormatter::default().format_info("ABC-123", "code_128", "USB");
        assert_eq!(
            info,
            DisplayFragment {
                value: "ABC-123".into(),
                format: "Code 128".into(),
                reader: "USB".into(),
                notice: SCAN_NOTICE,
            }
        );
    }

    #[test]
    fn test_unknown_format_passes_through() {
        let info = BarcodeInfoFormatter::default().format_info("1", "qr_code", "Cámara");
        assert_eq!(info.format, "qr_code");
    }

    #[test]
    fn test_pure() {
        let formatter = BarcodeInfoFormatter::default();
        for (code, key, reader) in [
            ("123", "ean", "Cámara"),
            ("", "", ""),
            ("x", "mystery", "Lector 2"),
        ] {
            let a = formatter.format_info(code, key, reader);
            let b = formatter.format_info(code, key, reader);
            assert_eq!(a, b);
            assert_eq!(a.to_html(), b.to_html());
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn test_injected_table() {
        let names = FormatNames::new([("ean".to_string(), "European Article Number".to_string())]);
        let formatter = BarcodeInfoFormatter::new(names);
        assert_eq!(
            formatter.format_info("1", "ean", "r").format,
            "European Article Number"
        );
        // Not in the injected table, so verbatim
        assert_eq!(formatter.format_info("1", "code_128", "r").format, "code_128");
    }

    #[test]
    fn test_overrides_keep_built_ins() {
        let names = FormatNames::with_overrides([("i2of5".to_string(), "ITF".to_string())]);
        assert_eq!(names.display_name("i2of5"), "ITF");
        assert_eq!(names.display_name("code_39"), "Code 39");
        assert_eq!(names.len(), BUILT_IN_FORMATS.len());
    }

    #[test]
    fn test_html_escapes_values() {
        let html = BarcodeInfoFormatter::default()
            .format_info("<script>", "ean", "a&b")
            .to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<strong>Formato:</strong> EAN-13"));
    }

    #[test]
    fn test_text_rendering() {
        let text = BarcodeInfoFormatter::default()
            .format_info("42", "upc", "Manual")
            .to_string();
        assert_eq!(
            text,
            format!("Código:  42\nFormato: UPC-A\nLector:  Manual\n{}", SCAN_NOTICE)
        );
    }
}
