//! Export options and their validation

use crate::error::{ExportError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Tsv,
    Tab,
}

impl ExportFormat {
    /// File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => ".xlsx",
            ExportFormat::Csv => ".csv",
            ExportFormat::Tsv => ".tsv",
            ExportFormat::Tab => ".tab",
        }
    }

    /// Delimiter used when none is configured
    pub fn default_delimiter(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ",",
            ExportFormat::Xlsx | ExportFormat::Tsv | ExportFormat::Tab => "\t",
        }
    }

    const ALL: [ExportFormat; 4] = [
        ExportFormat::Xlsx,
        ExportFormat::Csv,
        ExportFormat::Tsv,
        ExportFormat::Tab,
    ];
}

/// Options consumed once at the start of an export
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportOptions {
    pub file_name: String,
    pub format: ExportFormat,
    /// CSV family only; `None` uses the format default
    pub delimiter: Option<String>,
    pub ignore_columns_visibility: bool,
    pub ignore_columns_order: bool,
    pub ignore_filtering: bool,
    pub ignore_sorting: bool,
    pub ignore_pinning: bool,
    /// Excel only; fixed width applied to every column
    pub column_width: Option<f64>,
    /// Excel only; fixed height applied to every row
    pub row_height: Option<f64>,
}

impl ExportOptions {
    pub fn new(file_name: impl Into<String>, format: ExportFormat) -> Self {
        ExportOptions {
            file_name: file_name.into(),
            format,
            delimiter: None,
            ignore_columns_visibility: false,
            ignore_columns_order: false,
            ignore_filtering: false,
            ignore_sorting: false,
            ignore_pinning: false,
            column_width: None,
            row_height: None,
        }
    }

    /// Shorthand for an Excel export
    pub fn xlsx(file_name: impl Into<String>) -> Self {
        Self::new(file_name, ExportFormat::Xlsx)
    }

    /// Shorthand for a comma separated export
    pub fn csv(file_name: impl Into<String>) -> Self {
        Self::new(file_name, ExportFormat::Csv)
    }

    /// Reject options that must never reach a renderer
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(ExportError::InvalidOption(
                "file name must not be empty".to_string(),
            ));
        }
        check_dimension("column width", self.column_width)?;
        check_dimension("row height", self.row_height)?;
        if let Some(delimiter) = &self.delimiter {
            if delimiter.is_empty() {
                return Err(ExportError::InvalidOption(
                    "delimiter must not be empty".to_string(),
                ));
            }
            if delimiter.contains(['"', '\r', '\n']) {
                return Err(ExportError::InvalidOption(format!(
                    "delimiter {:?} collides with quoting or record separators",
                    delimiter
                )));
            }
        }
        Ok(())
    }

    /// File name with the format's extension.
    ///
    /// An extension belonging to another export format is replaced,
    /// anything else is kept and the extension appended.
    pub fn file_name(&self) -> String {
        let name = self.file_name.trim();
        let wanted = self.format.extension();
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(wanted) {
            return name.to_string();
        }
        for format in ExportFormat::ALL {
            let ext = format.extension();
            if lower.ends_with(ext) && name.len() > ext.len() {
                return format!("{}{}", &name[..name.len() - ext.len()], wanted);
            }
        }
        format!("{}{}", name, wanted)
    }

    /// Effective value delimiter for the CSV family
    pub fn delimiter(&self) -> &str {
        self.delimiter
            .as_deref()
            .unwrap_or_else(|| self.format.default_delimiter())
    }
}

fn check_dimension(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(ExportError::InvalidOption(format!(
            "{} must be a finite number, got {}",
            name, v
        ))),
        Some(v) if v < 0.0 => Err(ExportError::InvalidOption(format!(
            "{} must not be negative, got {}",
            name, v
        ))),
        _ => Ok(()),
    }
}

/// Builder for [`ExportOptions`]
///
/// # Examples
///
/// ```
/// use gridexport::options::{ExportFormat, ExportOptionsBuilder};
///
/// let options = ExportOptionsBuilder::new("Report", ExportFormat::Xlsx)
///     .with_column_width(50.0)
///     .ignore_filtering(true)
///     .build()?;
/// assert_eq!(options.file_name(), "Report.xlsx");
/// # Ok::<(), gridexport::ExportError>(())
/// ```
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn new(file_name: impl Into<String>, format: ExportFormat) -> Self {
        ExportOptionsBuilder {
            options: ExportOptions::new(file_name, format),
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_column_width(mut self, width: f64) -> Self {
        self.options.column_width = Some(width);
        self
    }

    pub fn with_row_height(mut self, height: f64) -> Self {
        self.options.row_height = Some(height);
        self
    }

    pub fn ignore_columns_visibility(mut self, ignore: bool) -> Self {
        self.options.ignore_columns_visibility = ignore;
        self
    }

    pub fn ignore_columns_order(mut self, ignore: bool) -> Self {
        self.options.ignore_columns_order = ignore;
        self
    }

    pub fn ignore_filtering(mut self, ignore: bool) -> Self {
        self.options.ignore_filtering = ignore;
        self
    }

    pub fn ignore_sorting(mut self, ignore: bool) -> Self {
        self.options.ignore_sorting = ignore;
        self
    }

    pub fn ignore_pinning(mut self, ignore: bool) -> Self {
        self.options.ignore_pinning = ignore;
        self
    }

    /// Validate and return the options
    pub fn build(self) -> Result<ExportOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_appended() {
        assert_eq!(ExportOptions::xlsx("Grid").file_name(), "Grid.xlsx");
        assert_eq!(ExportOptions::xlsx("Grid.xlsx").file_name(), "Grid.xlsx");
        assert_eq!(ExportOptions::csv("Grid.v2").file_name(), "Grid.v2.csv");
    }

    #[test]
    fn test_file_extension_replaced() {
        assert_eq!(ExportOptions::xlsx("Grid.csv").file_name(), "Grid.xlsx");
        assert_eq!(
            ExportOptions::new("Grid.xlsx", ExportFormat::Tab).file_name(),
            "Grid.tab"
        );
    }

    #[test]
    fn test_blank_file_name_rejected() {
        let err = ExportOptions::xlsx("   ").validate().unwrap_err();
        assert!(matches!(err, ExportError::InvalidOption(_)));
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let err = ExportOptionsBuilder::new("Grid", ExportFormat::Xlsx)
            .with_column_width(-1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidOption(_)));

        let err = ExportOptionsBuilder::new("Grid", ExportFormat::Xlsx)
            .with_row_height(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidOption(_)));

        assert!(ExportOptionsBuilder::new("Grid", ExportFormat::Xlsx)
            .with_column_width(0.0)
            .with_row_height(0.0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_delimiter_defaults() {
        assert_eq!(ExportOptions::csv("a").delimiter(), ",");
        assert_eq!(ExportOptions::new("a", ExportFormat::Tsv).delimiter(), "\t");
        let opts = ExportOptionsBuilder::new("a", ExportFormat::Csv)
            .with_delimiter(";")
            .build()
            .unwrap();
        assert_eq!(opts.delimiter(), ";");
    }

    #[test]
    fn test_quote_delimiter_rejected() {
        let err = ExportOptionsBuilder::new("a", ExportFormat::Csv)
            .with_delimiter("\"")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidOption(_)));
    }
}
