//! CSV loading for dense datasets
//!
//! Supports loading datasets from CSV files where:
//! - The last column is the label
//! - All other columns are features
//! - First row can be headers (automatically detected)
//! - Lines starting with '#' are comments

use crate::core::{Result, SVMError};
use crate::data::DenseDataset;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

impl DenseDataset {
    /// Load a dataset from a CSV file
    ///
    /// The last column is assumed to be the label. Headers are automatically
    /// detected if present.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SVMError::IoError)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Load a dataset from a reader of CSV lines
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_csv_reader_with_options(reader, true)
    }

    /// Load a dataset from a reader with explicit header auto-detection
    pub fn from_csv_reader_with_options<R: BufRead>(
        mut reader: R,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();
        let mut first_line = String::new();

        reader.read_line(&mut first_line).map_err(SVMError::IoError)?;
        let first_line = first_line.trim();

        if first_line.is_empty() {
            return Err(SVMError::EmptyDataset);
        }

        if !first_line.starts_with('#') {
            let has_header = auto_detect_header && is_header_line(first_line);
            if !has_header {
                let (row, label) = parse_data_line(first_line)?;
                rows.push(row);
                labels.push(label);
            }
        }

        for line in reader.lines() {
            let line = line.map_err(SVMError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (row, label) = parse_data_line(line)?;
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(SVMError::ParseError(format!(
                        "Row with {} features after rows with {}: {line}",
                        row.len(),
                        first.len()
                    )));
                }
            }
            rows.push(row);
            labels.push(label);
        }

        DenseDataset::from_rows(rows, labels)
    }
}

/// Check if a line appears to be a header
fn is_header_line(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').collect();

    if fields.len() < 2 {
        return false;
    }

    // Header if most non-label fields fail to parse as numbers
    let non_numeric_count = fields
        .iter()
        .take(fields.len() - 1)
        .filter(|field| field.trim().parse::<f64>().is_err())
        .count();

    non_numeric_count > fields.len() / 2
}

/// Parse a CSV data line into a feature row and a binary label
fn parse_data_line(line: &str) -> Result<(Vec<f64>, f64)> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

    if fields.len() < 2 {
        return Err(SVMError::ParseError(format!(
            "Line has too few fields: {line}"
        )));
    }

    // Last field is the label
    let label_str = fields[fields.len() - 1];
    let label = label_str
        .parse::<f64>()
        .map_err(|_| SVMError::ParseError(format!("Invalid label: {label_str}")))?;

    // Convert to binary label if needed
    let label = if label == 1.0 || label == -1.0 {
        label
    } else if label > 0.0 {
        1.0
    } else {
        -1.0
    };

    let mut row = Vec::with_capacity(fields.len() - 1);
    for (idx, field) in fields.iter().take(fields.len() - 1).enumerate() {
        let value = field.parse::<f64>().map_err(|_| {
            SVMError::ParseError(format!(
                "Invalid feature value at column {}: {field}",
                idx + 1
            ))
        })?;
        row.push(value);
    }

    Ok((row, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dataset;
    use std::io::Cursor;

    #[test]
    fn test_csv_basic() {
        let data = "1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = DenseDataset::from_csv_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dim(), 2);
        assert_eq!(dataset.row(0), &[1.0, 2.0]);
        assert_eq!(dataset.label(0), 1.0);
        assert_eq!(dataset.row(1), &[3.0, 4.0]);
        assert_eq!(dataset.label(1), -1.0);
    }

    #[test]
    fn test_csv_with_headers() {
        let data = "feature1,feature2,label\n1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = DenseDataset::from_csv_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2); // Headers should be skipped
        assert_eq!(dataset.labels(), &[1.0, -1.0]);
    }

    #[test]
    fn test_csv_comments_and_blank_lines() {
        let data = "# comment\n1.0,2.0,1\n\n3.0,4.0,-1\n# trailing comment\n";
        let dataset = DenseDataset::from_csv_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_csv_label_coercion() {
        // Non-unit labels collapse onto their sign
        let data = "1.0,5\n2.0,-3\n";
        let dataset = DenseDataset::from_csv_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.labels(), &[1.0, -1.0]);
    }

    #[test]
    fn test_csv_zero_features_kept_dense() {
        let data = "1.0,0.0,2.0,1\n0.0,3.0,0.0,-1\n";
        let dataset = DenseDataset::from_csv_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.row(0), &[1.0, 0.0, 2.0]);
        assert_eq!(dataset.row(1), &[0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_csv_ragged_row_rejected() {
        let data = "1.0,2.0,1\n3.0,-1\n";
        let result = DenseDataset::from_csv_reader(Cursor::new(data));
        assert!(matches!(result, Err(SVMError::ParseError(_))));
    }

    #[test]
    fn test_csv_invalid_feature_rejected() {
        let data = "1.0,abc,1\n";
        let result = DenseDataset::from_csv_reader(Cursor::new(data));
        assert!(matches!(result, Err(SVMError::ParseError(_))));
    }

    #[test]
    fn test_csv_invalid_label_rejected() {
        let data = "1.0,2.0,abc\n";
        let result = DenseDataset::from_csv_reader(Cursor::new(data));
        assert!(matches!(result, Err(SVMError::ParseError(_))));
    }

    #[test]
    fn test_csv_empty_input() {
        let result = DenseDataset::from_csv_reader(Cursor::new(""));
        assert!(matches!(result, Err(SVMError::EmptyDataset)));
    }

    #[test]
    fn test_csv_header_detection_disabled() {
        // With auto-detection off, a header line is a parse error
        let data = "feature1,feature2,label\n1.0,2.0,1\n";
        let result = DenseDataset::from_csv_reader_with_options(Cursor::new(data), false);
        assert!(matches!(result, Err(SVMError::ParseError(_))));
    }
}
