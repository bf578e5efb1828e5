//! Snapshot of everything the engine exposes, for display or JSON output

use std::fmt;

use serde::Serialize;

use crate::error::CompressError;
use crate::intervals::ProbabilityIntervals;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    pub original: String,
    pub result: String,
    pub result_float: f64,
    pub compression_ratio: f64,
    pub tree: String,
    pub intervals: ProbabilityIntervals,
    pub entropy_bits: f64,
    pub deflate_ratio: Option<f64>,
}

impl CompressionReport {
    pub fn to_json(&self) -> Result<String, CompressError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CompressError::SerializationError(e.to_string()))
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original string : {}", self.original)?;
        writeln!(f, "uncompressed string : {}", self.result)?;
        writeln!(f, "compressed float : {}", self.result_float)?;
        writeln!(f, "compression ratio : {:.3}", self.compression_ratio)?;
        if let Some(deflate) = self.deflate_ratio {
            writeln!(f, "deflate ratio : {:.3}", deflate)?;
        }
        writeln!(f, "intervals : {}", self.intervals)?;
        write!(f, "{}", self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn sample() -> CompressionReport {
        CompressionReport {
            original: "aab".into(),
            result: "aab".into(),
            result_float: 3.0,
            compression_ratio: 8.0,
            tree: "(3 'b':1 'a':2)".into(),
            intervals: ProbabilityIntervals::from_frequencies(&FrequencyTable::from_bytes(b"aab")),
            entropy_bits: 0.918,
            deflate_ratio: None,
        }
    }

    #[test]
    fn test_display_lines() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Original string : aab");
        assert_eq!(lines[1], "uncompressed string : aab");
        assert_eq!(lines[2], "compressed float : 3");
        assert_eq!(lines[3], "compression ratio : 8.000");
        assert_eq!(lines[4], "intervals : {'a': [0.0000, 0.6667), 'b': [0.6667, 1.0000)}");
        assert_eq!(lines[5], "(3 'b':1 'a':2)");
    }

    #[test]
    fn test_json_fields() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result_float"], 3.0);
        assert_eq!(value["tree"], "(3 'b':1 'a':2)");
        assert!(value["deflate_ratio"].is_null());
        assert_eq!(value["intervals"][1]["symbol"], 98);
        assert_eq!(value["intervals"][1]["high"], 1.0);
    }
}
