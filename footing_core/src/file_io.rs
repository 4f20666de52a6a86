//! # File I/O
//!
//! Batch-boundary file operations: loading design requests from JSON or
//! CSV, and aggregating results into a timestamped report.
//!
//! JSON is the primary format (an array of request objects). CSV is
//! accepted for spreadsheet-exported batches: a header row names the
//! columns, one request per line, empty cells fall back to the request
//! defaults. The CSV is parsed by hand - the format is flat and
//! comma-free, so a header-index lookup is all it takes.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{FootingRecord, FootingRequest};
use crate::errors::{DesignError, DesignResult};

/// Load requests from a batch file, dispatching on the file extension
/// (`.json` or `.csv`).
pub fn load_requests(path: &str) -> DesignResult<Vec<FootingRequest>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    match extension.to_ascii_lowercase().as_str() {
        "json" => load_requests_json(path),
        "csv" => load_requests_csv(path),
        other => Err(DesignError::file_error(
            "open",
            path,
            format!("Unsupported input format '{}' (expected .json or .csv)", other),
        )),
    }
}

/// Load requests from a JSON array.
pub fn load_requests_json(path: &str) -> DesignResult<Vec<FootingRequest>> {
    let text = fs::read_to_string(path)
        .map_err(|e| DesignError::file_error("read", path, e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| DesignError::SerializationError {
        reason: format!("{}: {}", path, e),
    })
}

/// Load requests from a header-row CSV file.
pub fn load_requests_csv(path: &str) -> DesignResult<Vec<FootingRequest>> {
    let file = fs::File::open(path)
        .map_err(|e| DesignError::file_error("open", path, e.to_string()))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| DesignError::file_error("read", path, "CSV file is empty"))?
        .map_err(|e| DesignError::file_error("read", path, e.to_string()))?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();
    let col_index = |name: &str| -> Option<usize> {
        headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    };
    let required = |name: &str| -> DesignResult<usize> {
        col_index(name).ok_or_else(|| {
            DesignError::file_error("parse", path, format!("Missing '{}' column", name))
        })
    };

    let id_idx = required("id")?;
    let kind_idx = required("ftng_type")?;
    let dead_idx = required("dead_load")?;
    let live_idx = required("live_load")?;
    let f_c_idx = required("f_c")?;
    let grade_idx = required("grade")?;
    let asp_idx = required("a_s_p")?;
    let width_idx = required("width")?;

    let w_c_idx = col_index("w_c");
    let w_e_idx = col_index("w_e");
    let bottom_idx = col_index("bottom_of_ftng");
    let precision_idx = col_index("precision");
    let conc_type_idx = col_index("conc_type");
    let wall_type_idx = col_index("wall_type");
    let restriction_idx = col_index("width_restriction");
    let col_loc_idx = col_index("col_loc");

    let mut requests = Vec::new();
    let mut line_num = 1usize;
    for line_result in lines {
        line_num += 1;
        let line = line_result.map_err(|e| {
            DesignError::file_error("read", path, format!("line {}: {}", line_num, e))
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        let cell = |idx: usize| fields.get(idx).copied().unwrap_or("");
        let opt_cell = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .copied()
                .filter(|value| !value.is_empty())
        };
        let parse_f64 = |idx: usize, name: &str| -> DesignResult<f64> {
            cell(idx).parse().map_err(|_| {
                DesignError::file_error(
                    "parse",
                    path,
                    format!("line {}: bad {} value '{}'", line_num, name, cell(idx)),
                )
            })
        };
        let parse_opt_f64 = |idx: Option<usize>, name: &str| -> DesignResult<Option<f64>> {
            match opt_cell(idx) {
                Some(value) => value.parse().map(Some).map_err(|_| {
                    DesignError::file_error(
                        "parse",
                        path,
                        format!("line {}: bad {} value '{}'", line_num, name, value),
                    )
                }),
                None => Ok(None),
            }
        };

        let grade: u32 = cell(grade_idx).parse().map_err(|_| {
            DesignError::file_error(
                "parse",
                path,
                format!("line {}: bad grade value '{}'", line_num, cell(grade_idx)),
            )
        })?;

        requests.push(FootingRequest {
            id: cell(id_idx).to_string(),
            ftng_type: cell(kind_idx).to_string(),
            dead_load: parse_f64(dead_idx, "dead_load")?,
            live_load: parse_f64(live_idx, "live_load")?,
            f_c: parse_f64(f_c_idx, "f_c")?,
            grade,
            allowable_soil_pressure_psf: parse_f64(asp_idx, "a_s_p")?,
            concrete_unit_weight_pcf: parse_opt_f64(w_c_idx, "w_c")?,
            soil_unit_weight_pcf: parse_opt_f64(w_e_idx, "w_e")?,
            depth_to_bottom_ft: parse_opt_f64(bottom_idx, "bottom_of_ftng")?,
            precision_ft: parse_opt_f64(precision_idx, "precision")?,
            conc_type: opt_cell(conc_type_idx).map(|s| s.to_string()),
            width: parse_f64(width_idx, "width")?,
            wall_type: opt_cell(wall_type_idx).map(|s| s.to_string()),
            width_restriction: parse_opt_f64(restriction_idx, "width_restriction")?,
            col_loc: opt_cell(col_loc_idx).map(|s| s.to_string()),
        });
    }

    Ok(requests)
}

/// One failed request in the batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRequest {
    pub id: String,
    pub error_code: String,
    pub message: String,
}

impl FailedRequest {
    pub fn new(id: impl Into<String>, error: &DesignError) -> Self {
        FailedRequest {
            id: id.into(),
            error_code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Aggregated outcome of a batch run: successes and failures side by side,
/// stamped with the generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// When the report was generated
    pub generated: DateTime<Utc>,
    /// One record per successfully designed footing
    pub results: Vec<FootingRecord>,
    /// One entry per failed request
    pub failures: Vec<FailedRequest>,
}

impl BatchReport {
    pub fn new() -> Self {
        BatchReport {
            generated: Utc::now(),
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn push_result(&mut self, record: FootingRecord) {
        self.results.push(record);
    }

    pub fn push_failure(&mut self, id: impl Into<String>, error: &DesignError) {
        self.failures.push(FailedRequest::new(id, error));
    }

    /// Serialize and write the report.
    pub fn save(&self, path: &str) -> DesignResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            DesignError::SerializationError {
                reason: e.to_string(),
            }
        })?;
        fs::write(path, json)
            .map_err(|e| DesignError::file_error("write", path, e.to_string()))
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("footing_core_test_{}_{}", std::process::id(), name));
        path
    }

    #[test]
    fn test_load_requests_json() {
        let path = temp_file("requests.json");
        fs::write(
            &path,
            r#"[{
                "id": "F-1", "ftng_type": "wall",
                "dead_load": 10.0, "live_load": 8.0,
                "f_c": 3000.0, "grade": 60, "a_s_p": 3000.0,
                "width": 12.0, "wall_type": "concrete"
            }]"#,
        )
        .unwrap();

        let requests = load_requests(path.to_str().unwrap()).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, "F-1");
        assert_eq!(requests[0].grade, 60);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_requests_csv_with_blanks() {
        let path = temp_file("requests.csv");
        fs::write(
            &path,
            "id,ftng_type,dead_load,live_load,f_c,grade,a_s_p,w_c,w_e,bottom_of_ftng,precision,conc_type,width,wall_type,width_restriction,col_loc\n\
             F-1,wall,10.0,8.0,3000,60,3000,,,,,,12.0,concrete,,\n\
             F-2,column,50.0,40.0,4000,60,4000,150,100,4,0.08333333333,nw,18.0,,6.0,interior\n",
        )
        .unwrap();

        let requests = load_requests(path.to_str().unwrap()).unwrap();
        assert_eq!(requests.len(), 2);

        // blanks become None (defaults applied later)
        assert_eq!(requests[0].concrete_unit_weight_pcf, None);
        assert_eq!(requests[0].wall_type.as_deref(), Some("concrete"));
        assert_eq!(requests[0].width_restriction, None);

        assert_eq!(requests[1].ftng_type, "column");
        assert_eq!(requests[1].width_restriction, Some(6.0));
        assert_eq!(requests[1].col_loc.as_deref(), Some("interior"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_csv_missing_column_reports_name() {
        let path = temp_file("bad_header.csv");
        fs::write(&path, "id,ftng_type,dead_load\nF-1,wall,10.0\n").unwrap();

        let err = load_requests(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(err.to_string().contains("live_load"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_csv_bad_number_reports_line() {
        let path = temp_file("bad_value.csv");
        fs::write(
            &path,
            "id,ftng_type,dead_load,live_load,f_c,grade,a_s_p,width\n\
             F-1,wall,ten,8.0,3000,60,3000,12.0\n",
        )
        .unwrap();

        let err = load_requests(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("dead_load"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_requests("requests.xlsx").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_batch_report_roundtrip() {
        let mut report = BatchReport::new();
        report.push_result(FootingRecord {
            id: "F-1".to_string(),
            footing: "wall".to_string(),
            length_ft: None,
            width_ft: 7.17,
            thickness_ft: 1.17,
            steel_long_sqin: 0.42,
            steel_short_sqin: None,
        });
        report.push_failure(
            "F-2",
            &DesignError::invalid_category("conc_type", "heavy", "nw, lw, s_lw"),
        );

        let path = temp_file("report.json");
        report.save(path.to_str().unwrap()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let roundtrip: BatchReport = serde_json::from_str(&text).unwrap();
        assert_eq!(roundtrip.results.len(), 1);
        assert_eq!(roundtrip.failures.len(), 1);
        assert_eq!(roundtrip.failures[0].error_code, "INVALID_CATEGORY");
        // wall records omit the column-only fields entirely
        assert!(!text.contains("length_ft"));

        fs::remove_file(&path).ok();
    }
}
