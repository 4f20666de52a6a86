//! # Footing CLI Application
//!
//! Batch driver for footing_core: reads a JSON or CSV request file, runs
//! each design independently, writes one narrative `.txt` log per request
//! plus an aggregated `output.json` report, and prints a one-line summary
//! per footing on stdout.
//!
//! ```text
//! usage: footing_cli <requests.json|requests.csv> [output_dir]
//! ```
//!
//! A failed request is reported (stderr and the report's `failures` list)
//! without aborting the rest of the batch.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;

use chrono::Local;

use footing_core::narrative::{Narrative, NullNarrative, WriterNarrative};
use footing_core::{design_footing, load_requests, BatchReport, FootingRequest};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let input_path = match args.get(1) {
        Some(path) => path.clone(),
        None => {
            eprintln!("usage: footing_cli <requests.json|requests.csv> [output_dir]");
            return ExitCode::from(2);
        }
    };
    let output_dir = args.get(2).cloned().unwrap_or_else(|| "output".to_string());

    let requests = match load_requests(&input_path) {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("Error loading '{}': {}", input_path, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Error creating output directory '{}': {}", output_dir, e);
        return ExitCode::FAILURE;
    }

    println!(
        "Footing design batch: {} request(s) from {}",
        requests.len(),
        input_path
    );
    println!();

    let mut report = BatchReport::new();
    for request in &requests {
        run_request(request, &output_dir, &mut report);
    }

    let report_path = Path::new(&output_dir).join("output.json");
    let report_path = report_path.to_string_lossy();
    if let Err(e) = report.save(&report_path) {
        eprintln!("Error writing report: {}", e);
        return ExitCode::FAILURE;
    }

    println!();
    println!(
        "Done: {} designed, {} failed. Report written to {}",
        report.results.len(),
        report.failures.len(),
        report_path
    );
    ExitCode::SUCCESS
}

/// Design one request, logging the derivation to `<output_dir>/<id>.txt`.
/// A log file that cannot be opened costs the trace, never the design.
fn run_request(request: &FootingRequest, output_dir: &str, report: &mut BatchReport) {
    let log_path = Path::new(output_dir).join(format!("{}.txt", request.id));
    let mut narrative: Box<dyn Narrative> = match File::create(&log_path) {
        Ok(file) => Box::new(WriterNarrative::new(BufWriter::new(file))),
        Err(e) => {
            eprintln!(
                "Warning: no log for '{}' ({}): designing without a trace",
                request.id, e
            );
            Box::new(NullNarrative)
        }
    };

    narrative.note(&format!("Footing Design for {}", request.id));
    narrative.note(&format!(
        "Generated {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    narrative.note("");

    match design_footing(request, narrative.as_mut()) {
        Ok(result) => {
            println!("{}", result);
            report.push_result(result.to_record());
        }
        Err(e) => {
            eprintln!("{}: FAILED [{}] {}", request.id, e.error_code(), e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            narrative.note(&format!("DESIGN FAILED: {}", e));
            report.push_failure(request.id.clone(), &e);
        }
    }
}
