use std::fs;
use std::io::{self, Write};
use std::path::Path;

use bm_compiler::pipeline::RunSummary;
use bm_compiler::report::render_source_block;
use bm_compiler::SourceReport;

/// Writes each block to the output file and echoes it.
pub struct TeeSink<F: Write, E: Write> {
    file: F,
    echo: E,
}

impl<F: Write, E: Write> TeeSink<F, E> {
    pub fn new(file: F, echo: E) -> Self {
        Self { file, echo }
    }

    pub fn emit(&mut self, block: &str) -> io::Result<()> {
        self.file.write_all(block.as_bytes())?;
        self.echo.write_all(block.as_bytes())
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.echo.flush()
    }
}

pub fn write_reports<F: Write, E: Write>(sink: &mut TeeSink<F, E>, reports: &[SourceReport]) -> io::Result<()> {
    for report in reports {
        sink.emit(&render_source_block(report))?;
    }
    Ok(())
}

pub fn write_blacklist(path: &Path, reports: &[SourceReport]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }

    let file = fs::File::create(path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    let mut sink = TeeSink::new(io::BufWriter::new(file), io::stdout().lock());

    write_reports(&mut sink, reports)
        .and_then(|_| sink.finish())
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

pub fn write_stats(path: &Path, summary: &RunSummary) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
    fs::write(path, json)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: &str, names: &[&str]) -> SourceReport {
        SourceReport {
            source: source.to_string(),
            ignored_duplicates: 0,
            ignored_whitelisted: 0,
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_tee_sink_writes_both() {
        let mut file = Vec::new();
        let mut echo = Vec::new();
        {
            let mut sink = TeeSink::new(&mut file, &mut echo);
            write_reports(&mut sink, &[report("a", &["x.example.com"])]).unwrap();
            sink.finish().unwrap();
        }
        assert_eq!(file, echo);
        assert!(String::from_utf8(file).unwrap().ends_with("# Blacklisted domains: 1\n\nx.example.com\n"));
    }

    #[test]
    fn test_write_blacklist_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("blacklist.txt");

        write_blacklist(&path, &[report("https://lists.example/a.txt", &["a.example.com"])]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("\n\n########## Blacklist from https://lists.example/a.txt ##########\n\n"));
        assert!(text.ends_with("a.example.com\n"));
    }

    #[test]
    fn test_write_stats_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let summary = RunSummary {
            sources: Vec::new(),
            failed_sources: vec!["https://down.example/list".to_string()],
            time_restricted_names: 3,
            total_blacklisted: 0,
        };

        write_stats(&path, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["time_restricted_names"], 3);
        assert_eq!(value["failed_sources"][0], "https://down.example/list");
    }
}
