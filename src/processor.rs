// src/processor.rs
//! Route processing: read sources, classify lines, deduplicate

use crate::{
    dedup::{dedup_spatial, dedup_temporal},
    error::Result,
    gps::{checksum, nmea, ChecksumOutcome, ParseError, Record},
    route::build_route_url,
};
use serde::Serialize;
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
};

/// What happened to a single input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Fix(Record),
    /// Not a `$...*HH` sentence at all
    Incomplete,
    ChecksumMismatch,
    /// Known sentence type we do not extract fixes from
    Unsupported,
    Rejected(ParseError),
}

/// Run one line through checksum, classification and field parsing.
pub fn classify_line(line: &str) -> LineOutcome {
    match checksum::verify(line) {
        ChecksumOutcome::Incomplete => return LineOutcome::Incomplete,
        ChecksumOutcome::Mismatch => return LineOutcome::ChecksumMismatch,
        ChecksumOutcome::Ok => {}
    }

    if nmea::is_unsupported(line) {
        return LineOutcome::Unsupported;
    }

    match nmea::parse_rmc(line) {
        Ok(record) => LineOutcome::Fix(record),
        Err(e) => LineOutcome::Rejected(e),
    }
}

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
    pub lines_read: usize,
    pub incomplete: usize,
    pub checksum_failures: usize,
    pub unsupported: usize,
    pub rejected: usize,
    pub records_parsed: usize,
    pub files_skipped: usize,
}

impl ProcessingSummary {
    pub fn tally(&mut self, outcome: &LineOutcome) {
        self.lines_read += 1;
        match outcome {
            LineOutcome::Fix(_) => self.records_parsed += 1,
            LineOutcome::Incomplete => self.incomplete += 1,
            LineOutcome::ChecksumMismatch => self.checksum_failures += 1,
            LineOutcome::Unsupported => self.unsupported += 1,
            LineOutcome::Rejected(_) => self.rejected += 1,
        }
    }

    /// Malformed lines count as parse failures alongside rejected fields
    pub fn parse_failures(&self) -> usize {
        self.incomplete + self.rejected
    }
}

/// Final result handed to the display layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub summary: ProcessingSummary,
    pub after_temporal: usize,
    pub route: Vec<Record>,
    pub url: String,
}

impl RouteReport {
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

/// Accumulates fixes from any number of sources, in the order they are fed
pub struct RouteProcessor {
    epsilon: f64,
    records: Vec<Record>,
    summary: ProcessingSummary,
}

impl RouteProcessor {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            records: Vec::new(),
            summary: ProcessingSummary::default(),
        }
    }

    /// Feed one already-trimmed, non-empty line
    pub fn ingest_line(&mut self, line: &str) {
        let outcome = classify_line(line);
        self.summary.tally(&outcome);

        match outcome {
            LineOutcome::Fix(record) => {
                log::trace!("fix {} {:.6},{:.6}", record.timestamp, record.latitude, record.longitude);
                self.records.push(record);
            }
            LineOutcome::Incomplete => log::debug!("malformed sentence: {}", line),
            LineOutcome::ChecksumMismatch => log::debug!("checksum mismatch: {}", line),
            LineOutcome::Unsupported => {}
            LineOutcome::Rejected(e) => log::debug!("rejected ({}): {}", e, line),
        }
    }

    /// Feed one raw line: the line ending is stripped and blank lines skipped
    pub fn ingest_raw_line(&mut self, raw: &str) {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            self.ingest_line(line);
        }
    }

    pub fn ingest_lines<'a, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.ingest_raw_line(line);
        }
    }

    /// Read and ingest a whole file. An unopenable file is logged and
    /// skipped; a read error part-way through stops that file only.
    pub async fn ingest_file(&mut self, path: &Path) {
        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                log::warn!("cannot open '{}', skipping: {}", path.display(), e);
                self.summary.files_skipped += 1;
                return;
            }
        };

        let before = self.summary.lines_read;
        if let Err(e) = self.read_lines(BufReader::new(file)).await {
            log::warn!("error reading '{}': {}", path.display(), e);
        }
        log::info!(
            "{}: {} lines",
            path.display(),
            self.summary.lines_read - before
        );
    }

    /// Lines are read as bytes so a stray non-UTF-8 byte only spoils its
    /// own line, which then fails the checksum like any other garbage.
    async fn read_lines<R>(&mut self, mut reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.ingest_raw_line(&line);
        }
        Ok(())
    }

    pub fn summary(&self) -> &ProcessingSummary {
        &self.summary
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Run both dedup stages and build the report
    pub fn finish(self) -> RouteReport {
        let deduped = dedup_temporal(&self.records);
        let route = dedup_spatial(&deduped, self.epsilon);

        log::info!(
            "{} records, {} after timestamp dedup, {} after spatial dedup",
            self.records.len(),
            deduped.len(),
            route.len()
        );

        let url = build_route_url(&route);
        RouteReport {
            summary: self.summary,
            after_temporal: deduped.len(),
            route,
            url,
        }
    }
}

/// Process every file in order and return the report
pub async fn process_files<P: AsRef<Path>>(files: &[P], epsilon: f64) -> RouteReport {
    let mut processor = RouteProcessor::new(epsilon);
    for path in files {
        processor.ingest_file(path.as_ref()).await;
    }
    processor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::SPATIAL_EPSILON;
    use crate::gps::checksum::checksum;
    use std::path::PathBuf;

    fn sentence(body: &str) -> String {
        format!("${}*{:02X}", body, checksum(body.as_bytes()))
    }

    fn rmc(time: &str, lat: &str, lon: &str) -> String {
        sentence(&format!("GPRMC,{},A,{},N,{},E,010.0,084.4,230394,003.1,W", time, lat, lon))
    }

    fn temp_file(name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nmea-route-proc-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_classify_line() {
        assert!(matches!(
            classify_line("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"),
            LineOutcome::Fix(_)
        ));
        assert_eq!(classify_line("hello"), LineOutcome::Incomplete);
        assert_eq!(
            classify_line("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*00"),
            LineOutcome::ChecksumMismatch
        );
        assert_eq!(
            classify_line("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"),
            LineOutcome::Unsupported
        );
        assert_eq!(
            classify_line(&sentence("GPRMC,123519,V,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W")),
            LineOutcome::Rejected(ParseError::NoFix)
        );
        assert_eq!(
            classify_line(&sentence("GPGSV,3,1,12,01,40,083,46")),
            LineOutcome::Rejected(ParseError::UnknownSentence)
        );
    }

    #[test]
    fn test_unsupported_not_counted_as_failure() {
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines([
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            sentence("GNGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1").as_str(),
        ]);

        let summary = processor.summary();
        assert_eq!(summary.unsupported, 2);
        assert_eq!(summary.parse_failures(), 0);
        assert_eq!(summary.checksum_failures, 0);
        assert_eq!(summary.lines_read, 2);
    }

    #[test]
    fn test_counters() {
        let valid = rmc("100000", "4807.038", "01131.000");
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines([
            valid.as_str(),
            "",
            "garbage\r",
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6B",
            sentence("GPRMC,100001,V,,,,,,,230394,,").as_str(),
            "\r",
        ]);

        let summary = *processor.summary();
        assert_eq!(summary.lines_read, 4);
        assert_eq!(summary.records_parsed, 1);
        assert_eq!(summary.incomplete, 1);
        assert_eq!(summary.checksum_failures, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.parse_failures(), 2);
    }

    #[test]
    fn test_carriage_return_stripped() {
        let line = format!("{}\r", rmc("100000", "4807.038", "01131.000"));
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines([line.as_str()]);
        assert_eq!(processor.records().len(), 1);
    }

    #[test]
    fn test_finish_pipeline() {
        let lines = [
            rmc("100000", "4807.038", "01131.000"),
            rmc("100000", "4807.100", "01131.000"), // correction for the same epoch
            rmc("100001", "4807.100", "01131.000"), // stationary
            rmc("100002", "4808.000", "01131.000"),
        ];
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines(lines.iter().map(String::as_str));
        let report = processor.finish();

        assert_eq!(report.summary.records_parsed, 4);
        assert_eq!(report.after_temporal, 3);
        assert_eq!(report.route.len(), 2);
        assert_eq!(report.route[0].timestamp, "100000");
        assert!((report.route[0].latitude - (48.0 + 7.1 / 60.0)).abs() < 1e-9);
        assert_eq!(report.route[1].timestamp, "100002");
        let stops = report.url.strip_prefix(crate::route::GOOGLE_MAPS_BASE).unwrap();
        assert_eq!(stops.matches('/').count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let report = RouteProcessor::new(SPATIAL_EPSILON).finish();
        assert!(report.is_empty());
        assert_eq!(report.url, "");
    }

    #[test]
    fn test_all_invalid_input() {
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines(["junk", "$GPRMC*00", "$GPGGA,1*00"]);
        let report = processor.finish();

        assert!(report.is_empty());
        assert_eq!(report.url, "");
        assert_eq!(report.summary.lines_read, 3);
    }

    #[test]
    fn test_single_record_url() {
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_lines([
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        ]);
        let report = processor.finish();

        assert_eq!(report.url, "https://www.google.com/maps/dir/48.117300,11.516667");
    }

    #[tokio::test]
    async fn test_process_files() {
        let first = temp_file(
            "first.nmea",
            &format!(
                "{}\r\n\r\n{}\r\n",
                rmc("100000", "4807.038", "01131.000"),
                "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"
            ),
        );
        let second = temp_file(
            "second.nmea",
            &format!("{}\n", rmc("100000", "4900.000", "01131.000")),
        );
        let missing = first.with_file_name("missing.nmea");

        let report = process_files(&[first.clone(), missing, second.clone()], SPATIAL_EPSILON).await;

        assert_eq!(report.summary.files_skipped, 1);
        assert_eq!(report.summary.lines_read, 3);
        assert_eq!(report.summary.unsupported, 1);
        assert_eq!(report.summary.records_parsed, 2);
        // The later file wins for the shared epoch
        assert_eq!(report.route.len(), 1);
        assert!((report.route[0].latitude - 49.0).abs() < 1e-9);

        let _ = std::fs::remove_file(first);
        let _ = std::fs::remove_file(second);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_file() {
        let mut contents = b"$GPRMC,\xff\xfe noise*00\n".to_vec();
        contents.extend_from_slice(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
        );
        let path = temp_file("binary-noise.nmea", contents);

        let report = process_files(&[path.clone()], SPATIAL_EPSILON).await;

        assert_eq!(report.summary.lines_read, 2);
        assert_eq!(report.summary.records_parsed, 1);
        assert_eq!(report.summary.checksum_failures + report.summary.parse_failures(), 1);
        assert_eq!(report.route.len(), 1);
        assert_eq!(report.route[0].timestamp, "123519");

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let contents = format!(
            "{}\n{}",
            rmc("100000", "4807.038", "01131.000"),
            rmc("100001", "4900.000", "01131.000")
        );
        let path = temp_file("no-trailing-newline.nmea", contents);

        let report = process_files(&[path.clone()], SPATIAL_EPSILON).await;

        assert_eq!(report.summary.lines_read, 2);
        assert_eq!(report.route.len(), 2);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_ingest_raw_line_strips_line_ending() {
        let mut processor = RouteProcessor::new(SPATIAL_EPSILON);
        processor.ingest_raw_line("\r\n");
        processor.ingest_raw_line(&format!("{}\r\n", rmc("100000", "4807.038", "01131.000")));

        assert_eq!(processor.summary().lines_read, 1);
        assert_eq!(processor.records().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let path = temp_file("empty.nmea", "");
        let report = process_files(&[path.clone()], SPATIAL_EPSILON).await;

        assert_eq!(report.summary.lines_read, 0);
        assert!(report.is_empty());
        assert_eq!(report.url, "");

        let _ = std::fs::remove_file(path);
    }
}
