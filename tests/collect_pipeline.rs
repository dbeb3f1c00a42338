// tests/collect_pipeline.rs
//
// Collector against a canned case source, then the Normalizer over its output.
//
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use serde_json::Value;

use namus_scrape::collect::{self, CaseReference, CaseSource, Region, RegionOutcome};
use namus_scrape::config::options::{CaseType, CollectOptions, NormalizeOptions, PauseRange, SkipList};
use namus_scrape::normalize;
use namus_scrape::progress::{NullProgress, Progress};
use namus_scrape::{Error, Result};

struct FakeSource {
    regions: Vec<&'static str>,
    cases: HashMap<&'static str, Vec<&'static str>>,
    failing_search: Vec<&'static str>,
    bodies: HashMap<&'static str, &'static str>,
    fetched: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new() -> Self {
        let cases = HashMap::from([
            ("Ohio", vec!["1", "2", "3", "4", "5"]),
            ("New York", vec!["6", "7"]),
            ("Utah", vec![]),
            ("Texas", vec!["8"]),
        ]);
        let bodies = HashMap::from([
            ("1", r#"{"idFormatted":"MP1","firstname":"Ann"}"#),
            ("2", r#"{"idFormatted":"MP2"}"#),
            // 3 → 404
            ("4", "<html>maintenance</html>"),
            ("5", r#"{"idFormatted":"MP5"}"#),
            ("6", r#"{"idFormatted":"MP6"}"#),
            ("7", r#"{"idFormatted":"MP1","firstname":"Dupe"}"#),
            ("8", r#"{"idFormatted":"MP8"}"#),
        ]);
        Self {
            regions: vec!["Alaska", "Ohio", "New York", "Utah", "Texas"],
            cases,
            failing_search: vec!["Alaska"],
            bodies,
            fetched: Mutex::new(Vec::new()),
        }
    }
}

impl CaseSource for FakeSource {
    fn list_regions(&self) -> Result<Vec<Region>> {
        Ok(self.regions.iter().map(|n| Region { name: n.to_string() }).collect())
    }

    fn search_case_ids(&self, _ct: &CaseType, region: &Region, take: usize) -> Result<Vec<CaseReference>> {
        if self.failing_search.contains(&region.name.as_str()) {
            return Err(Error::Status { url: "search".into(), status: 500 });
        }
        let ids = self.cases.get(region.name.as_str()).cloned().unwrap_or_default();
        Ok(ids.into_iter().take(take).map(|id| CaseReference { id: id.into() }).collect())
    }

    fn fetch_case_detail(&self, _ct: &CaseType, case: &CaseReference) -> Result<String> {
        self.fetched.lock().unwrap().push(case.id.clone());
        let body = self
            .bodies
            .get(case.id.as_str())
            .ok_or(Error::Status { url: case.id.clone(), status: 404 })?;
        serde_json::from_str::<Value>(body)?;
        Ok(body.to_string())
    }
}

struct Failing;
impl CaseSource for Failing {
    fn list_regions(&self) -> Result<Vec<Region>> {
        Err(Error::Status { url: "states".into(), status: 503 })
    }
    fn search_case_ids(&self, _: &CaseType, _: &Region, _: usize) -> Result<Vec<CaseReference>> {
        unreachable!()
    }
    fn fetch_case_detail(&self, _: &CaseType, _: &CaseReference) -> Result<String> {
        unreachable!()
    }
}

#[derive(Default)]
struct Tally { done: usize, failed: usize, regions: Vec<String> }
impl Progress for Tally {
    fn begin(&mut self, region: &str, _total: usize) { self.regions.push(region.to_string()); }
    fn item_done(&mut self) { self.done += 1; }
    fn item_failed(&mut self) { self.failed += 1; }
}

fn quick_opts(dir: &std::path::Path) -> CollectOptions {
    CollectOptions {
        batch_size: 2,
        pause: PauseRange { min_ms: 0, max_ms: 0 },
        out_dir: dir.join("MissingPersons"),
        ..CollectOptions::default()
    }
}

#[test]
fn regions_degrade_independently() {
    let dir = tempfile::tempdir().unwrap();
    let opts = quick_opts(dir.path());
    let src = FakeSource::new();
    let mut tally = Tally::default();

    let summary = collect::run(&src, &opts, &mut tally).unwrap();
    let outcome = |name: &str| {
        summary.regions.iter().find(|r| r.region == name).map(|r| r.outcome.clone()).unwrap()
    };

    assert!(matches!(outcome("Alaska"), RegionOutcome::Failed(_)));
    assert_eq!(outcome("Utah"), RegionOutcome::Empty);
    match outcome("Ohio") {
        RegionOutcome::Written { path, written, failed } => {
            assert_eq!((written, failed), (3, 2));
            assert!(path.ends_with("Ohio.json"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(summary.cases_written(), 6);
    assert_eq!(summary.cases_dropped(), 2);
    assert_eq!((tally.done, tally.failed), (6, 2));
    assert_eq!(tally.regions, vec!["Ohio", "New York", "Texas"]);

    // No file for the empty or failed regions
    assert!(!opts.out_dir.join("Utah.json").exists());
    assert!(!opts.out_dir.join("Alaska.json").exists());
}

#[test]
fn archives_are_valid_arrays_despite_failures() {
    let dir = tempfile::tempdir().unwrap();
    let opts = quick_opts(dir.path());
    collect::run(&FakeSource::new(), &opts, &mut NullProgress).unwrap();

    let text = fs::read_to_string(opts.out_dir.join("Ohio.json")).unwrap();
    assert!(!text.contains(",]") && !text.contains("[,") && !text.contains(",,"));

    let v: Value = serde_json::from_str(&text).unwrap();
    let ids: Vec<_> = v.as_array().unwrap().iter().map(|c| c["idFormatted"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["MP1", "MP2", "MP5"]);

    assert!(opts.out_dir.join("New_York.json").exists());
}

#[test]
fn skip_list_and_resume_point() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = quick_opts(dir.path());
    opts.skip = SkipList { names: vec!["Texas".into()], resume_from: Some("New York".into()) };

    let src = FakeSource::new();
    let summary = collect::run(&src, &opts, &mut NullProgress).unwrap();

    let skipped: Vec<_> = summary
        .regions
        .iter()
        .filter(|r| matches!(r.outcome, RegionOutcome::Skipped(_)))
        .map(|r| r.region.as_str())
        .collect();
    assert_eq!(skipped, vec!["Alaska", "Ohio", "Texas"]);

    let mut fetched = src.fetched.lock().unwrap().clone();
    fetched.sort();
    assert_eq!(fetched, vec!["6", "7"]);
}

#[test]
fn region_listing_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let opts = quick_opts(dir.path());
    let err = collect::run(&Failing, &opts, &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::Status { status: 503, .. }));
}

#[test]
fn staged_output_normalizes_with_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let opts = quick_opts(dir.path());
    collect::run(&FakeSource::new(), &opts, &mut NullProgress).unwrap();

    let nopts = NormalizeOptions {
        in_dir: opts.out_dir.clone(),
        out_file: dir.path().join("output").join("master.csv"),
        ..NormalizeOptions::default()
    };
    let summary = normalize::run(&nopts).unwrap();

    // MP1 staged twice (Ohio + New York); New_York.json is read first
    assert_eq!(summary.records_seen, 6);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.rows_written, 5);

    let mut rdr = csv::Reader::from_path(&nopts.out_file).unwrap();
    let first_names: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap())
        .filter(|r| &r[0] == "MP1")
        .map(|r| r[3].to_string())
        .collect();
    assert_eq!(first_names, vec!["Dupe"]);
}

#[test]
fn batch_results_line_up_with_requests() {
    let src = FakeSource::new();
    let ct = CaseType::new("MissingPersons", "stateOfLastContact");
    let batch: Vec<_> = ["1", "3", "4", "5"].iter().map(|id| CaseReference { id: id.to_string() }).collect();

    let results = collect::fetch_batch(&src, &ct, &batch);
    let shape: Vec<_> = results
        .iter()
        .map(|r| match r {
            Ok(_) => "ok",
            Err(Error::Status { status: 404, .. }) => "404",
            Err(Error::Json(_)) => "json",
            Err(_) => "other",
        })
        .collect();
    assert_eq!(shape, vec!["ok", "404", "json", "ok"]);
    assert!(results[3].as_ref().unwrap().contains("MP5"));
}
