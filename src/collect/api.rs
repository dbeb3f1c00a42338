// src/collect/api.rs

use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::config::consts::{CASE_PATH, ID_PROJECTION, SEARCH_PATH, STATES_PATH};
use crate::config::options::CaseType;
use crate::core::net::Api;
use crate::error::Result;
use crate::normalize::path::resolve;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub name: String,
}

/// One search hit: just enough to request the full case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReference {
    pub id: String,
}

/// The three calls the Collector makes. `Api` talks to the live service;
/// tests substitute canned sources.
pub trait CaseSource {
    fn list_regions(&self) -> Result<Vec<Region>>;

    fn search_case_ids(&self, case_type: &CaseType, region: &Region, take: usize)
        -> Result<Vec<CaseReference>>;

    /// Raw body of one case, only if it parses as JSON.
    fn fetch_case_detail(&self, case_type: &CaseType, case: &CaseReference) -> Result<String>;
}

/* ---------------- Wire shapes ---------------- */

#[derive(Serialize)]
struct SearchRequest<'a> {
    take: usize,
    projections: [&'a str; 1],
    predicates: [Predicate<'a>; 1],
}

#[derive(Serialize)]
struct Predicate<'a> {
    field: &'a str,
    operator: &'static str,
    values: [&'a str; 1],
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

fn search_body<'a>(case_type: &'a CaseType, region: &'a Region, take: usize) -> SearchRequest<'a> {
    SearchRequest {
        take,
        projections: [ID_PROJECTION],
        predicates: [Predicate {
            field: case_type.region_field.as_str(),
            operator: "IsIn",
            values: [region.name.as_str()],
        }],
    }
}

/// Hits without a usable id are dropped.
fn references(resp: SearchResponse) -> Vec<CaseReference> {
    resp.results
        .iter()
        .filter_map(|hit| resolve(hit, &[ID_PROJECTION]))
        .map(|id| CaseReference { id })
        .collect()
}

fn search_path(case_type: &CaseType) -> String {
    SEARCH_PATH.replace("{type}", &case_type.name)
}

fn case_path(case_type: &CaseType, case: &CaseReference) -> String {
    CASE_PATH.replace("{type}", &case_type.name).replace("{case}", &case.id)
}

impl CaseSource for Api {
    fn list_regions(&self) -> Result<Vec<Region>> {
        self.get_json(STATES_PATH)
    }

    fn search_case_ids(&self, case_type: &CaseType, region: &Region, take: usize)
        -> Result<Vec<CaseReference>>
    {
        let resp: SearchResponse =
            self.post_json(&search_path(case_type), &search_body(case_type, region, take))?;
        Ok(references(resp))
    }

    fn fetch_case_detail(&self, case_type: &CaseType, case: &CaseReference) -> Result<String> {
        let body = self.get_text(&case_path(case_type, case))?;
        serde_json::from_str::<IgnoredAny>(&body)?;
        Ok(body)
    }
}
