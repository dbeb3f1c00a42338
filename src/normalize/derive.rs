// src/normalize/derive.rs

//! Composite columns built from several source values.

use serde_json::Value;

use super::lists::{ITEM_SEP, objects};
use super::path::{flag, resolve, resolve_or, text};
use crate::error::RecordError;

pub const UNKNOWN: &str = "Unknown";

/// Height/weight style from/to pair: one value when equal, else `"<from> - <to>"`.
/// A missing side collapses to the other one.
pub fn range(from: Option<String>, to: Option<String>) -> String {
    match (from, to) {
        (Some(a), Some(b)) if a == b => a,
        (Some(a), Some(b)) => format!("{a} - {b}"),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => String::new(),
    }
}

pub fn yes_no(b: bool) -> String {
    if b { "Yes".into() } else { "No".into() }
}

pub fn ncmec(rec: &Value) -> String {
    yes_no(flag(rec, "hasNcmecContributors") || flag(rec, "hasPendingByNcmec"))
}

/// DNA / dental / fingerprint status.
pub fn forensic(rec: &Value, key: &str) -> String {
    let path = format!("{key}.status");
    resolve_or(rec, &[path.as_str()], UNKNOWN)
}

/* ---------------- Agencies ---------------- */

/// `name (type) [Case#: n] [Rep: date] -- Det. first last Ph: phone Email: email`
pub fn agency(ag: &Value) -> String {
    let name = resolve(ag, &["selection.agency.name", "name"]);
    let kind = resolve(ag, &["selection.agency.agencyType.name", "agencyType.name"]);
    let case_no = resolve(ag, &["caseNumber"]);
    let reported = resolve(ag, &["dateReported"]);

    let first = resolve(ag, &["selection.contact.firstName"]);
    let last = resolve(ag, &["selection.contact.lastName"]);
    let phone = resolve(ag, &["selection.contact.phone", "selection.agency.phone"]);
    let email = resolve(ag, &["selection.contact.email", "selection.agency.email"]);

    let mut parts: Vec<String> = Vec::new();
    parts.extend(name);
    parts.extend(kind.map(|t| format!("({t})")));
    parts.extend(case_no.map(|n| format!("[Case#: {n}]")));
    parts.extend(reported.map(|d| format!("[Rep: {d}]")));

    let mut contact: Vec<String> = Vec::new();
    if let Some(first) = first {
        let det = format!("Det. {first} {}", last.unwrap_or_default());
        contact.push(det.trim_end().to_string());
    }
    contact.extend(phone.map(|p| format!("Ph: {p}")));
    contact.extend(email.map(|e| format!("Email: {e}")));

    if !contact.is_empty() {
        parts.push(format!("-- {}", contact.join(" ")));
    }
    parts.join(" ")
}

pub fn agencies(rec: &Value) -> Result<String, RecordError> {
    let out: Vec<String> = objects(rec, "investigatingAgencies")?
        .iter()
        .map(agency)
        .filter(|s| !s.is_empty())
        .collect();
    Ok(out.join(ITEM_SEP))
}

/* ---------------- Vehicles ---------------- */

/// `year make model [color] (Tag: tag)`, absent parts left out.
pub fn vehicle(v: &Value) -> String {
    let year = resolve(v, &["vehicleYear", "year"]);
    let make = resolve(v, &["vehicleMake.name", "make"]);
    let model = resolve(v, &["vehicleModel.name", "model"]);
    let color = resolve(v, &["vehicleColor.name", "color"]);
    let tag = resolve(v, &["tagNumber", "licencePlateNumber"]);

    let mut parts: Vec<String> = [year, make, model].into_iter().flatten().collect();
    parts.extend(color.map(|c| format!("[{c}]")));
    parts.extend(tag.map(|t| format!("(Tag: {t})")));
    parts.join(" ")
}

pub fn vehicles(rec: &Value) -> Result<String, RecordError> {
    let out: Vec<String> = objects(rec, "vehicles")?
        .iter()
        .map(vehicle)
        .filter(|s| !s.is_empty())
        .collect();
    Ok(out.join(ITEM_SEP))
}

/* ---------------- Demographics ---------------- */

/// Names of `subjectDescription.ethnicities`, else the legacy `raceEthnicity`.
pub fn race(rec: &Value) -> String {
    let primary = rec.pointer("/subjectDescription/ethnicities");
    let chosen = match primary {
        Some(Value::Array(items)) if !items.is_empty() => primary,
        _ => rec.get("raceEthnicity"),
    };

    match chosen {
        Some(Value::Array(items)) => names(items, &["name"]).join(", "),
        Some(v) => text(v).unwrap_or_default(),
        None => String::new(),
    }
}

pub fn tribes(rec: &Value) -> String {
    match rec.pointer("/subjectDescription/tribeAssociations") {
        Some(Value::Array(items)) => names(items, &["tribe.name"]).join(", "),
        _ => String::new(),
    }
}

fn names(items: &[Value], paths: &[&str]) -> Vec<String> {
    items.iter().filter_map(|it| resolve(it, paths)).collect()
}

/* ---------------- Images ---------------- */

/// (`Has_Images`, `Image_Captions`)
pub fn images(rec: &Value) -> Result<(String, String), RecordError> {
    let imgs = objects(rec, "images")?;
    let captions: Vec<String> = imgs.iter().filter_map(|i| resolve(i, &["caption"])).collect();
    Ok((yes_no(!imgs.is_empty()), captions.join(ITEM_SEP)))
}
