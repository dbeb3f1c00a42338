// src/normalize/row.rs

use serde::Serialize;
use serde_json::Value;

use super::derive::{self, forensic, ncmec, range};
use super::lists::{CLOTHING, CLOTHING_LEGACY, FEATURES, FEATURES_LEGACY, aggregate_with_legacy};
use super::path::resolve;
use crate::core::sanitize::flatten_newlines;
use crate::error::RecordError;

/// Column order of the master table. Matches the field order of `FlatRow`.
pub const HEADERS: [&str; 31] = [
    "NamUs_ID", "Status", "Modified_Date", "First_Name", "Last_Name", "Nicknames",
    "Missing_Age", "Current_Age", "Sex", "Race", "Tribal_Affiliation", "Height", "Weight",
    "Hair", "Eyes", "City", "County", "State", "Zip", "Date_Last_Seen", "Agencies",
    "Vehicles", "Clothing", "Physical_Features", "Circumstances", "NCMEC", "DNA", "Dental",
    "Fingerprints", "Has_Images", "Image_Captions",
];

/// One denormalized case. Every column is a plain string; absent values are
/// `""`, forensic statuses default to `"Unknown"` and flags to `"No"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "NamUs_ID")] pub namus_id: String,
    #[serde(rename = "Status")] pub status: String,
    #[serde(rename = "Modified_Date")] pub modified_date: String,
    #[serde(rename = "First_Name")] pub first_name: String,
    #[serde(rename = "Last_Name")] pub last_name: String,
    #[serde(rename = "Nicknames")] pub nicknames: String,
    #[serde(rename = "Missing_Age")] pub missing_age: String,
    #[serde(rename = "Current_Age")] pub current_age: String,
    #[serde(rename = "Sex")] pub sex: String,
    #[serde(rename = "Race")] pub race: String,
    #[serde(rename = "Tribal_Affiliation")] pub tribal_affiliation: String,
    #[serde(rename = "Height")] pub height: String,
    #[serde(rename = "Weight")] pub weight: String,
    #[serde(rename = "Hair")] pub hair: String,
    #[serde(rename = "Eyes")] pub eyes: String,
    #[serde(rename = "City")] pub city: String,
    #[serde(rename = "County")] pub county: String,
    #[serde(rename = "State")] pub state: String,
    #[serde(rename = "Zip")] pub zip: String,
    #[serde(rename = "Date_Last_Seen")] pub date_last_seen: String,
    #[serde(rename = "Agencies")] pub agencies: String,
    #[serde(rename = "Vehicles")] pub vehicles: String,
    #[serde(rename = "Clothing")] pub clothing: String,
    #[serde(rename = "Physical_Features")] pub physical_features: String,
    #[serde(rename = "Circumstances")] pub circumstances: String,
    #[serde(rename = "NCMEC")] pub ncmec: String,
    #[serde(rename = "DNA")] pub dna: String,
    #[serde(rename = "Dental")] pub dental: String,
    #[serde(rename = "Fingerprints")] pub fingerprints: String,
    #[serde(rename = "Has_Images")] pub has_images: String,
    #[serde(rename = "Image_Captions")] pub image_captions: String,
}

fn field(rec: &Value, candidates: &[&str]) -> String {
    resolve(rec, candidates).unwrap_or_default()
}

impl FlatRow {
    /// Derive the row for one staged case record. Either every column is
    /// filled or the record is rejected as a whole.
    pub fn from_record(rec: &Value) -> Result<Self, RecordError> {
        if !rec.is_object() {
            return Err(RecordError::NotAnObject);
        }

        // The case id is the dedup key; a record without one cannot be merged
        // against anything, so it is rejected rather than kept with a blank id.
        let namus_id = resolve(rec, &["idFormatted", "namus2Number", "id"])
            .ok_or(RecordError::MissingId)?;

        let agencies = derive::agencies(rec)?;
        let vehicles = derive::vehicles(rec)?;
        let clothing = aggregate_with_legacy(rec, CLOTHING, CLOTHING_LEGACY)?;
        let physical_features = aggregate_with_legacy(rec, FEATURES, FEATURES_LEGACY)?;
        let (has_images, image_captions) = derive::images(rec)?;

        let height = range(
            resolve(rec, &["subjectDescription.heightFrom", "physicalDescription.heightFrom"]),
            resolve(rec, &["subjectDescription.heightTo", "physicalDescription.heightTo"]),
        );
        let weight = range(
            resolve(rec, &["subjectDescription.weightFrom", "physicalDescription.weightFrom"]),
            resolve(rec, &["subjectDescription.weightTo", "physicalDescription.weightTo"]),
        );

        let circumstances = resolve(
            rec,
            &["circumstances.circumstancesOfDisappearance", "circumstances"],
        )
        .map(|c| flatten_newlines(&c))
        .unwrap_or_default();

        Ok(Self {
            namus_id,
            status: field(rec, &["publicationStatus.name", "publicationStatus"]),
            modified_date: field(rec, &["modifiedDateTime"]),

            first_name: field(rec, &["subjectIdentification.firstName", "firstname"]),
            last_name: field(rec, &["subjectIdentification.lastName", "lastname"]),
            nicknames: field(rec, &["subjectIdentification.nicknames", "nicknames"]),
            // Manual entry first, computed second
            missing_age: field(rec, &[
                "subjectIdentification.missingMaxAge",
                "subjectIdentification.computedMissingMaxAge",
                "computedMissingMaxAge",
            ]),
            current_age: field(rec, &[
                "subjectIdentification.currentMaxAge",
                "subjectIdentification.computedCurrentMaxAge",
                "computedCurrentMaxAge",
            ]),
            sex: field(rec, &["subjectDescription.sex.name", "gender.name", "gender"]),
            race: derive::race(rec),
            tribal_affiliation: derive::tribes(rec),

            height,
            weight,
            hair: field(rec, &[
                "physicalDescription.hairColor.name",
                "subjectDescription.hairColor.name",
                "physicalDescription.hairColor",
            ]),
            eyes: field(rec, &[
                "physicalDescription.leftEyeColor.name",
                "physicalDescription.eyeColor.name",
                "physicalDescription.eyeColor",
            ]),

            city: field(rec, &["sighting.address.city", "cityOfLastContact"]),
            county: field(rec, &["sighting.address.county.name", "countyOfLastContact"]),
            state: field(rec, &[
                "sighting.address.state.name",
                "stateOfLastContact.name",
                "stateOfLastContact",
            ]),
            zip: field(rec, &["sighting.address.zipCode"]),
            date_last_seen: field(rec, &["sighting.date", "dateOfLastContact"]),

            agencies,
            vehicles,
            clothing,
            physical_features,
            circumstances,

            ncmec: ncmec(rec),
            dna: forensic(rec, "dnaStatus"),
            dental: forensic(rec, "dentalStatus"),
            fingerprints: forensic(rec, "fingerprintStatus"),
            has_images,
            image_captions,
        })
    }
}
