use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partial field mapping returned by the extraction model.
///
/// Every field is optional: the model only fills what the latest utterance
/// explicitly mentions, and absent fields leave the booking record untouched.
/// Counts and amounts are signed so out-of-range values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default, rename = "lokasi")]
    pub location: Option<String>,

    #[serde(default, rename = "tanggal_checkin")]
    pub check_in: Option<NaiveDate>,

    #[serde(default, rename = "tanggal_checkout")]
    pub check_out: Option<NaiveDate>,

    #[serde(default, rename = "jumlah_malam")]
    pub nights: Option<i64>,

    #[serde(default, rename = "jumlah_tamu")]
    pub guest_count: Option<i64>,

    #[serde(default)]
    pub budget: Option<i64>,

    #[serde(default, rename = "preferensi")]
    pub preferences: Vec<String>,
}
