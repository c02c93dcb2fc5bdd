use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::ExtractedFields;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Collecting,
    AwaitingReview,
    Complete,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Collecting => "collecting",
            BookingStatus::AwaitingReview => "awaiting_review",
            BookingStatus::Complete => "complete",
        }
    }
}

/// The single mutable record threaded through one booking session.
///
/// Created empty, filled by extraction passes and user corrections, and
/// discarded when the session ends. `location`, `check_in`, `check_out` and
/// `guest_count` are required for completion; `budget` and `preferences`
/// stay optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRecord {
    pub location: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    /// Derived from the date span whenever both dates are present.
    pub nights: Option<i64>,
    pub guest_count: Option<u32>,
    /// Rupiah, single currency.
    pub budget: Option<u64>,
    pub preferences: Vec<String>,
    pub iteration_count: u32,
    pub status: BookingStatus,
}

impl BookingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one set of extracted fields into a candidate copy of the record.
    ///
    /// Named fields overwrite, absent fields persist, preferences accumulate.
    /// The merged candidate is validated as a whole; on error the caller
    /// keeps the original record unchanged.
    pub fn apply(&self, fields: &ExtractedFields) -> Result<BookingRecord, AppError> {
        let mut next = self.clone();

        if let Some(location) = &fields.location {
            let location = location.trim();
            if location.is_empty() {
                return Err(AppError::Validation(
                    "lokasi tidak boleh kosong".to_string(),
                ));
            }
            next.location = Some(location.to_string());
        }

        if let Some(date) = fields.check_in {
            next.check_in = Some(date);
        }
        if let Some(date) = fields.check_out {
            next.check_out = Some(date);
        }

        if let Some(nights) = fields.nights {
            if nights < 1 {
                return Err(AppError::Validation(
                    "jumlah malam harus minimal 1".to_string(),
                ));
            }
            next.nights = Some(nights);
        }

        if let Some(guests) = fields.guest_count {
            if guests < 1 {
                return Err(AppError::Validation(
                    "jumlah tamu harus minimal 1".to_string(),
                ));
            }
            let guests = u32::try_from(guests).map_err(|_| {
                AppError::Validation("jumlah tamu di luar batas wajar".to_string())
            })?;
            next.guest_count = Some(guests);
        }

        if let Some(budget) = fields.budget {
            if budget < 0 {
                return Err(AppError::Validation(
                    "budget tidak boleh negatif".to_string(),
                ));
            }
            next.budget = Some(budget as u64);
        }

        for pref in &fields.preferences {
            let pref = pref.trim();
            if !pref.is_empty()
                && !next
                    .preferences
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(pref))
            {
                next.preferences.push(pref.to_string());
            }
        }

        // Keep dates and nights consistent: the date span is authoritative
        // when both dates are known; otherwise a night count extends check-in.
        match (next.check_in, next.check_out) {
            (Some(check_in), Some(check_out)) => {
                if check_out <= check_in {
                    return Err(AppError::Validation(
                        "tanggal check-out harus setelah tanggal check-in".to_string(),
                    ));
                }
                next.nights = Some((check_out - check_in).num_days());
            }
            (Some(check_in), None) => {
                if let Some(nights) = next.nights {
                    let check_out = Duration::try_days(nights)
                        .and_then(|span| check_in.checked_add_signed(span))
                        .ok_or_else(|| {
                            AppError::Validation("jumlah malam di luar batas wajar".to_string())
                        })?;
                    next.check_out = Some(check_out);
                }
            }
            _ => {}
        }

        Ok(next)
    }

    /// Snapshot of the filled fields, sent back to the model so it can
    /// preserve existing data across extraction passes.
    pub fn snapshot(&self) -> ExtractedFields {
        ExtractedFields {
            location: self.location.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            nights: self.nights,
            guest_count: self.guest_count.map(i64::from),
            budget: self.budget.map(|b| b as i64),
            preferences: self.preferences.clone(),
        }
    }

    /// Indonesian labels of the required fields that are still empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.location.is_none() {
            missing.push("lokasi");
        }
        if self.check_in.is_none() {
            missing.push("tanggal check-in");
        }
        if self.check_out.is_none() {
            missing.push("tanggal check-out");
        }
        if self.guest_count.is_none() {
            missing.push("jumlah tamu");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.location.is_some()
            && self.guest_count.is_some()
            && matches!(
                (self.check_in, self.check_out),
                (Some(check_in), Some(check_out)) if check_in < check_out
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_named_fields_overwrite_unnamed_persist() {
        let record = BookingRecord::new()
            .apply(&ExtractedFields {
                location: Some("Nusa Dua".to_string()),
                budget: Some(2_000_000),
                ..Default::default()
            })
            .unwrap();

        let updated = record
            .apply(&ExtractedFields {
                budget: Some(3_000_000),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.location.as_deref(), Some("Nusa Dua"));
        assert_eq!(updated.budget, Some(3_000_000));
    }

    #[test]
    fn test_nights_derived_from_date_span() {
        let record = BookingRecord::new()
            .apply(&ExtractedFields {
                check_in: Some(date(2025, 6, 20)),
                check_out: Some(date(2025, 6, 25)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(record.nights, Some(5));
    }

    #[test]
    fn test_check_out_derived_from_nights() {
        let record = BookingRecord::new()
            .apply(&ExtractedFields {
                check_in: Some(date(2025, 8, 20)),
                nights: Some(3),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(record.check_out, Some(date(2025, 8, 23)));
    }

    #[test]
    fn test_check_out_before_check_in_rejected() {
        let record = BookingRecord::new()
            .apply(&ExtractedFields {
                check_in: Some(date(2025, 7, 15)),
                ..Default::default()
            })
            .unwrap();

        let err = record
            .apply(&ExtractedFields {
                check_out: Some(date(2025, 7, 10)),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        // original record untouched
        assert_eq!(record.check_out, None);
        assert_eq!(record.check_in, Some(date(2025, 7, 15)));
    }

    #[test]
    fn test_zero_guests_rejected() {
        let err = BookingRecord::new()
            .apply(&ExtractedFields {
                guest_count: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_oversized_night_count_rejected() {
        let err = BookingRecord::new()
            .apply(&ExtractedFields {
                check_in: Some(date(2025, 8, 20)),
                nights: Some(10_000_000_000),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_out_of_range_guest_count_rejected() {
        let record = BookingRecord::new();
        let err = record
            .apply(&ExtractedFields {
                guest_count: Some(4_294_967_297),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(record.guest_count, None);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let err = BookingRecord::new()
            .apply(&ExtractedFields {
                budget: Some(-1),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_preferences_accumulate_without_duplicates() {
        let record = BookingRecord::new()
            .apply(&ExtractedFields {
                preferences: vec!["spa".to_string()],
                ..Default::default()
            })
            .unwrap();

        let updated = record
            .apply(&ExtractedFields {
                preferences: vec!["Spa".to_string(), "kolam renang".to_string()],
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.preferences, vec!["spa", "kolam renang"]);
    }

    #[test]
    fn test_completion_requires_all_four_fields() {
        let mut record = BookingRecord::new()
            .apply(&ExtractedFields {
                location: Some("Ubud".to_string()),
                check_in: Some(date(2025, 6, 20)),
                check_out: Some(date(2025, 6, 25)),
                ..Default::default()
            })
            .unwrap();
        assert!(!record.is_complete());
        assert_eq!(record.missing_required(), vec!["jumlah tamu"]);

        record = record
            .apply(&ExtractedFields {
                guest_count: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert!(record.is_complete());
        assert!(record.missing_required().is_empty());
    }
}
