use chrono::{Datelike, NaiveDate};

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format a rupiah amount with Indonesian thousands separators,
/// e.g. 5000000 -> "Rp 5.000.000".
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

/// Format a date in long Indonesian form, e.g. 2025-06-20 -> "20 Juni 2025".
pub fn format_date_id(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah_grouping() {
        assert_eq!(format_rupiah(5_000_000), "Rp 5.000.000");
        assert_eq!(format_rupiah(3_500_000), "Rp 3.500.000");
        assert_eq!(format_rupiah(950), "Rp 950");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(0), "Rp 0");
    }

    #[test]
    fn test_format_date_indonesian() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert_eq!(format_date_id(date), "20 Juni 2025");

        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(format_date_id(date), "1 Desember 2025");
    }
}
