use std::io::{self, BufRead, Write};

use crate::format::{format_date_id, format_rupiah};
use crate::models::{BookingRecord, BookingStatus};
use crate::services::session::Prompter;

const NOT_MENTIONED: &str = "Belum disebutkan";

pub fn print_welcome() {
    println!();
    println!("=== HOTEL BOOKING AGENT ===");
    println!("Ketik permintaan booking dalam bahasa natural, misalnya:");
    println!("  \"hotel di ubud tanggal 20-25 juni 2025 untuk 2 orang budget 5 juta\"");
    println!();
}

/// Read the opening utterance. `Ok(None)` means stdin closed.
pub fn read_initial_input() -> anyhow::Result<Option<String>> {
    prompt_line("Kata pencarian hotel: ")
}

fn prompt_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn field_or_default(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_MENTIONED.to_string())
}

fn print_record(record: &BookingRecord) {
    println!(
        "  Lokasi       : {}",
        field_or_default(record.location.clone())
    );
    println!(
        "  Check-in     : {}",
        field_or_default(record.check_in.map(format_date_id))
    );
    println!(
        "  Check-out    : {}",
        field_or_default(record.check_out.map(format_date_id))
    );
    println!(
        "  Jumlah malam : {}",
        field_or_default(record.nights.map(|n| n.to_string()))
    );
    println!(
        "  Jumlah tamu  : {}",
        field_or_default(record.guest_count.map(|g| g.to_string()))
    );
    println!(
        "  Budget       : {}",
        record
            .budget
            .map(format_rupiah)
            .unwrap_or_else(|| "Tidak disebutkan".to_string())
    );
    println!(
        "  Preferensi   : {}",
        if record.preferences.is_empty() {
            "Tidak ada".to_string()
        } else {
            record.preferences.join(", ")
        }
    );
}

/// Terminal implementation of the session's interaction seam.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn review(&mut self, record: &BookingRecord) -> anyhow::Result<Option<String>> {
        println!();
        println!(
            "--- REVIEW DATA EKSTRAKSI (iterasi {}) ---",
            record.iteration_count
        );
        print_record(record);
        println!();
        println!("Ketik 'setuju' jika data benar, koreksi/tambahan, atau 'batal' untuk keluar.");
        prompt_line("> ")
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn show_final(&mut self, record: &BookingRecord) {
        debug_assert_eq!(record.status, BookingStatus::Complete);

        println!();
        println!("=== DATA BOOKING FINAL ===");
        print_record(record);
        println!();
        println!("Total iterasi: {}", record.iteration_count);
        println!("Status: siap untuk pencarian hotel");
    }
}
