use crate::errors::AppError;
use crate::models::{BookingRecord, ExtractedFields};
use crate::services::ai::{LlmProvider, Message};

const SYSTEM_PROMPT: &str = r#"Kamu adalah mesin ekstraksi data untuk asisten booking hotel. Analisis permintaan booking hotel dalam bahasa Indonesia dan ekstrak/update informasi.

Balas HANYA dengan JSON valid (tanpa markdown, tanpa penjelasan) dengan struktur persis:
{
  "lokasi": "nama kota/daerah (null jika tidak disebutkan)",
  "tanggal_checkin": "YYYY-MM-DD (null jika tidak disebutkan eksplisit)",
  "tanggal_checkout": "YYYY-MM-DD (null jika tidak disebutkan eksplisit)",
  "jumlah_malam": "jumlah malam integer (null jika tidak disebutkan)",
  "jumlah_tamu": "jumlah tamu integer (null jika tidak disebutkan)",
  "budget": "budget rupiah integer (null jika tidak disebutkan)",
  "preferensi": ["array preferensi"]
}

ATURAN PENTING:
1. PERTAHANKAN DATA EXISTING: jangan hapus atau ubah data yang sudah ada kecuali ada update eksplisit di input baru.
2. JANGAN AUTO-FILL: hanya isi field jika EKSPLISIT disebutkan dalam input baru.
3. Budget dalam rupiah integer ("2 juta" -> 2000000, "maksimal 5.5 juta" -> 5500000, "budget Rp 3.000.000" -> 3000000).
4. Contoh tanggal: "20-25 juni 2025" -> checkin "2025-06-20", checkout "2025-06-25". "checkin 20 agustus untuk 3 malam" -> checkin "2025-08-20", jumlah_malam 3.
5. Gabungkan preferensi baru dengan yang sudah ada, jangan replace.
6. Sekarang tahun 2025.
"#;

/// Run one extraction pass: send the current record snapshot and the new
/// utterance to the model and parse the returned field mapping.
///
/// Any transport error or unparsable reply becomes a recoverable
/// [`AppError::Extraction`]; the caller leaves the record untouched.
pub async fn extract_fields(
    llm: &dyn LlmProvider,
    record: &BookingRecord,
    utterance: &str,
) -> Result<ExtractedFields, AppError> {
    let snapshot = serde_json::to_string(&record.snapshot())
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    let messages = [Message {
        role: "user".to_string(),
        content: format!("Data existing: {snapshot}\n\nInput user: \"{utterance}\""),
    }];

    let response = llm
        .chat(SYSTEM_PROMPT, &messages)
        .await
        .map_err(|e| AppError::Extraction(format!("{e:#}")))?;

    parse_extraction_response(&response)
}

fn parse_extraction_response(response: &str) -> Result<ExtractedFields, AppError> {
    // Try direct parse first
    if let Ok(fields) = serde_json::from_str::<ExtractedFields>(response) {
        return Ok(fields);
    }

    // Strip markdown code fences
    let cleaned = response
        .trim()
        .strip_prefix("```json")
        .or_else(|| response.trim().strip_prefix("```"))
        .unwrap_or(response.trim());
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(fields) = serde_json::from_str::<ExtractedFields>(cleaned) {
        return Ok(fields);
    }

    // Try to find JSON object in the response; a stray '}' can precede
    // the first '{' in prose, so the span must be checked before slicing
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            let json_str = &cleaned[start..=end];
            if let Ok(fields) = serde_json::from_str::<ExtractedFields>(json_str) {
                return Ok(fields);
            }
        }
    }

    tracing::warn!("failed to parse model response as field JSON");
    Err(AppError::Extraction(
        "respons model bukan JSON field yang valid".to_string(),
    ))
}
