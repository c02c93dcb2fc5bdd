use crate::errors::AppError;
use crate::models::{BookingRecord, BookingStatus};
use crate::services::ai::extract::extract_fields;
use crate::services::ai::LlmProvider;

/// Interaction seam between the session loop and the terminal.
///
/// `review` blocks until the user answers; that pause is the only suspension
/// point in the whole session. Returning `Ok(None)` signals end of input and
/// is treated as an abort.
pub trait Prompter {
    fn review(&mut self, record: &BookingRecord) -> anyhow::Result<Option<String>>;
    fn notify(&mut self, message: &str);
    fn show_final(&mut self, record: &BookingRecord);
}

#[derive(Debug)]
pub enum SessionOutcome {
    Finalized(BookingRecord),
    Aborted,
}

#[derive(Debug, PartialEq)]
enum ReviewDecision {
    Accept,
    Abort,
    Correction(String),
}

fn parse_decision(input: &str) -> ReviewDecision {
    match input.to_lowercase().as_str() {
        "setuju" | "ok" | "benar" | "selesai" | "lanjut" => ReviewDecision::Accept,
        "batal" | "keluar" | "exit" | "quit" => ReviewDecision::Abort,
        _ => ReviewDecision::Correction(input.to_string()),
    }
}

/// One interactive booking session: extract, review, repeat, finalize.
///
/// A single control thread owns the record; extraction calls are one
/// in-flight at a time and the review pause blocks the loop until the user
/// responds.
pub struct Session<'a> {
    llm: &'a dyn LlmProvider,
    prompter: &'a mut dyn Prompter,
    record: BookingRecord,
}

impl<'a> Session<'a> {
    pub fn new(llm: &'a dyn LlmProvider, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            llm,
            prompter,
            record: BookingRecord::new(),
        }
    }

    pub async fn run(mut self, initial_utterance: &str) -> anyhow::Result<SessionOutcome> {
        let session_id = uuid::Uuid::new_v4();
        tracing::info!(%session_id, "starting booking session");

        let mut utterance = initial_utterance.trim().to_string();
        anyhow::ensure!(!utterance.is_empty(), "initial utterance must not be empty");

        loop {
            match self.extract_step(&utterance).await {
                Ok(()) => {}
                Err(AppError::Extraction(msg)) => {
                    tracing::warn!(error = %msg, "extraction failed");
                    self.prompter.notify(
                        "Ekstraksi gagal. Silakan ulangi atau ketik ulang permintaan Anda.",
                    );
                }
                Err(AppError::Validation(msg)) => {
                    tracing::warn!(error = %msg, "extracted data rejected");
                    self.prompter
                        .notify(&format!("Data tidak valid: {msg}. Silakan koreksi."));
                }
                Err(e) => return Err(e.into()),
            }

            match self.review_step()? {
                ReviewStep::Finalize => {
                    self.record.status = BookingStatus::Complete;
                    self.prompter.show_final(&self.record);
                    tracing::info!(
                        %session_id,
                        iterations = self.record.iteration_count,
                        "session finalized"
                    );
                    return Ok(SessionOutcome::Finalized(self.record));
                }
                ReviewStep::Abort => {
                    tracing::info!(%session_id, "session aborted by user");
                    return Ok(SessionOutcome::Aborted);
                }
                ReviewStep::Correction(text) => {
                    self.record.status = BookingStatus::Collecting;
                    utterance = text;
                }
            }
        }
    }

    async fn extract_step(&mut self, utterance: &str) -> Result<(), AppError> {
        let fields = extract_fields(self.llm, &self.record, utterance).await?;
        self.record = self.record.apply(&fields)?;
        self.record.iteration_count += 1;
        tracing::debug!(
            iteration = self.record.iteration_count,
            status = self.record.status.as_str(),
            "extraction merged"
        );
        Ok(())
    }

    /// Show the record and block until the user accepts, aborts, or supplies
    /// a correction. Acceptance of an incomplete record keeps the loop here,
    /// listing what is still missing.
    fn review_step(&mut self) -> anyhow::Result<ReviewStep> {
        loop {
            self.record.status = BookingStatus::AwaitingReview;

            let input = match self.prompter.review(&self.record)? {
                Some(line) => line.trim().to_string(),
                None => return Ok(ReviewStep::Abort),
            };
            if input.is_empty() {
                continue;
            }

            match parse_decision(&input) {
                ReviewDecision::Abort => return Ok(ReviewStep::Abort),
                ReviewDecision::Accept => {
                    if self.record.is_complete() {
                        return Ok(ReviewStep::Finalize);
                    }
                    let missing = self.record.missing_required().join(", ");
                    self.prompter.notify(&format!(
                        "Data belum lengkap: {missing}. Silakan lengkapi informasi yang belum disebutkan."
                    ));
                }
                ReviewDecision::Correction(text) => return Ok(ReviewStep::Correction(text)),
            }
        }
    }
}

enum ReviewStep {
    Finalize,
    Abort,
    Correction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accept_vocabulary() {
        assert_eq!(parse_decision("setuju"), ReviewDecision::Accept);
        assert_eq!(parse_decision("OK"), ReviewDecision::Accept);
        assert_eq!(parse_decision("selesai"), ReviewDecision::Accept);
    }

    #[test]
    fn test_parse_abort_vocabulary() {
        assert_eq!(parse_decision("batal"), ReviewDecision::Abort);
        assert_eq!(parse_decision("keluar"), ReviewDecision::Abort);
    }

    #[test]
    fn test_parse_anything_else_is_correction() {
        assert_eq!(
            parse_decision("checkin 15 juli"),
            ReviewDecision::Correction("checkin 15 juli".to_string())
        );
    }
}
