use cegate_core::history::HistoryStatus;

/// Parse a history status for clap
pub fn parse_status(s: &str) -> Result<HistoryStatus, String> {
    s.parse::<HistoryStatus>().map_err(|e| e.to_string())
}
