//! Time helpers. The chat service runs on Korea Standard Time (UTC+9).

use chrono::{DateTime, FixedOffset, Offset, Utc};

const KST_OFFSET_SECS: i32 = 9 * 3600;

fn kst() -> FixedOffset {
    // 9 hours is always within chrono's accepted offset range.
    FixedOffset::east_opt(KST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in KST.
pub fn now_kst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// Parse an RFC 3339 timestamp (as sent by the REST backend) into KST.
///
/// Returns `None` when the text is not RFC 3339.
pub fn parse_kst(rfc3339: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|time| time.with_timezone(&kst()))
}
