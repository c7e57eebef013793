//! Upcoming scheduled transfer preview.
//!
//! The backend returns every occurrence scheduled in a calendar month. The
//! preview keeps the active ones still in the future, numbers them, orders
//! them by process date, and shows at most [`PREVIEW_LIMIT`]. When nothing
//! qualifies it looks one month ahead, once.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WidgetResult;
use crate::http::{ApiClient, ApiRequest, Transport};
use crate::money::cents_to_numeric_dollars;
use crate::resources::StringResources;

/// Scheduled transfers resource; the month key is appended as a path segment.
pub const TRANSFERS_FOR_MONTH_URL: &str = "api/scheduled-transfers/get-transfers-for-month";

/// Maximum number of occurrences shown.
pub const PREVIEW_LIMIT: usize = 6;

/// Shown until the first load completes.
pub const LOADING_TEXT: &str = "Loading Transfers...";

const UNKNOWN_DATE_KEY: &str = "scheduledtransfer.error.unknowndate";
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One run of a scheduled transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOccurrence {
    /// 1-based display position, assigned client-side; not stable across fetches
    #[serde(skip)]
    pub id: usize,
    #[serde(with = "backend_time")]
    pub run_time_utc: DateTime<Utc>,
    #[serde(default)]
    pub transfer_name: String,
    #[serde(default)]
    pub transfer_description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "amount")]
    pub amount_cents: i64,
    #[serde(default)]
    pub from_account_name: String,
    #[serde(default)]
    pub to_account_name: String,
    #[serde(with = "backend_time")]
    pub process_date: DateTime<Utc>,
}

impl TransferOccurrence {
    /// `"Next transfer: October 20, 2026"`, in the given time zone.
    pub fn header_in<Tz: TimeZone>(&self, tz: &Tz, strings: &StringResources) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "{} {}",
            strings.resource("scheduledtransfers.brieflist.nexttransfer"),
            self.run_time_utc.with_timezone(tz).format("%B %-d, %Y")
        )
    }

    /// Header in the local time zone.
    pub fn header(&self, strings: &StringResources) -> String {
        self.header_in(&Local, strings)
    }

    /// `"$25.00 from Checking to Savings"`.
    pub fn summary(&self, strings: &StringResources) -> String {
        format!(
            "${} {} {} {} {}",
            cents_to_numeric_dollars(self.amount_cents),
            strings.resource("scheduledtransfers.brieflist.from"),
            self.from_account_name,
            strings.resource("scheduledtransfers.brieflist.to"),
            self.to_account_name
        )
    }
}

/// Timestamps as the backend writes them: RFC 3339, or naive ISO 8601
/// (taken as UTC), or a bare date.
mod backend_time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Month key for a calendar date (`Oct-18-2026`).
pub fn month_key(date: NaiveDate) -> String {
    date.format("%b-%d-%Y").to_string()
}

/// Host-style date string (`Sun Oct 18 2026`), the layout [`format_net_date`] reads.
pub fn host_date_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Convert a host date string (`Www Mmm DD YYYY ...`) to a month key.
///
/// Empty or malformed input yields the unknown-date string resource instead;
/// the request is still issued with it.
pub fn format_net_date(date_string: &str, strings: &StringResources) -> String {
    let parts = date_string
        .get(4..7)
        .zip(date_string.get(8..10))
        .zip(date_string.get(11..15));

    match parts {
        Some(((month, day), year))
            if MONTH_ABBREVIATIONS.contains(&month)
                && day.bytes().all(|b| b.is_ascii_digit())
                && year.bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("{}-{}-{}", month, day, year)
        }
        _ => {
            tracing::warn!(date_string, "unrecognized date string for month key");
            strings.resource(UNKNOWN_DATE_KEY)
        }
    }
}

/// Same day next month, clamped to the month's last day.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or_else(|| {
        tracing::warn!(%date, "no next month; reusing date");
        date
    })
}

pub fn transfers_for_month_url(month_key: &str) -> String {
    format!("{}/{}", TRANSFERS_FOR_MONTH_URL, month_key)
}

/// Fetch every occurrence for the month identified by `month_key`.
///
/// Records that do not decode are skipped; the rest of the month is kept.
pub async fn fetch_month<T: Transport>(
    client: &ApiClient<T>,
    month_key: &str,
) -> WidgetResult<Vec<TransferOccurrence>> {
    let records: Vec<serde_json::Value> = client
        .api_processed(ApiRequest::get(transfers_for_month_url(month_key)))
        .await?;
    Ok(decode_records(records))
}

/// Decode backend records one by one, dropping the ones that fail.
pub fn decode_records(records: Vec<serde_json::Value>) -> Vec<TransferOccurrence> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(occurrence) => Some(occurrence),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable scheduled transfer");
                None
            }
        })
        .collect()
}

/// Active occurrences running strictly after `now`, numbered from 1.
pub fn filter_upcoming(raw: Vec<TransferOccurrence>, now: DateTime<Utc>) -> Vec<TransferOccurrence> {
    raw.into_iter()
        .filter(|item| item.is_active && item.run_time_utc > now)
        .enumerate()
        .map(|(index, mut item)| {
            item.id = index + 1;
            item
        })
        .collect()
}

/// Order upcoming occurrences by process date and keep the first `limit`.
pub fn order_and_truncate(mut upcoming: Vec<TransferOccurrence>, limit: usize) -> Vec<TransferOccurrence> {
    upcoming.sort_by_key(|item| item.process_date);
    upcoming.truncate(limit);
    upcoming
}

/// Filter, number, order, truncate.
pub fn select_occurrences(
    raw: Vec<TransferOccurrence>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<TransferOccurrence> {
    order_and_truncate(filter_upcoming(raw, now), limit)
}

/// What the preview renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewState {
    /// False until the first load finishes (loading indicator vs. empty text)
    pub initialized: bool,
    pub ordered: Vec<TransferOccurrence>,
}

impl PreviewState {
    /// Text shown when there is nothing to list.
    pub fn placeholder(&self, strings: &StringResources) -> String {
        if self.initialized {
            strings.resource("transfer.scheduledtransfers.noscheduledtransfers")
        } else {
            LOADING_TEXT.to_string()
        }
    }
}

/// Loads the preview for a given day.
pub struct PreviewLoader<'a, T> {
    client: &'a ApiClient<T>,
    strings: &'a StringResources,
    limit: usize,
}

impl<'a, T: Transport> PreviewLoader<'a, T> {
    pub fn new(client: &'a ApiClient<T>, strings: &'a StringResources) -> Self {
        Self {
            client,
            strings,
            limit: PREVIEW_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    async fn month(&self, date: NaiveDate) -> Option<Vec<TransferOccurrence>> {
        let key = format_net_date(&host_date_string(date), self.strings);
        match fetch_month(self.client, &key).await {
            Ok(raw) => {
                tracing::debug!(month = %key, count = raw.len(), "fetched scheduled transfers");
                Some(raw)
            }
            Err(e) => {
                tracing::error!("Getting transfers for month failed. Error: {}", e);
                None
            }
        }
    }

    /// Current month, then next month if nothing upcoming remains.
    ///
    /// The lookahead happens at most once; a failed fetch publishes an
    /// empty list without looking ahead.
    pub async fn load(&self, today: NaiveDate, now: DateTime<Utc>) -> PreviewState {
        let mut upcoming = match self.month(today).await {
            Some(raw) => filter_upcoming(raw, now),
            None => return Self::published(Vec::new()),
        };

        if upcoming.is_empty() {
            let ahead = next_month(today);
            tracing::debug!(month = ahead.month(), "no upcoming transfers, looking ahead");
            upcoming = match self.month(ahead).await {
                Some(raw) => filter_upcoming(raw, now),
                None => Vec::new(),
            };
        }

        Self::published(order_and_truncate(upcoming, self.limit))
    }

    fn published(ordered: Vec<TransferOccurrence>) -> PreviewState {
        PreviewState {
            initialized: true,
            ordered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn occurrence(active: bool, run: DateTime<Utc>, process: DateTime<Utc>) -> TransferOccurrence {
        TransferOccurrence {
            id: 0,
            run_time_utc: run,
            transfer_name: "Rent".to_string(),
            transfer_description: String::new(),
            is_active: active,
            amount_cents: 2500,
            from_account_name: "Checking".to_string(),
            to_account_name: "Savings".to_string(),
            process_date: process,
        }
    }

    #[test]
    fn filters_inactive_and_sorts_ascending() {
        let now = at(2026, 10, 1);
        let d1 = at(2026, 10, 5);
        let d2 = at(2026, 10, 9);
        let d3 = at(2026, 10, 3);
        let raw = vec![
            occurrence(true, d2, d2),
            occurrence(true, d1, d1),
            occurrence(false, d3, d3),
        ];

        let selected = select_occurrences(raw, now, PREVIEW_LIMIT);
        let dates: Vec<_> = selected.iter().map(|o| o.process_date).collect();
        assert_eq!(dates, vec![d1, d2]);
    }

    #[test]
    fn ids_follow_filtered_order_not_sorted_order() {
        let now = at(2026, 10, 1);
        let raw = vec![
            occurrence(false, at(2026, 10, 2), at(2026, 10, 2)),
            occurrence(true, at(2026, 10, 9), at(2026, 10, 9)),
            occurrence(true, at(2026, 10, 5), at(2026, 10, 5)),
        ];
        let selected = select_occurrences(raw, now, PREVIEW_LIMIT);
        assert_eq!(selected.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn past_and_now_are_excluded() {
        let now = at(2026, 10, 10);
        let raw = vec![
            occurrence(true, now, now),
            occurrence(true, at(2026, 10, 9), at(2026, 10, 9)),
        ];
        assert!(filter_upcoming(raw, now).is_empty());
    }

    #[test]
    fn truncates_to_earliest_six() {
        let now = at(2026, 10, 1);
        let raw: Vec<_> = (0..8u32)
            .rev()
            .map(|i| occurrence(true, at(2026, 10, 10 + i), at(2026, 10, 10 + i)))
            .collect();
        let selected = select_occurrences(raw, now, PREVIEW_LIMIT);
        assert_eq!(selected.len(), 6);
        let days: Vec<_> = selected.iter().map(|o| o.process_date.day()).collect();
        assert_eq!(days, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn format_net_date_reads_host_layout() {
        let strings = StringResources::en_us();
        assert_eq!(
            format_net_date("Sun Oct 18 2026 09:30:00 GMT-0500 (Central Daylight Time)", &strings),
            "Oct-18-2026"
        );
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(format_net_date(&host_date_string(date), &strings), month_key(date));
        assert_eq!(month_key(date), "Feb-03-2026");
    }

    #[test]
    fn format_net_date_degrades_to_resource() {
        let strings = StringResources::en_us();
        let unknown = strings.resource("scheduledtransfer.error.unknowndate");
        assert_eq!(format_net_date("", &strings), unknown);
        assert_eq!(format_net_date("yesterday", &strings), unknown);
        assert_eq!(format_net_date("Sun Foo 18 2026", &strings), unknown);
        assert_eq!(
            transfers_for_month_url(&format_net_date("", &strings)),
            format!("{}/{}", TRANSFERS_FOR_MONTH_URL, unknown)
        );
    }

    #[test]
    fn next_month_clamps() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(next_month(jan31), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        let dec = NaiveDate::from_ymd_opt(2026, 12, 15).unwrap();
        assert_eq!(next_month(dec), NaiveDate::from_ymd_opt(2027, 1, 15).unwrap());
    }

    #[test]
    fn parses_backend_records() {
        let json = r#"[{
            "runTimeUtc": "2026-10-20T14:00:00Z",
            "transferName": "Rent",
            "transferDescription": "Monthly rent",
            "isActive": true,
            "amount": 125000,
            "fromAccountName": "Checking",
            "toAccountName": "Landlord",
            "processDate": "2026-10-20T00:00:00"
        }]"#;
        let parsed: Vec<TransferOccurrence> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, 0);
        assert_eq!(parsed[0].amount_cents, 125_000);
        assert_eq!(parsed[0].process_date, Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn backend_time_accepts_bare_dates() {
        assert_eq!(
            backend_time::parse("2026-10-20"),
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap())
        );
        assert_eq!(backend_time::parse("20/10/2026"), None);
    }

    #[test]
    fn display_text() {
        let strings = StringResources::en_us();
        let item = occurrence(true, at(2026, 10, 20), at(2026, 10, 20));
        assert_eq!(item.header_in(&Utc, &strings), "Next transfer: October 20, 2026");
        assert_eq!(item.summary(&strings), "$25.00 from Checking to Savings");
    }

    #[test]
    fn placeholder_distinguishes_loading() {
        let strings = StringResources::en_us();
        assert_eq!(PreviewState::default().placeholder(&strings), LOADING_TEXT);
        let loaded = PreviewState {
            initialized: true,
            ordered: Vec::new(),
        };
        assert_eq!(loaded.placeholder(&strings), "No scheduled transfers");
    }

    #[test]
    fn unreadable_records_are_skipped() {
        let records = vec![
            serde_json::json!({
                "runTimeUtc": "2026-10-20T12:00:00Z",
                "isActive": true,
                "amount": 2500,
                "processDate": "2026-10-20"
            }),
            serde_json::json!({
                "runTimeUtc": "next tuesday",
                "isActive": true,
                "amount": 100,
                "processDate": "2026-10-21"
            }),
            serde_json::json!({
                "runTimeUtc": "2026-10-22T12:00:00Z",
                "isActive": true,
                "amount": 700,
                "processDate": "not a date"
            }),
            serde_json::json!("garbage"),
            serde_json::json!({
                "runTimeUtc": "2026-10-23T12:00:00",
                "isActive": false,
                "amount": 900,
                "processDate": "2026-10-23"
            }),
        ];

        let decoded = decode_records(records);
        let amounts: Vec<_> = decoded.iter().map(|o| o.amount_cents).collect();
        assert_eq!(amounts, vec![2500, 900]);
    }
}
