//! Object key generation
//!
//! Staged raw observations and export artifacts follow fixed naming
//! schemes so keys sort predictably and carry their date. Export keys
//! additionally avoid collisions with same-day exports sharing a base
//! name by scanning the existing listing for the highest sequence.

use chrono::NaiveDate;

/// Separator between the name, sequence and date segments
const SEPARATOR: char = '_';

/// Base name substituted when the caller requests none
const DEFAULT_BASE_NAME: &str = "query-data";

/// Extension for export artifacts
const EXPORT_EXTENSION: &str = "csv";

/// Extension for staged raw observations
const RAW_EXTENSION: &str = "json";

/// Builds the key for one staged raw observation
///
/// The city name is slugged: spaces become dashes, non-ASCII characters
/// are dropped and the rest is lowercased.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stratus::core::keys::staged_object_key;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(
///     staged_object_key("raw", 683506, "Bucharest", date),
///     "raw/683506-bucharest_2025-01-01.json"
/// );
/// ```
pub fn staged_object_key(prefix: &str, city_id: i64, city_name: &str, date: NaiveDate) -> String {
    let slug = city_name
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_ascii_lowercase();

    format!(
        "{prefix}/{city_id}-{slug}{SEPARATOR}{}.{RAW_EXTENSION}",
        date.format("%Y-%m-%d")
    )
}

/// Computes a collision-avoiding key for a new export artifact
///
/// The key embeds the base name and today's date; when earlier same-day
/// exports of the same name exist in `existing_keys`, a sequence segment
/// one past the highest seen is inserted between them. Keys from other
/// names or other days are ignored, so sequences reset daily.
///
/// No lock is taken over the listing: two concurrent callers can compute
/// the same key and the later write wins.
///
/// # Arguments
///
/// * `existing_keys` - Complete listing under the export prefix
/// * `requested_name` - Caller-supplied base name; empty falls back to
///   `query-data`, and anything past a separator is cut off
/// * `today` - The date embedded in the key
/// * `prefix` - Export prefix, without a trailing slash
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stratus::core::keys::export_key;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let existing = vec!["csv/foo_2025-01-01.csv".to_string()];
/// assert_eq!(export_key(&existing, "foo", today, "csv"), "csv/foo_1_2025-01-01.csv");
/// ```
pub fn export_key(
    existing_keys: &[String],
    requested_name: &str,
    today: NaiveDate,
    prefix: &str,
) -> String {
    let name = base_name(requested_name);
    let date = today.format("%Y-%m-%d").to_string();

    let mut next_sequence: Option<u32> = None;
    for key in existing_keys {
        let Some(existing) = parse_existing(key, prefix) else {
            continue;
        };
        if existing.name != name || existing.date != date {
            continue;
        }

        let candidate = existing.sequence + 1;
        if next_sequence.map_or(true, |current| candidate > current) {
            next_sequence = Some(candidate);
        }
    }

    match next_sequence {
        None => format!("{prefix}/{name}{SEPARATOR}{date}.{EXPORT_EXTENSION}"),
        Some(sequence) => {
            format!("{prefix}/{name}{SEPARATOR}{sequence}{SEPARATOR}{date}.{EXPORT_EXTENSION}")
        }
    }
}

/// Normalizes the requested base name
///
/// Cutting at the first separator keeps a previously generated key
/// (which already carries sequence and date segments) usable as a name.
fn base_name(requested_name: &str) -> &str {
    if requested_name.is_empty() {
        return DEFAULT_BASE_NAME;
    }

    let head = match requested_name.split_once(SEPARATOR) {
        Some((head, _)) => head,
        None => requested_name,
    };

    if head.is_empty() {
        DEFAULT_BASE_NAME
    } else {
        head
    }
}

/// Segments of one existing export key
struct ExistingKey<'a> {
    name: &'a str,
    sequence: u32,
    date: &'a str,
}

/// Parses one listing entry into its segments
///
/// Entries that don't live directly under the prefix or don't split
/// into the two- or three-segment shape are ignored.
fn parse_existing<'a>(key: &'a str, prefix: &str) -> Option<ExistingKey<'a>> {
    let file_name = key.strip_prefix(prefix)?.strip_prefix('/')?;
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    let fields: Vec<&str> = stem.split(SEPARATOR).collect();
    match fields.len() {
        2 => Some(ExistingKey {
            name: fields[0],
            sequence: 0,
            date: fields[1],
        }),
        3 => fields[1].parse().ok().map(|sequence| ExistingKey {
            name: fields[0],
            sequence,
            date: fields[2],
        }),
        _ => None,
    }
}
