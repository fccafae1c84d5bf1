//! Column selection
//!
//! Translates client-supplied `table:column` tokens into a validated
//! select-list for the export query. Every identifier is matched
//! against a schema snapshot taken immediately before use, so nothing
//! client-controlled is ever interpolated into SQL unchecked.

use crate::domain::{Result, SchemaSnapshot, StratusError};

/// Token that expands to every column of every table
const WILDCARD: &str = "*";

/// Compiles requested columns into an aliased select-list
///
/// A request of exactly `["*"]` expands to the full snapshot in
/// snapshot order. Otherwise each token is split on its first `:` and
/// checked against the snapshot; the first unknown table or column
/// fails the whole request. Token order is preserved, which fixes the
/// column order of the resulting artifact.
///
/// Each reference is emitted as `table.column AS "table.column"` so the
/// result header carries qualified names.
///
/// # Errors
///
/// Returns a validation error for an empty request or an unsplittable
/// token, and a not-found error naming the offending table or column.
///
/// # Example
///
/// ```
/// use stratus::core::columns::parse_columns;
/// use stratus::domain::{SchemaSnapshot, TableColumns};
///
/// let schema = SchemaSnapshot {
///     tables: vec![TableColumns {
///         table: "cities".to_string(),
///         columns: vec!["name".to_string()],
///     }],
/// };
///
/// let select_list = parse_columns(&["cities:name".to_string()], &schema).unwrap();
/// assert_eq!(select_list, "cities.name AS \"cities.name\"");
/// ```
pub fn parse_columns(requested: &[String], schema: &SchemaSnapshot) -> Result<String> {
    if requested.is_empty() {
        return Err(StratusError::Validation("No columns specified".to_string()));
    }

    if requested.len() == 1 && requested[0] == WILDCARD {
        let references: Vec<String> = schema
            .tables
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| render_reference(&t.table, c)))
            .collect();
        return Ok(references.join(", "));
    }

    let mut references = Vec::with_capacity(requested.len());
    for token in requested {
        let (table, column) = token.split_once(':').ok_or_else(|| {
            StratusError::Validation(format!(
                "Column reference '{token}' is not of the form table:column"
            ))
        })?;

        if !schema.has_table(table) {
            return Err(StratusError::NotFound(format!(
                "Table '{table}' doesn't exist"
            )));
        }

        if !schema.has_column(table, column) {
            return Err(StratusError::NotFound(format!(
                "Column '{column}' doesn't exist"
            )));
        }

        references.push(render_reference(table, column));
    }

    Ok(references.join(", "))
}

fn render_reference(table: &str, column: &str) -> String {
    format!("{table}.{column} AS \"{table}.{column}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableColumns;

    fn schema() -> SchemaSnapshot {
        SchemaSnapshot {
            tables: vec![
                TableColumns {
                    table: "countries".to_string(),
                    columns: vec!["id".to_string(), "common_name".to_string()],
                },
                TableColumns {
                    table: "cities".to_string(),
                    columns: vec!["id".to_string(), "name".to_string()],
                },
                TableColumns {
                    table: "weather_readings".to_string(),
                    columns: vec!["date".to_string(), "temperature".to_string()],
                },
            ],
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_wildcard_expands_every_column_in_snapshot_order() {
        let select_list = parse_columns(&tokens(&["*"]), &schema()).unwrap();

        let references: Vec<&str> = select_list.split(", ").collect();
        assert_eq!(references.len(), 6);
        assert_eq!(references[0], "countries.id AS \"countries.id\"");
        assert_eq!(references[2], "cities.id AS \"cities.id\"");
        assert_eq!(
            references[5],
            "weather_readings.temperature AS \"weather_readings.temperature\""
        );
    }

    #[test]
    fn test_token_order_is_preserved() {
        let select_list = parse_columns(
            &tokens(&["weather_readings:date", "cities:name", "countries:common_name"]),
            &schema(),
        )
        .unwrap();

        assert_eq!(
            select_list,
            "weather_readings.date AS \"weather_readings.date\", \
             cities.name AS \"cities.name\", \
             countries.common_name AS \"countries.common_name\""
        );
    }

    #[test]
    fn test_unknown_table_is_not_found_and_named() {
        let err = parse_columns(&tokens(&["bogus:x"]), &schema()).unwrap_err();
        assert!(matches!(err, StratusError::NotFound(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_unknown_column_is_not_found_and_named() {
        let err = parse_columns(&tokens(&["cities:bogus"]), &schema()).unwrap_err();
        assert!(matches!(err, StratusError::NotFound(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_token_without_colon_is_validation() {
        let err = parse_columns(&tokens(&["cities.name"]), &schema()).unwrap_err();
        assert!(matches!(err, StratusError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_empty_request_is_validation() {
        let err = parse_columns(&[], &schema()).unwrap_err();
        assert!(matches!(err, StratusError::Validation(_)));
    }

    #[test]
    fn test_split_happens_on_first_colon_only() {
        let err = parse_columns(&tokens(&["cities:name:extra"]), &schema()).unwrap_err();
        assert!(matches!(err, StratusError::NotFound(_)));
        assert!(err.to_string().contains("name:extra"));
    }

    #[test]
    fn test_fails_fast_on_first_invalid_token() {
        let err =
            parse_columns(&tokens(&["bogus:x", "also_bogus:y"]), &schema()).unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert!(!err.to_string().contains("also_bogus"));
    }

    #[test]
    fn test_wildcard_mixed_with_other_tokens_is_not_special() {
        let err = parse_columns(&tokens(&["*", "cities:name"]), &schema()).unwrap_err();
        assert!(matches!(err, StratusError::Validation(_)));
    }
}
