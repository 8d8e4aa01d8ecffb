//! Line-level CSV decoding for edge-list rows.

use crate::errors::EdgeListProviderError;

pub(crate) const SOURCE_COLUMN: &str = "id1";
pub(crate) const TARGET_COLUMN: &str = "id2";
pub(crate) const DURATION_COLUMN: &str = "duration";

/// Positions of the required columns within each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    source: usize,
    target: usize,
    duration: usize,
}

impl ColumnLayout {
    /// Locates the required columns in a header row. Extra columns are
    /// ignored and column order is free.
    pub(crate) fn from_header(fields: &[String]) -> Result<Self, EdgeListProviderError> {
        let position = |column: &'static str| {
            fields
                .iter()
                .position(|field| field == column)
                .ok_or(EdgeListProviderError::ColumnNotFound { column })
        };
        Ok(Self {
            source: position(SOURCE_COLUMN)?,
            target: position(TARGET_COLUMN)?,
            duration: position(DURATION_COLUMN)?,
        })
    }

    fn width(&self) -> usize {
        self.source.max(self.target).max(self.duration) + 1
    }

    /// Extracts the edge carried by `fields`.
    pub(crate) fn edge<'a>(
        &self,
        fields: &'a [String],
        line: usize,
    ) -> Result<EdgeRecord<'a>, EdgeListProviderError> {
        let short = || EdgeListProviderError::ShortRow {
            line,
            expected: self.width(),
            actual: fields.len(),
        };
        let source = fields.get(self.source).ok_or_else(short)?;
        let target = fields.get(self.target).ok_or_else(short)?;
        let duration = fields.get(self.duration).ok_or_else(short)?;

        if source.is_empty() {
            return Err(EdgeListProviderError::EmptyNodeId {
                line,
                column: SOURCE_COLUMN,
            });
        }
        if target.is_empty() {
            return Err(EdgeListProviderError::EmptyNodeId {
                line,
                column: TARGET_COLUMN,
            });
        }
        let duration = if duration.is_empty() {
            None
        } else {
            Some(
                duration
                    .parse::<f64>()
                    .map_err(|_| EdgeListProviderError::InvalidDuration {
                        line,
                        value: duration.clone(),
                    })?,
            )
        };
        Ok(EdgeRecord {
            source,
            target,
            duration,
        })
    }
}

/// One decoded edge row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord<'a> {
    pub(crate) source: &'a str,
    pub(crate) target: &'a str,
    pub(crate) duration: Option<f64>,
}

/// Splits one CSV line into trimmed fields.
///
/// Fields may be wrapped in double quotes, inside which commas are literal
/// and `""` encodes a single quote. Quoted fields keep their inner
/// whitespace.
pub(crate) fn split_fields(text: &str, line: usize) -> Result<Vec<String>, EdgeListProviderError> {
    let mut fields = Vec::new();
    let mut chars = text.trim_end_matches(['\r', '\n']).chars().peekable();

    loop {
        while chars.next_if(|c| *c == ' ' || *c == '\t').is_some() {}
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            loop {
                match chars.next() {
                    Some('"') if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err(EdgeListProviderError::UnterminatedQuote { line }),
                }
            }
            while chars.next_if(|c| *c != ',').is_some() {}
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                field.push(c);
            }
            field.truncate(field.trim_end().len());
        }
        fields.push(field);
        if chars.next().is_none() {
            return Ok(fields);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owned(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| (*field).to_owned()).collect()
    }

    #[rstest]
    #[case::plain("a,b,3", &["a", "b", "3"])]
    #[case::padded(" a , b ,3.5 ", &["a", "b", "3.5"])]
    #[case::crlf("a,b,3\r\n", &["a", "b", "3"])]
    #[case::empty_trailing("a,b,", &["a", "b", ""])]
    #[case::quoted_comma("\"x,y\",b,1", &["x,y", "b", "1"])]
    #[case::escaped_quote("\"say \"\"hi\"\"\",b,1", &["say \"hi\"", "b", "1"])]
    fn fields_are_split(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_fields(line, 1).expect("line must split"), owned(expected));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let err = split_fields("\"open,b,1", 7).expect_err("quote must be closed");
        assert!(matches!(err, EdgeListProviderError::UnterminatedQuote { line: 7 }));
    }

    #[test]
    fn header_columns_may_appear_in_any_order() {
        let layout = ColumnLayout::from_header(&owned(&["weight", "duration", "id2", "id1"]))
            .expect("header must resolve");
        let row = owned(&["9", "4.5", "b", "a"]);
        let edge = layout.edge(&row, 2).expect("row must decode");
        assert_eq!(
            edge,
            EdgeRecord {
                source: "a",
                target: "b",
                duration: Some(4.5)
            }
        );
    }

    #[test]
    fn header_without_duration_is_rejected() {
        let err = ColumnLayout::from_header(&owned(&["id1", "id2"]))
            .expect_err("duration column is required");
        assert!(matches!(
            err,
            EdgeListProviderError::ColumnNotFound { column: "duration" }
        ));
    }

    #[rstest]
    #[case::short(&["a", "b"])]
    #[case::single(&["a"])]
    fn short_rows_are_rejected(#[case] row: &[&str]) {
        let layout = ColumnLayout::from_header(&owned(&["id1", "id2", "duration"]))
            .expect("header must resolve");
        let row = owned(row);
        let err = layout.edge(&row, 4).expect_err("row is too short");
        assert!(matches!(
            err,
            EdgeListProviderError::ShortRow {
                line: 4,
                expected: 3,
                ..
            }
        ));
    }

    #[test]
    fn empty_duration_is_missing() {
        let layout = ColumnLayout::from_header(&owned(&["id1", "id2", "duration"]))
            .expect("header must resolve");
        let row = owned(&["a", "b", ""]);
        assert_eq!(layout.edge(&row, 2).expect("row must decode").duration, None);
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let layout = ColumnLayout::from_header(&owned(&["id1", "id2", "duration"]))
            .expect("header must resolve");
        let row = owned(&["a", "b", "long"]);
        let err = layout.edge(&row, 3).expect_err("duration must be numeric");
        assert!(matches!(
            err,
            EdgeListProviderError::InvalidDuration { line: 3, .. }
        ));
    }
}
