//! Display boundary
//!
//! Core produces ordered row-render requests per hierarchy level and hands
//! validated query results through untouched; the `ui` module consumes them.
//! No cell positioning happens here.

use crate::db::types::ColumnRecord;
use crate::hierarchy::{Level, Navigator};

/// One row of a level pane: list position, selection mark, display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRender {
    pub index: usize,
    pub marked: bool,
    pub label: String,
}

/// Render requests for one level, in catalog order. The marked row is the
/// level's current selection, if any.
pub fn level_rows(nav: &Navigator, level: Level) -> Vec<RowRender> {
    let current = nav.current(level);
    match level {
        Level::Server => nav
            .servers()
            .iter()
            .enumerate()
            .map(|(index, server)| RowRender {
                index,
                marked: current == Some(server.name.as_str()),
                label: format!("{} - ({})", server.name, server.engine),
            })
            .collect(),
        Level::Column => nav
            .columns()
            .iter()
            .enumerate()
            .map(|(index, col)| RowRender {
                index,
                marked: current == Some(col.name.as_str()),
                label: column_label(col),
            })
            .collect(),
        _ => nav
            .names(level)
            .iter()
            .enumerate()
            .map(|(index, name)| RowRender {
                index,
                marked: current == Some(*name),
                label: (*name).to_string(),
            })
            .collect(),
    }
}

/// Column label: `name - datatype`, a `(len)` suffix for character varying
/// types only, `/REQ` for NOT NULL, `/ID` for identity columns.
pub fn column_label(col: &ColumnRecord) -> String {
    let mut label = format!("{} - {}", col.name, col.data_type);
    if matches!(col.data_type.as_str(), "varchar" | "nvarchar")
        && let Some(len) = col.max_length
    {
        label.push_str(&format!("({})", len));
    }
    if !col.nullable {
        label.push_str("/REQ");
    }
    if col.is_identity {
        label.push_str("/ID");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(
        name: &str,
        data_type: &str,
        nullable: bool,
        max_length: Option<i32>,
        is_identity: bool,
    ) -> ColumnRecord {
        ColumnRecord {
            name: name.to_string(),
            ordinal: 1,
            nullable,
            data_type: data_type.to_string(),
            max_length,
            is_identity,
        }
    }

    #[test]
    fn test_identity_int_column_label() {
        // Identity marker and required marker, no length suffix
        let label = column_label(&col("id", "int4", false, None, true));
        assert_eq!(label, "id - int4/REQ/ID");
    }

    #[test]
    fn test_varchar_column_label() {
        // Length suffix and required marker, no identity marker
        let label = column_label(&col("email", "varchar", false, Some(255), false));
        assert_eq!(label, "email - varchar(255)/REQ");
    }

    #[test]
    fn test_nullable_column_has_no_req_marker() {
        let label = column_label(&col("bio", "text", true, None, false));
        assert_eq!(label, "bio - text");
    }

    #[test]
    fn test_length_suffix_only_for_varchar_types() {
        // int4 reports no max_length, but even types that do only get the
        // suffix when they are character varying
        let label = column_label(&col("flags", "bit", false, Some(8), false));
        assert_eq!(label, "flags - bit/REQ");
    }
}
