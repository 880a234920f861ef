//! Replacement tables keyed by lexeme id.
//!
//! Tables arrive as rows of cells with a header row (spreadsheet or CSV).
//! [`TableColumns`] picks the key, old-value and new-value columns out of
//! those rows; [`ReplacementTable`] holds the resulting rules.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One replacement: `old` becomes `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// Value to look for
    pub old: String,
    /// Value to put in its place
    pub new: String,
}

/// Read-only rule lookup. Keys are case-folded; the first rule for a key wins.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    rules: HashMap<String, ReplacementRule>,
}

impl ReplacementTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(key: &str) -> String {
        key.trim().to_lowercase()
    }

    /// Add a rule unless the key is already present. Returns whether it was added.
    pub fn insert(&mut self, key: &str, old: impl Into<String>, new: impl Into<String>) -> bool {
        let key = Self::normalize(key);
        if key.is_empty() || self.rules.contains_key(&key) {
            return false;
        }
        self.rules.insert(
            key,
            ReplacementRule {
                old: old.into(),
                new: new.into(),
            },
        );
        true
    }

    /// Look up the rule for a lexeme id
    pub fn get(&self, key: &str) -> Option<&ReplacementRule> {
        self.rules.get(&Self::normalize(key))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K, O, N> FromIterator<(K, O, N)> for ReplacementTable
where
    K: AsRef<str>,
    O: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, O, N)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (key, old, new) in iter {
            table.insert(key.as_ref(), old, new);
        }
        table
    }
}

/// Which columns of a tabular source hold the rule data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    /// Lexeme-id column header
    pub key: String,
    /// Old-value column header
    pub old: String,
    /// New-value column header
    pub new: String,
    /// Left-pad keys with zeros to this width (lexeme ids are 4-digit numbers
    /// that spreadsheets tend to store as plain integers)
    pub key_pad_width: Option<usize>,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            key: "lxid".to_string(),
            old: "old_ps".to_string(),
            new: "new_ps".to_string(),
            key_pad_width: Some(4),
        }
    }
}

impl TableColumns {
    /// Build a table from a header row and data rows.
    ///
    /// Rows with an empty key, old or new value are skipped.
    pub fn build<R, C>(&self, header: &[String], rows: R) -> Result<ReplacementTable>
    where
        R: IntoIterator<Item = C>,
        C: AsRef<[String]>,
    {
        let key_idx = self.column_index(header, &self.key)?;
        let old_idx = self.column_index(header, &self.old)?;
        let new_idx = self.column_index(header, &self.new)?;

        let mut table = ReplacementTable::new();
        let mut skipped = 0usize;
        for row in rows {
            let row = row.as_ref();
            let cell = |idx: usize| row.get(idx).map_or("", |s| s.trim());
            let (key, old, new) = (cell(key_idx), cell(old_idx), cell(new_idx));
            if key.is_empty() || old.is_empty() || new.is_empty() {
                skipped += 1;
                continue;
            }
            let key = self.pad_key(key);
            if !table.insert(&key, old, new) {
                log::debug!("duplicate rule for '{key}' ignored");
            }
        }
        if skipped > 0 {
            log::debug!("skipped {skipped} incomplete table rows");
        }

        Ok(table)
    }

    fn column_index(&self, header: &[String], name: &str) -> Result<usize> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| CoreError::Config(format!("replacement table has no '{name}' column")))
    }

    /// Left-pad a key with zeros, keeping a leading sign in front.
    pub fn pad_key(&self, key: &str) -> String {
        match self.key_pad_width {
            Some(width) if key.chars().count() < width => {
                let pad = "0".repeat(width - key.chars().count());
                match key.strip_prefix(['-', '+']) {
                    Some(rest) => format!("{}{pad}{rest}", &key[..1]),
                    None => format!("{pad}{key}"),
                }
            }
            _ => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_rule_wins() {
        let mut table = ReplacementTable::new();
        assert!(table.insert("0012", "n", "v"));
        assert!(!table.insert("0012", "n", "adj"));
        assert_eq!(table.get("0012").unwrap().new, "v");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_keys_are_case_folded() {
        let table: ReplacementTable = vec![("KaYa", "n", "v")].into_iter().collect();
        assert!(table.get("kaya").is_some());
        assert!(table.get("KAYA").is_some());
        assert!(table.get("kay").is_none());
    }

    #[test]
    fn test_build_from_rows() {
        let columns = TableColumns::default();
        let table = columns
            .build(
                &header(&["lxid", "lx", "old_ps", "new_ps"]),
                vec![
                    row(&["12", "kaya", "n", "v"]),
                    row(&["0012", "kaya", "n", "adj"]),
                    row(&["7", "bam", "v", "vt"]),
                    row(&["", "orphan", "n", "v"]),
                    row(&["8", "short"]),
                ],
            )
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("0012").unwrap().new, "v");
        assert_eq!(table.get("0007").unwrap().old, "v");
        assert!(table.get("0008").is_none());
    }

    #[test]
    fn test_missing_column_is_a_config_error() {
        let err = TableColumns::default()
            .build(&header(&["lxid", "old_ps"]), Vec::<Vec<String>>::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.contains("new_ps")));
    }

    #[test]
    fn test_pad_key() {
        let columns = TableColumns::default();
        assert_eq!(columns.pad_key("12"), "0012");
        assert_eq!(columns.pad_key("12345"), "12345");
        assert_eq!(columns.pad_key("-1"), "-001");

        let unpadded = TableColumns {
            key_pad_width: None,
            ..TableColumns::default()
        };
        assert_eq!(unpadded.pad_key("12"), "12");
    }
}
