//! MySQL dialect

use super::Dialect;

/// MySQL spellings. One-way export; `str_to_date` and friends are not in the
/// parser's catalog, so no round-trip law applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn date_fn(&self) -> &'static str {
        "str_to_date"
    }

    fn char_fn(&self) -> &'static str {
        "date_format"
    }

    fn modulo(&self, lhs: &str, rhs: &str) -> String {
        format!("{lhs} % {rhs}")
    }
}
