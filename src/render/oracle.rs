//! Oracle dialect

use super::Dialect;

/// Oracle spellings. Also the crate's default rendering (`Display` on
/// [`Node`](crate::ast::Node)) and the one the round-trip law holds for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }
}
