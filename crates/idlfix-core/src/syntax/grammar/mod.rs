//! Baseline WebIDL productions
//!
//! Each production follows the same contract: `Ok(None)` with the cursor
//! untouched when its leading token(s) are absent, `Ok(Some(node))` on a
//! match, and an error once it has committed. Dialects graft extra
//! productions onto these through [`Extensions`](super::registry::Extensions).

pub(crate) mod arguments;
pub(crate) mod definitions;
pub(crate) mod extended;
pub(crate) mod members;
pub(crate) mod types;

use super::ast::Separated;
use super::error::ProductionError;
use super::registry::Production;
use super::tokeniser::Tokeniser;

/// Parse `item (, item)*`
///
/// A `,` not followed by another item is an error unless `allow_dangler`.
pub(crate) fn separated_list<T>(
    t: &mut Tokeniser<'_>,
    parser: Production<T>,
    allow_dangler: bool,
    list_name: &str,
) -> Result<Vec<Separated<T>>, ProductionError> {
    let mut items = Vec::new();
    let Some(first) = parser(t)? else {
        return Ok(items);
    };
    let mut separator = t.consume(&[","]);
    let mut more = separator.is_some();
    items.push(Separated {
        item: first,
        separator,
    });

    while more {
        let Some(item) = parser(t)? else {
            if !allow_dangler {
                return Err(t.error(format!("Trailing comma in {list_name}")));
            }
            break;
        };
        separator = t.consume(&[","]);
        more = separator.is_some();
        items.push(Separated { item, separator });
    }

    Ok(items)
}
