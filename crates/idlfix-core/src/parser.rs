//! Text in, tree out, and back again
//!
//! [`parse_with`] masks directive lines and applies the dialect's source
//! tweaks before handing the text to the dialect's registry; [`write`] undoes
//! both, so `write(&parse(x)?) == x` for any input that parses.

use tracing::debug;

use crate::mask::{mask, unmask};
use crate::syntax::{Dialect, ParseError, Root, write_node};

/// Parse Gecko-flavoured WebIDL
pub fn parse(text: &str, source_name: &str) -> Result<Root, ParseError> {
    parse_with(text, source_name, Dialect::Gecko)
}

/// Parse `text` with the productions of `dialect`
pub fn parse_with(text: &str, source_name: &str, dialect: Dialect) -> Result<Root, ParseError> {
    let tweaks = dialect.tweaks_for(source_name);
    let prepared = tweaks
        .iter()
        .fold(mask(text), |text, tweak| tweak.apply(&text));

    let mut root = dialect.registry().parse(&prepared, source_name)?;
    root.tweaks = tweaks;
    debug!(
        source = source_name,
        %dialect,
        definitions = root.definitions.len(),
        "parsed"
    );
    Ok(root)
}

/// Serialize `root`, restoring tweaked text and directive lines
pub fn write(root: &Root) -> String {
    let written = write_node(root);
    let restored = root
        .tweaks
        .iter()
        .rev()
        .fold(written, |text, tweak| tweak.reverse(&text));
    unmask(&restored)
}
