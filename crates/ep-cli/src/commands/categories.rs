//! Categories command: the emoji catalog.

use std::io::Write;

use anyhow::Result;
use ep_core::category::categories;

pub fn run<W: Write>(writer: &mut W, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(categories())?)?;
        return Ok(());
    }

    writeln!(writer, "CATEGORIES")?;
    for (index, category) in categories().iter().enumerate() {
        let default = if index == 0 { "  (default)" } else { "" };
        writeln!(writer, "  {} {}{default}", category.code, category.label)?;
    }
    writeln!(writer)?;
    writeln!(writer, "Use either the emoji or the label with 'ep add --emoji'.")?;
    Ok(())
}
