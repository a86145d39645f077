pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, Result};

/// Table with a title rule and column separators
pub fn new_table() -> prettytable::Table {
    use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};

    let mut table = prettytable::Table::new();

    let format = FormatBuilder::new()
        .column_separator('│')
        .separator(LinePosition::Title, LineSeparator::new('─', '┼', '├', '┤'))
        .padding(1, 1)
        .build();

    table.set_format(format);

    table
}
