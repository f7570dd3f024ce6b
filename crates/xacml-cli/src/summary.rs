use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xacml_model::Catalog;

use crate::pipeline::{Persisted, PipelineOutcome};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn status_cell(persisted: Persisted) -> Cell {
    match persisted {
        Persisted::Written => Cell::new("written").fg(Color::Green),
        Persisted::Unchanged => Cell::new("unchanged").fg(Color::DarkGrey),
        Persisted::UpToDate => Cell::new("up to date").fg(Color::Green),
        Persisted::Printed => Cell::new("printed"),
    }
}

/// Render the catalog as a table of row, variant and identifier.
pub fn catalog_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Variant"),
        header_cell("Identifier"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for record in catalog {
        table.add_row(vec![
            Cell::new(record.row),
            Cell::new(record.symbol.as_str()),
            Cell::new(&record.uri),
        ]);
    }
    table
}

pub fn print_summary(outcome: &PipelineOutcome, output: &str) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Input"), Cell::new(outcome.input.display())]);
    table.add_row(vec![header_cell("Output"), Cell::new(output)]);
    table.add_row(vec![
        header_cell("Functions"),
        Cell::new(outcome.catalog.len()),
    ]);
    table.add_row(vec![header_cell("Source sha256"), Cell::new(&outcome.digest)]);
    table.add_row(vec![header_cell("Status"), status_cell(outcome.persisted)]);
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use xacml_model::{IdentifierRecord, RawIdentifier, Symbol};

    #[test]
    fn catalog_table_lists_records() {
        let catalog = Catalog::from_records(vec![IdentifierRecord::new(
            RawIdentifier {
                row: 3,
                uri: "urn:oasis:names:tc:xacml:1.0:function:string-equal".to_string(),
                token: "string-equal".to_string(),
            },
            Symbol::new("StringEqual").unwrap(),
        )])
        .unwrap();
        let mut table = catalog_table(&catalog);
        table
            .force_no_tty()
            .set_content_arrangement(ContentArrangement::Disabled);
        let rendered = table.to_string();
        assert!(rendered.contains("StringEqual"));
        assert!(rendered.contains("function:string-equal"));
        assert_eq!(table.row_iter().count(), 1);
    }
}
