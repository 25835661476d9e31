use super::ui;
use crate::core::board::{ConversionRow, RowBoard, RowQuote};
use crate::core::catalog;
use crate::core::rates::RateStore;
use comfy_table::Cell;

/// Renders the board with every row's derived quote and the source footer.
pub fn render(board: &RowBoard, rates: &RateStore) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Amount"),
        ui::header_cell("USD value"),
        ui::header_cell("Rate (per USD)"),
        ui::header_cell("1 unit (USD)"),
    ]);

    for (row, quote) in board.rows().iter().zip(board.recompute_all(rates)) {
        table.add_row(row_cells(row, &quote));
    }

    format!("{}\n{}", table, super::source_line(rates))
}

fn row_cells(row: &ConversionRow, quote: &RowQuote) -> Vec<Cell> {
    let label = match catalog::descriptor(&row.code) {
        Some(d) => format!("{} {} {}", d.flag, d.code, d.name),
        None => row.code.clone(),
    };
    let amount = row.amount.map_or(String::new(), |a| format!("{a:.2}"));

    match quote {
        RowQuote::Quote {
            usd_text,
            rate_text,
            inverse_text,
        } => vec![
            Cell::new(label),
            ui::value_cell(&amount),
            ui::value_cell(&format!("${usd_text}")),
            ui::value_cell(rate_text),
            ui::value_cell(inverse_text),
        ],
        RowQuote::NotConfigured => vec![
            Cell::new(label),
            ui::value_cell(&amount),
            Cell::new(ui::style_text("currency not configured", ui::StyleType::Error)),
            ui::na_cell(),
            ui::na_cell(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::RateTable;
    use crate::store::memory::MemorySnapshotStore;
    use std::sync::Arc;

    #[test]
    fn test_render_includes_quotes_and_source() {
        let mut rates = RateStore::new(Arc::new(MemorySnapshotStore::new()));
        rates.merge(RateTable::from([("CNY".to_string(), 7.2)]), "test-source");

        let mut board = RowBoard::new();
        board.add_row(Some("CNY"));

        let output = render(&board, &rates);
        assert!(output.contains("CNY"));
        assert!(output.contains("7.2000"));
        assert!(output.contains("test-source"));
    }
}
