use super::ui;
use crate::core::catalog;
use crate::core::rates::RateStore;
use comfy_table::Cell;

/// Renders the full rate table for every catalog currency.
pub fn render(rates: &RateStore) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Rate (per USD)"),
        ui::header_cell("1 unit (USD)"),
    ]);

    for descriptor in catalog::CATALOG {
        let rate = rates.get(descriptor.code);
        table.add_row(vec![
            Cell::new(format!(
                "{} {} {}",
                descriptor.flag, descriptor.code, descriptor.name
            )),
            ui::value_cell(&format!("{rate:.4}")),
            ui::value_cell(&format!("{:.6}", 1.0 / rate)),
        ]);
    }

    format!("{}\n{}", table, super::source_line(rates))
}
