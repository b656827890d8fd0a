//! Human-readable rendering of store data.

use core::fmt;

use stockroom_core::Entity;
use stockroom_inventory::{InventoryReport, Product, StockStatus};

pub const SEPARATOR: &str =
    "================================================================================";

/// `iPhone 18 (Id: A1, Quantity: 5, Price: 999.99)`
pub struct ProductLine<'a>(pub &'a Product);

impl fmt::Display for ProductLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        write!(
            f,
            "{} (Id: {}, Quantity: {}, Price: {})",
            p.name(),
            p.id(),
            p.quantity(),
            p.price_text()
        )
    }
}

pub struct LowStockAlert<'a>(pub &'a Product);

impl fmt::Display for LowStockAlert<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⚠ Low inventory alert for {}", ProductLine(self.0))
    }
}

fn status_label(status: StockStatus) -> &'static str {
    match status {
        StockStatus::Low => "Low 🛑",
        StockStatus::Ok => "Ok ✅",
    }
}

/// Tabular report with a totals footer.
pub struct ReportTable<'r, 'a>(pub &'r InventoryReport<'a>);

impl fmt::Display for ReportTable<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "{:<10} {:<30} {:<10} {:<10} {:<10}",
            "Id", "Name", "Quantity", "Price", "Alert Status"
        )?;
        for row in &report.rows {
            let p = row.product;
            writeln!(
                f,
                "{:<10} {:<30} {:<10} {:<10} {:<10}",
                p.id().as_str(),
                p.name(),
                p.quantity(),
                p.price_text(),
                status_label(row.status)
            )?;
        }
        writeln!(f, "{SEPARATOR}")?;
        writeln!(
            f,
            "Products: {}, low stock: {}, units: {}",
            report.total_items, report.low_stock_items, report.total_quantity
        )?;
        write!(f, "Total inventory value: ${:.2}", report.total_value)
    }
}
