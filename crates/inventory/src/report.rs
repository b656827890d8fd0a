//! Inventory valuation report.
//!
//! Pure data: the store computes the values, callers decide how to render them.

use crate::product::Product;

/// Stock level of a product relative to the store's alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Ok,
    Low,
}

impl StockStatus {
    pub fn of(product: &Product, threshold: u64) -> Self {
        if product.is_low_stock(threshold) {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn is_low(self) -> bool {
        self == StockStatus::Low
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow<'a> {
    pub product: &'a Product,
    pub status: StockStatus,
}

/// Per-product rows plus totals.
///
/// - `total_value`: sum of `price * quantity` over all products
/// - `total_quantity`: sum of quantities
/// - `low_stock_items`: rows whose status is [`StockStatus::Low`]
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport<'a> {
    pub rows: Vec<ReportRow<'a>>,
    pub total_items: usize,
    pub low_stock_items: usize,
    pub total_quantity: u64,
    pub total_value: f64,
}

impl<'a> InventoryReport<'a> {
    pub(crate) fn build(products: impl IntoIterator<Item = &'a Product>, threshold: u64) -> Self {
        let rows: Vec<ReportRow<'a>> = products
            .into_iter()
            .map(|product| ReportRow {
                product,
                status: StockStatus::of(product, threshold),
            })
            .collect();

        let total_items = rows.len();
        let low_stock_items = rows.iter().filter(|r| r.status.is_low()).count();
        let total_quantity = rows
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.product.quantity()));
        let total_value: f64 = rows.iter().map(|r| r.product.stock_value()).sum();

        Self {
            rows,
            total_items,
            low_stock_items,
            total_quantity,
            total_value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
