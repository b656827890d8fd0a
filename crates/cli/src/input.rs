//! Parsing of raw console input into product field values.
//!
//! Each parser returns the same error kinds the product constructor uses, so
//! the session can show one message and ask again.

use core::str::FromStr;

use stockroom_core::{DomainError, DomainResult, ProductId};

/// Strip the line terminator left by `read_line`.
pub fn strip_newline(raw: &str) -> &str {
    raw.trim_end_matches(['\n', '\r'])
}

pub fn parse_id(raw: &str) -> DomainResult<ProductId> {
    ProductId::parse(strip_newline(raw))
}

pub fn parse_name(raw: &str) -> DomainResult<String> {
    let name = strip_newline(raw).trim();
    if name.is_empty() {
        return Err(DomainError::invalid_name("name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Decimal price in USD, `>= 0`.
pub fn parse_price(raw: &str) -> DomainResult<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::invalid_price("price must be a positive integer/decimal"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::invalid_price(
            "price must be a positive integer/decimal",
        ));
    }
    Ok(price)
}

/// Whole-number quantity, `>= 0`.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    let quantity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::invalid_quantity("quantity must be a positive integer"))?;
    if quantity < 0 {
        return Err(DomainError::invalid_quantity(
            "quantity must be a positive integer",
        ));
    }
    Ok(quantity)
}

/// `y` / `yes` in any case.
pub fn is_yes(raw: &str) -> bool {
    let answer = raw.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    ListAll,
    Report,
    ViewById,
    SearchKeyword,
    ListLowStock,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::Add,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::ListAll,
        MenuChoice::Report,
        MenuChoice::ViewById,
        MenuChoice::SearchKeyword,
        MenuChoice::ListLowStock,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).map_or(0, |i| i + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add new Product",
            MenuChoice::Update => "Update existing Product",
            MenuChoice::Delete => "Delete existing Product",
            MenuChoice::ListAll => "List all products",
            MenuChoice::Report => "Generate Report for all data",
            MenuChoice::ViewById => "Search product by ID",
            MenuChoice::SearchKeyword => "Search Everywhere by keyword",
            MenuChoice::ListLowStock => "List low stock items",
            MenuChoice::Exit => "Exit application",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| format!("invalid choice `{s}`"))
    }
}
