use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

/// One inventory entry.
///
/// Fields are private and every way of obtaining a `Product` goes through the
/// same validation, so a value of this type always satisfies:
/// - `id` is non-empty and has no whitespace (enforced by [`ProductId`])
/// - `name` is non-empty
/// - `price` is finite and `>= 0`
/// - `quantity` is `>= 0`
///
/// "Mutation" is replace-style: `with_*` returns a new, re-validated product and
/// leaves `self` untouched. The id never changes; renaming is delete + add.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64, // USD
    quantity: u64,
}

impl Product {
    /// Construct a product from raw field values.
    ///
    /// Fields are checked in declaration order; the first failure is returned.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let id = ProductId::parse(id)?;
        let name = name.into();
        validate_name(&name)?;
        validate_price(price)?;
        let quantity = validate_quantity(quantity)?;
        Self::assemble(id, name, price, quantity)
    }

    /// Construct a product from an already-validated id.
    pub fn from_id(id: ProductId, name: impl Into<String>, price: f64, quantity: i64) -> DomainResult<Self> {
        let quantity = validate_quantity(quantity)?;
        Self::assemble(id, name.into(), price, quantity)
    }

    fn assemble(id: ProductId, name: String, price: f64, quantity: u64) -> DomainResult<Self> {
        validate_name(&name)?;
        validate_price(price)?;
        Ok(Self {
            id,
            name,
            price,
            quantity,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Copy of this product with a new name.
    pub fn with_name(&self, name: impl Into<String>) -> DomainResult<Self> {
        Self::assemble(self.id.clone(), name.into(), self.price, self.quantity)
    }

    /// Copy of this product with a new price.
    pub fn with_price(&self, price: f64) -> DomainResult<Self> {
        Self::assemble(self.id.clone(), self.name.clone(), price, self.quantity)
    }

    /// Copy of this product with a new quantity.
    pub fn with_quantity(&self, quantity: i64) -> DomainResult<Self> {
        let quantity = validate_quantity(quantity)?;
        Self::assemble(self.id.clone(), self.name.clone(), self.price, quantity)
    }

    /// `price * quantity`.
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Low stock means at or below the threshold.
    pub fn is_low_stock(&self, threshold: u64) -> bool {
        self.quantity <= threshold
    }

    /// Price as text, always with a fractional part (`300.0`, `999.99`).
    ///
    /// Prices below `1e-4` or from `1e16` up use exponent form with a signed,
    /// two-digit exponent (`1e-05`, `1.5e+16`).
    pub fn price_text(&self) -> String {
        let text = format!("{:?}", self.price);
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => text,
        }
    }

    /// Case-insensitive substring match against the text of every field.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.quantity.to_string().contains(needle)
            || self.price_text().to_lowercase().contains(needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_name("name cannot be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() {
        return Err(DomainError::invalid_price("price must be a number"));
    }
    if price < 0.0 {
        return Err(DomainError::invalid_price("price cannot be negative"));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> DomainResult<u64> {
    u64::try_from(quantity).map_err(|_| DomainError::invalid_quantity("quantity cannot be negative"))
}
