//! Interactive menu session.
//!
//! The session owns the store for the lifetime of the process and talks to the
//! user through any `BufRead`/`Write` pair, which keeps it scriptable in tests.
//! Closing the input stream behaves like choosing "Exit".

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use stockroom_core::{DomainError, DomainResult, ProductId};
use stockroom_inventory::{InventoryStore, PersistenceError, Product, StockStatus};

use crate::input::{self, MenuChoice};
use crate::render::{LowStockAlert, ProductLine, ReportTable, SEPARATOR};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to save inventory: {0}")]
    Save(#[from] PersistenceError),
}

pub struct Session<R, W> {
    store: InventoryStore,
    input: R,
    output: W,
    offer_load: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: InventoryStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            offer_load: true,
        }
    }

    /// Whether to ask about loading previous data before the first menu.
    pub fn with_load_prompt(mut self, offer_load: bool) -> Self {
        self.offer_load = offer_load;
        self
    }

    pub fn into_parts(self) -> (InventoryStore, W) {
        (self.store, self.output)
    }

    /// Run until the user exits or input ends, then save.
    pub fn run(&mut self) -> Result<(), SessionError> {
        match self.interact() {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed; exiting");
            }
            Err(err) => return Err(err.into()),
        }
        self.save_on_exit()
    }

    fn interact(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Inventory Management System!👋🏻")?;
        if self.offer_load {
            let answer = self.read_line("Would you like to load your previous data? (y/n): ")?;
            if input::is_yes(&answer) {
                self.load_previous()?;
            }
        }

        loop {
            writeln!(
                self.output,
                "Please select an operation that you want to perform on your inventory"
            )?;
            for choice in MenuChoice::ALL {
                writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
            }
            let raw = self.read_line("Operation number: ")?;
            let choice = match raw.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid choice! Enter again")?;
                    continue;
                }
            };
            debug!(?choice, "menu selection");

            match choice {
                MenuChoice::Add => self.add_product(None)?,
                MenuChoice::Update => self.update_product(None)?,
                MenuChoice::Delete => self.delete_product()?,
                MenuChoice::ListAll => self.list_products()?,
                MenuChoice::Report => self.print_report()?,
                MenuChoice::ViewById => self.view_product()?,
                MenuChoice::SearchKeyword => self.search_keyword()?,
                MenuChoice::ListLowStock => self.list_low_stock()?,
                MenuChoice::Exit => return Ok(()),
            }
        }
    }

    fn load_previous(&mut self) -> io::Result<()> {
        match self.store.load() {
            Ok(()) => writeln!(self.output, "Data loaded! ({} products)", self.store.len()),
            Err(err) => {
                tracing::warn!(
                    path = %self.store.config().data_path().display(),
                    error = %err,
                    "failed to load inventory"
                );
                writeln!(self.output, "Error while loading data: {err}")
            }
        }
    }

    fn save_on_exit(&mut self) -> Result<(), SessionError> {
        match self.store.save() {
            Ok(()) => {
                writeln!(self.output, "Data Saved!")?;
                Ok(())
            }
            Err(err) => {
                writeln!(self.output, "Failed to save data: {err}")?;
                Err(err.into())
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        // Bytes that are not UTF-8 become U+FFFD and fail validation like any bad entry.
        let line = String::from_utf8_lossy(&raw);
        Ok(input::strip_newline(&line).to_string())
    }

    /// Ask until `parse` accepts the answer, showing each rejection.
    fn read_valid<T>(&mut self, prompt: &str, parse: fn(&str) -> DomainResult<T>) -> io::Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "{}", rejection_message(&err))?,
            }
        }
    }

    fn read_fields(&mut self, id: ProductId, name_prompt: &str) -> io::Result<Option<Product>> {
        let name = self.read_valid(name_prompt, input::parse_name)?;
        let price = self.read_valid("Enter its price (in USD): ", input::parse_price)?;
        let quantity = self.read_valid("Enter its quantity: ", input::parse_quantity)?;
        match Product::from_id(id, name, price, quantity) {
            Ok(product) => Ok(Some(product)),
            Err(err) => {
                writeln!(self.output, "{}", rejection_message(&err))?;
                Ok(None)
            }
        }
    }

    fn report_stock(&mut self, status: StockStatus, id: &str) -> io::Result<()> {
        if status.is_low() {
            if let Ok(product) = self.store.search_by_id(id) {
                writeln!(self.output, "{}", LowStockAlert(product))?;
            }
        }
        Ok(())
    }

    fn add_product(&mut self, id: Option<ProductId>) -> io::Result<()> {
        let id = match id {
            Some(id) => id,
            None => self.read_valid("Enter id of the product: ", input::parse_id)?,
        };

        if self.store.exists(id.as_str()) {
            writeln!(self.output, "Product with given id already exists in the inventory")?;
            let answer = self.read_line("Update the existing product? (y/n): ")?;
            if input::is_yes(&answer) {
                return self.update_product(Some(id));
            }
            return Ok(());
        }

        let Some(product) = self.read_fields(id, "Enter its name: ")? else {
            return Ok(());
        };
        let key = product.id_typed().clone();
        let line = ProductLine(&product).to_string();

        writeln!(self.output, "{SEPARATOR}")?;
        match self.store.add(product) {
            Ok(status) => {
                self.report_stock(status, key.as_str())?;
                writeln!(self.output, "Added {line} successfully!👍🏻")?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn update_product(&mut self, id: Option<ProductId>) -> io::Result<()> {
        let id = match id {
            Some(id) => id,
            None => self.read_valid("Enter id of the product: ", input::parse_id)?,
        };

        if !self.store.exists(id.as_str()) {
            writeln!(self.output, "Product with given id does not exist")?;
            let answer = self.read_line("Add new product? (y/n): ")?;
            if input::is_yes(&answer) {
                return self.add_product(Some(id));
            }
            return Ok(());
        }

        let Some(product) = self.read_fields(id, "Enter its new name: ")? else {
            return Ok(());
        };
        let key = product.id_typed().clone();

        writeln!(self.output, "{SEPARATOR}")?;
        match self.store.update(product) {
            Ok(status) => {
                self.report_stock(status, key.as_str())?;
                writeln!(self.output, "Item Updated successfully!")?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn delete_product(&mut self) -> io::Result<()> {
        let id = self.read_valid("Enter id of the product: ", input::parse_id)?;
        writeln!(self.output, "{SEPARATOR}")?;
        match self.store.delete(id.as_str()) {
            Ok(_) => writeln!(self.output, "Item Deleted successfully!")?,
            Err(_) => writeln!(self.output, "Product with given id does not exist")?,
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn list_products(&mut self) -> io::Result<()> {
        writeln!(self.output, "{SEPARATOR}")?;
        if self.store.is_empty() {
            writeln!(self.output, "No products in the inventory")?;
        }
        for product in self.store.list() {
            writeln!(self.output, "{}", ProductLine(product))?;
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn print_report(&mut self) -> io::Result<()> {
        let report = self.store.generate_report();
        writeln!(self.output, "{SEPARATOR}")?;
        writeln!(self.output, "{}", ReportTable(&report))?;
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn view_product(&mut self) -> io::Result<()> {
        let id = self.read_valid("Enter id of the product: ", input::parse_id)?;
        writeln!(self.output, "{SEPARATOR}")?;
        match self.store.search_by_id(id.as_str()) {
            Ok(product) => writeln!(self.output, "{}", ProductLine(product))?,
            Err(_) => writeln!(self.output, "Product with given id does not exist!")?,
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn search_keyword(&mut self) -> io::Result<()> {
        let keyword = self.read_line("Enter keyword to search: ")?;
        writeln!(self.output, "{SEPARATOR}")?;
        let matches = self.store.search_by_keyword(&keyword);
        if matches.clone().next().is_none() {
            writeln!(self.output, "No products found matching the keyword.")?;
        }
        for product in matches {
            writeln!(self.output, "{}", ProductLine(product))?;
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }

    fn list_low_stock(&mut self) -> io::Result<()> {
        writeln!(self.output, "{SEPARATOR}")?;
        let low = self.store.list_low_stock();
        if low.clone().next().is_none() {
            writeln!(self.output, "No product with low stock🥳")?;
        }
        for product in low {
            writeln!(self.output, "{}", ProductLine(product))?;
        }
        writeln!(self.output, "{SEPARATOR}\n")
    }
}

/// The user-facing half of a validation error.
fn rejection_message(err: &DomainError) -> String {
    match err {
        DomainError::InvalidId(_) => "id cannot be empty and cannot contain any spaces".to_string(),
        DomainError::InvalidName(msg)
        | DomainError::InvalidPrice(msg)
        | DomainError::InvalidQuantity(msg) => capitalize(msg),
        other => other.to_string(),
    }
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
