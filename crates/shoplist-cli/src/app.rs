//! The interactive session: sign in, then edit the shopping list.

use crate::console::Console;
use crate::menu::{Entry, Menu};
use anyhow::Result;
use shoplist_core::storage::{restore, snapshot};
use shoplist_core::{
    Authenticator, Category, Description, Email, ListStore, Manufacturer, Name, Password, Price,
    Product, Quantity, Session, ShoppingList, StorageBackend, Username,
};
use std::fmt::Display;
use std::io;

pub const EMPTY_LIST_NOTICE: &str = "Continuing with an empty list of item...";

const TABLE_WIDTH: usize = 158;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInAction {
    Welcome,
    Login,
    Register,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    ShowItems,
    AddSmartphone,
    AddComputer,
    RemoveItem,
    ChangeQuantity,
    SortByManufacturer,
    SortByPrice,
    Clear,
    Exit,
}

fn sign_in_menu() -> Result<Menu<SignInAction>> {
    Menu::builder("SIGN IN")
        .auto_select(SignInAction::Welcome)
        .with_entry(Entry::new("1", "Login", SignInAction::Login))
        .with_entry(Entry::new("2", "Register", SignInAction::Register))
        .with_entry(Entry::exit("0", "Exit", SignInAction::Exit))
        .build()
}

fn shopping_list_menu() -> Result<Menu<ListAction>> {
    Menu::builder("SHOPPING LIST")
        .auto_select(ListAction::ShowItems)
        .with_entry(Entry::new("1", "Add Smartphone", ListAction::AddSmartphone))
        .with_entry(Entry::new("2", "Add Computer", ListAction::AddComputer))
        .with_entry(Entry::new("3", "Remove Item", ListAction::RemoveItem))
        .with_entry(Entry::new("4", "Change quantity", ListAction::ChangeQuantity))
        .with_entry(Entry::new("5", "Sort by Manufacturer", ListAction::SortByManufacturer))
        .with_entry(Entry::new("6", "Sort by Price", ListAction::SortByPrice))
        .with_entry(Entry::new("7", "Clear list", ListAction::Clear))
        .with_entry(Entry::exit("0", "Exit", ListAction::Exit))
        .build()
}

/// A 1-based slot number, or 0 to cancel, for a list of `size` items.
fn parse_index(text: &str, size: usize) -> Result<usize, String> {
    let index = text
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a valid index", text))?;
    if index > size {
        return Err(format!("Index must be between 0 and {}", size));
    }
    Ok(index)
}

pub struct App<C: Console> {
    console: C,
    list: ShoppingList,
    store: Box<dyn ListStore>,
    auth: Box<dyn Authenticator>,
    backend: StorageBackend,
    session: Option<Session>,
    sign_in_menu: Menu<SignInAction>,
    list_menu: Menu<ListAction>,
}

impl<C: Console> App<C> {
    pub fn new(
        console: C,
        store: Box<dyn ListStore>,
        auth: Box<dyn Authenticator>,
        backend: StorageBackend,
    ) -> Result<Self> {
        Ok(Self {
            console,
            list: ShoppingList::new(),
            store,
            auth,
            backend,
            session: None,
            sign_in_menu: sign_in_menu()?,
            list_menu: shopping_list_menu()?,
        })
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Runs until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        log::info!("Using {}", self.store.describe());
        match self.run_sign_in().await {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                log::info!("Input closed, leaving");
                Ok(())
            }
            other => Ok(other?),
        }
    }

    async fn run_sign_in(&mut self) -> io::Result<()> {
        if self.backend == StorageBackend::File {
            self.load().await;
        }

        loop {
            if let Some(action) = self.sign_in_menu.auto_select().copied() {
                self.perform_sign_in(action).await?;
            }
            self.sign_in_menu.print(&mut self.console);
            let action = *self.sign_in_menu.select(&mut self.console)?.action();
            if !self.perform_sign_in(action).await? {
                return Ok(());
            }
        }
    }

    /// Returns false once the user chose to leave.
    async fn perform_sign_in(&mut self, action: SignInAction) -> io::Result<bool> {
        match action {
            SignInAction::Welcome => self.console.print("Welcome!"),
            SignInAction::Login => {
                if self.try_login().await? {
                    self.run_shopping_list().await?;
                }
            }
            SignInAction::Register => {
                if self.try_register().await? {
                    self.run_shopping_list().await?;
                }
            }
            SignInAction::Exit => {
                self.console.print("Bye!");
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn run_shopping_list(&mut self) -> io::Result<()> {
        loop {
            if let Some(action) = self.list_menu.auto_select().copied() {
                self.perform(action).await?;
            }
            self.list_menu.print(&mut self.console);
            let action = *self.list_menu.select(&mut self.console)?.action();
            if action == ListAction::Exit {
                self.console.print("Bye!");
                return Ok(());
            }
            self.perform(action).await?;
        }
    }

    async fn perform(&mut self, action: ListAction) -> io::Result<()> {
        match action {
            ListAction::ShowItems => self.print_items(),
            ListAction::AddSmartphone => self.add_item(Product::smartphone).await?,
            ListAction::AddComputer => self.add_item(Product::computer).await?,
            ListAction::RemoveItem => self.remove_item().await?,
            ListAction::ChangeQuantity => self.change_quantity().await?,
            ListAction::SortByManufacturer => {
                self.list.sort_by_manufacturer();
                self.save().await;
            }
            ListAction::SortByPrice => {
                self.list.sort_by_price();
                self.save().await;
            }
            ListAction::Clear => {
                self.list.clear();
                self.save().await;
                self.console.print("List cleared!");
            }
            ListAction::Exit => {}
        }
        Ok(())
    }

    async fn try_login(&mut self) -> io::Result<bool> {
        let username = self.read("Username", |s: &str| Username::new(s))?;
        let password = self.read_secret("Password", |s: &str| Password::new(s))?;

        match self.auth.login(&username, &password).await {
            Ok(session) => {
                self.start_session(session).await;
                Ok(true)
            }
            Err(e) => {
                self.console.print(&e.to_string());
                Ok(false)
            }
        }
    }

    async fn try_register(&mut self) -> io::Result<bool> {
        let username = self.read("Username", |s: &str| Username::new(s))?;
        let email = self.read("Email", |s: &str| Email::new(s))?;
        let password = self.read_secret("Password", |s: &str| Password::new(s))?;

        match self.auth.register(&username, &email, &password).await {
            Ok(session) => {
                self.start_session(session).await;
                Ok(true)
            }
            Err(e) => {
                self.console.print(&e.to_string());
                Ok(false)
            }
        }
    }

    async fn start_session(&mut self, session: Session) {
        self.store.attach_session(&session);
        self.session = Some(session);
        if self.backend == StorageBackend::Remote {
            self.load().await;
        }
    }

    async fn load(&mut self) {
        let result = match self.store.load().await {
            Ok(records) => restore(&records),
            Err(e) => Err(e),
        };
        match result {
            Ok(list) => {
                log::info!("Loaded {} items from {}", list.items(), self.store.describe());
                self.list = list;
            }
            Err(e) => {
                log::warn!("Failed to load the shopping list: {}", e);
                self.console.print(&e.to_string());
                self.console.print(EMPTY_LIST_NOTICE);
                self.list = ShoppingList::new();
            }
        }
    }

    async fn save(&mut self) {
        let records = snapshot(&self.list);
        if let Err(e) = self.store.save(&records).await {
            log::error!("Failed to save the shopping list: {}", e);
            self.console
                .print(&format!("Could not save the shopping list: {}", e));
        }
    }

    fn print_items(&mut self) {
        let separator = "-".repeat(TABLE_WIDTH);
        self.console.print(&separator);
        self.console.print(&format!(
            "{:>3} {:<30} {:<30} {:<30} {:>10} {:>50}",
            "#", "NAME", "MANUFACTURER", "PRICE", "QUANTITY", "DESCRIPTION"
        ));
        self.console.print(&separator);
        let rows: Vec<String> = self
            .list
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "{:>3} {:<30} {:<30} {:<30} {:>10} {:>50}",
                    i + 1,
                    item.name().value(),
                    item.manufacturer().value(),
                    item.price().to_string(),
                    item.quantity().value(),
                    item.description().value()
                )
            })
            .collect();
        for row in rows {
            self.console.print(&row);
        }
        self.console.print(&separator);
        if !self.list.is_empty() {
            if let Ok(total) = self.list.total_price() {
                self.console.print(&format!("Total: {}", total));
            }
        }
    }

    async fn add_item(
        &mut self,
        make: fn(Name, Manufacturer, Price, Quantity, Description) -> Product,
    ) -> io::Result<()> {
        let name = self.read("Name", |s: &str| Name::new(s))?;
        let manufacturer = self.read("Manufacturer", |s: &str| Manufacturer::new(s))?;
        let quantity = self.read("Quantity", Quantity::cast)?;
        let price = self.read("Price", Price::parse)?;
        let description = self.read("Description", |s: &str| Description::new(s))?;

        let product = make(name, manufacturer, price, quantity, description);
        let category = product.category();
        let added = match category {
            Category::Smartphone => self.list.add_smartphone(product),
            Category::Computer => self.list.add_computer(product),
        };
        match added {
            Ok(()) => {
                self.save().await;
                self.console.print(&format!("{} added!", category));
            }
            Err(e) => self.console.print(&e.to_string()),
        }
        Ok(())
    }

    async fn remove_item(&mut self) -> io::Result<()> {
        let size = self.list.items();
        let index = self.read("Index (0 to cancel operation)", |s: &str| parse_index(s, size))?;
        if index == 0 {
            self.console.print("Operation cancelled!");
            return Ok(());
        }
        match self.list.remove_item(index - 1) {
            Ok(_) => {
                self.save().await;
                self.console.print("Item removed!");
            }
            Err(e) => self.console.print(&e.to_string()),
        }
        Ok(())
    }

    async fn change_quantity(&mut self) -> io::Result<()> {
        let size = self.list.items();
        let index = self.read("Index (0 to cancel operation)", |s: &str| parse_index(s, size))?;
        if index == 0 {
            self.console.print("Operation cancelled!");
            return Ok(());
        }
        let quantity = self.read("New Quantity", Quantity::cast)?;
        match self.list.change_quantity(index - 1, quantity) {
            Ok(()) => {
                self.save().await;
                self.console.print("Quantity changed!");
            }
            Err(e) => self.console.print(&e.to_string()),
        }
        Ok(())
    }

    /// Prompts until `parse` accepts the trimmed line, printing each rejection.
    fn read<T, E: Display>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let line = self.console.read_line(prompt)?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.console.print(&e.to_string()),
            }
        }
    }

    fn read_secret<T, E: Display>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let line = self.console.read_secret(prompt)?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.console.print(&e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_bounds() {
        assert_eq!(parse_index("0", 3).unwrap(), 0);
        assert_eq!(parse_index("3", 3).unwrap(), 3);
        assert!(parse_index("4", 3).is_err());
        assert!(parse_index("-1", 3).is_err());
        assert!(parse_index("one", 3).is_err());
    }

    #[test]
    fn test_menus_build() {
        assert_eq!(sign_in_menu().unwrap().entries().len(), 3);
        assert_eq!(shopping_list_menu().unwrap().entries().len(), 8);
    }
}
