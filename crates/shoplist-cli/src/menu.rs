//! Numbered text menus.
//!
//! A menu only maps what the user types to an action value; performing the
//! action is up to the caller.

use crate::console::Console;
use anyhow::{bail, Result};
use std::io;

pub const INVALID_SELECTION: &str = "Invalid selection. Please, try again!";

#[derive(Debug, Clone)]
pub struct Entry<A> {
    key: String,
    label: String,
    action: A,
    is_exit: bool,
}

impl<A> Entry<A> {
    pub fn new(key: &str, label: &str, action: A) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            action,
            is_exit: false,
        }
    }

    pub fn exit(key: &str, label: &str, action: A) -> Self {
        Self {
            is_exit: true,
            ..Self::new(key, label, action)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

#[derive(Debug, Clone)]
pub struct Menu<A> {
    title: String,
    auto_select: Option<A>,
    entries: Vec<Entry<A>>,
}

impl<A: Clone> Menu<A> {
    pub fn builder(title: &str) -> MenuBuilder<A> {
        MenuBuilder {
            title: title.to_string(),
            auto_select: None,
            entries: Vec::new(),
        }
    }

    /// Action to perform each time before the menu is shown.
    pub fn auto_select(&self) -> Option<&A> {
        self.auto_select.as_ref()
    }

    pub fn entries(&self) -> &[Entry<A>] {
        &self.entries
    }

    pub fn print<C: Console>(&self, console: &mut C) {
        console.print(&format!("*** {} ***", self.title));
        for entry in self.entries() {
            console.print(&format!("{}:\t{}", entry.key(), entry.label));
        }
    }

    /// Reads keys until one matches an entry.
    pub fn select<C: Console>(&self, console: &mut C) -> io::Result<&Entry<A>> {
        loop {
            let line = console.read_line("?")?;
            let key = line.trim();
            match self.entries().iter().find(|e| e.key() == key) {
                Some(entry) => return Ok(entry),
                None => console.print(INVALID_SELECTION),
            }
        }
    }
}

pub struct MenuBuilder<A> {
    title: String,
    auto_select: Option<A>,
    entries: Vec<Entry<A>>,
}

impl<A: Clone> MenuBuilder<A> {
    pub fn auto_select(mut self, action: A) -> Self {
        self.auto_select = Some(action);
        self
    }

    pub fn with_entry(mut self, entry: Entry<A>) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<Menu<A>> {
        if self.title.trim().is_empty() {
            bail!("Menu title must not be empty");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.key.is_empty()
                || entry.key.len() > 10
                || !entry.key.chars().all(|c| c.is_ascii_alphanumeric())
            {
                bail!("Invalid menu key '{}'", entry.key);
            }
            if entry.label.trim().is_empty() {
                bail!("Menu entry '{}' has an empty label", entry.key);
            }
            if self.entries[..i].iter().any(|e| e.key == entry.key) {
                bail!("Duplicate menu key '{}'", entry.key);
            }
        }
        match self.entries.iter().filter(|e| e.is_exit).count() {
            1 => {}
            0 => bail!("Menu '{}' has no exit entry", self.title),
            _ => bail!("Menu '{}' has more than one exit entry", self.title),
        }
        Ok(Menu {
            title: self.title,
            auto_select: self.auto_select,
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::StdioConsole;
    use std::io::Cursor;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Refresh,
        Hello,
        Quit,
    }

    fn menu() -> Menu<Action> {
        Menu::builder("TEST")
            .auto_select(Action::Refresh)
            .with_entry(Entry::new("1", "Hello", Action::Hello))
            .with_entry(Entry::exit("0", "Exit", Action::Quit))
            .build()
            .unwrap()
    }

    #[test]
    fn test_print_format() {
        let mut console = StdioConsole::new(Cursor::new(""), Vec::new());
        menu().print(&mut console);
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "*** TEST ***\n1:\tHello\n0:\tExit\n");
    }

    #[test]
    fn test_select_retries_until_known_key() {
        let mut console = StdioConsole::new(Cursor::new("9\nabc\n 1 \n"), Vec::new());
        let menu = menu();
        let entry = menu.select(&mut console).unwrap();
        assert_eq!(entry.action(), &Action::Hello);
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches(INVALID_SELECTION).count(), 2);
    }

    #[test]
    fn test_auto_select() {
        assert_eq!(menu().auto_select(), Some(&Action::Refresh));
    }

    #[test]
    fn test_builder_rejects_duplicate_keys() {
        let result = Menu::builder("TEST")
            .with_entry(Entry::new("1", "Hello", Action::Hello))
            .with_entry(Entry::new("1", "Again", Action::Hello))
            .with_entry(Entry::exit("0", "Exit", Action::Quit))
            .build();
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_builder_requires_single_exit() {
        let none = Menu::builder("TEST")
            .with_entry(Entry::new("1", "Hello", Action::Hello))
            .build();
        assert!(none.is_err());

        let two = Menu::builder("TEST")
            .with_entry(Entry::exit("0", "Exit", Action::Quit))
            .with_entry(Entry::exit("9", "Quit", Action::Quit))
            .build();
        assert!(two.is_err());
    }

    #[test]
    fn test_builder_rejects_bad_keys_and_labels() {
        assert!(Menu::builder("TEST")
            .with_entry(Entry::exit("<0>", "Exit", Action::Quit))
            .build()
            .is_err());
        assert!(Menu::builder("TEST")
            .with_entry(Entry::exit("0", " ", Action::Quit))
            .build()
            .is_err());
    }
}
