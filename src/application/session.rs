//! Interactive menu session driving a [`ContactDirectory`]
//!
//! The session owns no tree logic: it prompts, validates required fields,
//! calls the directory and maps outcomes to messages.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info, instrument};

use crate::application::{render, ApplicationError, ApplicationResult, Console};
use crate::config::Settings;
use crate::domain::{
    ContactDirectory, ContactRecord, ContactUpdate, DeleteOutcome, InsertOutcome,
};

pub const MSG_ADDED: &str = "Contact Added Successfully";
pub const MSG_EXISTS: &str = "Contact with this name already exists!";
pub const MSG_NOT_FOUND: &str = "Contact does not exist";
pub const MSG_EMPTY: &str = "No contacts available.";
pub const MSG_GOODBYE: &str = "GoodBye!";

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add = 1,
    Search = 2,
    Update = 3,
    Delete = 4,
    Display = 5,
    Exit = 6,
    ShowTree = 7,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add,
        MenuChoice::Search,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Display,
        MenuChoice::Exit,
        MenuChoice::ShowTree,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Contact",
            MenuChoice::Search => "Search Contact",
            MenuChoice::Update => "Update Contact",
            MenuChoice::Delete => "Delete Contact",
            MenuChoice::Display => "Display All Contacts",
            MenuChoice::Exit => "Exit",
            MenuChoice::ShowTree => "Show Contact Tree",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a number: {s}"))?;
        MenuChoice::ALL
            .into_iter()
            .find(|c| c.number() == n)
            .ok_or_else(|| format!("no menu entry {n}"))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W> {
    directory: ContactDirectory,
    console: Console<R, W>,
    settings: Settings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        Self {
            directory: ContactDirectory::new(),
            console: Console::new(input, output),
            settings,
        }
    }

    /// Start from an existing directory instead of an empty one.
    pub fn with_directory(mut self, directory: ContactDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    pub fn into_parts(self) -> (ContactDirectory, R, W) {
        let (input, output) = self.console.into_inner();
        (self.directory, input, output)
    }

    /// Run the menu loop until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> ApplicationResult<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(ApplicationError::InputClosed) => {
                    debug!("input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        info!(contacts = self.directory.len(), "session finished");
        Ok(())
    }

    fn step(&mut self) -> ApplicationResult<Flow> {
        self.show_menu()?;
        let answer = self.console.ask(&self.settings.prompt)?;
        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(reason) => {
                debug!(%reason, "invalid menu choice");
                self.console.warning(format!(
                    "Invalid input. Please enter 1-{}.",
                    MenuChoice::ALL.len()
                ))?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?choice, "menu");

        match choice {
            MenuChoice::Add => self.add_contact()?,
            MenuChoice::Search => self.search_contact()?,
            MenuChoice::Update => self.update_contact()?,
            MenuChoice::Delete => self.delete_contact()?,
            MenuChoice::Display => self.display_contacts()?,
            MenuChoice::Exit => return self.confirm_exit(),
            MenuChoice::ShowTree => self.show_tree()?,
        }
        Ok(Flow::Continue)
    }

    fn show_menu(&mut self) -> ApplicationResult<()> {
        self.console.blank()?;
        self.console.header(&self.settings.banner)?;
        for choice in MenuChoice::ALL {
            self.console.info(choice)?;
        }
        Ok(())
    }

    fn add_contact(&mut self) -> ApplicationResult<()> {
        let name = self.console.ask_required("Enter name: ", "Name")?;
        let phone = self.console.ask_required("Enter Phone: ", "Phone")?;
        let email = self.console.ask_optional("Enter Email (optional): ")?;
        let address = self.console.ask_optional("Enter Address (optional): ")?;

        let mut record = ContactRecord::new(name, phone)?;
        record.email = email;
        record.address = address;

        match self.directory.insert(record)? {
            InsertOutcome::Added => self.console.success(MSG_ADDED),
            InsertOutcome::AlreadyExists => self.console.warning(MSG_EXISTS),
        }
    }

    fn search_contact(&mut self) -> ApplicationResult<()> {
        let name = self
            .console
            .ask_required("Enter Contact name to Search: ", "Name")?;
        match self.directory.find(&name) {
            Some(record) => {
                let line = render::record_line(record, &self.settings.display);
                self.console.info(line)
            }
            None => self.console.warning(MSG_NOT_FOUND),
        }
    }

    fn update_contact(&mut self) -> ApplicationResult<()> {
        let name = self
            .console
            .ask_required("Enter name of Contact to Update: ", "Name")?;
        let phone = self
            .console
            .ask_required("Enter Updated Phone: ", "Phone")?;
        let email = self
            .console
            .ask_optional("Enter Updated Email (optional): ")?;
        let address = self
            .console
            .ask_optional("Enter Updated Address (optional): ")?;

        let changes = ContactUpdate {
            phone: Some(phone),
            email,
            address,
        };
        let details = self
            .directory
            .update(&name, &changes)
            .map(|record| {
                (
                    record.name.clone(),
                    render::record_details(record, &self.settings.display),
                )
            });

        self.console.blank()?;
        match details {
            Some((stored_name, lines)) => {
                self.console.success(format!(
                    "The Contact {} was Updated, new details below",
                    stored_name
                ))?;
                for line in lines {
                    self.console.info(line)?;
                }
                Ok(())
            }
            None => self
                .console
                .warning(format!("The Contact '{}' could not be found", name)),
        }
    }

    fn delete_contact(&mut self) -> ApplicationResult<()> {
        let name = self
            .console
            .ask_required("Enter Contact name to Delete: ", "Name")?;
        match self.directory.delete(&name) {
            DeleteOutcome::Deleted => self
                .console
                .success(format!("'{}' deleted successfully", name)),
            DeleteOutcome::NotFound => self.console.warning(MSG_NOT_FOUND),
        }
    }

    fn display_contacts(&mut self) -> ApplicationResult<()> {
        self.console.blank()?;
        self.console.header("----- Contact List -----")?;
        if self.directory.is_empty() {
            return self.console.info(MSG_EMPTY);
        }
        let lines: Vec<String> = self
            .directory
            .iter()
            .map(|record| render::record_line(record, &self.settings.display))
            .collect();
        for line in lines {
            self.console.info(line)?;
        }
        Ok(())
    }

    fn show_tree(&mut self) -> ApplicationResult<()> {
        match render::directory_tree(&self.directory) {
            Some(tree) => {
                debug!(height = self.directory.height(), "tree");
                self.console.info(tree.trim_end())
            }
            None => self.console.info(MSG_EMPTY),
        }
    }

    fn confirm_exit(&mut self) -> ApplicationResult<Flow> {
        if self.settings.confirm_exit {
            let answer = self.console.ask("Wanna leave(y/n)): ")?;
            if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                return Ok(Flow::Continue);
            }
        }
        self.console.info(MSG_GOODBYE)?;
        Ok(Flow::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", MenuChoice::Add)]
    #[case(" 5 ", MenuChoice::Display)]
    #[case("6", MenuChoice::Exit)]
    #[case("7", MenuChoice::ShowTree)]
    fn given_menu_number_when_parsing_then_maps_to_choice(
        #[case] input: &str,
        #[case] expected: MenuChoice,
    ) {
        assert_eq!(input.parse::<MenuChoice>().unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("8")]
    #[case("add")]
    #[case("")]
    fn given_invalid_menu_input_when_parsing_then_errors(#[case] input: &str) {
        assert!(input.parse::<MenuChoice>().is_err());
    }

    #[test]
    fn given_choice_when_displayed_then_numbered_label() {
        assert_eq!(MenuChoice::Update.to_string(), "3. Update Contact");
    }
}
