//! Integration tests for the interactive session driven by scripted input

use std::io::Cursor;

use rstest::rstest;

use contactbook::application::Session;
use contactbook::config::Settings;
use contactbook::util::testing;
use contactbook::{ContactDirectory, ContactRecord};

/// Run a session over `script` and return the final directory plus output.
fn run_session(
    settings: Settings,
    directory: ContactDirectory,
    script: &str,
) -> (ContactDirectory, String) {
    testing::init_test_setup();
    colored::control::set_override(false);

    let input = Cursor::new(script.as_bytes().to_vec());
    let mut session = Session::new(settings, input, Vec::new()).with_directory(directory);
    session.run().expect("session runs");

    let (directory, _, output) = session.into_parts();
    (directory, String::from_utf8(output).expect("utf8 output"))
}

fn run(script: &str) -> (ContactDirectory, String) {
    run_session(Settings::default(), ContactDirectory::new(), script)
}

fn seeded() -> ContactDirectory {
    let mut dir = ContactDirectory::new();
    dir.insert(ContactRecord::new("Bob", "555-1").unwrap().with_email("a@x"))
        .unwrap();
    dir.insert(ContactRecord::new("alice", "555-2").unwrap())
        .unwrap();
    dir.insert(ContactRecord::new("Carl", "555-3").unwrap())
        .unwrap();
    dir
}

// ============================================================
// Menu and exit
// ============================================================

#[test]
fn given_empty_input_when_running_then_shows_menu_and_ends_cleanly() {
    let (dir, out) = run("");

    assert!(dir.is_empty());
    assert!(out.contains("Hello Welcome to Contact Book."));
    assert!(out.contains("1. Add Contact"));
    assert!(out.contains("6. Exit"));
    assert!(out.contains("7. Show Contact Tree"));
}

#[rstest]
#[case("y")]
#[case("Y")]
#[case("yes")]
fn given_exit_confirmed_when_running_then_says_goodbye(#[case] answer: &str) {
    let (_, out) = run(&format!("6\n{answer}\n1\nnever\n"));

    assert!(out.contains("Wanna leave(y/n)): "));
    assert!(out.contains("GoodBye!"));
    assert!(!out.contains("Enter name: "), "session should stop at exit");
}

#[test]
fn given_exit_declined_when_running_then_returns_to_menu() {
    let (_, out) = run("6\nn\n5\n");

    assert!(!out.contains("GoodBye!"));
    assert!(out.contains("No contacts available."));
}

#[test]
fn given_confirm_exit_disabled_when_exiting_then_leaves_without_asking() {
    let settings = Settings {
        confirm_exit: false,
        ..Settings::default()
    };
    let (_, out) = run_session(settings, ContactDirectory::new(), "6\n");

    assert!(!out.contains("Wanna leave"));
    assert!(out.contains("GoodBye!"));
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("9")]
fn given_invalid_menu_choice_when_running_then_reports_range(#[case] choice: &str) {
    let (_, out) = run(&format!("{choice}\n"));
    assert!(out.contains("Invalid input. Please enter 1-7."));
}

// ============================================================
// Add
// ============================================================

#[test]
fn given_add_with_optionals_skipped_when_running_then_contact_is_stored() {
    let (dir, out) = run("1\nBob\n555-1\n\n\n");

    assert!(out.contains("Contact Added Successfully"));
    let bob = dir.find("bob").expect("stored");
    assert_eq!(bob.phone, "555-1");
    assert_eq!(bob.email, None);
    assert_eq!(bob.address, None);
}

#[test]
fn given_empty_required_fields_when_adding_then_reprompts() {
    let (dir, out) = run("1\n\nBob\n  \n555-1\na@x\nMain St\n");

    assert!(out.contains("Name cannot be empty"));
    assert!(out.contains("Phone cannot be empty"));
    let bob = dir.find("Bob").unwrap();
    assert_eq!(bob.email.as_deref(), Some("a@x"));
    assert_eq!(bob.address.as_deref(), Some("Main St"));
}

#[test]
fn given_duplicate_name_when_adding_then_reports_existing() {
    let (dir, out) = run("1\nBob\n1\n\n\n1\nBOB\n2\n\n\n");

    assert!(out.contains("Contact with this name already exists!"));
    assert_eq!(dir.len(), 1);
    assert_eq!(dir.find("bob").unwrap().phone, "1");
}

#[test]
fn given_input_closed_mid_add_when_running_then_ends_without_change() {
    let (dir, _) = run("1\nBob\n");
    assert!(dir.is_empty());
}

// ============================================================
// Search / display
// ============================================================

#[test]
fn given_existing_contact_when_searching_then_prints_record_line() {
    let (_, out) = run_session(Settings::default(), seeded(), "2\nBOB\n");
    assert!(out.contains("Bob - 555-1 - a@x - None"));
}

#[test]
fn given_missing_contact_when_searching_then_reports_not_found() {
    let (_, out) = run_session(Settings::default(), seeded(), "2\nZed\n");
    assert!(out.contains("Contact does not exist"));
}

#[test]
fn given_contacts_when_displaying_then_lists_in_case_insensitive_order() {
    let (_, out) = run_session(Settings::default(), seeded(), "5\n");

    assert!(out.contains("----- Contact List -----"));
    let alice = out.find("alice - 555-2").expect("alice listed");
    let bob = out.find("Bob - 555-1").expect("bob listed");
    let carl = out.find("Carl - 555-3").expect("carl listed");
    assert!(alice < bob && bob < carl);
}

#[test]
fn given_custom_display_when_displaying_then_uses_separator_and_placeholder() {
    let mut settings = Settings::default();
    settings.display.separator = " | ".into();
    settings.display.placeholder = "-".into();

    let (_, out) = run_session(settings, seeded(), "5\n");

    assert!(out.contains("alice | 555-2 | - | -"));
}

// ============================================================
// Update / delete / tree
// ============================================================

#[test]
fn given_existing_contact_when_updating_then_prints_new_details() {
    let (dir, out) = run_session(Settings::default(), seeded(), "3\ncarl\n999\nc@x\n\n");

    assert!(out.contains("The Contact Carl was Updated, new details below"));
    assert!(out.contains("Phone: 999"));
    assert!(out.contains("Email: c@x"));
    assert!(out.contains("Address: None"));
    let carl = dir.find("Carl").unwrap();
    assert_eq!(carl.phone, "999");
}

#[test]
fn given_missing_contact_when_updating_then_reports_not_found() {
    let (dir, out) = run_session(Settings::default(), seeded(), "3\nZed\n1\n\n\n");

    assert!(out.contains("The Contact 'Zed' could not be found"));
    assert_eq!(dir.len(), 3);
}

#[test]
fn given_existing_contact_when_deleting_then_confirms_and_removes() {
    let (dir, out) = run_session(Settings::default(), seeded(), "4\nbob\n");

    assert!(out.contains("'bob' deleted successfully"));
    assert_eq!(dir.len(), 2);
    assert!(dir.find("Bob").is_none());
}

#[test]
fn given_missing_contact_when_deleting_then_reports_not_found() {
    let (dir, out) = run_session(Settings::default(), seeded(), "4\nZed\n");

    assert!(out.contains("Contact does not exist"));
    assert_eq!(dir.len(), 3);
}

#[test]
fn given_contacts_when_showing_tree_then_root_is_first_insert() {
    let (_, out) = run_session(Settings::default(), seeded(), "7\n");

    let lines: Vec<&str> = out.lines().collect();
    let root = lines
        .iter()
        .position(|l| l.ends_with("Bob"))
        .expect("root line");
    assert!(lines[root + 1].ends_with("alice"));
    assert!(lines[root + 2].ends_with("Carl"));
}

#[test]
fn given_empty_directory_when_showing_tree_then_reports_empty() {
    let (_, out) = run("7\n");
    assert!(out.contains("No contacts available."));
}
