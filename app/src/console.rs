//! Line-oriented console surface.
//!
//! Maps the page's controls onto commands: `list` is the refresh control,
//! `add` fills and submits the create form field by field, `edit <id>`
//! opens the inline form (Enter keeps a field's current value) and then
//! saves or cancels, `delete <id>` asks for confirmation first. Alerts
//! block until the user presses Enter, like their browser counterpart.

use std::io::{self, BufRead, Write};

use students_core::StudentId;

use crate::session::{Session, UserIo};
use crate::transport::Transport;

pub struct ConsoleIo;

impl UserIo for ConsoleIo {
    fn alert(&mut self, message: &str) {
        print!("\n{message} [Enter] ");
        io::stdout().flush().ok();
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt with a pre-populated value; Enter keeps it.
fn prompt_default(label: &str, current: &str) -> io::Result<String> {
    let typed = prompt(&format!("{label} [{current}]"))?;
    Ok(if typed.is_empty() {
        current.to_string()
    } else {
        typed
    })
}

fn add_flow<T: Transport>(session: &mut Session<T, ConsoleIo>) -> io::Result<()> {
    session.create_form.first_name = prompt("First name")?;
    session.create_form.last_name = prompt("Last name")?;
    session.create_form.dob = prompt("Date of birth (YYYY-MM-DD)")?;
    session.create_form.amount_due = prompt("Amount due")?;
    session.submit_create();
    Ok(())
}

fn edit_flow<T: Transport>(
    session: &mut Session<T, ConsoleIo>,
    id: StudentId,
) -> io::Result<()> {
    session.begin_edit(id);
    // begin_edit already alerted if the fetch failed or the id is not on screen.
    let mut edited = match session.view.edit_form_mut(id) {
        Some(form) => form.clone(),
        None => return Ok(()),
    };

    edited.first_name = prompt_default("First name", &edited.first_name)?;
    edited.last_name = prompt_default("Last name", &edited.last_name)?;
    edited.dob = prompt_default("Date of birth", &edited.dob)?;
    edited.amount_due = prompt_default("Amount due", &edited.amount_due)?;

    if session.ui.confirm("Save changes?") {
        if let Some(form) = session.view.edit_form_mut(id) {
            *form = edited;
        }
        session.submit_edit(id);
    } else {
        session.cancel_edit(id);
    }
    Ok(())
}

pub fn run<T: Transport>(mut session: Session<T, ConsoleIo>) -> io::Result<()> {
    session.refresh();
    loop {
        println!();
        print!("{}", session.view.render());
        println!();
        println!("commands: list | add | edit <id> | delete <id> | quit");
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(()); // EOF
        }
        let mut parts = line.split_whitespace();
        let command = parts.next();
        let id: Option<StudentId> = parts.next().and_then(|s| s.parse().ok());

        match (command, id) {
            (Some("list") | Some("refresh"), _) => session.refresh(),
            (Some("add"), _) => add_flow(&mut session)?,
            (Some("edit"), Some(id)) => edit_flow(&mut session, id)?,
            (Some("edit"), None) => println!("usage: edit <id>"),
            (Some("delete"), Some(id)) => session.delete(id),
            (Some("delete"), None) => println!("usage: delete <id>"),
            (Some("quit") | Some("exit"), _) => return Ok(()),
            (Some(other), _) => println!("unknown command: {other}"),
            (None, _) => {}
        }
    }
}
