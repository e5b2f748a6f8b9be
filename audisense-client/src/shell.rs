//! Line-oriented interactive front end
//!
//! Each input line is one command. After every command the current screen is
//! rendered again from the presenter. List reloads also draw an intermediate
//! frame while the request is in flight.

use audisense_common::time::parse_iso8601;
use audisense_common::HearingTestId;

use crate::gateway::DataGateway;
use crate::presentation::{FormAction, HearingTestsPresenter, Mode};
use crate::render::{render_detail, render_screen};

pub const HELP: &str = "\
Commands:
  list | refresh        reload the list
  new                   open an empty form
  edit <id>             open the form for a listed hearing test
  delete <id>           delete a listed hearing test
  show <id>             fetch and show one hearing test
  tester <name>         set the tester name (form)
  date <iso-8601>       set the date conducted (form)
  result <text>         set the result (form)
  save | cancel         close the form
  back                  previous view
  help                  this text
  quit                  leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Keep reading; print the text
    Continue(String),
    Quit,
}

pub struct Shell<G> {
    presenter: HearingTestsPresenter<G>,
}

impl<G: DataGateway> Shell<G> {
    pub fn new(presenter: HearingTestsPresenter<G>) -> Self {
        Self { presenter }
    }

    pub fn presenter(&self) -> &HearingTestsPresenter<G> {
        &self.presenter
    }

    /// Load the list and render the first screen
    pub async fn start(&mut self, draw: &mut dyn FnMut(&str)) -> String {
        self.reload(draw).await;
        render_screen(&self.presenter)
    }

    /// `draw` receives frames rendered before the command completes
    pub async fn execute(&mut self, line: &str, draw: &mut dyn FnMut(&str)) -> ShellOutcome {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let command = command.to_ascii_lowercase();

        let note = match command.as_str() {
            "" => None,
            "quit" | "exit" => return ShellOutcome::Quit,
            "help" => return ShellOutcome::Continue(HELP.to_string()),
            "list" | "refresh" => {
                self.reload(draw).await;
                None
            }
            "new" => {
                self.presenter.begin_create();
                None
            }
            "edit" => match parse_id(rest) {
                Ok(id) => {
                    self.presenter.begin_edit(id);
                    None
                }
                Err(note) => Some(note),
            },
            "delete" => match parse_id(rest) {
                Ok(id) => {
                    self.presenter.delete(id).await;
                    None
                }
                Err(note) => Some(note),
            },
            "show" => match parse_id(rest) {
                Ok(id) => match self.presenter.client().get(id).await {
                    Some(view) => return ShellOutcome::Continue(render_detail(&view)),
                    None => Some(format!("Hearing test {} not found", id)),
                },
                Err(note) => Some(note),
            },
            "tester" | "date" | "result" => self.set_field(&command, rest),
            "save" => {
                self.presenter.submit(FormAction::Save).await;
                None
            }
            "cancel" => {
                self.presenter.submit(FormAction::Cancel).await;
                None
            }
            "back" => {
                if self.presenter.navigate_back().is_none() {
                    Some("Nothing to go back to".to_string())
                } else {
                    None
                }
            }
            other => Some(format!("Unknown command '{}'; type 'help'", other)),
        };

        let mut out = String::new();
        if let Some(note) = note {
            out.push_str(&note);
            out.push('\n');
        }
        out.push_str(&render_screen(&self.presenter));
        ShellOutcome::Continue(out)
    }

    async fn reload(&mut self, draw: &mut dyn FnMut(&str)) {
        let ticket = self.presenter.begin_show_list();
        draw(&render_screen(&self.presenter));
        let result = self.presenter.client().list().await;
        self.presenter.apply_list_load(ticket, result);
    }

    fn set_field(&mut self, field: &str, value: &str) -> Option<String> {
        if self.presenter.mode() == Mode::ViewingList {
            return Some("No form is open; use 'new' or 'edit <id>'".to_string());
        }

        let form = self.presenter.form_mut();
        match field {
            "tester" => form.tester_name = value.to_string(),
            "result" => form.result = value.to_string(),
            _ => match parse_iso8601(value) {
                Ok(date) => form.date_conducted = date,
                Err(e) => return Some(format!("Invalid date '{}': {}", value, e)),
            },
        }
        None
    }
}

fn parse_id(raw: &str) -> Result<HearingTestId, String> {
    raw.parse()
        .map_err(|_| format!("Expected a numeric id, got '{}'", raw))
}
