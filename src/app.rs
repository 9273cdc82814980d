use crate::config::FormConfig;
use crate::form::{FieldId, LoginForm, LoginHandler, SubmitOutcome};
use crate::runtime::command::Command;
use crate::widgets::{Input, KeyResult, PasswordInput, TextInput};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    Button,
}

const FOCUS_ORDER: [FocusTarget; 3] = [
    FocusTarget::Field(FieldId::Email),
    FocusTarget::Field(FieldId::Password),
    FocusTarget::Button,
];

/// Login form plus the editing buffers and focus ring that drive it.
pub struct App {
    form: LoginForm,
    email_input: TextInput,
    password_input: PasswordInput,
    focus: FocusTarget,
    submitted: bool,
    should_exit: bool,
}

impl App {
    pub fn new(config: &FormConfig, on_login: impl LoginHandler + 'static) -> Self {
        let mut form = LoginForm::new(config, on_login);
        form.set_focus(Some(FieldId::Email));
        let email_input =
            TextInput::new(FieldId::Email).with_value(form.field(FieldId::Email).value.clone());

        Self {
            form,
            email_input,
            password_input: PasswordInput::new(FieldId::Password),
            focus: FocusTarget::Field(FieldId::Email),
            submitted: false,
            should_exit: false,
        }
    }

    pub fn mount(&mut self, now: Instant) {
        self.form.mount(now);
    }

    pub fn unmount(&mut self) {
        self.form.unmount();
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn input(&self, id: FieldId) -> &dyn Input {
        match id {
            FieldId::Email => &self.email_input,
            FieldId::Password => &self.password_input,
        }
    }

    fn input_mut(&mut self, id: FieldId) -> &mut dyn Input {
        match id {
            FieldId::Email => &mut self.email_input,
            FieldId::Password => &mut self.password_input,
        }
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    /// Returns true when the view needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.form.tick(now) > 0
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.form.poll_timeout(now, default_timeout)
    }

    /// Returns true when the view needs a redraw.
    pub fn handle_command(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Exit => {
                self.request_exit();
                false
            }
            Command::Submit => self.submit(now),
            Command::NextFocus => {
                self.move_focus(self.neighbour(1), now);
                true
            }
            Command::PrevFocus => {
                self.move_focus(self.neighbour(FOCUS_ORDER.len() - 1), now);
                true
            }
            Command::InputKey(key) => {
                let FocusTarget::Field(id) = self.focus else {
                    return false;
                };
                match self.input_mut(id).handle_key(key.code, key.modifiers) {
                    KeyResult::Changed => {
                        let value = self.input(id).value().to_string();
                        self.form.user_input(id, value, now);
                        true
                    }
                    KeyResult::Handled => true,
                    KeyResult::Submit => self.submit(now),
                    KeyResult::NotHandled => false,
                }
            }
        }
    }

    fn submit(&mut self, now: Instant) -> bool {
        if !self.form.submit_enabled() {
            debug!("login button disabled, ignoring submit");
            return false;
        }
        match self.form.submit() {
            SubmitOutcome::Submitted => {
                self.submitted = true;
                self.should_exit = true;
            }
            SubmitOutcome::Focused(id) => self.move_focus(FocusTarget::Field(id), now),
        }
        true
    }

    fn neighbour(&self, step: usize) -> FocusTarget {
        let index = FOCUS_ORDER
            .iter()
            .position(|target| *target == self.focus)
            .unwrap_or(0);
        FOCUS_ORDER[(index + step) % FOCUS_ORDER.len()]
    }

    fn move_focus(&mut self, target: FocusTarget, now: Instant) {
        if target == self.focus {
            return;
        }
        if let FocusTarget::Field(previous) = self.focus {
            self.form.blur(previous, now);
        }
        self.focus = target;
        self.form.set_focus(match target {
            FocusTarget::Field(id) => Some(id),
            FocusTarget::Button => None,
        });
    }
}
