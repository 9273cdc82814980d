use crate::config::{FormConfig, ValidityMode};
use crate::form::field::{FieldAction, FieldId, FieldState, reduce};
use crate::form::scheduler::{FormEvent, Scheduler, SchedulerCommand};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const VALIDITY_CHECK_KEY: &str = "form-validity";

/// Receives credentials when the form is submitted.
pub trait LoginHandler {
    fn on_login(&mut self, email: &str, password: &str);
}

impl<F> LoginHandler for F
where
    F: FnMut(&str, &str),
{
    fn on_login(&mut self, email: &str, password: &str) {
        self(email, password)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Submission was blocked and focus moved to this field.
    Focused(FieldId),
}

pub struct LoginForm {
    mode: ValidityMode,
    debounce: Duration,
    email: FieldState,
    password: FieldState,
    form_is_valid: bool,
    focused: Option<FieldId>,
    scheduler: Scheduler,
    on_login: Box<dyn LoginHandler>,
    mounted: bool,
}

impl LoginForm {
    pub fn new(config: &FormConfig, on_login: impl LoginHandler + 'static) -> Self {
        let email = match &config.email {
            Some(value) => FieldState::prefilled(value.clone()),
            None => FieldState::default(),
        };

        Self {
            mode: config.mode,
            debounce: config.debounce(),
            email,
            password: FieldState::default(),
            form_is_valid: false,
            focused: None,
            scheduler: Scheduler::new(),
            on_login: Box::new(on_login),
            mounted: false,
        }
    }

    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        debug!(mode = ?self.mode, "login form mounted");
        if self.mode == ValidityMode::Debounced {
            self.restart_validity_check(now);
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: VALIDITY_CHECK_KEY.to_string(),
            },
            Instant::now(),
        );
        debug!("login form unmounted");
    }

    pub fn field(&self, id: FieldId) -> &FieldState {
        match id {
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
        }
    }

    pub fn form_is_valid(&self) -> bool {
        self.form_is_valid
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn set_focus(&mut self, target: Option<FieldId>) {
        self.focused = target;
    }

    /// The login button is only disabled in immediate mode.
    pub fn submit_enabled(&self) -> bool {
        match self.mode {
            ValidityMode::Immediate => self.form_is_valid,
            ValidityMode::Debounced => true,
        }
    }

    pub fn validity_check_pending(&self) -> bool {
        self.scheduler.is_pending(VALIDITY_CHECK_KEY)
    }

    pub fn user_input(&mut self, id: FieldId, value: impl Into<String>, now: Instant) {
        self.dispatch(id, FieldAction::UserInput(value.into()), now);
    }

    pub fn blur(&mut self, id: FieldId, now: Instant) {
        self.dispatch(id, FieldAction::InputBlur, now);
    }

    pub fn dispatch(&mut self, id: FieldId, action: FieldAction, now: Instant) {
        let next = reduce(self.field(id), action, id.validator());
        match id {
            FieldId::Email => self.email = next,
            FieldId::Password => self.password = next,
        }

        match self.mode {
            ValidityMode::Immediate => {
                self.form_is_valid = self.field(id).is_valid && self.field(id.other()).is_valid;
            }
            ValidityMode::Debounced => self.restart_validity_check(now),
        }
    }

    /// Runs validity checks that came due. Returns how many ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        let events = self.scheduler.drain_ready(now);
        let count = events.len();
        for event in events {
            match event {
                FormEvent::CheckValidity => {
                    debug!("checking form validity");
                    self.form_is_valid = self.email.is_valid && self.password.is_valid;
                }
            }
        }
        count
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        match self.mode {
            ValidityMode::Immediate => self.login(),
            ValidityMode::Debounced => {
                if self.form_is_valid {
                    self.login()
                } else {
                    let target = if self.email.is_valid {
                        FieldId::Password
                    } else {
                        FieldId::Email
                    };
                    debug!(field = target.as_str(), "submit blocked, moving focus");
                    self.focused = Some(target);
                    SubmitOutcome::Focused(target)
                }
            }
        }
    }

    fn login(&mut self) -> SubmitOutcome {
        info!(email = %self.email.value, "submitting login");
        self.on_login.on_login(&self.email.value, &self.password.value);
        SubmitOutcome::Submitted
    }

    fn restart_validity_check(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        if self.validity_check_pending() {
            debug!("cancelling pending validity check");
        }
        self.scheduler.schedule(
            SchedulerCommand::Debounce {
                key: VALIDITY_CHECK_KEY.to_string(),
                delay: self.debounce,
                event: FormEvent::CheckValidity,
            },
            now,
        );
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.unmount();
    }
}
