use crate::form::validators::{self, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Email,
    Password,
}

impl FieldId {
    pub const ALL: [FieldId; 2] = [FieldId::Email, FieldId::Password];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Email => "email",
            FieldId::Password => "password",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Email => "E-Mail",
            FieldId::Password => "Password",
        }
    }

    pub fn validator(self) -> Validator {
        match self {
            FieldId::Email => validators::validate_email,
            FieldId::Password => validators::validate_password,
        }
    }

    pub fn other(self) -> FieldId {
        match self {
            FieldId::Email => FieldId::Password,
            FieldId::Password => FieldId::Email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub is_valid: bool,
}

impl FieldState {
    /// Starts with `value` but unvalidated, as a pre-filled input would.
    pub fn prefilled(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    UserInput(String),
    InputBlur,
}

pub fn reduce(state: &FieldState, action: FieldAction, validator: Validator) -> FieldState {
    match action {
        FieldAction::UserInput(value) => {
            let is_valid = validator(&value);
            FieldState { value, is_valid }
        }
        FieldAction::InputBlur => FieldState {
            value: state.value.clone(),
            is_valid: validator(&state.value),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldAction, FieldId, FieldState, reduce};

    #[test]
    fn user_input_replaces_value_and_validates_it() {
        let state = FieldState::default();
        let next = reduce(
            &state,
            FieldAction::UserInput("a@b.com".to_string()),
            FieldId::Email.validator(),
        );
        assert_eq!(next.value, "a@b.com");
        assert!(next.is_valid);

        let next = reduce(
            &next,
            FieldAction::UserInput("ab.com".to_string()),
            FieldId::Email.validator(),
        );
        assert_eq!(next.value, "ab.com");
        assert!(!next.is_valid);
    }

    #[test]
    fn blur_keeps_value_and_revalidates() {
        let state = FieldState::prefilled("longenough1");
        assert!(!state.is_valid);

        let next = reduce(&state, FieldAction::InputBlur, FieldId::Password.validator());
        assert_eq!(next.value, "longenough1");
        assert!(next.is_valid);
    }

    #[test]
    fn blur_on_empty_field_is_invalid_for_both_rules() {
        for field in FieldId::ALL {
            let next = reduce(&FieldState::default(), FieldAction::InputBlur, field.validator());
            assert_eq!(next, FieldState::default(), "{}", field.as_str());
        }
    }

    #[test]
    fn reduce_leaves_previous_state_untouched() {
        let state = FieldState {
            value: "a@b".to_string(),
            is_valid: true,
        };
        let _ = reduce(
            &state,
            FieldAction::UserInput(String::new()),
            FieldId::Email.validator(),
        );
        assert_eq!(state.value, "a@b");
        assert!(state.is_valid);
    }
}
