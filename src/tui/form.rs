//! Input forms.
//!
//! A form is a fixed list of single-line text fields with one focused
//! field. Only append and backspace editing is supported.

/// Maximum length of a host name.
pub const HOST_MAX_LEN: usize = 253;

/// Maximum length of a port number.
pub const PORT_MAX_LEN: usize = 5;

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Caption drawn above the value
    pub label: &'static str,
    /// Hint shown while the value is empty
    pub placeholder: &'static str,
    value: String,
    max_len: usize,
}

impl Field {
    /// Create an empty field holding at most `max_len` characters.
    #[must_use]
    pub fn new(label: &'static str, placeholder: &'static str, max_len: usize) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            max_len,
        }
    }

    /// Pre-fill the field.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into().chars().take(self.max_len).collect();
        self
    }

    /// Current value, untrimmed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Append a character unless the field is full.
    pub fn push(&mut self, c: char) {
        if c.is_control() || self.value.chars().count() >= self.max_len {
            return;
        }
        self.value.push(c);
    }

    /// Remove the last character.
    pub fn pop(&mut self) {
        self.value.pop();
    }

    /// Check if the field holds only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Ordered fields with one of them focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
    focused: usize,
}

impl Form {
    /// Create a form focused on `focused` (clamped to the last field).
    #[must_use]
    pub fn new(fields: Vec<Field>, focused: usize) -> Self {
        let focused = focused.min(fields.len().saturating_sub(1));
        Self { fields, focused }
    }

    /// All fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index of the focused field.
    #[must_use]
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Move focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    /// Move focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type `c` into the focused field.
    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.push(c);
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.pop();
        }
    }

    /// Trimmed values of all fields, or `None` if any field is blank.
    #[must_use]
    pub fn filled_values(&self) -> Option<Vec<String>> {
        if self.fields.iter().any(Field::is_blank) {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|f| f.value().trim().to_string())
                .collect(),
        )
    }

    /// Value of field `index`, or `""` if there is no such field.
    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", Field::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_fields() -> Form {
        Form::new(
            vec![
                Field::new("A", "", 10),
                Field::new("B", "", 10),
                Field::new("C", "", 10),
            ],
            2,
        )
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = three_fields();
        form.focus_next();
        assert_eq!(form.focused(), 0);
        form.focus_prev();
        assert_eq!(form.focused(), 2);
        form.focus_prev();
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn test_edit_focused_field() {
        let mut form = three_fields();
        form.input('x');
        form.input('y');
        form.backspace();
        assert_eq!(form.value(2), "x");
        assert_eq!(form.value(0), "");
    }

    #[test]
    fn test_max_len() {
        let mut field = Field::new("PORT", "80", PORT_MAX_LEN);
        for c in "1234567".chars() {
            field.push(c);
        }
        assert_eq!(field.value(), "12345");

        let field = Field::new("PORT", "80", 2).with_value("8080");
        assert_eq!(field.value(), "80");
    }

    #[test]
    fn test_filled_values() {
        let fields = vec![
            Field::new("A", "", 10).with_value(" a "),
            Field::new("B", "", 10),
        ];
        let mut form = Form::new(fields, 1);
        assert!(form.filled_values().is_none());
        form.input(' ');
        assert!(form.filled_values().is_none());
        form.input('b');
        assert_eq!(form.filled_values(), Some(vec!["a".to_string(), "b".to_string()]));
    }
}
