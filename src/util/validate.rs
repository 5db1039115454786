//! Per-field validation rules for the contact form.
//!
//! DESIGN
//! ======
//! Rules are pure functions of a field's declared kind and its current value,
//! so the form state machine and its tests never need a DOM. Rendering the
//! message next to the field and toggling `aria-invalid` is the component's job.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Declared kind of a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text such as a name.
    ShortText,
    /// Email address.
    Email,
    /// Multi-line free text such as a message body.
    LongText,
    /// A `<select>` or radio group; any non-empty choice passes.
    Choice,
}

impl FieldKind {
    /// Inclusive `(min, max)` character bounds for this kind.
    #[must_use]
    pub fn length_bounds(self) -> (Option<usize>, Option<usize>) {
        match self {
            Self::ShortText => (Some(2), Some(100)),
            Self::Email => (None, Some(254)),
            Self::LongText => (Some(10), Some(2000)),
            Self::Choice => (None, None),
        }
    }
}

/// Static description of one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Choices offered by a [`FieldKind::Choice`] field. Empty for other kinds.
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self { name: name.to_owned(), label: label.to_owned(), kind, options: Vec::new() }
    }

    #[must_use]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_owned()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} is required.")]
    Required { label: String },
    #[error("{label} must be at least {min} characters.")]
    TooShort { label: String, min: usize },
    #[error("{label} must be at most {max} characters.")]
    TooLong { label: String, max: usize },
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Validate `value` against the rules for `spec`.
///
/// # Errors
///
/// Returns the first rule the value breaks, in the order required, length,
/// then format.
pub fn validate_field(spec: &FieldSpec, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { label: spec.label.clone() });
    }

    let len = value.chars().count();
    let (min, max) = spec.kind.length_bounds();
    if let Some(min) = min
        && len < min
    {
        return Err(ValidationError::TooShort { label: spec.label.clone(), min });
    }
    if let Some(max) = max
        && len > max
    {
        return Err(ValidationError::TooLong { label: spec.label.clone(), max });
    }

    if spec.kind == FieldKind::Email && !is_valid_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Permissive `local@domain.tld` shape check.
///
/// Exactly one `@`, no whitespace, a non-empty local part, and a domain with a
/// dot that has at least one character on each side. Not RFC 5322.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
