use std::{fmt, str::FromStr};

use serde::Serialize;

/// A letter grade, `A` through `F`.
///
/// Grades are parsed case-insensitively and always stored and displayed
/// uppercase. Only the six enumerated letters are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Returns the grade as its single letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            _ => Err(ValidationError::InvalidGrade),
        }
    }
}

/// One student's stored data.
///
/// A record only ever comes into existence through [`Draft::validate`] or by
/// decoding a well-formed line of the backing file, so the field invariants
/// (digit-only id, alphabetic name, positive age, marks in 0-100) hold for
/// every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Roll number, kept as text and compared as text.
    pub id: String,
    /// Full name; letters and spaces only.
    pub name: String,
    /// Age in years, strictly positive.
    pub age: u32,
    /// Letter grade.
    pub grade: Grade,
    /// Marks out of 100.
    pub marks: u32,
}

impl fmt::Display for Record {
    /// Formats the record as its backing-file line (without the newline).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.id, self.name, self.age, self.grade, self.marks
        )
    }
}

/// Errors produced when decoding a stored line back into a [`Record`].
///
/// These never reach a front-end: loading is lenient and drops undecodable
/// lines.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into exactly five fields.
    #[error("expected 5 fields, got {0}")]
    FieldCount(usize),

    /// The age field is not an unsigned integer.
    #[error("age is not an integer")]
    Age,

    /// The grade field is not a letter A-F.
    #[error("grade is not a letter A-F")]
    Grade,

    /// The marks field is not an unsigned integer.
    #[error("marks is not an integer")]
    Marks,
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 5 {
            return Err(ParseError::FieldCount(fields.len()));
        }

        let age = fields[2].parse().map_err(|_| ParseError::Age)?;
        let grade = fields[3].parse().map_err(|_| ParseError::Grade)?;
        let marks = fields[4].parse().map_err(|_| ParseError::Marks)?;

        Ok(Self {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            age,
            grade,
            marks,
        })
    }
}

/// Raw, unvalidated field values as collected by a front-end.
///
/// Every field arrives as text; [`Draft::validate`] turns a draft into a
/// [`Record`].
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Roll number.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: String,
    /// Letter grade.
    pub grade: String,
    /// Marks out of 100.
    pub marks: String,
}

/// Per-field replacement values for an update.
///
/// `None` keeps the stored value, so a front-end can map blank input to
/// "unchanged" without overloading the empty string.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement age.
    pub age: Option<String>,
    /// Replacement grade.
    pub grade: Option<String>,
    /// Replacement marks.
    pub marks: Option<String>,
}

impl Draft {
    /// Validates the draft against the stored record set.
    ///
    /// Checks run in a fixed order and stop at the first failure: id,
    /// uniqueness (when `check_unique` is set), name, age, grade, marks.
    /// Callers disable the uniqueness scan when re-validating an update to an
    /// id that is already on file.
    ///
    /// On success, returns the normalized record: trimmed id and name,
    /// uppercased grade, parsed integers.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`ValidationError`].
    pub fn validate(
        &self,
        existing: &[Record],
        check_unique: bool,
    ) -> Result<Record, ValidationError> {
        let id = self.id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidId);
        }

        if check_unique && existing.iter().any(|record| record.id == id) {
            return Err(ValidationError::DuplicateId);
        }

        let name = self.name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(ValidationError::InvalidName);
        }

        let age = match parse_number(&self.age) {
            Some(age) if age > 0 => age,
            _ => return Err(ValidationError::InvalidAge),
        };

        let grade: Grade = self.grade.parse()?;

        let marks = match parse_number(&self.marks) {
            Some(marks) if marks <= 100 => marks,
            _ => return Err(ValidationError::InvalidMarks),
        };

        Ok(Record {
            id: id.to_string(),
            name: name.to_string(),
            age,
            grade,
            marks,
        })
    }
}

/// Parses digit-only text into a number.
///
/// Stricter than `str::parse`: a leading `+` is rejected, so only plain
/// digit sequences pass.
fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A field value that failed validation.
///
/// Messages are fixed and user-facing; front-ends display them verbatim and
/// let the user retry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The id is not digit-only text.
    #[error("ID must be an integer")]
    InvalidId,

    /// A record with this id is already stored.
    #[error("ID already exists")]
    DuplicateId,

    /// The name is empty or contains something other than letters and spaces.
    #[error("Name must be alphabetic")]
    InvalidName,

    /// The age is not a positive integer.
    #[error("Age must be a positive number")]
    InvalidAge,

    /// The grade is not one of the letters A-F.
    #[error("Grade must be between A-F")]
    InvalidGrade,

    /// The marks are not an integer between 0 and 100.
    #[error("Marks must be between 0 and 100")]
    InvalidMarks,
}
