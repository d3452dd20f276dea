//! Parsing of the user's choice at the current stage.
//!
//! A choice is either the 1-based number printed next to an option by `status`, or
//! the option's label itself. [`ChoiceParser`] turns the raw arguments into a
//! [`Choice`] and resolves it against the labels on offer.
//!
//! # Supported Formats
//! - **Index**: `3`
//! - **Label**: `강남구`, or several words joined back with spaces (`Jeju Island`)

use crate::core::error::{NavigatorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// 1-based position in the listed options
    Index(usize),
    Label(String),
}

pub struct ChoiceParser;

impl ChoiceParser {
    pub fn parse(args: &[String]) -> Result<Choice> {
        let input = args.join(" ");
        let input = input.trim();
        if input.is_empty() {
            return Err(NavigatorError::NoChoiceProvided);
        }

        if input.chars().all(|c| c.is_ascii_digit()) {
            let index = input
                .parse()
                .map_err(|_| NavigatorError::invalid_number(input))?;
            Ok(Choice::Index(index))
        } else {
            Ok(Choice::Label(input.to_string()))
        }
    }

    pub fn validate(index: usize, max_index: usize) -> Result<()> {
        if max_index == 0 {
            return Err(NavigatorError::NoOptionsAvailable);
        }
        if index == 0 {
            return Err(NavigatorError::ZeroIndex);
        }
        if index > max_index {
            return Err(NavigatorError::index_out_of_range(index, max_index));
        }
        Ok(())
    }

    /// Resolve the arguments to a label.
    ///
    /// Indices are checked against `labels`; a label is returned as typed and left
    /// to the resolver to validate.
    pub fn resolve(args: &[String], labels: &[&str]) -> Result<String> {
        match Self::parse(args)? {
            Choice::Index(index) => {
                Self::validate(index, labels.len())?;
                Ok(labels[index - 1].to_string())
            }
            Choice::Label(label) => Ok(label),
        }
    }
}
