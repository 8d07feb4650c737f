use derive_more::{AsRef, Deref, Display};

/// Human-readable label of a block, exercise or recipe.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 96 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 96 characters or fewer ({0} > 96)")]
    TooLong(usize),
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Deref, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        #[deref(forward)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: &str) -> Result<Self, IdentifierError> {
                if value.is_empty() {
                    return Err(IdentifierError::Empty);
                }
                if let Some(c) = value.chars().find(|c| c.is_whitespace()) {
                    return Err(IdentifierError::InvalidCharacter(c));
                }
                Ok(Self(value.to_string()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdentifierError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier!(
    /// Catalog identifier of a training block, e.g. `upper_contrast__bench_plyo`.
    BlockID
);
identifier!(
    /// Catalog identifier of an exercise, e.g. `hinge__rdl__barbell`.
    ExerciseID
);

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IdentifierError {
    #[error("Identifier must not be empty")]
    Empty,
    #[error("Identifier must not contain whitespace ({0:?})")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Bench Contrast", Ok(Name("Bench Contrast".to_string())))]
    #[case("  Copenhagen  ", Ok(Name("Copenhagen".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    #[case(&"A".repeat(97), Err(NameError::TooLong(97)))]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[rstest]
    #[case("hinge__rdl__barbell", Ok(()))]
    #[case("", Err(IdentifierError::Empty))]
    #[case("hinge rdl", Err(IdentifierError::InvalidCharacter(' ')))]
    fn test_identifier_new(#[case] value: &str, #[case] expected: Result<(), IdentifierError>) {
        assert_eq!(ExerciseID::new(value).map(|_| ()), expected);
        assert_eq!(BlockID::new(value).map(|_| ()), expected);
    }

    #[test]
    fn test_identifier_ordering() {
        let mut ids = vec![
            BlockID::new("b_block").unwrap(),
            BlockID::new("a_block").unwrap(),
        ];
        ids.sort();
        assert_eq!(
            ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["a_block", "b_block"]
        );
    }
}
