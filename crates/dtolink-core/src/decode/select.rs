use crate::{decode::DecodedDto, error::SelectError, matcher::MethodMatch};
use std::{fmt, str::FromStr};

///
/// MethodRequest
///
/// Write-time request for one binding: `Name` or `Name(n)`, where `n` is
/// the parameter count used to pick between overloads.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodRequest {
    pub name: String,
    pub arity: Option<usize>,
}

impl MethodRequest {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: None,
        }
    }

    #[must_use]
    pub const fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    fn accepts(&self, binding: &MethodMatch) -> bool {
        binding.name() == self.name && self.arity.is_none_or(|n| binding.method.arity() == n)
    }
}

impl fmt::Display for MethodRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(arity) => write!(f, "{}({arity})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for MethodRequest {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SelectError::MalformedRequest(s.to_string());
        let s = s.trim();

        let (name, arity) = match s.split_once('(') {
            Some((name, rest)) => {
                let count = rest.strip_suffix(')').ok_or_else(malformed)?;
                let arity = count.trim().parse::<usize>().map_err(|_| malformed())?;
                (name.trim(), Some(arity))
            }
            None => (s, None),
        };

        if name.is_empty() || name.contains([')', ' ', ',']) {
            return Err(malformed());
        }

        Ok(Self {
            name: name.to_string(),
            arity,
        })
    }
}

impl DecodedDto {
    /// Pick the binding to invoke when writing this DTO back.
    ///
    /// Without a request the DTO must have exactly one binding. A request
    /// narrows by name and, when given, parameter count; the first remaining
    /// binding in ranked order is returned.
    pub fn select_method(&self, request: Option<&str>) -> Result<&MethodMatch, SelectError> {
        if self.methods.is_empty() {
            return Err(SelectError::NoBindings {
                dto: self.dto_name.clone(),
            });
        }

        match request {
            None => match self.methods.as_slice() {
                [only] => Ok(only),
                many => Err(SelectError::Ambiguous {
                    dto: self.dto_name.clone(),
                    candidates: many
                        .iter()
                        .map(|m| m.method.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                }),
            },
            Some(text) => {
                let request: MethodRequest = text.parse()?;
                self.methods
                    .iter()
                    .find(|binding| request.accepts(binding))
                    .ok_or_else(|| SelectError::NotFound {
                        dto: self.dto_name.clone(),
                        request: request.to_string(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_parse_with_and_without_arity() {
        assert_eq!(
            "SetValues".parse::<MethodRequest>().unwrap(),
            MethodRequest::named("SetValues")
        );
        assert_eq!(
            " SetValues( 2 ) ".parse::<MethodRequest>().unwrap(),
            MethodRequest::named("SetValues").with_arity(2)
        );
        assert_eq!(
            MethodRequest::named("SetValues").with_arity(1).to_string(),
            "SetValues(1)"
        );
    }

    #[test]
    fn malformed_requests_are_rejected() {
        for bad in ["", "()", "Set(", "Set(x)", "Set(1", "Set)1(", "Set Values"] {
            assert!(
                matches!(bad.parse::<MethodRequest>(), Err(SelectError::MalformedRequest(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
