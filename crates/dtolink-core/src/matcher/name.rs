use crate::matcher::MatchScore;
use dtolink_config::NameMatcherKind;
use dtolink_utils::case::{common_prefix_len, strip_id_word, to_snake};
use std::{fmt, sync::Arc};

/// Ceiling for partial name similarity; only an equivalent name is perfect.
const SIMILARITY_CEILING: usize = 900;

///
/// NameMatcher
///
/// Compares two identifiers. Implementations must be pure: the same pair
/// always yields the same score.
///

pub trait NameMatcher: fmt::Debug + Send + Sync {
    fn compare(&self, a: &str, b: &str) -> MatchScore;
}

/// Build the matcher selected in configuration.
#[must_use]
pub fn name_matcher_for(kind: NameMatcherKind) -> Arc<dyn NameMatcher> {
    match kind {
        NameMatcherKind::Convention => Arc::new(ConventionNameMatcher),
        NameMatcherKind::Strict => Arc::new(StrictNameMatcher),
    }
}

///
/// ConventionNameMatcher
///
/// Treats `OrderId`, `orderId`, `order_id` and `ORDERID` as the same name,
/// and a name as equal to itself with an `Id` word appended
/// (`Customer` / `customerId`). Anything else scores by shared prefix,
/// strictly below perfect.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ConventionNameMatcher;

impl NameMatcher for ConventionNameMatcher {
    fn compare(&self, a: &str, b: &str) -> MatchScore {
        let (ca, cb) = (compact(a), compact(b));
        if ca.is_empty() || cb.is_empty() {
            return MatchScore::NONE;
        }
        if ca == cb {
            return MatchScore::PERFECT;
        }

        // identity suffix on exactly one side
        let (sa, sb) = (to_snake(a), to_snake(b));
        let stem_matches = |snake: &str, other: &str| {
            strip_id_word(snake).is_some_and(|stem| compact(stem) == other)
        };
        if stem_matches(&sa, &cb) || stem_matches(&sb, &ca) {
            return MatchScore::PERFECT;
        }

        similarity(&ca, &cb)
    }
}

///
/// StrictNameMatcher
/// ASCII case-insensitive equality, nothing else.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StrictNameMatcher;

impl NameMatcher for StrictNameMatcher {
    fn compare(&self, a: &str, b: &str) -> MatchScore {
        if !a.is_empty() && a.eq_ignore_ascii_case(b) {
            MatchScore::PERFECT
        } else {
            MatchScore::NONE
        }
    }
}

// Lowercase with word separators removed.
fn compact(ident: &str) -> String {
    ident
        .chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn similarity(a: &str, b: &str) -> MatchScore {
    let longest = a.chars().count().max(b.chars().count());
    let shared = common_prefix_len(a, b);

    MatchScore::from_ratio(
        shared * SIMILARITY_CEILING,
        longest * usize::from(MatchScore::SCALE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventions_compare_equal() {
        let m = ConventionNameMatcher;

        assert_eq!(m.compare("OrderId", "order_id"), MatchScore::PERFECT);
        assert_eq!(m.compare("orderId", "ORDERID"), MatchScore::PERFECT);
        assert_eq!(m.compare("Amount", "amount"), MatchScore::PERFECT);
    }

    #[test]
    fn identity_suffix_is_tolerated() {
        let m = ConventionNameMatcher;

        assert_eq!(m.compare("Customer", "customerId"), MatchScore::PERFECT);
        assert_eq!(m.compare("customer_id", "Customer"), MatchScore::PERFECT);
        assert!(!m.compare("Pa", "paid").is_perfect());
        assert!(!m.compare("Id", "").is_perfect());
    }

    #[test]
    fn partial_names_score_below_perfect() {
        let m = ConventionNameMatcher;
        let close = m.compare("Status", "State");
        let far = m.compare("Status", "Amount");

        assert!(!close.is_perfect());
        assert!(close > far);
        assert_eq!(far, MatchScore::NONE);
        assert_eq!(close.value(), 600);
    }

    #[test]
    fn strict_matcher_only_folds_case() {
        let m = StrictNameMatcher;

        assert_eq!(m.compare("Amount", "AMOUNT"), MatchScore::PERFECT);
        assert_eq!(m.compare("OrderId", "order_id"), MatchScore::NONE);
        assert_eq!(m.compare("Customer", "CustomerId"), MatchScore::NONE);
        assert_eq!(m.compare("", ""), MatchScore::NONE);
    }

    #[test]
    fn config_kind_selects_matcher() {
        let strict = name_matcher_for(NameMatcherKind::Strict);
        let convention = name_matcher_for(NameMatcherKind::Convention);

        assert!(!strict.compare("order_id", "OrderId").is_perfect());
        assert!(convention.compare("order_id", "OrderId").is_perfect());
    }
}
