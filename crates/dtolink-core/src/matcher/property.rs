use crate::matcher::{MatchScore, NameMatcher};
use dtolink_schema::node::Property;

///
/// BestPropertyMatch
///
/// Best name match between one DTO property and the entity's key
/// properties. Ties keep the first key in key order.
///

#[derive(Clone, Copy, Debug)]
pub struct BestPropertyMatch<'a> {
    pub score: MatchScore,
    pub key: Option<&'a Property>,
}

impl<'a> BestPropertyMatch<'a> {
    pub fn find(
        property: &Property,
        keys: impl IntoIterator<Item = &'a Property>,
        matcher: &dyn NameMatcher,
    ) -> Self {
        let mut best = Self {
            score: MatchScore::NONE,
            key: None,
        };

        for key in keys {
            let score = matcher.compare(&property.name, &key.name);
            if best.key.is_none() || score > best.score {
                best = Self {
                    score,
                    key: Some(key),
                };
            }
        }

        best
    }

    /// True when the DTO property mirrors an entity key.
    #[must_use]
    pub const fn is_key_mirror(&self) -> bool {
        self.score.is_perfect()
    }
}
