use crate::matcher::{
    MatchScore, NameMatcher,
    score::{thousandths, write_thousandths},
};
use derive_more::Display;
use dtolink_schema::{
    node::{Method, Param, Property},
    types::TypeAgreement,
};
use std::fmt;
use tracing::trace;

/// Share of a parameter score carried by the name; the rest is the type.
const NAME_WEIGHT: u32 = 700;
/// Type share when names and types agree exactly.
const TYPE_EXACT: u16 = 300;
/// Type share when only nullability differs.
const TYPE_NULLABILITY: u16 = 100;

///
/// Provenance
///
/// Which resolution tier put a method in front of the grader.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Provenance {
    /// Named in the DTO's explicit configuration.
    ExplicitlyConfigured,

    /// Named after the DTO type, minus a known suffix.
    ConventionFromDtoName,

    /// Fallback scan of the convention-named candidates.
    DefaultScan,
}

///
/// ParamPairing
///
/// One parameter and the writable DTO property it was paired with.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamPairing {
    pub param: String,
    pub property: Option<String>,
    pub score: MatchScore,
}

///
/// MethodMatch
///
/// A graded candidate mutator. The rendering is what configuration errors
/// show as the closest fit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodMatch {
    pub method: Method,
    pub score: MatchScore,
    pub pairings: Vec<ParamPairing>,
    pub provenance: Provenance,
}

impl MethodMatch {
    /// Grade one method against the writable DTO properties.
    ///
    /// Exact pairings are found first as a maximum matching between
    /// parameters and distinct properties, so a full 1:1 pairing always
    /// scores perfect. Parameters left over then take the best still-unused
    /// property (first property wins a tie). The score value is the mean
    /// parameter score; coverage is the share of writable properties
    /// consumed by exact pairings.
    #[must_use]
    pub fn grade(
        method: &Method,
        writable: &[&Property],
        provenance: Provenance,
        matcher: &dyn NameMatcher,
    ) -> Self {
        let scores: Vec<Vec<MatchScore>> = method
            .params
            .iter()
            .map(|param| {
                writable
                    .iter()
                    .map(|property| pair_score(param, property, matcher))
                    .collect()
            })
            .collect();

        // exact pairings
        let exact_edges: Vec<Vec<usize>> = scores
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, score)| score.is_perfect())
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();
        let mut owner: Vec<Option<usize>> = vec![None; writable.len()];
        for param in 0..scores.len() {
            let mut seen = vec![false; writable.len()];
            assign_exact(param, &exact_edges, &mut owner, &mut seen);
        }

        let mut assigned: Vec<Option<usize>> = vec![None; scores.len()];
        for (property, param) in owner.iter().enumerate() {
            if let Some(param) = param {
                assigned[*param] = Some(property);
            }
        }

        // leftovers take the best unused property
        let mut used: Vec<bool> = owner.iter().map(Option::is_some).collect();
        for (param, row) in scores.iter().enumerate() {
            if assigned[param].is_some() {
                continue;
            }

            let mut best: Option<(usize, MatchScore)> = None;
            for (index, score) in row.iter().enumerate() {
                if used[index] {
                    continue;
                }
                if best.is_none_or(|(_, current)| *score > current) {
                    best = Some((index, *score));
                }
            }

            if let Some((index, score)) = best
                && score > MatchScore::NONE
            {
                used[index] = true;
                assigned[param] = Some(index);
            }
        }

        let pairings: Vec<ParamPairing> = method
            .params
            .iter()
            .zip(&assigned)
            .enumerate()
            .map(|(index, (param, &property))| ParamPairing {
                param: param.name.clone(),
                property: property.map(|p| writable[p].name.clone()),
                score: property.map_or(MatchScore::NONE, |p| scores[index][p]),
            })
            .collect();

        let value = if pairings.is_empty() {
            // nothing to apply is only a fit when nothing is writable
            if writable.is_empty() {
                MatchScore::SCALE
            } else {
                0
            }
        } else {
            let total: usize = pairings
                .iter()
                .map(|p| usize::from(p.score.value()))
                .sum();
            thousandths(total, pairings.len() * usize::from(MatchScore::SCALE))
        };

        let exact = pairings.iter().filter(|p| p.score.is_perfect()).count();
        let coverage = if writable.is_empty() {
            MatchScore::SCALE
        } else {
            thousandths(exact, writable.len())
        };

        let score = MatchScore::new(value).with_coverage(coverage);
        trace!(method = %method, %score, coverage, %provenance, "graded method");

        Self {
            method: method.clone(),
            score,
            pairings,
            provenance,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.method.name
    }

    #[must_use]
    pub const fn is_perfect(&self) -> bool {
        self.score.is_perfect()
    }
}

impl fmt::Display for MethodMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [score {}, coverage ", self.method, self.score)?;
        write_thousandths(f, self.score.coverage())?;
        write!(f, ", found by {}]", self.provenance)
    }
}

/// Grade every candidate, best first. Equal scores keep declaration order.
pub fn grade_all_methods<'a>(
    candidates: impl IntoIterator<Item = &'a Method>,
    writable: &[&Property],
    provenance: Provenance,
    matcher: &dyn NameMatcher,
) -> Vec<MethodMatch> {
    let mut graded: Vec<MethodMatch> = candidates
        .into_iter()
        .map(|method| MethodMatch::grade(method, writable, provenance, matcher))
        .collect();

    graded.sort_by(|a, b| b.score.cmp(&a.score));

    graded
}

// Augmenting-path step over exact edges; parameter counts are tiny.
fn assign_exact(
    param: usize,
    edges: &[Vec<usize>],
    owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &property in &edges[param] {
        if seen[property] {
            continue;
        }
        seen[property] = true;

        let current = owner[property];
        if current.is_none_or(|other| assign_exact(other, edges, owner, seen)) {
            owner[property] = Some(param);
            return true;
        }
    }

    false
}

// Score one parameter against one property: 70% name, 30% type.
fn pair_score(param: &Param, property: &Property, matcher: &dyn NameMatcher) -> MatchScore {
    let name = u32::from(matcher.compare(&param.name, &property.name).value());
    let name_part = name * NAME_WEIGHT / u32::from(MatchScore::SCALE);
    let type_part = match param.ty.agreement(&property.ty) {
        TypeAgreement::Exact => TYPE_EXACT,
        TypeAgreement::Nullability => TYPE_NULLABILITY,
        TypeAgreement::Mismatch => 0,
    };

    MatchScore::new(u16::try_from(name_part).map_or(MatchScore::SCALE, |n| n + type_part))
}
