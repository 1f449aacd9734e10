use crate::{
    decode::method_name_from_dto,
    error::DecodeError,
    matcher::{MethodMatch, NameMatcher, Provenance, grade_all_methods},
    status::DecodeStatus,
};
use dtolink_config::UpdateMethods;
use dtolink_schema::node::{Dto, Entity, Method, Property};
use std::collections::BTreeSet;
use tracing::{debug, warn};

///
/// ResolveContext
///
/// Everything the tiers share for one DTO/entity pair.
///

pub(super) struct ResolveContext<'a> {
    dto: &'a Dto,
    entity: &'a Entity,
    writable: Vec<&'a Property>,
    matcher: &'a dyn NameMatcher,
}

impl<'a> ResolveContext<'a> {
    pub(super) fn new(dto: &'a Dto, entity: &'a Entity, matcher: &'a dyn NameMatcher) -> Self {
        Self {
            dto,
            entity,
            writable: dto.writable_properties().collect(),
            matcher,
        }
    }

    fn grade(&self, candidates: &[&Method], provenance: Provenance) -> Vec<MethodMatch> {
        grade_all_methods(
            candidates.iter().copied(),
            &self.writable,
            provenance,
            self.matcher,
        )
    }

    /// Tier 1: every configured name must bind to exactly one perfect match.
    ///
    /// Names are resolved independently and failures are collected. When
    /// overloads tie on the top score, the first declared one is taken.
    pub(super) fn resolve_explicit(
        &self,
        names: &UpdateMethods,
        status: &mut DecodeStatus,
    ) -> Vec<MethodMatch> {
        let mut seen = BTreeSet::new();
        let mut accepted = Vec::new();

        for name in names.names() {
            if !seen.insert(name.as_str()) {
                continue;
            }

            let candidates: Vec<&Method> = self.entity.methods_named(name).collect();
            if candidates.is_empty() {
                warn!(
                    dto = %self.dto.name,
                    method = %name,
                    entity = %self.entity.name,
                    "update method not found"
                );
                status.add(DecodeError::MethodNotFound {
                    dto: self.dto.name.clone(),
                    method: name.clone(),
                    entity: self.entity.name.clone(),
                });
                continue;
            }

            let graded = self.grade(&candidates, Provenance::ExplicitlyConfigured);
            debug!(
                tier = "explicit",
                dto = %self.dto.name,
                method = %name,
                candidates = graded.len(),
                "graded configured method"
            );

            match graded.into_iter().next() {
                Some(top) if top.is_perfect() => accepted.push(top),
                top => {
                    let closest = top.map(|m| m.to_string());
                    warn!(
                        dto = %self.dto.name,
                        method = %name,
                        closest = closest.as_deref().unwrap_or("-"),
                        "no exact parameter match for update method"
                    );
                    status.add(DecodeError::ImperfectMatch {
                        dto: self.dto.name.clone(),
                        method: name.clone(),
                        closest,
                    });
                }
            }
        }

        accepted
    }

    /// Tiers 2 and 3: the mutator named after the DTO, then a scan of the
    /// same candidates for every perfect overload. Misses are silent.
    pub(super) fn resolve_by_convention(&self) -> Vec<MethodMatch> {
        let name = method_name_from_dto(&self.dto.name);
        let candidates: Vec<&Method> = self.entity.methods_named(name).collect();

        let graded = self.grade(&candidates, Provenance::ConventionFromDtoName);
        let top = graded.into_iter().next().filter(MethodMatch::is_perfect);
        debug!(
            tier = "convention",
            dto = %self.dto.name,
            method = %name,
            candidates = candidates.len(),
            accepted = usize::from(top.is_some()),
            "convention lookup"
        );
        if let Some(top) = top {
            return vec![top];
        }

        let accepted: Vec<MethodMatch> = self
            .grade(&candidates, Provenance::DefaultScan)
            .into_iter()
            .filter(MethodMatch::is_perfect)
            .collect();
        debug!(
            tier = "scan",
            dto = %self.dto.name,
            candidates = candidates.len(),
            accepted = accepted.len(),
            "fallback scan"
        );

        accepted
    }
}
