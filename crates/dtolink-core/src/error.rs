use crate::ThisError;

///
/// DecodeError
///
/// One problem found while decoding a DTO. Decoding collects these into a
/// `DecodeStatus` instead of stopping at the first one.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    /// An explicitly configured update method does not exist on the entity.
    #[error(
        "dto '{dto}' asked for update method '{method}', but that wasn't found in entity '{entity}'"
    )]
    MethodNotFound {
        dto: String,
        method: String,
        entity: String,
    },

    /// Candidates exist, but no parameter pairing reaches a perfect match.
    #[error(
        "dto '{dto}' asked for update method '{method}', but no exact match of parameters was found{}",
        closest_fit(.closest.as_deref())
    )]
    ImperfectMatch {
        dto: String,
        method: String,
        closest: Option<String>,
    },

    #[error("dto '{dto}' links to entity '{links_to}', but was decoded against entity '{entity}'")]
    EntityMismatch {
        dto: String,
        links_to: String,
        entity: String,
    },

    #[error("dto '{dto}' links to entity '{entity}', which is not registered")]
    UnknownEntity { dto: String, entity: String },

    #[error("dto '{0}' is not registered")]
    UnknownDto(String),
}

fn closest_fit(closest: Option<&str>) -> String {
    closest.map_or_else(String::new, |fit| format!(". Closest fit is {fit}"))
}

///
/// SelectError
///
/// Write-time selection of a binding from a decoded DTO failed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SelectError {
    #[error("dto '{dto}' has no update method bindings")]
    NoBindings { dto: String },

    #[error("dto '{dto}' has several update methods ({candidates}); ask for one as 'Name' or 'Name(n)'")]
    Ambiguous { dto: String, candidates: String },

    #[error("dto '{dto}' has no update method matching '{request}'")]
    NotFound { dto: String, request: String },

    #[error("malformed method request '{0}', expected 'Name' or 'Name(n)'")]
    MalformedRequest(String),
}
