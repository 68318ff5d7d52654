#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("taxonomy has no ranks")]
    EmptyTaxonomy,
    #[error("duplicate rank in taxonomy: {0:?}")]
    DuplicateRank(String),
    #[error("group {group:?} references unknown rank {rank:?}")]
    UnknownGroupRank { group: String, rank: String },
    #[error("rank {0:?} appears in more than one group")]
    RankInMultipleGroups(String),
    #[error("honorary rank {0:?} is not in the taxonomy")]
    UnknownHonoraryRank(String),
    #[error("roster JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
