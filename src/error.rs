use thiserror::Error;

/// Faults that abort the construction of a single object
///
/// These never abort a whole import: the offending way is skipped and
/// the remaining ways are still built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("way {way_id} references node {node_id}, which is not in the extract")]
    MissingNode { way_id: u64, node_id: u64 },
}
