/// Errors returned by fallible [`AvlTree`](crate::AvlTree) operations.
///
/// Both kinds are raised before the tree is modified: a failed call leaves
/// the tree exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The requested key is not present in the tree.
    KeyNotFound,
    /// The key being inserted is already present in the tree.
    DuplicateKey,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => write!(f, "key not present in tree"),
            Self::DuplicateKey => write!(f, "key already exists in tree"),
        }
    }
}

impl std::error::Error for Error {}
