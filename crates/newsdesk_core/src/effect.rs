#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch {
        token: crate::RequestToken,
        descriptor: crate::QueryDescriptor,
    },
    /// Advisory: requests issued before `before` may be aborted.
    CancelSuperseded { before: crate::RequestToken },
}
