use crate::link::{CreateLinkRequest, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CreateLink {
        submission: SubmissionId,
        request: CreateLinkRequest,
    },
    FetchLinks {
        generation: u64,
    },
    DeleteLink {
        code: String,
    },
    FetchStats {
        code: String,
    },
    CheckHealth,
}
