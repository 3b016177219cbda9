// Shapes exchanged between the voting backend and the views.
// Wire names are camelCase; decoding goes through `decode` so invariants are checked once.

pub mod decode;
pub mod entry;
pub mod voting;
pub mod week;

pub use entry::Entry;
pub use voting::{UserVote, VoteSubmission, VotingData};
pub use week::AdminData;
