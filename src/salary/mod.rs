pub mod feedback;
pub mod range;
pub mod search;
pub mod submission;
pub mod words;
