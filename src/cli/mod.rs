//! Terminal front-end for session administration.

pub mod administer;
