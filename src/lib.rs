//! Campus - presentation controllers of a learning-platform client
//!
//! The course-content screen ([`course`]) and the home dashboard
//! ([`home`]) are written as async state machines that talk to their
//! collaborators through [`traits`] and push view updates as
//! [`view_state::ViewCommand`]s.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod events;
pub mod home;
pub mod models;
pub mod traits;
pub mod view_state;
