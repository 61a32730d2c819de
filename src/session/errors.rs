//! Rejected session actions
//!
//! None of these are fatal: the front end shows the message inline and the
//! session carries on unchanged.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("cannot generate: no strings selected")]
    NoStringsSelected,

    #[error("no response is awaited")]
    NoResponseAwaited,

    #[error("next challenge is already on its way")]
    AdvancePending,

    #[error("no active challenge")]
    NoActiveChallenge,

    #[error("no challenge to replay")]
    NoChallenge,

    #[error("game is not in progress")]
    NotPlaying,

    #[error("game has not ended")]
    NotEnded,

    #[error("game has ended; start a new game")]
    SessionEnded,
}
