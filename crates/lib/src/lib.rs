//! Casino core library: wallet and outcome capabilities, the betting and loading dialog
//! state machines, and config shared by the CLI and desktop applications.

pub mod betting;
pub mod config;
pub mod dialog;
pub mod init;
pub mod loading;
pub mod lobby;
pub mod messages;
pub mod outcome;
pub mod timer;
pub mod wallet;
