// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{DEFAULT_STATE_FILE, Flow, PROMPT, Session};
