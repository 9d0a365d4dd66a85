// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use crate::Composition;

/// State a [`Command`] operates on.
///
/// The context is handed to every call instead of being stored in the command,
/// so commands can run against any composition, including ones built by tests.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The document being edited.
    pub composition: &'a mut Composition,
}

impl<'a> CommandContext<'a> {
    /// Wraps a composition.
    pub fn new(composition: &'a mut Composition) -> Self {
        Self { composition }
    }
}

/// A reversible edit.
///
/// `execute` may capture whatever pre-edit state `undo` needs. A command is
/// owned by one [`History`](crate::History) and driven in strict alternation:
/// `execute`, then any number of `undo`/`execute` pairs.
pub trait Command: Debug {
    /// Applies the edit.
    fn execute(&mut self, ctx: &mut CommandContext<'_>);

    /// Reverts the last `execute`.
    fn undo(&mut self, ctx: &mut CommandContext<'_>);

    /// Short human-readable name, for history listings and logs.
    fn label(&self) -> &'static str;
}
