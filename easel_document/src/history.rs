// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded undo/redo history.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::{Command, CommandContext};

/// History limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of undoable commands. The oldest entry is evicted first.
    pub max_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_size: 20 }
    }
}

/// Undo and redo stacks of executed commands.
///
/// - After [`History::execute`] the redo stack is empty.
/// - The undo stack never holds more than [`HistoryConfig::max_size`] commands.
#[derive(Debug, Default)]
pub struct History {
    config: HistoryConfig,
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Returns the limits.
    #[must_use]
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Executes `command` and records it as the most recent undoable edit.
    ///
    /// Evicts the oldest entry when the bound is exceeded and clears the redo stack.
    pub fn execute(&mut self, mut command: Box<dyn Command>, ctx: &mut CommandContext<'_>) {
        command.execute(ctx);
        tracing::debug!(command = command.label(), "execute");
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.config.max_size {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!(command = evicted.label(), "evicted from history");
            }
        }
        self.redo_stack.clear();
    }

    /// Undoes the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        let Some(mut command) = self.undo_stack.pop_back() else {
            return false;
        };
        command.undo(ctx);
        tracing::debug!(command = command.label(), "undo");
        self.redo_stack.push(command);
        true
    }

    /// Re-executes the most recently undone command. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(ctx);
        tracing::debug!(command = command.label(), "redo");
        self.undo_stack.push_back(command);
        true
    }

    /// Returns `true` when [`History::undo`] would do something.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` when [`History::redo`] would do something.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable commands.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable commands.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Labels of the undoable commands, oldest first.
    pub fn undo_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.undo_stack.iter().map(|command| command.label())
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
