//! Command schema table.
//!
//! The registry is the single source of truth for the wire contract: command
//! ids are assigned by declaration position (0-based) and parameter ordinals
//! by position within their command (1-based), so the declaration order *is*
//! the protocol version. It is built once at startup and shared read-only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::protocol::coerce::Coercion;

/// One declared parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSchema {
    /// Parameter name as seen by the host application.
    pub name: String,
    /// 1-based wire position within the command. Contiguous per command –
    /// the codec iterates ordinals, it never hashes them.
    pub ordinal: u8,
    /// How raw wire values for this parameter are typed.
    pub coercion: Coercion,
}

/// One protocol command with its ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Wire id – the command's position in the declaration order.
    pub id: u16,
    /// Unique command name.
    pub name: String,
    /// Parameters in declaration order; `params[i].ordinal == i + 1`.
    pub params: Vec<ParamSchema>,
}

impl CommandSchema {
    /// Returns the parameter assigned the given wire ordinal, if any.
    pub fn param_by_ordinal(&self, ordinal: u8) -> Option<&ParamSchema> {
        // Ordinals are contiguous from 1, so this is a direct index.
        self.params.get(usize::from(ordinal).checked_sub(1)?)
    }

    /// Returns the parameter with the given name, if declared.
    pub fn param_by_name(&self, name: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A parameter declaration before ordinal assignment.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: &'static str,
    pub coercion: Coercion,
}

impl ParamDecl {
    /// An untyped (passthrough) parameter.
    pub fn raw(name: &'static str) -> Self {
        Self {
            name,
            coercion: Coercion::Raw,
        }
    }

    /// A parameter with an explicit coercion.
    pub fn typed(name: &'static str, coercion: Coercion) -> Self {
        Self { name, coercion }
    }
}

/// A command declaration before id assignment.
#[derive(Debug, Clone)]
pub struct CommandDecl {
    pub name: &'static str,
    pub params: Vec<ParamDecl>,
}

/// The immutable command table plus its two lookup indices.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandSchema>,
    name_index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Builds the registry from ordered declarations.
    ///
    /// Assigns each command `id` = its position in `declarations` and each
    /// parameter `ordinal` = 1 + its position in the command's list.
    pub fn build(declarations: Vec<CommandDecl>) -> Self {
        let mut commands = Vec::with_capacity(declarations.len());
        let mut name_index = HashMap::with_capacity(declarations.len());

        for (id, decl) in declarations.into_iter().enumerate() {
            let params = decl
                .params
                .into_iter()
                .enumerate()
                .map(|(i, p)| ParamSchema {
                    name: p.name.to_string(),
                    ordinal: (i + 1) as u8,
                    coercion: p.coercion,
                })
                .collect();

            name_index.insert(decl.name.to_string(), id);
            commands.push(CommandSchema {
                id: id as u16,
                name: decl.name.to_string(),
                params,
            });
        }

        Self {
            commands,
            name_index,
        }
    }

    /// Looks a command up by wire id. A miss means "not found", never a
    /// failure – unknown ids are ignored by the codec.
    pub fn by_id(&self, id: u16) -> Option<&CommandSchema> {
        self.commands.get(usize::from(id))
    }

    /// Looks a command up by name.
    pub fn by_name(&self, name: &str) -> Option<&CommandSchema> {
        self.name_index.get(name).map(|&i| &self.commands[i])
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates the table in wire-id order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSchema> {
        self.commands.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
