use crate::application::errors::CommandError;

/// Verb kinds understood by the admin command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    AddKey,
    DelKey,
    ListKeys,
    AddGroup,
    DelGroup,
    ListGroups,
    SetAdmin,
}

/// A fully parsed admin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    AddKey(String),
    DelKey(String),
    ListKeys,
    AddGroup(String),
    DelGroup(String),
    ListGroups,
    SetAdmin(String),
}

impl AdminCommand {
    fn build(verb: Verb, arg: Option<String>) -> Option<Self> {
        let command = match (verb, arg) {
            (Verb::ListKeys, _) => AdminCommand::ListKeys,
            (Verb::ListGroups, _) => AdminCommand::ListGroups,
            (Verb::AddKey, Some(arg)) => AdminCommand::AddKey(arg),
            (Verb::DelKey, Some(arg)) => AdminCommand::DelKey(arg),
            (Verb::AddGroup, Some(arg)) => AdminCommand::AddGroup(arg),
            (Verb::DelGroup, Some(arg)) => AdminCommand::DelGroup(arg),
            (Verb::SetAdmin, Some(arg)) => AdminCommand::SetAdmin(arg),
            (_, None) => return None,
        };
        Some(command)
    }

    /// Whether executing the command changes persisted state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, AdminCommand::ListKeys | AdminCommand::ListGroups)
    }
}

/// Represents one entry of the verb table
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub verb: Verb,
    pub description: Option<String>,
    pub usage: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, verb: Verb) -> Self {
        Self {
            name: name.into(),
            verb,
            description: None,
            usage: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name.to_lowercase() == input.to_lowercase()
    }
}

/// Verb table, kept in registration order for help output
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects empty names and names or verbs that are already taken
    pub fn register(&mut self, command: Command) -> Result<(), CommandError> {
        if command.name.trim().is_empty() || command.name.contains(char::is_whitespace) {
            return Err(CommandError::Registration(format!(
                "invalid verb name '{}'",
                command.name
            )));
        }
        if self.find(&command.name).is_some() {
            return Err(CommandError::Registration(format!(
                "verb '{}' already registered",
                command.name
            )));
        }
        if self.commands.iter().any(|c| c.verb == command.verb) {
            return Err(CommandError::Registration(format!(
                "{:?} already bound to another verb",
                command.verb
            )));
        }
        self.commands.push(command);
        Ok(())
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    /// Resolve a verb and its optional argument into an [`AdminCommand`]
    pub fn parse(&self, verb: &str, arg: Option<&str>) -> Result<AdminCommand, CommandError> {
        let cmd = self
            .find(verb)
            .ok_or_else(|| CommandError::NotFound(verb.to_string()))?;

        let arg = arg.map(str::trim).filter(|a| !a.is_empty()).map(str::to_string);
        AdminCommand::build(cmd.verb, arg)
            .ok_or_else(|| CommandError::InvalidArgs(format!("{} requires an argument", cmd.name)))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("add_key", Verb::AddKey)).unwrap();
        registry.register(Command::new("list_keys", Verb::ListKeys)).unwrap();
        registry
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry();
        assert!(matches!(
            registry.register(Command::new("ADD_KEY", Verb::DelKey)),
            Err(CommandError::Registration(_))
        ));
        assert!(matches!(
            registry.register(Command::new("addkey", Verb::AddKey)),
            Err(CommandError::Registration(_))
        ));
        assert!(registry.register(Command::new("", Verb::SetAdmin)).is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let registry = registry();
        assert_eq!(
            registry.parse("Add_Key", Some("urgent")),
            Ok(AdminCommand::AddKey("urgent".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        let registry = registry();
        assert!(matches!(
            registry.parse("add_key", None),
            Err(CommandError::InvalidArgs(_))
        ));
        assert!(matches!(
            registry.parse("add_key", Some("   ")),
            Err(CommandError::InvalidArgs(_))
        ));
        assert_eq!(registry.parse("list_keys", None), Ok(AdminCommand::ListKeys));
    }

    #[test]
    fn test_parse_unknown_verb() {
        assert_eq!(
            registry().parse("drop_all", None),
            Err(CommandError::NotFound("drop_all".to_string()))
        );
    }
}
