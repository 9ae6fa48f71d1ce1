use crate::application::errors::CommandError;
use crate::domain::entities::monitor::is_valid_group_id;
use crate::domain::entities::{
    AdminCommand, AdminIdentity, Command, CommandRegistry, MonitorState, Verb, WHITELIST_ALL,
};
use crate::domain::traits::{AdminIdentityCheck, Authorizer, ConfigStore};

/// Service for authorizing and executing admin commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
    authorizer: Box<dyn Authorizer>,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
            authorizer: Box::new(AdminIdentityCheck),
        }
    }

    pub fn with_authorizer<A: Authorizer + 'static>(mut self, authorizer: A) -> Self {
        self.authorizer = Box::new(authorizer);
        self
    }

    pub fn register(&mut self, command: Command) -> Result<(), CommandError> {
        self.registry.register(command)
    }

    pub fn register_defaults(&mut self) -> Result<(), CommandError> {
        let defaults = [
            Command::new("add_key", Verb::AddKey)
                .with_description("Add keyword")
                .with_usage("add_key [keyword]"),
            Command::new("del_key", Verb::DelKey)
                .with_description("Remove keyword")
                .with_usage("del_key [keyword]"),
            Command::new("list_keys", Verb::ListKeys)
                .with_description("List keywords")
                .with_usage("list_keys"),
            Command::new("add_group", Verb::AddGroup)
                .with_description("Whitelist group")
                .with_usage("add_group [group id]"),
            Command::new("del_group", Verb::DelGroup)
                .with_description("Remove group from whitelist")
                .with_usage("del_group [group id]"),
            Command::new("list_groups", Verb::ListGroups)
                .with_description("List whitelisted groups")
                .with_usage("list_groups"),
            Command::new("set_admin", Verb::SetAdmin)
                .with_description("Set admin id")
                .with_usage("set_admin [user id]"),
        ];

        for command in defaults {
            self.register(command)?;
        }
        Ok(())
    }

    /// Handle one invocation and produce the reply for its origin.
    ///
    /// Mutations are persisted through `store` before the reply is built; a
    /// failed save is logged and the reply still reports the in-memory change.
    pub fn handle(
        &self,
        state: &mut MonitorState,
        store: &dyn ConfigStore,
        sender_id: &str,
        verb: Option<&str>,
        args: Option<&str>,
    ) -> String {
        if let Err(e) = self.authorizer.authorize(sender_id, &state.admin_qq) {
            return match e {
                CommandError::AdminUnset => {
                    tracing::error!("Admin command from {} rejected: no admin configured", sender_id);
                    "❌ No admin is configured, set admin_qq in the state file".to_string()
                }
                _ => {
                    tracing::warn!("Unauthorized admin command attempt by {}", sender_id);
                    "❌ Permission denied: only the configured admin can use this command".to_string()
                }
            };
        }

        let Some(verb) = verb.map(str::trim).filter(|v| !v.is_empty()) else {
            return self.get_help();
        };

        let command = match self.registry.parse(verb, args) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Rejected command '{}': {}", verb, e);
                return self.invalid_reply();
            }
        };

        let mutating = command.is_mutating();
        match self.execute(state, command) {
            Ok(reply) => {
                if mutating {
                    persist(state, store);
                }
                reply
            }
            Err(CommandError::Validation(msg)) => format!("❌ {}", msg),
            Err(e) => {
                tracing::debug!("Command failed: {}", e);
                self.invalid_reply()
            }
        }
    }

    /// Apply a command to `state`; on error nothing was changed
    fn execute(&self, state: &mut MonitorState, command: AdminCommand) -> Result<String, CommandError> {
        let reply = match command {
            AdminCommand::AddKey(keyword) => {
                if !state.keywords.insert(keyword.clone()) {
                    return Err(CommandError::Validation(format!("Keyword '{}' already exists", keyword)));
                }
                tracing::info!("Admin added keyword: {}", keyword);
                format!("✅ Added keyword: {}", keyword)
            }
            AdminCommand::DelKey(keyword) => {
                if !state.keywords.remove(&keyword) {
                    return Err(CommandError::Validation(format!("Keyword '{}' does not exist", keyword)));
                }
                tracing::info!("Admin removed keyword: {}", keyword);
                format!("✅ Removed keyword: {}", keyword)
            }
            AdminCommand::ListKeys => {
                if state.keywords.is_empty() {
                    "🔍 No keywords are being monitored".to_string()
                } else {
                    format!("📝 Monitored keywords:\n{}", bullet_list(state.keywords.iter()))
                }
            }
            AdminCommand::AddGroup(group_id) => {
                if group_id != WHITELIST_ALL && !is_valid_group_id(&group_id) {
                    return Err(CommandError::Validation("Group id must be numeric".to_string()));
                }
                if !state.white_list.insert(group_id.clone()) {
                    return Err(CommandError::Validation(format!("Group {} is already in whitelist", group_id)));
                }
                tracing::info!("Admin whitelisted group: {}", group_id);
                format!("✅ Added group to whitelist: {}", group_id)
            }
            AdminCommand::DelGroup(group_id) => {
                if !state.white_list.remove(&group_id) {
                    return Err(CommandError::Validation(format!("Group {} is not in whitelist", group_id)));
                }
                tracing::info!("Admin removed group from whitelist: {}", group_id);
                format!("✅ Removed group from whitelist: {}", group_id)
            }
            AdminCommand::ListGroups => {
                if state.white_list.is_empty() {
                    "🔍 Whitelist is empty".to_string()
                } else {
                    format!("📝 Whitelisted groups:\n{}", bullet_list(state.white_list.iter()))
                }
            }
            AdminCommand::SetAdmin(id) => {
                let Some(admin) = AdminIdentity::parse(&id) else {
                    return Err(CommandError::Validation("Invalid admin id, expected 5-12 digits".to_string()));
                };
                state.admin_qq = admin;
                tracing::info!("Admin id changed to: {}", id);
                format!("✅ Admin set to: {}", id)
            }
        };
        Ok(reply)
    }

    pub fn get_help(&self) -> String {
        let mut help = "🔑 Keyword monitor commands 🔑\n----------------------".to_string();
        for (i, cmd) in self.registry.all().enumerate() {
            help.push_str(&format!(
                "\n{}. {}: {} {}",
                i + 1,
                cmd.description.as_deref().unwrap_or(&cmd.name),
                self.prefix,
                cmd.usage.as_deref().unwrap_or(&cmd.name),
            ));
        }
        help
    }

    fn invalid_reply(&self) -> String {
        format!("❌ Invalid command or arguments, send {} for help", self.prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|item| format!("• {}", item)).collect::<Vec<_>>().join("\n")
}

fn persist(state: &MonitorState, store: &dyn ConfigStore) {
    if let Err(e) = store.save(state) {
        tracing::error!("Failed to persist monitor state: {}", e);
    }
}
