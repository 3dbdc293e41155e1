//! Conversions between the `Command` entity and its DTOs.
//!
//! One conversion per (source, target) pair. All of them copy fields
//! verbatim; none touch the store.

use crate::models::command::{
    Command, CommandCreateDto, CommandReadDto, CommandUpdateDto, NewCommand,
};

impl From<Command> for CommandReadDto {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            how_to: command.how_to,
            platform: command.platform,
            command_line: command.command_line,
        }
    }
}

impl From<CommandCreateDto> for NewCommand {
    fn from(dto: CommandCreateDto) -> Self {
        Self {
            how_to: dto.how_to,
            platform: dto.platform,
            command_line: dto.command_line,
        }
    }
}

/// Seeds a patch document from the current state of a record.
impl From<&Command> for CommandUpdateDto {
    fn from(command: &Command) -> Self {
        Self {
            how_to: command.how_to.clone(),
            platform: command.platform.clone(),
            command_line: command.command_line.clone(),
        }
    }
}

impl CommandUpdateDto {
    /// Overwrite the mutable fields of `command` in place. The id is kept.
    pub fn merge_into(self, command: &mut Command) {
        command.how_to = self.how_to;
        command.platform = self.platform;
        command.command_line = self.command_line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Command {
        Command {
            id: 3,
            how_to: "How to generate a migration".into(),
            platform: ".Net Core EF".into(),
            command_line: "dotnet ef migrations add <Name>".into(),
        }
    }

    #[test]
    fn entity_to_read_dto_copies_all_fields() {
        let dto = CommandReadDto::from(sample());
        assert_eq!(dto.id, 3);
        assert_eq!(dto.how_to, "How to generate a migration");
        assert_eq!(dto.platform, ".Net Core EF");
        assert_eq!(dto.command_line, "dotnet ef migrations add <Name>");
    }

    #[test]
    fn read_dto_fields_round_trip_through_create() {
        let read = CommandReadDto::from(sample());
        let create = CommandCreateDto {
            how_to: read.how_to.clone(),
            platform: read.platform.clone(),
            command_line: read.command_line.clone(),
        };
        let staged = NewCommand::from(create);

        let original = sample();
        assert_eq!(staged.how_to, original.how_to);
        assert_eq!(staged.platform, original.platform);
        assert_eq!(staged.command_line, original.command_line);
    }

    #[test]
    fn merge_replaces_mutable_fields_and_keeps_id() {
        let mut command = sample();
        CommandUpdateDto {
            how_to: "List files".into(),
            platform: "Linux".into(),
            command_line: "ls -la".into(),
        }
        .merge_into(&mut command);

        assert_eq!(
            command,
            Command {
                id: 3,
                how_to: "List files".into(),
                platform: "Linux".into(),
                command_line: "ls -la".into(),
            }
        );
    }

    #[test]
    fn update_dto_seeded_from_entity_merges_back_unchanged() {
        let mut command = sample();
        CommandUpdateDto::from(&command).merge_into(&mut command);
        assert_eq!(command, sample());
    }
}
