pub mod heroes_command;
