use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack and unpack composite resource identifiers
    Id {
        #[command(subcommand)]
        command: IdCommand,
    },
    /// Workspace credential checks
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum IdCommand {
    Pack(PackArgs),
    Unpack(UnpackArgs),
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct FieldNames {
    #[arg(long, default_value = "left_id")]
    pub left_name: String,

    #[arg(long, default_value = "right_id")]
    pub right_name: String,
}

#[derive(clap::Args, Debug)]
pub struct PackArgs {
    #[arg(long)]
    pub left: String,

    #[arg(long)]
    pub right: String,

    /// Resource address; prints an import block instead of the bare ID
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub names: FieldNames,
}

#[derive(clap::Args, Debug)]
pub struct UnpackArgs {
    pub id: String,

    #[command(flatten)]
    pub names: FieldNames,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[arg(long, env = "DATABRICKS_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "DATABRICKS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    fn test_pack_args() {
        let cli = Cli::parse_from(["dbxtf", "id", "pack", "--left=a", "--right=b|c"]);

        if let Command::Id {
            command: IdCommand::Pack(args),
        } = cli.command
        {
            assert_eq!(args.left, "a");
            assert_eq!(args.right, "b|c");
            assert!(args.to.is_none());
            assert_eq!(args.names.left_name, "left_id");
            assert_eq!(args.names.right_name, "right_id");
        } else {
            panic!("Expected Id Pack command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_unpack_args_with_field_names() {
        let cli = Cli::parse_from([
            "dbxtf",
            "id",
            "unpack",
            "scope|users",
            "--left-name=scope",
            "--right-name=principal",
        ]);

        if let Command::Id {
            command: IdCommand::Unpack(args),
        } = cli.command
        {
            assert_eq!(args.id, "scope|users");
            assert_eq!(args.names.left_name, "scope");
            assert_eq!(args.names.right_name, "principal");
        } else {
            panic!("Expected Id Unpack command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_pack_requires_both_parts() {
        let result = Cli::try_parse_from(["dbxtf", "id", "pack", "--left=a"]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_check_args_from_env() {
        let host_backup = std::env::var("DATABRICKS_HOST").ok();
        let token_backup = std::env::var("DATABRICKS_TOKEN").ok();
        unsafe {
            std::env::set_var("DATABRICKS_HOST", "env.example.com");
            std::env::set_var("DATABRICKS_TOKEN", "env_token");
        }

        let cli = Cli::parse_from(["dbxtf", "auth", "check"]);

        unsafe {
            match host_backup {
                Some(host) => std::env::set_var("DATABRICKS_HOST", host),
                None => std::env::remove_var("DATABRICKS_HOST"),
            }
            match token_backup {
                Some(token) => std::env::set_var("DATABRICKS_TOKEN", token),
                None => std::env::remove_var("DATABRICKS_TOKEN"),
            }
        }

        if let Command::Auth {
            command: AuthCommand::Check(args),
        } = cli.command
        {
            assert_eq!(args.host, Some("env.example.com".to_string()));
            assert_eq!(args.token, Some("env_token".to_string()));
        } else {
            panic!("Expected Auth Check command, got {:?}", cli.command);
        }
    }

    #[test]
    #[serial]
    fn test_token_flag_takes_precedence_over_env() {
        let token_backup = std::env::var("DATABRICKS_TOKEN").ok();
        unsafe {
            std::env::set_var("DATABRICKS_TOKEN", "env_token");
        }

        let cli = Cli::parse_from(["dbxtf", "auth", "check", "--token=cli_token"]);

        unsafe {
            match token_backup {
                Some(token) => std::env::set_var("DATABRICKS_TOKEN", token),
                None => std::env::remove_var("DATABRICKS_TOKEN"),
            }
        }

        if let Command::Auth {
            command: AuthCommand::Check(args),
        } = cli.command
        {
            assert_eq!(args.token, Some("cli_token".to_string()));
        } else {
            panic!("Expected Auth Check command, got {:?}", cli.command);
        }
    }
}
