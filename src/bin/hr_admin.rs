//! Operator CLI. Bootstraps accounts straight against the configured
//! database, e.g. the first super admin:
//!
//! `hr_admin create-user --email root@example.com --name Root --password 'S3cret!pass' --role super_admin`

use clap::{Arg, ArgMatches, Command};
use hr_portal::config::Config;
use hr_portal::db::{self, enums::UserRole};
use hr_portal::services::AuthService;
use hr_portal::utils::snake_case_key;
use hr_portal::validation::rules::validate_password_strength;

fn cli() -> Command {
    Command::new("hr_admin")
        .about("HR portal administration")
        .subcommand_required(true)
        .subcommand(
            Command::new("create-user")
                .about("Create an account with the given role")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .required(true),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .value_name("ROLE")
                        .help("user, admin or super_admin")
                        .default_value("super_admin"),
                ),
        )
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("--{} is required", name))
}

fn create_user(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let email = arg(matches, "email")?;
    let name = arg(matches, "name")?;
    let password = arg(matches, "password")?;
    let role = snake_case_key(arg(matches, "role")?).parse::<UserRole>()?;

    validate_password_strength(password)
        .map_err(|e| e.message.map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))?;

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database())?;
    let mut conn = pool.get()?;

    let user = AuthService::create_user(&mut conn, email, name, password, role, config.bcrypt_cost)?;
    println!("Created {} account {} ({})", user.role, user.email, user.id);
    Ok(())
}

fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("create-user", sub)) => create_user(sub),
        _ => Err("unknown command".into()),
    };

    if let Err(e) = result {
        eprintln!("hr_admin: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_create_user_args() {
        let matches = cli()
            .try_get_matches_from([
                "hr_admin",
                "create-user",
                "--email",
                "root@example.com",
                "--name",
                "Root",
                "--password",
                "S3cret!pass",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "create-user");
        assert_eq!(arg(sub, "role").unwrap(), "super_admin");
        assert_eq!(
            snake_case_key("superAdmin").parse::<UserRole>().unwrap(),
            UserRole::SuperAdmin
        );
    }
}
