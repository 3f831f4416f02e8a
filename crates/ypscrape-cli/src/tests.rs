use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["ypscrape"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["ypscrape", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Run)));
}

#[test]
fn parses_init_command() {
    let cli = Cli::try_parse_from(["ypscrape", "init"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Init)));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["ypscrape", "scrape"]).is_err());
}

#[test]
fn search_parameters_are_not_flags() {
    assert!(Cli::try_parse_from(["ypscrape", "run", "--search-terms", "plumbers"]).is_err());
}
