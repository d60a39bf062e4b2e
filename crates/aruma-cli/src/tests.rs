use super::*;

#[test]
fn parses_collect_with_source_filter() {
    let cli = Cli::try_parse_from(["aruma-cli", "collect", "--source", "tiktok"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Collect { source, dry_run }) => {
            assert_eq!(source.as_deref(), Some("tiktok"));
            assert!(!dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_collect_dry_run() {
    let cli =
        Cli::try_parse_from(["aruma-cli", "collect", "--dry-run"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Collect {
            source: None,
            dry_run: true
        })
    ));
}

#[test]
fn parses_report_json_flag() {
    let cli =
        Cli::try_parse_from(["aruma-cli", "report", "--json"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Report { json: true })));
}

#[test]
fn report_defaults_to_table_output() {
    let cli = Cli::try_parse_from(["aruma-cli", "report"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Report { json: false })));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["aruma-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["aruma-cli", "harvest"]).is_err());
}
