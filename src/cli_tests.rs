//! Unit tests for CLI argument parsing.

use super::*;
use clap::CommandFactory;
use rstest::rstest;

#[test]
fn cli_structure_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn bare_invocation_defaults_to_build() {
    let cli = Cli::parse_from(["pyext-build"]);
    assert!(cli.command.is_none());
    let args = cli.build_args();
    assert!(args.manifest.is_none());
    assert!(!args.dry_run);
    assert!(!args.quiet);
    assert_eq!(args.verbosity, 0);
}

#[test]
fn build_subcommand_matches_bare_invocation() {
    let bare = Cli::parse_from(["pyext-build", "--cc", "clang"]);
    let sub = Cli::parse_from(["pyext-build", "build", "--cc", "clang"]);
    assert_eq!(bare.build_args().cc, sub.build_args().cc);
}

#[test]
fn manifest_flag_is_parsed() {
    let cli = Cli::parse_from(["pyext-build", "--manifest", "bindings/extension.toml"]);
    assert_eq!(
        cli.build_args().manifest.as_deref(),
        Some(camino::Utf8Path::new("bindings/extension.toml"))
    );
}

#[rstest]
#[case::single(&["pyext-build", "-v"], 1)]
#[case::double(&["pyext-build", "-vv"], 2)]
fn verbosity_is_counted(#[case] argv: &[&str], #[case] expected: u8) {
    let cli = Cli::parse_from(argv);
    assert_eq!(cli.build_args().verbosity, expected);
}

#[test]
fn quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["pyext-build", "-q", "-v"]);
    assert!(result.is_err());
}

#[test]
fn list_subcommand_parses_json_flag() {
    let cli = Cli::parse_from(["pyext-build", "list", "--json"]);
    match cli.command {
        Some(Command::List(args)) => assert!(args.json),
        other => panic!("expected list subcommand, got {other:?}"),
    }
}

#[test]
fn list_subcommand_accepts_install_dir() {
    let cli = Cli::parse_from(["pyext-build", "list", "--install-dir", "dist"]);
    match cli.command {
        Some(Command::List(args)) => {
            assert_eq!(
                args.install_dir.as_deref(),
                Some(camino::Utf8Path::new("dist"))
            );
        }
        other => panic!("expected list subcommand, got {other:?}"),
    }
}
