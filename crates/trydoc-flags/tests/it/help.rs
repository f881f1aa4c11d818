use expect_test::expect;

use crate::{args, check, tree};

#[test]
fn subcommand_help() {
    for line in ["pack --help", "help pack", "pack -h missing-dir"] {
        check(
            line,
            expect![[r#"
                trydoc pack
                  Create a package.

                  ARGS:
                    <pack_target>
                      Directory to pack.

                  OPTIONS:
                    -h, --help
                      Prints help information.
            "#]],
        );
    }
}

#[test]
fn hidden_commands_are_not_listed() {
    let help = trydoc_flags::help(&tree::tree(), &[]);
    assert!(help.starts_with("trydoc\n  Try out documentation.\n"));
    assert!(help.contains("\ntrydoc list-packages\n"));
    assert!(help.contains("\ntrydoc install\n"));
    assert!(!help.contains("hosted"), "{help}");
    assert!(!help.contains("--production"), "{help}");
}

#[test]
fn hidden_command_help_on_request() {
    check(
        "hosted --help",
        expect![[r#"
            trydoc hosted

              OPTIONS:
                --id <string>

                --production

                --language-service

                -k, --key <string>

                --ai-key, --application-insights-key <string>

                --region-id <string>

                --log-to-file

                -h, --help
                  Prints help information.
        "#]],
    );
}

#[test]
fn root_help_lists_options() {
    let err = trydoc_flags::parse(&tree::tree(), args("--help")).unwrap_err();
    let help = err.to_string();
    assert!(help.contains("ARGS:\n    [root_directory]\n      Directory to serve.\n"), "{help}");
    assert!(help.contains("    --add-source <directory>\n      Extra package source.\n"), "{help}");
    assert!(help.contains("    --uri <uri>\n      Uri to open.\n"), "{help}");
    assert!(help.contains("SUBCOMMANDS:"), "{help}");
}
