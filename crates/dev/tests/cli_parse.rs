use clap::Parser;
use storefront_dev::cli::Cli;
use storefront_dev::commands::{Commands, ExtensionCommands, ThemeCommands};

#[test]
fn test_parse_serve_flags() {
    let cli = Cli::try_parse_from([
        "storefront",
        "extension",
        "serve",
        "--resource-url=/provided",
        "--tunnel-url=https://tunnel.example.com",
        "--port=4000",
        "--package-manager=npm",
    ])
    .unwrap();

    match cli.command {
        Commands::Extension {
            command:
                ExtensionCommands::Serve {
                    resource_url,
                    tunnel_url,
                    port,
                    shop,
                    package_manager,
                },
        } => {
            assert_eq!(resource_url.as_deref(), Some("/provided"));
            assert_eq!(
                tunnel_url.map(|u| u.to_string()).as_deref(),
                Some("https://tunnel.example.com/")
            );
            assert_eq!(port, Some(4000));
            assert_eq!(shop, None);
            assert_eq!(package_manager.as_deref(), Some("npm"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_create_requires_type_and_title() {
    assert!(Cli::try_parse_from(["storefront", "extension", "create", "my-ext"]).is_err());

    let cli = Cli::try_parse_from([
        "storefront",
        "extension",
        "create",
        "my-ext",
        "--type",
        "CHECKOUT_UI_EXTENSION",
        "--title",
        "My Extension",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Extension {
            command: ExtensionCommands::Create { force: false, .. }
        }
    ));
}

#[test]
fn test_theme_config_defaults_to_development() {
    let cli = Cli::try_parse_from(["storefront", "theme", "config", "--verbose"]).unwrap();
    assert!(cli.verbose);

    match cli.command {
        Commands::Theme {
            command: ThemeCommands::Config { root, environment },
        } => {
            assert_eq!(root, std::path::PathBuf::from("."));
            assert_eq!(environment, "development");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
