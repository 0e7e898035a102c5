use super::*;

use revdash_core::{SortDirection, SortField};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["revdash"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_stats_and_sync() {
    let cli = Cli::try_parse_from(["revdash", "stats"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Stats)));
    let cli = Cli::try_parse_from(["revdash", "sync"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Sync)));
}

#[test]
fn list_defaults_to_newest_first_on_page_one() {
    let cli = Cli::try_parse_from(["revdash", "reviews", "list"]).unwrap();
    let Some(Commands::Reviews {
        command: ReviewsCommands::List(args),
    }) = cli.command
    else {
        panic!("expected reviews list");
    };
    assert_eq!(args.source, Source::Persisted);
    assert_eq!(args.sort, SortField::SubmittedAt);
    assert_eq!(args.direction, SortDirection::Desc);
    assert_eq!(args.page, 1);
    assert!(args.page_size.is_none());
    assert!(!args.approved_only);
    assert!(args.min_rating.abs() < f64::EPSILON);
}

#[test]
fn list_accepts_filters_and_sort_aliases() {
    let cli = Cli::try_parse_from([
        "revdash",
        "reviews",
        "list",
        "--source",
        "hostaway",
        "--channel",
        "Airbnb",
        "--min-rating",
        "8",
        "--approved-only",
        "--sort",
        "rating",
        "--direction",
        "asc",
        "--page",
        "2",
        "--page-size",
        "5",
    ])
    .unwrap();
    let Some(Commands::Reviews {
        command: ReviewsCommands::List(args),
    }) = cli.command
    else {
        panic!("expected reviews list");
    };
    assert_eq!(args.source, Source::Hostaway);
    assert_eq!(args.channel.as_deref(), Some("Airbnb"));
    assert!((args.min_rating - 8.0).abs() < f64::EPSILON);
    assert!(args.approved_only);
    assert_eq!(args.sort, SortField::AverageRating);
    assert_eq!(args.direction, SortDirection::Asc);
    assert_eq!(args.page, 2);
    assert_eq!(args.page_size, Some(5));
}

#[test]
fn list_rejects_unknown_sort_field() {
    assert!(Cli::try_parse_from(["revdash", "reviews", "list", "--sort", "price"]).is_err());
}

#[test]
fn parses_flag_commands() {
    let cli = Cli::try_parse_from(["revdash", "reviews", "approve", "7453"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            command: ReviewsCommands::Approve { ref id }
        }) if id == "7453"
    ));

    let cli = Cli::try_parse_from(["revdash", "reviews", "unfeature", "7453"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            command: ReviewsCommands::Unfeature { .. }
        })
    ));
}

#[test]
fn save_defaults_flags_to_false() {
    let cli = Cli::try_parse_from(["revdash", "reviews", "save", "r1", "--approved"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            command: ReviewsCommands::Save {
                approved: true,
                featured: false,
                ..
            }
        })
    ));
}

#[test]
fn charts_source_defaults_to_persisted() {
    let cli = Cli::try_parse_from(["revdash", "charts"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Charts {
            source: Source::Persisted
        })
    ));
}

#[test]
fn public_property_is_optional() {
    let cli = Cli::try_parse_from(["revdash", "public"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Public {
            property: None,
            filter: RatingFilterArg::All,
            sort: PublicSortArg::Recent,
            load_more: 0,
        })
    ));

    let cli = Cli::try_parse_from([
        "revdash",
        "public",
        "--property",
        "L1",
        "--filter",
        "9+",
        "--sort",
        "highest",
        "--load-more",
        "2",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Public {
            property: Some(ref property),
            filter: RatingFilterArg::NinePlus,
            sort: PublicSortArg::Highest,
            load_more: 2,
        }) if property == "L1"
    ));
}
