//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn parse_dir_only() {
    let cli = parse(&["apod", "/tmp/apod"]);
    assert_eq!(cli.image_dir, Path::new("/tmp/apod"));
    assert!(cli.date.is_none());
    assert!(cli.api_key.is_none());
}

#[test]
fn parse_dir_and_date() {
    let cli = parse(&["apod", "/tmp/apod", "2022-01-01"]);
    assert_eq!(cli.image_dir, Path::new("/tmp/apod"));
    assert_eq!(cli.date, Some("2022-01-01".parse().unwrap()));
}

#[test]
fn parse_api_key_flag() {
    let cli = parse(&["apod", "/tmp/apod", "--api-key", "abc123"]);
    assert_eq!(cli.api_key.as_deref(), Some("abc123"));
}

#[test]
fn rejects_malformed_date() {
    assert!(Cli::try_parse_from(["apod", "/tmp/apod", "2022-13-45"]).is_err());
    assert!(Cli::try_parse_from(["apod", "/tmp/apod", "january"]).is_err());
}

#[test]
fn rejects_missing_image_dir_argument() {
    assert!(Cli::try_parse_from(["apod"]).is_err());
}
