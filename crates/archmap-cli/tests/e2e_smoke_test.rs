use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use archmap_cli::{Args, CliError, ViewSelection, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn script_only_args(input: &Path, output_dir: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        view: ViewSelection::All,
        service: None,
        system: None,
        output_dir: output_dir.to_string_lossy().to_string(),
        script_only: true,
        timeout: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_toml_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_dir = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().to_string());
        let args = script_only_args(demo_path, &output_dir);

        match run(&args) {
            Ok(()) => {
                let overview = output_dir.join("overview.d2");
                let script = fs::read_to_string(&overview).unwrap_or_default();
                if script.is_empty() {
                    failed_demos.push((demo_path.clone(), "empty overview".to_string()));
                }
                if output_dir.join("overview.svg").exists() {
                    failed_demos.push((demo_path.clone(), "rendered despite --script-only".to_string()));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_toml_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let args = script_only_args(demo_path, temp_dir.path());

        match run(&args) {
            Err(CliError::Schema(_)) => {}
            _ => unexpectedly_succeeded.push(demo_path.clone()),
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that did not fail with a schema error:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_shop_writes_every_view() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = script_only_args(&demos_path().join("shop.toml"), temp_dir.path());

    run(&args).expect("shop demo should succeed");

    for stem in [
        "overview",
        "service-storefront",
        "service-orders",
        "service-catalog",
        "service-payments",
        "service-ledger",
        "service-shipping",
        "system-commerce",
        "system-finance",
        "system-fulfillment",
    ] {
        let path = temp_dir.path().join(format!("{stem}.d2"));
        assert!(path.is_file(), "missing {}", path.display());
    }

    let overview = fs::read_to_string(temp_dir.path().join("overview.d2")).unwrap();
    assert!(overview.contains("Online Shop"));
    assert!(overview.contains("label: \"Commerce\""));
    assert!(overview.contains(
        "\"archmap-cluster-0\".\"Orders\" -> \"archmap-cluster-1\".\"Payments\": \"requests (gRPC)\""
    ));

    let orders = fs::read_to_string(temp_dir.path().join("service-orders.d2")).unwrap();
    assert!(orders.contains("orders: OrderPlaced"));
    assert!(!orders.contains("Card Processor"));
}

#[test]
fn e2e_single_service_view() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = script_only_args(&demos_path().join("shop.toml"), temp_dir.path());
    args.view = ViewSelection::Service;
    args.service = Some("Payments".to_string());

    run(&args).expect("single service view should succeed");

    let written: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(written, vec!["service-payments.d2"]);
}

#[test]
fn e2e_unknown_system() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = script_only_args(&demos_path().join("shop.toml"), temp_dir.path());
    args.view = ViewSelection::System;
    args.system = Some("Marketing".to_string());

    let result = run(&args);

    assert!(matches!(result, Err(CliError::UnknownSystem(_))));
}

#[test]
fn e2e_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = script_only_args(&temp_dir.path().join("absent.toml"), temp_dir.path());

    assert!(matches!(run(&args), Err(CliError::Io(_))));
}
