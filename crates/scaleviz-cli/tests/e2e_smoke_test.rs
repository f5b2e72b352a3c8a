use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tempfile::tempdir;

use scaleviz::OutputFormat;
use scaleviz_cli::{
    Args, completion_message,
    diagrams::{Generator, HpaVsVpa, VpaArchitecture},
    run,
};

fn args(output_dir: &Path, formats: Vec<OutputFormat>) -> Args {
    Args {
        output_dir: output_dir.to_path_buf(),
        formats,
        config: None,
        log_level: "off".to_string(),
    }
}

fn listing(dir: &Path) -> BTreeSet<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to read output directory")
        .flatten()
        .map(|entry| entry.path())
        .collect()
}

fn graphviz_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[test]
fn e2e_smoke_test_hpa_vs_vpa() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = run(&args(temp_dir.path(), vec![OutputFormat::Dot]), &HpaVsVpa)
        .expect("HPA vs VPA should render");

    let path = temp_dir.path().join("hpa_vs_vpa_simple.dot");
    assert_eq!(output.files(), [path.clone()]);

    let source = fs::read_to_string(&path).expect("Failed to read output");
    assert!(!source.is_empty());
    assert!(source.contains("rankdir=\"LR\""));
    assert_eq!(source.matches("subgraph cluster_").count(), 6);
    assert_eq!(source.matches(" -> ").count(), 2);
    assert!(source.contains("Adds More Pods →"));
    assert!(source.contains("Increases Resources →"));
}

#[test]
fn e2e_smoke_test_vpa_architecture() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = run(&args(temp_dir.path(), vec![OutputFormat::Dot]), &VpaArchitecture)
        .expect("VPA architecture should render");

    let path = temp_dir.path().join("vpa_architecture.dot");
    assert_eq!(output.primary(), Some(path.as_path()));
    assert!(temp_dir.path().join("custom_icons").is_dir());

    let source = fs::read_to_string(&path).expect("Failed to read output");
    assert!(source.contains("rankdir=\"TB\""));
    assert!(source.contains("ranksep=\"1.0\""));
    assert_eq!(source.matches("subgraph cluster_").count(), 7);
    assert_eq!(source.matches(" -> ").count(), 11);
    assert_eq!(source.matches("Usage Metrics").count(), 2);
    assert!(source.contains("Target: 25m CPU\\n250Mi Memory"));
}

#[test]
fn e2e_smoke_test_existing_icons_directory_is_kept() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let icons = temp_dir.path().join("custom_icons");
    fs::create_dir(&icons).unwrap();
    fs::write(icons.join("keep.png"), b"icon").unwrap();

    run(&args(temp_dir.path(), vec![OutputFormat::Dot]), &VpaArchitecture)
        .expect("VPA architecture should render");

    assert_eq!(fs::read(icons.join("keep.png")).unwrap(), b"icon");
}

#[test]
fn e2e_smoke_test_rerun_overwrites() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let generators: [&dyn Generator; 2] = [&HpaVsVpa, &VpaArchitecture];

    for generator in generators {
        run(&args(temp_dir.path(), vec![OutputFormat::Dot]), generator).unwrap();
    }
    let first = listing(temp_dir.path());
    let first_source = fs::read_to_string(temp_dir.path().join("vpa_architecture.dot")).unwrap();

    for generator in generators {
        run(&args(temp_dir.path(), vec![OutputFormat::Dot]), generator).unwrap();
    }
    assert_eq!(listing(temp_dir.path()), first);
    assert_eq!(first.len(), 3, "two diagrams and the icons directory");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("vpa_architecture.dot")).unwrap(),
        first_source
    );
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args {
        config: Some(temp_dir.path().join("absent.toml").display().to_string()),
        ..args(temp_dir.path(), vec![OutputFormat::Dot])
    };

    assert!(run(&args, &HpaVsVpa).is_err());
    assert!(listing(temp_dir.path()).is_empty());
}

#[test]
fn e2e_smoke_test_png_output() {
    if !graphviz_available() {
        eprintln!("Graphviz `dot` not found, skipping PNG rendering");
        return;
    }

    let temp_dir = tempdir().expect("Failed to create temp directory");
    let generators: [&dyn Generator; 2] = [&HpaVsVpa, &VpaArchitecture];

    for generator in generators {
        let output = run(&args(temp_dir.path(), Vec::new()), generator)
            .unwrap_or_else(|err| panic!("{} failed: {err}", generator.purpose()));
        let png = output.primary().expect("a file was written");

        let bytes = fs::read(png).expect("Failed to read PNG");
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", png.display());
    }

    let hpa = run(&args(temp_dir.path(), Vec::new()), &HpaVsVpa).unwrap();
    assert_eq!(
        completion_message(HpaVsVpa.purpose(), &hpa),
        "✅ HPA vs VPA diagram generated: hpa_vs_vpa_simple.png"
    );
    let vpa = run(&args(temp_dir.path(), Vec::new()), &VpaArchitecture).unwrap();
    assert_eq!(
        completion_message(VpaArchitecture.purpose(), &vpa),
        "✅ VPA architecture diagram generated: vpa_architecture.png"
    );
}

fn run_binary(binary: &str, output_dir: &Path) -> std::process::Output {
    Command::new(binary)
        .current_dir(output_dir)
        .env_remove("RUST_LOG")
        .args(["--output-dir", ".", "--format", "dot"])
        .output()
        .expect("Failed to launch generator")
}

#[test]
fn e2e_smoke_test_binaries_print_one_completion_line() {
    let cases = [
        (
            env!("CARGO_BIN_EXE_hpa-vs-vpa"),
            "hpa_vs_vpa_simple.dot",
            "✅ HPA vs VPA diagram generated: hpa_vs_vpa_simple.dot",
        ),
        (
            env!("CARGO_BIN_EXE_vpa-architecture"),
            "vpa_architecture.dot",
            "✅ VPA architecture diagram generated: vpa_architecture.dot",
        ),
    ];

    for (binary, file_name, expected) in cases {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let output = run_binary(binary, temp_dir.path());

        assert!(output.status.success(), "{binary} exited with {}", output.status);
        let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
        let lines: Vec<_> = stdout.lines().collect();
        assert_eq!(lines, [expected]);
        assert!(output.stderr.is_empty(), "nothing on stderr at the default log level");

        let written = temp_dir.path().join(file_name);
        assert!(fs::metadata(written).expect("file written before exit").len() > 0);
    }
}

#[test]
fn e2e_smoke_test_binary_failure_exits_with_status_one() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = Command::new(env!("CARGO_BIN_EXE_hpa-vs-vpa"))
        .current_dir(temp_dir.path())
        .args(["--format", "dot", "--config", "absent.toml"])
        .output()
        .expect("Failed to launch generator");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing configuration file"));
}

#[test]
fn e2e_smoke_test_new_output_directory_for_both_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let generators: [&dyn Generator; 2] = [&HpaVsVpa, &VpaArchitecture];

    for generator in generators {
        let output_dir = temp_dir.path().join(generator.purpose().replace(' ', "_"));
        let output = run(&args(&output_dir, vec![OutputFormat::Dot]), generator)
            .unwrap_or_else(|err| panic!("{} failed: {err}", generator.purpose()));
        assert!(output.primary().is_some_and(Path::is_file));
    }
}
