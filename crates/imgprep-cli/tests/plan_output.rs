use std::process::Command;

#[test]
fn test_plan_stdout_holds_only_plan_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output_dir = temp_dir.path().join("images");

    let output = Command::new(env!("CARGO_BIN_EXE_imgprep"))
        .args(["-v", "plan", "-q", "Zen Garden", "-o"])
        .arg(&output_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run imgprep");

    assert!(output.status.success(), "plan should succeed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![format!(
            "1\tZen Garden\thttps://source.unsplash.com/featured/?restaurant,zen-garden,kenya\t{}",
            output_dir.join("restaurant1.jpg").display()
        )]
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("Planned 1 downloads"),
        "debug logs should go to stderr, got: {stderr}"
    );
}
