//! The `exambank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("exambank.toml").exists() {
        println!("exambank.toml already exists, skipping.");
    } else {
        std::fs::write("exambank.toml", SAMPLE_CONFIG)?;
        println!("Created exambank.toml");
    }

    std::fs::create_dir_all("documents")?;
    let sample_path = std::path::Path::new("documents/sample-questions.txt");
    if sample_path.exists() {
        println!("documents/sample-questions.txt already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_DOCUMENT)?;
        println!("Created documents/sample-questions.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit exambank.toml with your platform URL");
    println!(
        "  2. Run: exambank parse --file documents/sample-questions.txt \
         --subject Mathematics --level \"Form 1\" --output batch.json"
    );
    println!("  3. Run: exambank review list --batch batch.json");
    println!("  4. Run: exambank submit --batch batch.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# exambank configuration

subjects = ["Mathematics", "English", "Physics", "Chemistry", "Biology"]
levels = ["Form 1", "Form 2", "Form 3", "Form 4"]
pass_threshold = 75.0
output_dir = "./exambank-batches"

[api]
# May reference environment variables, e.g. "http://${EXAMBANK_HOST}/api/v1"
base_url = "http://localhost:3030/api/v1"
timeout_secs = 30
"#;

const SAMPLE_DOCUMENT: &str = "\
Number each question, list options A to D and put * after the correct one.
Give the topic on a line starting with T.

1. What is 2+2?
A. 3
B. 4*
C. 5
D. 6
T. Arithmetic

2. Solve for x: 2x + 5 = 13
A. 3
B. 4*
C. 5
D. 9
T. Linear Equations

3. How many sides does a hexagon have?
A. 5
B. 6*
C. 7
T. Geometry
";
